use crate::config::ServerConfig;
use crate::http::{collect_body, HttpResponse};
use crate::routing::Router;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// HTTP/1 server: accepts connections and hands each one to its own task
pub struct Server {
    router: Arc<Router>,
    host: String,
    port: u16,
    max_body_size: usize,
}

impl Server {
    pub fn with_config(router: impl Into<Router>, config: ServerConfig) -> Self {
        Self {
            router: Arc::new(router.into()),
            host: config.host,
            port: config.port,
            max_body_size: config.max_body_size,
        }
    }

    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Bind the configured address and serve until the process exits
    ///
    /// A bind failure is returned to the caller; nothing else stops the loop.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let local_addr = listener.local_addr()?;
        tracing::info!("listening on http://{}", local_addr);

        let router = self.router;
        let max_body_size = self.max_body_size;

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    tracing::warn!("failed to accept connection: {}", err);
                    continue;
                }
            };
            let io = TokioIo::new(stream);
            let router = router.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let router = router.clone();
                    async move {
                        Ok::<_, Infallible>(handle_request(router, max_body_size, req).await)
                    }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::warn!("error serving connection from {}: {:?}", peer, err);
                }
            });
        }
    }
}

async fn handle_request(
    router: Arc<Router>,
    max_body_size: usize,
    req: hyper::Request<hyper::body::Incoming>,
) -> hyper::Response<Full<Bytes>> {
    let started = Instant::now();
    tracing::info!("{} {}", req.method(), req.uri());

    let (parts, body) = req.into_parts();
    let response = match collect_body(body, max_body_size).await {
        Ok(bytes) => router.dispatch(hyper::Request::from_parts(parts, bytes)).await,
        Err(err) => HttpResponse::from(err),
    };

    tracing::debug!(
        status = response.status_code(),
        "finished processing request in {:?}",
        started.elapsed()
    );
    response.into_hyper()
}
