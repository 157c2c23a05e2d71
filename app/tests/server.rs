use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use kit::{Server, ServerConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use users_api::models::User;
use users_api::{probe, routes};

async fn spawn_server(max_body_size: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ServerConfig::builder()
        .host("127.0.0.1")
        .port(addr.port())
        .max_body_size(max_body_size)
        .build();

    tokio::spawn(Server::with_config(routes::router(), config).serve(listener));
    addr
}

async fn post(addr: SocketAddr, body: &str) -> (u16, Bytes) {
    let client = Client::builder(TokioExecutor::new()).build_http::<Full<Bytes>>();
    let request = hyper::Request::post(format!("http://{}/users", addr))
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap();

    let response = client.request(request).await.unwrap();
    let status = response.status().as_u16();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn serves_crud_over_tcp() {
    let addr = spawn_server(1024 * 1024).await;

    assert_eq!(
        probe::trigger_get(&format!("http://{}/users", addr)).await.unwrap(),
        "[]"
    );

    let (status, body) = post(addr, r#"{"name":"A","email":"a@x.com","password":"p"}"#).await;
    assert_eq!(status, 201);
    let created: User = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.id, 1);

    let listed = probe::trigger_get(&format!("http://{}/users", addr))
        .await
        .unwrap();
    let users: Vec<User> = serde_json::from_str(&listed).unwrap();
    assert_eq!(users, vec![created]);
}

#[tokio::test]
async fn oversized_body_is_413() {
    let addr = spawn_server(16).await;

    let (status, _) = post(addr, r#"{"name":"a name that is far too long"}"#).await;
    assert_eq!(status, 413);
}
