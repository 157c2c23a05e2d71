use kit::{route, AppError, HttpResponse, Request, Response};

use crate::models::UserInput;
use crate::store::UserStore;

/// Parse the `{id}` path segment
///
/// Accepts an optional sign, so `+1` is user 1 and `-1` is a valid (never
/// assigned) id.
pub fn user_id(req: &Request) -> Result<i64, AppError> {
    let raw = req
        .param("id")
        .map_err(|_| AppError::bad_request("User ID is missing"))?;
    raw.parse()
        .map_err(|_| AppError::bad_request("Invalid user ID"))
}

fn not_found() -> AppError {
    AppError::not_found("User not found")
}

/// POST /users
pub async fn store(req: Request) -> Response {
    let input: UserInput = req.json()?;
    let users = req.state::<UserStore>()?;

    let user = users.append(input);
    tracing::info!(id = user.id, "created user");

    let mut response = HttpResponse::json_from(&user)?.status(201);
    if let Some(location) = route("users.show", &[("id", &user.id.to_string())]) {
        response = response.header("Location", location);
    }
    Ok(response)
}

/// GET /users
pub async fn index(req: Request) -> Response {
    let users = req.state::<UserStore>()?;
    HttpResponse::json_from(&users.list_all())?.ok()
}

/// GET /users/{id}
pub async fn show(req: Request) -> Response {
    let id = user_id(&req)?;
    let users = req.state::<UserStore>()?;

    let user = users.find(id).ok_or_else(not_found)?;
    HttpResponse::json_from(&user)?.ok()
}

/// PUT /users/{id}
pub async fn update(req: Request) -> Response {
    let id = user_id(&req)?;
    let input: UserInput = req.json()?;
    let users = req.state::<UserStore>()?;

    let user = users.update(id, input).ok_or_else(not_found)?;
    tracing::info!(id, "updated user");
    HttpResponse::json_from(&user)?.ok()
}

/// DELETE /users/{id}
pub async fn destroy(req: Request) -> Response {
    let id = user_id(&req)?;
    let users = req.state::<UserStore>()?;

    users.remove(id).ok_or_else(not_found)?;
    tracing::info!(id, "deleted user");
    HttpResponse::no_content().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::collections::HashMap;

    fn request_with_id(id: Option<&str>) -> Request {
        let inner = hyper::Request::builder()
            .uri("/users/x")
            .body(Bytes::new())
            .unwrap();
        let params: HashMap<String, String> = id
            .map(|id| [("id".to_string(), id.to_string())].into_iter().collect())
            .unwrap_or_default();
        Request::new(inner).with_params(params)
    }

    #[test]
    fn test_user_id_parses_signed_integers() {
        assert_eq!(user_id(&request_with_id(Some("42"))), Ok(42));
        assert_eq!(user_id(&request_with_id(Some("+7"))), Ok(7));
        assert_eq!(user_id(&request_with_id(Some("-1"))), Ok(-1));
    }

    #[test]
    fn test_user_id_rejects_non_numeric() {
        assert_eq!(
            user_id(&request_with_id(Some("abc"))),
            Err(AppError::bad_request("Invalid user ID"))
        );
    }

    #[test]
    fn test_user_id_missing() {
        assert_eq!(
            user_id(&request_with_id(None)),
            Err(AppError::bad_request("User ID is missing"))
        );
    }
}
