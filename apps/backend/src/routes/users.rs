//! User registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{RegisterRequest, RegisterResponse, UserStatusResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/users/register
/// Creates a new user and returns its bearer token.
/// The body is optional; a missing or unreadable body registers an unnamed user.
pub async fn register(
    State(state): State<AppState>,
    payload: Option<Json<RegisterRequest>>,
) -> Result<Json<RegisterResponse>> {
    let name = payload.and_then(|Json(p)| p.name);
    let user = state.db.create_user(name.as_deref()).await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(RegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/users/me
pub async fn me(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<UserStatusResponse>> {
    let user = state
        .db
        .get_user_by_token(&auth.token)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserStatusResponse {
        user_id: user.id,
        name: user.name,
        last_seen_at: user.last_seen_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::{FromRequest, Request},
    };

    async fn extract(request: Request) -> Option<Json<RegisterRequest>> {
        Option::<Json<RegisterRequest>>::from_request(request, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_body_is_optional() {
        let request = Request::builder()
            .method("POST")
            .body(Body::empty())
            .unwrap();
        assert!(extract(request).await.is_none());
    }

    #[tokio::test]
    async fn test_register_reads_name() {
        let request = Request::builder()
            .method("POST")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"name": "ada"}"#))
            .unwrap();
        let Json(payload) = extract(request).await.unwrap();
        assert_eq!(payload.name.as_deref(), Some("ada"));
    }
}
