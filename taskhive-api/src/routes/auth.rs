/// Authentication endpoints
///
/// This module provides user authentication endpoints:
///
/// - `POST /auth/register` - Register a new user
/// - `POST /auth/login` - Login and get a token
/// - `PATCH /auth/profile` - Update name and/or password (bearer token)
///
/// Login failures for unknown emails and wrong passwords return the same
/// message so callers cannot enumerate registered addresses.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::user::{CreateUser, PublicUser, UpdateUser, User},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Given name
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    /// Family name
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token, valid for 24 hours
    pub token: String,

    /// Public projection of the authenticated user
    pub user: PublicUser,
}

/// Profile update request
///
/// Every field is optional; only provided fields are applied. Changing the
/// password requires both `currentPassword` and `newPassword`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New given name
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    /// New family name
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    /// Current password, verified before any password change
    pub current_password: Option<String>,

    /// Replacement password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: Option<String>,
}

/// Profile update response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Public projection of the updated user
    pub user: PublicUser,
}

/// Register a new user
///
/// # Errors
///
/// - `400` validation failed, or email already registered
/// - `500` server error
///
/// The unique constraint on `users.email` settles concurrent registrations
/// for the same address; the pre-flight lookup only gives a friendlier error
/// on the common path.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    req.validate().map_err(ApiError::from_validation)?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

/// Login and issue a token
///
/// # Errors
///
/// - `400` validation failed
/// - `401` unknown email or wrong password (same message for both)
/// - `500` server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let claims = jwt::Claims::new(user.id, user.email.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// Update the authenticated user's profile
///
/// Applies name changes and, when both `currentPassword` and `newPassword`
/// are present, replaces the password hash after verifying the current
/// password. The user id comes from the verified token, never the body.
///
/// # Errors
///
/// - `400` validation failed
/// - `401` current password does not match
/// - `404` token subject no longer exists
/// - `500` server error
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = User::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let mut update = UpdateUser {
        first_name: req.first_name,
        last_name: req.last_name,
        password_hash: None,
    };

    if let (Some(current), Some(new)) = (&req.current_password, &req.new_password) {
        let valid = password::verify_password(current, &user.password_hash)?;
        if !valid {
            return Err(ApiError::Unauthorized(
                "Current password is incorrect".to_string(),
            ));
        }
        update.password_hash = Some(password::hash_password(new)?);
    }

    let updated = if update.is_empty() {
        user
    } else {
        User::update(&state.db, auth.user_id, update)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
    };

    tracing::info!(user_id = %updated.id, "Profile updated");

    Ok(Json(ProfileResponse {
        user: PublicUser::from(&updated),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid: RegisterRequest = serde_json::from_str(
            r#"{"firstName": "Ada", "lastName": "Lovelace",
                "email": "ada@example.com", "password": "correcthorse"}"#,
        )
        .unwrap();
        assert!(valid.validate().is_ok());

        let bad_email: RegisterRequest = serde_json::from_str(
            r#"{"firstName": "Ada", "lastName": "Lovelace",
                "email": "not-an-email", "password": "correcthorse"}"#,
        )
        .unwrap();
        assert!(bad_email.validate().is_err());

        let short_password: RegisterRequest = serde_json::from_str(
            r#"{"firstName": "Ada", "lastName": "Lovelace",
                "email": "ada@example.com", "password": "short"}"#,
        )
        .unwrap();
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_register_request_uses_camel_case() {
        // snake_case keys must not deserialize
        let result: Result<RegisterRequest, _> = serde_json::from_str(
            r#"{"first_name": "Ada", "last_name": "Lovelace",
                "email": "ada@example.com", "password": "correcthorse"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_profile_request_all_optional() {
        let empty: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.validate().is_ok());
        assert!(empty.first_name.is_none());
        assert!(empty.current_password.is_none());

        let rename: UpdateProfileRequest =
            serde_json::from_str(r#"{"firstName": "Grace"}"#).unwrap();
        assert_eq!(rename.first_name.as_deref(), Some("Grace"));
    }
}
