/// Authentication and authorization utilities
///
/// This module provides secure authentication primitives for TaskHive:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Axum middleware that turns a bearer token into an [`middleware::AuthContext`]
/// - [`authorization`]: team membership and admin-role checks
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with a fixed 24-hour expiration
/// - **Constant-time Comparison**: password verification uses constant-time operations

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
