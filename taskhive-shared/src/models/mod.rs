/// Database models for TaskHive
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: user accounts and authentication data
/// - `task`: personal tasks, strictly owner-scoped
/// - `team`: teams created by a user
/// - `membership`: user-team relationships with roles
///
/// # Example
///
/// ```no_run
/// use taskhive_shared::models::user::{CreateUser, User};
/// use taskhive_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     first_name: "John".to_string(),
///     last_name: "Doe".to_string(),
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod membership;
pub mod task;
pub mod team;
pub mod user;
