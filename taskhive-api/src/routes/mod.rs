/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, profile update)
/// - `tasks`: Owner-scoped task CRUD
/// - `teams`: Team creation and membership management

pub mod auth;
pub mod health;
pub mod tasks;
pub mod teams;

use serde::{Deserialize, Serialize};

/// Plain confirmation body used by delete/remove endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
