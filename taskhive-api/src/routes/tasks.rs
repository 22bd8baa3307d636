/// Task endpoints
///
/// Owner-scoped CRUD over personal tasks. Every query is filtered by the
/// authenticated user's id, so another user's task responds with 404 — not
/// 403 — and existence is never leaked.
///
/// # Endpoints
///
/// - `POST   /tasks` - Create a task
/// - `GET    /tasks` - List own tasks (newest first)
/// - `GET    /tasks/:id` - Fetch one task
/// - `PATCH  /tasks/:id` - Apply a partial update
/// - `DELETE /tasks/:id` - Hard-delete a task

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, Task, TaskPatch, TaskPriority, TaskStatus},
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status (defaults to todo)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (defaults to medium)
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional deadline
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update request; only provided fields are applied
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// New deadline (absent = unchanged)
    pub deadline: Option<DateTime<Utc>>,
}

/// Task as it appears on the wire (camelCase field names)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub deadline: Option<DateTime<Utc>>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            deadline: task.deadline,
            user_id: task.user_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Envelope for create/update responses
#[derive(Debug, Serialize)]
pub struct TaskBody {
    pub task: TaskResponse,
}

/// Create a task owned by the authenticated user
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskBody>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            deadline: req.deadline,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskBody { task: task.into() }),
    ))
}

/// List the authenticated user's tasks, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = Task::list_for_owner(&state.db, auth.user_id).await?;

    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// Fetch a single task
///
/// # Errors
///
/// - `404` when the task does not exist or belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskResponse>> {
    let task = Task::find_for_owner(&state.db, id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task.into()))
}

/// Apply a partial update to a task
///
/// Fields absent from the body keep their stored values.
///
/// # Errors
///
/// - `404` when the task does not exist or belongs to another user
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskBody>> {
    req.validate().map_err(ApiError::from_validation)?;

    let patch = TaskPatch {
        title: req.title,
        description: req.description,
        status: req.status,
        priority: req.priority,
        deadline: req.deadline,
    };

    let task = if patch.is_empty() {
        // Nothing to write; still 404 for foreign or missing tasks
        Task::find_for_owner(&state.db, id, auth.user_id).await?
    } else {
        Task::update_for_owner(&state.db, id, auth.user_id, patch).await?
    }
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(TaskBody { task: task.into() }))
}

/// Hard-delete a task
///
/// # Errors
///
/// - `404` when the task does not exist or belongs to another user
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Task::delete_for_owner(&state.db, id, auth.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_defaults() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title": "Ship it"}"#).unwrap();

        assert_eq!(req.status, TaskStatus::Todo);
        assert_eq!(req.priority, TaskPriority::Medium);
        assert!(req.description.is_none());
        assert!(req.deadline.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_task_request_empty_title_rejected() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_task_request_partial() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"priority": "high"}"#).unwrap();

        assert_eq!(req.priority, Some(TaskPriority::High));
        assert!(req.title.is_none());
        assert!(req.status.is_none());
    }

    #[test]
    fn test_task_response_camel_case() {
        let task = Task {
            id: Uuid::new_v4(),
            title: "Ship it".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            deadline: None,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&TaskResponse::from(task)).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"status\":\"todo\""));
    }
}
