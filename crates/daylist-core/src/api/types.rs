//! Wire types for the task-service API that are not part of the task
//! model itself.

use serde::{Deserialize, Serialize};

use crate::task::SubTask;

/// The authenticated account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Response to login and signup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Response to the AI breakdown endpoint. The service has emitted
/// both `subTasks` and `subtasks` historically, so both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    #[serde(default, alias = "subtasks")]
    pub sub_tasks: Vec<SubTask>,
    /// Revised estimate for the whole task, when the service
    /// recalculated it.
    #[serde(default)]
    pub total_estimated_time: Option<u32>,
}

/// Error body shape the service uses for non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}
