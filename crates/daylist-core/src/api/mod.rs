//! HTTP client for the remote task service.
//!
//! Every call is a single request/response - no retry, no backoff,
//! no timeout handling beyond the transport's own. A non-2xx
//! response surfaces the server's `message` field when the body
//! carries one, else a generic status message; transport failures
//! surface separately with no status code.

pub mod types;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use crate::error::ApiError;
use crate::session::Session;
use crate::task::{NewTask, Task, TaskUpdate};
use types::{AuthResponse, BreakdownResponse, ErrorBody, User};

/// Client for the task service. Cheap to clone per command; the
/// bearer token is fixed at construction from the injected session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client against `base_url`, taking the bearer token
    /// (if any) from the session.
    pub fn new(base_url: &str, session: &Session) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            token: session.token().map(str::to_string),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = check_status(builder.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose response body is only a confirmation.
    async fn send_confirmation(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        check_status(builder.send().await?).await?;
        Ok(())
    }

    fn validated(task: Task) -> Result<Task, ApiError> {
        task.validate()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(task)
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let tasks: Vec<Task> = self.send(self.request(Method::GET, "/api/tasks")?).await?;
        tasks.into_iter().map(Self::validated).collect()
    }

    pub async fn get_task(&self, id: &str) -> Result<Task, ApiError> {
        let task = self
            .send(self.request(Method::GET, &format!("/api/tasks/{id}"))?)
            .await?;
        Self::validated(task)
    }

    pub async fn create_task(&self, new_task: &NewTask) -> Result<Task, ApiError> {
        let task = self
            .send(self.request(Method::POST, "/api/tasks")?.json(new_task))
            .await?;
        Self::validated(task)
    }

    /// Full replace of the editable fields.
    pub async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ApiError> {
        let task = self
            .send(
                self.request(Method::PUT, &format!("/api/tasks/{id}"))?
                    .json(update),
            )
            .await?;
        Self::validated(task)
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        self.send_confirmation(self.request(Method::DELETE, &format!("/api/tasks/{id}"))?)
            .await
    }

    /// Flip completion on the server; the caller applies the
    /// returned task, so a failed toggle mutates nothing locally.
    pub async fn toggle_task(&self, id: &str) -> Result<Task, ApiError> {
        let task = self
            .send(self.request(Method::PATCH, &format!("/api/tasks/{id}/toggle"))?)
            .await?;
        Self::validated(task)
    }

    /// Persist a new canonical order for the reorderable subset.
    pub async fn reorder_tasks(&self, task_ids: &[String]) -> Result<(), ApiError> {
        self.send_confirmation(
            self.request(Method::POST, "/api/tasks/reorder")?
                .json(&json!({ "taskIds": task_ids })),
        )
        .await
    }

    /// Ask the service's AI to break a task into subtasks.
    pub async fn breakdown_task(&self, id: &str) -> Result<BreakdownResponse, ApiError> {
        self.send(self.request(Method::POST, &format!("/api/tasks/{id}/breakdown"))?)
            .await
    }

    // ── Auth / account ───────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.send(
            self.request(Method::POST, "/api/auth/login")?
                .json(&json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(name) = name {
            body["name"] = json!(name);
        }
        self.send(self.request(Method::POST, "/api/auth/signup")?.json(&body))
            .await
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.send(self.request(Method::GET, "/api/me")?).await
    }

    pub async fn update_me(
        &self,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ApiError> {
        let mut body = json!({});
        if let Some(name) = name {
            body["name"] = json!(name);
        }
        if let Some(email) = email {
            body["email"] = json!(email);
        }
        self.send(self.request(Method::PUT, "/api/me")?.json(&body))
            .await
    }
}

/// Map a non-2xx response to the failure contract.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status: StatusCode = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(server: &mockito::ServerGuard, token: Option<&str>) -> ApiClient {
        let session = Session::with_token(token.map(str::to_string));
        ApiClient::new(&server.url(), &session).unwrap()
    }

    #[tokio::test]
    async fn list_tasks_decodes_and_sends_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/tasks")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_body(r#"[{"id": "t1", "title": "a", "isDone": false}]"#)
            .create_async()
            .await;

        let tasks = client(&server, Some("tok-1")).list_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn no_token_means_no_authorization_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/tasks")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let tasks = client(&server, None).list_tasks().await.unwrap();
        assert!(tasks.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/api/tasks/t1/toggle")
            .with_status(401)
            .with_body(r#"{"message": "Not authorized"}"#)
            .create_async()
            .await;

        let err = client(&server, None).toggle_task("t1").await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Not authorized");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparsable_error_body_falls_back_to_status_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tasks/t9")
            .with_status(500)
            .with_body("<html>boom</html>")
            .create_async()
            .await;

        let err = client(&server, None).get_task("t9").await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "HTTP error! status: 500");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_posts_camel_case_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/tasks")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Write report",
                "totalEstimatedTime": 30
            })))
            .with_status(201)
            .with_body(
                r#"{"id": "t1", "title": "Write report", "isDone": false,
                    "totalEstimatedTime": 30}"#,
            )
            .create_async()
            .await;

        let mut new_task = NewTask::new("Write report").unwrap();
        new_task.total_estimated_time = Some(30);
        let created = client(&server, Some("tok"))
            .create_task(&new_task)
            .await
            .unwrap();
        assert_eq!(created.total_estimated_time, Some(30));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn reorder_posts_id_list() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/tasks/reorder")
            .match_body(Matcher::Json(serde_json::json!({
                "taskIds": ["b", "a", "c"]
            })))
            .with_status(200)
            .with_body(r#"{"message": "ok"}"#)
            .create_async()
            .await;

        let ids = vec!["b".to_string(), "a".to_string(), "c".to_string()];
        client(&server, Some("tok"))
            .reorder_tasks(&ids)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn breakdown_accepts_lowercase_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/tasks/t1/breakdown")
            .with_status(200)
            .with_body(r#"{"subtasks": [{"title": "step 1", "estimatedTime": 15}]}"#)
            .create_async()
            .await;

        let breakdown = client(&server, Some("tok"))
            .breakdown_task("t1")
            .await
            .unwrap();
        assert_eq!(breakdown.sub_tasks.len(), 1);
        assert_eq!(breakdown.sub_tasks[0].estimated_time, Some(15));
    }

    #[tokio::test]
    async fn malformed_task_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tasks")
            .with_status(200)
            .with_body(r#"[{"id": "t1", "title": "a", "time": "nonsense", "isDone": false}]"#)
            .create_async()
            .await;

        let err = client(&server, None).list_tasks().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn blank_title_from_server_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tasks/t1")
            .with_status(200)
            .with_body(r#"{"id": "t1", "title": "   ", "isDone": false}"#)
            .create_async()
            .await;

        let err = client(&server, None).get_task("t1").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/auth/login")
            .match_body(Matcher::Json(serde_json::json!({
                "email": "a@b.c",
                "password": "pw"
            })))
            .with_status(200)
            .with_body(
                r#"{"token": "tok-9", "user": {"id": "u1", "email": "a@b.c", "name": "Ada"}}"#,
            )
            .create_async()
            .await;

        let auth = client(&server, None).login("a@b.c", "pw").await.unwrap();
        assert_eq!(auth.token, "tok-9");
        assert_eq!(auth.user.name.as_deref(), Some("Ada"));
    }
}
