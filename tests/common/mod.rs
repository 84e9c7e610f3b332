use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use portfolio_api::config::Config;
use portfolio_api::email::{Notifier, NotifyError};
use portfolio_api::models::Submission;
use portfolio_api::state::SharedState;

pub const ADMIN_SECRET: &str = "correct horse battery staple";

/// Test double for the email channel: records every notification and can be
/// told to fail.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Submission>>,
    fail_with: Mutex<Option<NotifyError>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Submission> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_with(&self, err: NotifyError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }
        self.sent.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

/// A running test server instance with its own in-memory state.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a contact form as JSON, return (body, status).
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a contact form on behalf of a forwarded client address.
    pub async fn submit_from(&self, forwarded_for: &str, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .header("x-forwarded-for", forwarded_for)
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a valid contact form with the given name.
    pub async fn submit_named(&self, name: &str) -> (Value, StatusCode) {
        self.submit(&json!({
            "name": name,
            "email": "visitor@example.com",
            "message": format!("Hello from {name}"),
        }))
        .await
    }

    pub async fn login(&self, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/auth"))
            .json(&json!({ "password": password }))
            .send()
            .await
            .expect("auth request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// List messages with the configured operator secret.
    pub async fn list_messages(&self) -> Vec<Value> {
        let (body, status) = self.get_auth("/api/messages", ADMIN_SECRET).await;
        assert_eq!(status, StatusCode::OK, "list messages failed: {body}");
        body["messages"].as_array().unwrap().clone()
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        admin_password: Some(ADMIN_SECRET.to_string()),
        cors_origins: vec![],
        max_body_size: 65_536,
        trusted_proxies: vec![],
        contact_rate_limit: 5,
        auth_rate_limit: 5,
        rate_limit_window_secs: 900,
        log_level: "warn".to_string(),
        smtp: None,
    }
}

/// Spawn a test app with the default config and a recording notifier.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let notifier = Arc::new(RecordingNotifier::default());
    spawn(config, Some(notifier.clone() as Arc<dyn Notifier>), notifier).await
}

/// Spawn a test app with no email channel configured.
#[allow(dead_code)]
pub async fn spawn_app_without_email(config: Config) -> TestApp {
    spawn(config, None, Arc::new(RecordingNotifier::default())).await
}

async fn spawn(
    config: Config,
    notifier: Option<Arc<dyn Notifier>>,
    recorder: Arc<RecordingNotifier>,
) -> TestApp {
    let (app, state) = portfolio_api::build_app(config, notifier);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        state,
        notifier: recorder,
    }
}
