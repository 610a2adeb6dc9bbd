//! Test utilities for business layer testing with mock servers.
//!
//! Commands run against a `wiremock` server standing in for the user
//! directory backend.
//!
//! # Example
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_list_users(vec![sample_user("u1")]).await;
//!
//! test_ctx.ctx.enqueue_command::<LoadUsersCommand>();
//! test_ctx.flush_and_wait().await;
//!
//! assert_eq!(test_ctx.ctx.state::<UserList>().len(), 1);
//! ```

use std::time::{Duration, Instant};

use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

use crate::{BusinessConfig, User, UserId, build_state_ctx};
use roster_states::StateCtx;

pub const TEST_TOKEN: &str = "test_token";

/// Test context that holds a mock server and a configured StateCtx.
pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    /// Fresh mock server, with `TEST_TOKEN` configured as the bearer token.
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri()).with_bearer_token(TEST_TOKEN);
        let ctx = build_state_ctx(config);

        Self { mock_server, ctx }
    }

    /// Flush all pending commands and wait for async tasks to complete,
    /// syncing after each one finishes.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = Instant::now();

        while self.ctx.task_count() > 0 {
            if start.elapsed() > timeout {
                panic!(
                    "Timed out waiting for pending tasks ({} still in JoinSet)",
                    self.ctx.task_count()
                );
            }

            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
    }

    /// Load `users` through the real command so the list is in its mounted state.
    pub async fn load(&mut self, users: Vec<User>) {
        self.mock_list_users(users).await;
        self.ctx.enqueue_command::<crate::LoadUsersCommand>();
        self.flush_and_wait().await;
        self.mock_server.reset().await;
    }

    // =========================================================================
    // Mock endpoint helpers
    // =========================================================================

    /// `GET /api/users`, only matched when the bearer token is sent.
    pub async fn mock_list_users(&self, users: Vec<User>) {
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(users))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_users_raw(&self, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }

    /// `PUT /api/users/{id}` answering `status`, expected exactly `times` times.
    pub async fn mock_update_user(&self, id: UserId, status: u16, times: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/api/users/{id}")))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(status))
            .expect(times)
            .mount(&self.mock_server)
            .await;
    }

    /// `DELETE /api/users/{id}` answering `status`, expected exactly `times` times.
    pub async fn mock_delete_user(&self, id: UserId, status: u16, times: u64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/users/{id}")))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(status))
            .expect(times)
            .mount(&self.mock_server)
            .await;
    }

    /// Fails the test on drop if any mutating request reaches the server.
    pub async fn expect_no_mutations(&self) {
        for verb in ["PUT", "DELETE"] {
            Mock::given(method(verb))
                .respond_with(ResponseTemplate::new(500))
                .expect(0)
                .mount(&self.mock_server)
                .await;
        }
    }
}

pub fn sample_user(id: &str) -> User {
    User::new(id, format!("User {id}"), format!("{id}@example.com"))
}

pub fn sample_users() -> Vec<User> {
    vec![sample_user("u1"), sample_user("u2"), sample_user("u3")]
}
