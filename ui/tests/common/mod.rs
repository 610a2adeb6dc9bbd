#![allow(dead_code)]

use std::time::Duration;

use egui_kittest::Harness;
use roster_business::{BusinessConfig, User};
use roster_ui::RosterApp;
use roster_ui::state::State;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test_token";

/// Frames to run after awaiting so command results reach the screen.
const SETTLE_FRAMES: usize = 5;

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, State>,
}

impl<'a> TestCtx<'a> {
    /// Harness rendering one frame of the app per step, with `users` served by the mock backend.
    pub async fn new(users: Vec<User>) -> Self {
        let mock_server = start_server().await;
        mount_users(&mock_server, ResponseTemplate::new(200).set_body_json(users)).await;
        Self::with_server(mock_server)
    }

    /// Like [`TestCtx::new`] but the mock answers the list request with `response`.
    pub async fn with_list_response(response: ResponseTemplate) -> Self {
        let mock_server = start_server().await;
        mount_users(&mock_server, response).await;
        Self::with_server(mock_server)
    }

    fn with_server(mock_server: MockServer) -> Self {
        let config = BusinessConfig::new(mock_server.uri()).with_bearer_token(TEST_TOKEN);
        let app = |ui: &mut egui::Ui, state: &mut State| RosterApp::render(state, ui);
        let harness = Harness::new_ui_state(app, State::new(config));

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, State> {
        &mut self.harness
    }

    pub fn harness(&self) -> &Harness<'a, State> {
        &self.harness
    }

    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Step, let spawned commands and the mock server run, then step again.
    pub async fn settle(&mut self) {
        self.harness.step();
        for _ in 0..20 {
            if self.harness.state().ctx.task_count() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.harness.step();
        }
        for _ in 0..SETTLE_FRAMES {
            self.harness.step();
        }
    }
}

async fn start_server() -> MockServer {
    let _ = env_logger::builder().is_test(true).try_init();
    MockServer::start().await
}

async fn mount_users(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(response)
        .expect(1)
        .mount(mock_server)
        .await;
}

pub fn sample_users() -> Vec<User> {
    vec![
        User::new("u1", "Ana Lima", "ana@example.com"),
        User::new("u2", "Bruno Souza", "bruno@example.com"),
        User::new("u3", "Carla Dias", "carla@example.com"),
    ]
}
