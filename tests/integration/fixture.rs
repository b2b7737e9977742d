//! In-process stand-in for the monitored web application.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How an endpoint answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with a JSON body.
    Json(String),
    /// 200 with a body that is not JSON.
    Garbage,
    /// The given status with an empty JSON object.
    Status(StatusCode),
}

#[derive(Debug)]
struct Replies {
    info: Reply,
    health: Reply,
}

/// Running fixture server; stopped on drop.
pub struct FixtureServer {
    addr: SocketAddr,
    replies: Arc<Mutex<Replies>>,
    task: JoinHandle<()>,
}

impl FixtureServer {
    /// Start a server answering like the stock backend.
    pub async fn start() -> Self {
        let replies = Arc::new(Mutex::new(Replies {
            info: Reply::Json(
                r#"{"environment":"development","host":"localhost","deployment":"Azure App Service via GitHub Actions"}"#
                    .to_string(),
            ),
            health: Reply::Json(r#"{"status":"healthy"}"#.to_string()),
        }));

        let router = Router::new()
            .route("/api/info", get(info))
            .route("/api/health", get(health))
            .with_state(Arc::clone(&replies));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            replies,
            task,
        }
    }

    /// Base URL to point the poller at.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Change the info reply.
    pub fn set_info(&self, reply: Reply) {
        self.replies.lock().unwrap().info = reply;
    }

    /// Change the health reply.
    pub fn set_health(&self, reply: Reply) {
        self.replies.lock().unwrap().health = reply;
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn info(State(replies): State<Arc<Mutex<Replies>>>) -> Response {
    let reply = replies.lock().unwrap().info.clone();
    respond(reply)
}

async fn health(State(replies): State<Arc<Mutex<Replies>>>) -> Response {
    let reply = replies.lock().unwrap().health.clone();
    respond(reply)
}

fn respond(reply: Reply) -> Response {
    match reply {
        Reply::Json(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Reply::Garbage => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        Reply::Status(status) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            "{}",
        )
            .into_response(),
    }
}
