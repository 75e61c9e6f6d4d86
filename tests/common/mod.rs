//! Canned-response HTTP server standing in for the timetable API.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Router;

use timetable_portal::api::ApiClient;
use timetable_portal::auth::MemoryTokenStore;

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// `(method, path, status, body)`
pub type Route = (&'static str, &'static str, u16, &'static str);

#[derive(Clone)]
struct MockState {
    routes: Arc<Vec<Route>>,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockApi {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl MockApi {
    pub async fn start(routes: Vec<Route>) -> Self {
        let state = MockState {
            routes: Arc::new(routes),
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let seen = state.seen.clone();
        let app = Router::new().fallback(respond).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            seen,
        }
    }

    /// Client with no stored token.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Arc::new(MemoryTokenStore::default()))
    }

    pub fn client_with_token(&self, token: &str) -> ApiClient {
        ApiClient::new(&self.base_url, Arc::new(MemoryTokenStore::with_token(token)))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests().pop().expect("no request reached the mock")
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

async fn respond(State(state): State<MockState>, req: Request) -> impl IntoResponse {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let (authorization, content_type) = {
        let headers = req.headers();
        let value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        (value(header::AUTHORIZATION), value(header::CONTENT_TYPE))
    };
    let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    state.seen.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization,
        content_type,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    let (status, body) = state
        .routes
        .iter()
        .find(|(m, p, _, _)| *m == method && *p == path)
        .map(|(_, _, status, body)| (*status, *body))
        .unwrap_or((404, r#"{"detail": "Not Found"}"#));

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
}
