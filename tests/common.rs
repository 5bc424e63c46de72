#![allow(dead_code)]
/// Common test utilities for Flashnotes integration tests
///
/// This file contains the stub server the controller talks to, a surface
/// that records alerts and reloads, and a payment widget whose behavior each
/// test picks.

use axum::{
    body::Bytes,
    extract::State,
    http::{
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use flashnotes::{
    page::{Page, PUBLIC_KEY_ATTRIBUTE},
    CheckoutCallbacks, CheckoutOptions, ClientController, FlashnotesClient, PaymentWidget, Surface,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Body the stub sends back
#[derive(Clone, Debug)]
pub enum StubBody {
    Empty,
    Json(Value),
    /// Sent as-is with a JSON content type, for malformed payloads
    Raw(&'static str),
}

/// One canned response of the stub server
#[derive(Clone, Debug)]
pub struct StubResponse {
    pub status: StatusCode,
    pub body: StubBody,
    pub set_cookie: Option<&'static str>,
    pub delay: Option<Duration>,
}

impl StubResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: StubBody::Json(body),
            set_cookie: None,
            delay: None,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            body: StubBody::Empty,
            set_cookie: None,
            delay: None,
        }
    }

    pub fn raw(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body: StubBody::Raw(body),
            set_cookie: None,
            delay: None,
        }
    }

    pub fn with_cookie(mut self, cookie: &'static str) -> Self {
        self.set_cookie = Some(cookie);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as the stub server saw it
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub body: String,
    pub cookie: Option<String>,
}

#[derive(Default)]
struct StubState {
    responses: Mutex<HashMap<String, VecDeque<StubResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubState {
    /// Pops the next queued response; the last one keeps answering
    fn next_response(&self, path: &str) -> StubResponse {
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => StubResponse::status(StatusCode::NOT_FOUND),
        }
    }
}

/// Stand-in for the Flashnotes server, bound to an ephemeral local port
pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
    shutdown: Mutex<Option<oneshot::Sender<()>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StubServer {
    /// Starts the stub on 127.0.0.1 with no responses configured
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/generate", post(handle))
            .route("/login", post(handle))
            .route("/register", post(handle))
            .route("/logout", post(handle))
            .route("/initialize-payment", post(handle))
            .route("/payment-success", post(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            shutdown: Mutex::new(Some(shutdown_tx)),
            task: Mutex::new(Some(task)),
        }
    }

    /// Stops accepting requests and waits until every open connection is closed
    pub async fn stop(&self) {
        if let Some(tx) = self.shutdown.lock().unwrap().take() {
            let _ = tx.send(());
        }
        let task = self.task.lock().unwrap().take();
        if let Some(task) = task {
            task.await.unwrap();
        }
    }

    /// Queues a response for `path`
    pub fn respond(&self, path: &str, response: StubResponse) {
        self.state
            .responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(response);
    }

    /// All requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        body: String::from_utf8_lossy(&body).into_owned(),
        cookie: headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    });

    let canned = state.next_response(&path);
    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = match canned.body {
        StubBody::Empty => canned.status.into_response(),
        StubBody::Json(value) => (canned.status, Json(value)).into_response(),
        StubBody::Raw(text) => (canned.status, [(CONTENT_TYPE, "application/json")], text).into_response(),
    };
    if let Some(cookie) = canned.set_cookie {
        response
            .headers_mut()
            .insert(SET_COOKIE, HeaderValue::from_static(cookie));
    }
    response
}

/// Surface that remembers every alert and reload
#[derive(Default)]
pub struct RecordingSurface {
    alerts: Mutex<Vec<String>>,
    reloads: AtomicUsize,
}

impl RecordingSurface {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl Surface for RecordingSurface {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// What the recording widget does once opened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetAction {
    /// The user closes the checkout
    Cancel,
    /// The user pays
    Complete,
    /// Keeps the callbacks for the test to fire later
    Hold,
    /// The widget cannot be opened
    Fail,
}

pub struct RecordingWidget {
    action: WidgetAction,
    opened: Mutex<Vec<CheckoutOptions>>,
    held: Mutex<Option<CheckoutCallbacks>>,
}

impl RecordingWidget {
    pub fn new(action: WidgetAction) -> Self {
        Self {
            action,
            opened: Mutex::new(Vec::new()),
            held: Mutex::new(None),
        }
    }

    /// Options of every checkout opened so far
    pub fn opened(&self) -> Vec<CheckoutOptions> {
        self.opened.lock().unwrap().clone()
    }

    /// Takes the callbacks kept by a `Hold` widget
    pub fn take_held(&self) -> Option<CheckoutCallbacks> {
        self.held.lock().unwrap().take()
    }
}

impl PaymentWidget for RecordingWidget {
    async fn open(&self, options: CheckoutOptions, callbacks: CheckoutCallbacks) -> anyhow::Result<()> {
        if self.action == WidgetAction::Fail {
            anyhow::bail!("checkout frame blocked");
        }
        self.opened.lock().unwrap().push(options);
        match self.action {
            WidgetAction::Cancel => callbacks.cancel(),
            WidgetAction::Complete => callbacks.complete().await,
            WidgetAction::Hold => {
                *self.held.lock().unwrap() = Some(callbacks);
            }
            WidgetAction::Fail => unreachable!(),
        }
        Ok(())
    }
}

pub type TestController = ClientController<RecordingSurface, RecordingWidget>;

/// Creates a controller pointed at `base_url` with a recording surface
///
/// The page carries a payment public key so checkouts can open.
pub fn create_controller(base_url: &str, action: WidgetAction) -> (TestController, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::default());
    let client = FlashnotesClient::new(base_url).unwrap();
    let mut page = Page::new();
    page.set_attribute(PUBLIC_KEY_ATTRIBUTE, "pk_test_123");
    let controller = ClientController::new(client, surface.clone(), RecordingWidget::new(action)).with_page(page);
    (controller, surface)
}

/// Returns a base URL nothing is listening on
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
