//! Fake eSCL scanner and Paperless endpoint served by axum on an ephemeral port.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const JOB_PATH: &str = "/eSCL/ScanJobs/1";
pub const DOCUMENT: &[u8] = b"%PDF-1.4 fake scan";

pub struct FakeEscl {
    pub capabilities: String,
    /// Number of `503 Service Unavailable` answers before the document is ready.
    pub not_ready_polls: usize,
    pub omit_location: bool,
    pub job_requests: Mutex<Vec<String>>,
    pub document_polls: AtomicUsize,
    pub deletes: AtomicUsize,
    pub uploads: Mutex<Vec<UploadRecord>>,
}

#[derive(Clone, Debug)]
pub struct UploadRecord {
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl FakeEscl {
    pub fn flatbed() -> Self {
        Self {
            capabilities: "<scan:ScannerCapabilities><scan:Platen/></scan:ScannerCapabilities>"
                .to_string(),
            not_ready_polls: 0,
            omit_location: false,
            job_requests: Mutex::new(Vec::new()),
            document_polls: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_not_ready_polls(mut self, polls: usize) -> Self {
        self.not_ready_polls = polls;
        self
    }

    pub fn without_location(mut self) -> Self {
        self.omit_location = true;
        self
    }
}

pub struct RunningEscl {
    pub state: Arc<FakeEscl>,
    pub base_url: String,
}

impl RunningEscl {
    pub fn escl_root(&self) -> String {
        format!("{}/eSCL", self.base_url)
    }
}

pub async fn spawn(scanner: FakeEscl) -> RunningEscl {
    let state = Arc::new(scanner);
    let app = Router::new()
        .route("/eSCL/ScannerCapabilities", get(capabilities))
        .route("/eSCL/ScanJobs", post(create_job))
        .route("/eSCL/ScanJobs/1/NextDocument", get(next_document))
        .route(JOB_PATH, delete(delete_job))
        .route("/api/documents/post_document/", post(post_document))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    RunningEscl {
        state,
        base_url: format!("http://{}", addr),
    }
}

async fn capabilities(State(scanner): State<Arc<FakeEscl>>) -> String {
    scanner.capabilities.clone()
}

async fn create_job(State(scanner): State<Arc<FakeEscl>>, body: String) -> Response {
    scanner.job_requests.lock().unwrap().push(body);
    if scanner.omit_location {
        return StatusCode::CREATED.into_response();
    }
    (StatusCode::CREATED, [(header::LOCATION, JOB_PATH)]).into_response()
}

async fn next_document(State(scanner): State<Arc<FakeEscl>>) -> Response {
    let poll = scanner.document_polls.fetch_add(1, Ordering::SeqCst);
    if poll < scanner.not_ready_polls {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        DOCUMENT,
    )
        .into_response()
}

async fn delete_job(State(scanner): State<Arc<FakeEscl>>) -> StatusCode {
    scanner.deletes.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn post_document(
    State(scanner): State<Arc<FakeEscl>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    scanner.uploads.lock().unwrap().push(UploadRecord {
        authorization,
        body: body.to_vec(),
    });
    (StatusCode::OK, "\"f3a1c2\"").into_response()
}
