use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use eyre::Result;
use gpstrace::config::RunType;
use gpstrace::store::{DirTraceStore, TraceStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

// Read only. The store is opened in dry mode so nothing here can write.
pub fn create_app(dir: PathBuf, public: Option<PathBuf>) -> Router {
    let store = Arc::new(DirTraceStore::new(&dir, &RunType::Dry));
    let app = Router::new()
        .route("/json-files", get(json_files_handler))
        .route("/gps_data/{filename}", get(gps_data_handler))
        .with_state(store);

    let app = match public {
        Some(public) => app.fallback_service(ServeDir::new(public)),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
}

async fn json_files_handler(
    State(store): State<Arc<DirTraceStore>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    store
        .list()
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

async fn gps_data_handler(
    State(store): State<Arc<DirTraceStore>>,
    Path(filename): Path<String>,
) -> Response {
    if !is_plain_file_name(&filename) {
        return (StatusCode::BAD_REQUEST, "Invalid file name").into_response();
    }

    match tokio::fs::read(store.dir().join(&filename)).await {
        Ok(data) => ([(header::CONTENT_TYPE, "application/json")], data).into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

#[tokio::main]
pub async fn exec(dir: PathBuf, port: u16, public: Option<PathBuf>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Serving traces from {} on http://{}", dir.display(), addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_app(dir, public)).await?;

    Ok(())
}
