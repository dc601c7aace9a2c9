use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use portfolio_shared::RESUME_DOWNLOAD_NAME;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/resume
/// Streams the resume PDF as an attachment under a fixed download name.
pub async fn handle_download_resume(State(state): State<AppState>) -> Result<Response, AppError> {
    let file = File::open(&state.resume_path)
        .await
        .map_err(AppError::Resume)?;
    let metadata = file.metadata().await.map_err(AppError::Resume)?;
    if !metadata.is_file() {
        return Err(AppError::Resume(std::io::Error::other(format!(
            "{} is not a regular file",
            state.resume_path.display()
        ))));
    }

    debug!(
        "Serving resume {} ({} bytes)",
        state.resume_path.display(),
        metadata.len()
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{RESUME_DOWNLOAD_NAME}\""),
        ),
        (header::CONTENT_LENGTH, metadata.len().to_string()),
    ];
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((headers, body).into_response())
}
