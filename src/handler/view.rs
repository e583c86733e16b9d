use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::state::AppState;
use crate::domain::Severity;
use crate::filter::{self, FilterOutcome, FilterRequest, ResolveError};

/// Chunks buffered between the blocking reader and the response writer.
/// Production is consumer-driven; a few lines of slack is all the bridge
/// needs.
const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    /// Minimum severity label, case-sensitive. Unrecognized values pass
    /// everything.
    level: Option<String>,
    /// `content-type=text/plain` forces plain output even when the client
    /// accepts HTML, so a browser user can dodge a 35 MB HTML page.
    #[serde(rename = "content-type")]
    content_type: Option<String>,
}

/// Handler for GET /htmlify/{*file}
///
/// The filter engine signals failure only through the shape of its result:
/// a sentinel maps to an error status here, a stream becomes the response
/// body. The engine does blocking file I/O, so it runs off the runtime and
/// chunks are bridged through a bounded channel; a disconnected client
/// closes the receiver, which stops the reader and releases the file.
pub async fn view_handler(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
    Query(params): Query<ViewParams>,
    headers: HeaderMap,
) -> Response {
    let html = should_be_html(&headers, &params);
    let min_level = params
        .level
        .as_deref()
        .and_then(Severity::from_label)
        .unwrap_or(Severity::None);

    info!("Serving {file} at level {min_level} (html: {html})");

    let request = FilterRequest {
        root: state.log_root.clone(),
        file,
        min_level,
        html,
    };

    let outcome = match tokio::task::spawn_blocking(move || filter::run(&request)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Filter task failed: {e}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match outcome {
        FilterOutcome::Denied(reason) => denied_response(reason),
        FilterOutcome::Stream(chunks) => {
            let content_type = if html { "text/html" } else { "text/plain" };

            let (tx, rx) = mpsc::channel::<Bytes>(CHANNEL_CAPACITY);
            tokio::task::spawn_blocking(move || {
                for chunk in chunks {
                    // A closed receiver means the client went away: stop
                    // pulling and let the dropped stream close the file.
                    if tx.blocking_send(Bytes::from(chunk)).is_err() {
                        break;
                    }
                }
            });

            let body = Body::from_stream(futures::stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|chunk| (Ok::<_, Infallible>(chunk), rx))
            }));
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
    }
}

/// Handler for every path outside the view prefix.
pub async fn invalid_url_fallback() -> Response {
    denied_response(ResolveError::InvalidUrl)
}

fn denied_response(reason: ResolveError) -> Response {
    let status = match reason {
        ResolveError::InvalidUrl => StatusCode::BAD_REQUEST,
        ResolveError::NotFound => StatusCode::NOT_FOUND,
    };
    (status, reason.user_message()).into_response()
}

/// Content negotiation: HTML iff the client accepts it and did not override
/// with `content-type=text/plain`.
fn should_be_html(headers: &HeaderMap, params: &ViewParams) -> bool {
    let accepts_html = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"));
    let text_override = params.content_type.as_deref() == Some("text/plain");
    accepts_html && !text_override
}
