//! Range-based video delivery.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use futures_util::TryStreamExt;
use tokio_util::io::ReaderStream;

use crate::{
    domain::{RangeError, unsatisfied_content_range},
    ui::state::AppState,
    usecase::{RangeChunk, ServeRangeError, ServeRangeUseCase},
};

const CACHE_CONTROL: &str = "public, max-age=3600";

/// `GET /videos/<video>`: serve one chunk starting at the requested offset
pub async fn stream_video(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    serve_range(&state.serve_range_usecase, &headers).await
}

async fn serve_range(usecase: &ServeRangeUseCase, headers: &HeaderMap) -> Response {
    // A Range header that is not valid ASCII counts as malformed, not missing
    let range_header = headers
        .get(header::RANGE)
        .map(|value| value.to_str().unwrap_or_default());

    match usecase.execute(range_header).await {
        Ok(chunk) => partial_content(chunk),
        Err(e) => error_response(e),
    }
}

fn partial_content(chunk: RangeChunk) -> Response {
    let RangeChunk {
        range,
        content_type,
        body,
    } = chunk;
    tracing::debug!("Serving {}", range.content_range());

    // Headers are already on the wire once the body streams, so a read failure
    // can only cut the body short.
    let stream = ReaderStream::new(body).inspect_err(move |e| {
        tracing::error!(
            "Read failed while streaming {}: {}",
            range.content_range(),
            e
        );
    });

    let headers = [
        (header::CONTENT_RANGE, range.content_range()),
        (header::ACCEPT_RANGES, "bytes".to_string()),
        (header::CONTENT_LENGTH, range.content_length().to_string()),
        (header::CONTENT_TYPE, content_type.to_string()),
        (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
    ];

    (StatusCode::PARTIAL_CONTENT, headers, Body::from_stream(stream)).into_response()
}

fn error_response(error: ServeRangeError) -> Response {
    match error {
        ServeRangeError::Range(RangeError::Missing) => {
            tracing::warn!("Video requested without a Range header");
            (StatusCode::BAD_REQUEST, "Range header is required").into_response()
        }
        ServeRangeError::Range(e @ RangeError::Malformed(_)) => {
            tracing::warn!("{}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        ServeRangeError::Range(RangeError::NotSatisfiable { start, size }) => {
            tracing::debug!("Range start {} is beyond video size {}", start, size);
            (
                StatusCode::RANGE_NOT_SATISFIABLE,
                [(header::CONTENT_RANGE, unsatisfied_content_range(size))],
            )
                .into_response()
        }
        ServeRangeError::Io(e) => {
            tracing::error!("Failed to open video range: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
