use std::{borrow::Cow, sync::Arc};

use axum::{
    Json,
    extract::{self, OriginalUri},
    response::{IntoResponse, Response},
};
use bank::payloads::{
    AckResponse, HEALTHY, HealthResponse, SUCCESS, StatusResponse, Top10Response,
};
use chrono::Utc;
use tracing::debug;

use crate::{
    error::AppError,
    gate::{Disclosure, GateStatus},
    state::State,
};

pub const LOCKED_MESSAGE: &str = "Case files are sealed. Investigation in progress...";
pub const OPEN_MESSAGE: &str = "TOP 10 CASE FILES REVEALED";
pub const FORCED_MESSAGE: &str = "Force reveal activated";
pub const RESTARTED_MESSAGE: &str = "Investigation restarted";

pub async fn top10_handler(extract::State(state): extract::State<Arc<State>>) -> Response {
    let body = match state.gate.evaluate(Utc::now()) {
        Disclosure::Locked => Top10Response::Locked {
            message: LOCKED_MESSAGE.to_string(),
        },
        Disclosure::Open(cases) => Top10Response::Open {
            data: Cow::Borrowed(cases),
            message: OPEN_MESSAGE.to_string(),
        },
    };

    Json(body).into_response()
}

pub async fn force_reveal_handler(
    extract::State(state): extract::State<Arc<State>>,
) -> Json<AckResponse> {
    state.gate.force_disclose();

    Json(AckResponse {
        status: SUCCESS.to_string(),
        message: FORCED_MESSAGE.to_string(),
        new_reveal_time: None,
    })
}

pub async fn restart_handler(
    extract::State(state): extract::State<Arc<State>>,
) -> Json<AckResponse> {
    let deadline = state.gate.reset_timer(Utc::now());

    Json(AckResponse {
        status: SUCCESS.to_string(),
        message: RESTARTED_MESSAGE.to_string(),
        new_reveal_time: Some(deadline),
    })
}

pub async fn status_handler(
    extract::State(state): extract::State<Arc<State>>,
) -> Json<StatusResponse> {
    let GateStatus {
        time_remaining,
        is_revealed,
    } = state.gate.status(Utc::now());

    Json(StatusResponse {
        time_remaining,
        is_revealed,
    })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY.to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn api_fallback(OriginalUri(uri): OriginalUri) -> AppError {
    debug!("No API route for {}", uri.path());

    AppError::UnknownEndpoint(uri.path().to_string())
}
