//! HTTP surface over the point ledger.
//!
//! Thin by design: handlers parse path and body primitives, call the
//! service, and render the result. All business rules live in
//! `application`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::json;

use crate::application::{PointError, PointService};
use crate::domain::{PointHistory, Points, UserId, UserPoint};

pub fn router(service: Arc<PointService>) -> Router {
    Router::new()
        .route("/point/:id", get(get_point))
        .route("/point/:id/histories", get(get_histories))
        .route("/point/:id/charge", patch(charge))
        .route("/point/:id/use", patch(use_points))
        .with_state(service)
}

async fn get_point(
    State(service): State<Arc<PointService>>,
    Path(id): Path<UserId>,
) -> Result<Json<UserPoint>, PointError> {
    Ok(Json(service.balance(id)?))
}

async fn get_histories(
    State(service): State<Arc<PointService>>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<PointHistory>>, PointError> {
    Ok(Json(service.history(id)?))
}

async fn charge(
    State(service): State<Arc<PointService>>,
    Path(id): Path<UserId>,
    Json(amount): Json<Points>,
) -> Result<Json<UserPoint>, PointError> {
    Ok(Json(service.charge(id, amount).await?))
}

async fn use_points(
    State(service): State<Arc<PointService>>,
    Path(id): Path<UserId>,
    Json(amount): Json<Points>,
) -> Result<Json<UserPoint>, PointError> {
    Ok(Json(service.use_points(id, amount).await?))
}

impl IntoResponse for PointError {
    fn into_response(self) -> Response {
        let status = match self {
            PointError::InvalidUser(_) | PointError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            PointError::InsufficientBalance { .. } => StatusCode::CONFLICT,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
