use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::device::models::device::DeviceId;
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::ApiError;

/// Answers `204 No Content` whether or not the device existed.
pub async fn delete_device<DS: DeviceService>(
    Path(id): Path<i64>,
    State(state): State<AppState<DS>>,
) -> Result<StatusCode, ApiError> {
    let id = DeviceId::new(id)?;

    state
        .device_service
        .delete_device(&id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
