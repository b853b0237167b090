use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::device::models::device::DeviceId;
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, DeviceResponseData};

pub async fn get_device<DS: DeviceService>(
    Path(id): Path<i64>,
    State(state): State<AppState<DS>>,
) -> Result<ApiSuccess<DeviceResponseData>, ApiError> {
    let id = DeviceId::new(id)?;

    state
        .device_service
        .get_device(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref device| ApiSuccess::new(StatusCode::OK, device.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::handlers::test_support;

    #[tokio::test]
    async fn test_get_missing_device() {
        let state = test_support::state().await;

        let result = get_device(Path(4), State(state)).await;

        assert_eq!(
            result,
            Err(ApiError::NotFound("device with id 4 not found".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_device_rejects_invalid_id() {
        let state = test_support::state().await;

        let result = get_device(Path(0), State(state)).await;

        assert_eq!(
            result,
            Err(ApiError::UnprocessableEntity(
                "0 is not a valid device id".to_string()
            ))
        );
    }
}
