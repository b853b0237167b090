use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::device::models::device::DeviceId;
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, TasksResponseData};

pub async fn list_tasks<DS: DeviceService>(
    Path(id): Path<i64>,
    State(state): State<AppState<DS>>,
) -> Result<ApiSuccess<TasksResponseData>, ApiError> {
    let id = DeviceId::new(id)?;

    state
        .device_service
        .list_tasks(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref tasks| ApiSuccess::new(StatusCode::OK, tasks.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::models::device::{CreateDeviceRequest, DeviceName, DeviceType};
    use crate::inbound::http::handlers::test_support;

    #[tokio::test]
    async fn test_device_without_tasks_lists_nothing() {
        let state = test_support::state().await;
        let device = state
            .device_service
            .create_device(&CreateDeviceRequest::new(
                DeviceName::new("Chiller").unwrap(),
                2005,
                DeviceType::new("cooling").unwrap(),
                None,
            ))
            .await
            .unwrap();

        let response = list_tasks(Path(device.id().into_inner()), State(state))
            .await
            .unwrap();

        assert_eq!(
            response,
            ApiSuccess::new(StatusCode::OK, TasksResponseData { tasks: vec![] })
        );
    }

    #[tokio::test]
    async fn test_missing_device_is_not_found() {
        let state = test_support::state().await;

        let result = list_tasks(Path(9), State(state)).await;

        assert_eq!(
            result,
            Err(ApiError::NotFound("device with id 9 not found".to_string()))
        );
    }
}
