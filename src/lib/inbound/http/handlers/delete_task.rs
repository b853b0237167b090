use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::device::models::device::DeviceId;
use crate::domain::device::models::task::TaskId;
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::ApiError;

pub async fn delete_task<DS: DeviceService>(
    Path((id, task_id)): Path<(i64, i64)>,
    State(state): State<AppState<DS>>,
) -> Result<StatusCode, ApiError> {
    let id = DeviceId::new(id)?;
    let task_id = TaskId::new(task_id)?;

    state
        .device_service
        .delete_task(&id, &task_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::handlers::test_support;

    #[tokio::test]
    async fn test_delete_task_of_missing_device() {
        let state = test_support::state().await;

        let result = delete_task(Path((3, 1)), State(state)).await;

        assert_eq!(
            result,
            Err(ApiError::NotFound("device with id 3 not found".to_string()))
        );
    }
}
