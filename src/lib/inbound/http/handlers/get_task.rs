use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::domain::device::models::device::DeviceId;
use crate::domain::device::models::task::TaskId;
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, TaskResponseData};

pub async fn get_task<DS: DeviceService>(
    Path((id, task_id)): Path<(i64, i64)>,
    State(state): State<AppState<DS>>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let id = DeviceId::new(id)?;
    let task_id = TaskId::new(task_id)?;

    state
        .device_service
        .get_task(&id, &task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::models::device::{CreateDeviceRequest, DeviceName, DeviceType};
    use crate::domain::device::models::task::{CreateTaskRequest, Severity, TaskStatus};
    use crate::inbound::http::handlers::test_support;

    #[tokio::test]
    async fn test_task_is_only_visible_under_its_device() {
        let state = test_support::state().await;
        let service = &state.device_service;
        let req = CreateDeviceRequest::new(
            DeviceName::new("Compressor").unwrap(),
            2012,
            DeviceType::new("air").unwrap(),
            None,
        );
        let owner = service.create_device(&req).await.unwrap();
        let other = service.create_device(&req).await.unwrap();
        let task = service
            .create_task(
                owner.id(),
                &CreateTaskRequest::new(TaskStatus::Open, Severity::Critical, "valve".into()),
            )
            .await
            .unwrap();
        let owner_id = owner.id().into_inner();
        let other_id = other.id().into_inner();
        let task_id = task.id().into_inner();

        let found = get_task(Path((owner_id, task_id)), State(state.clone()))
            .await
            .unwrap();
        let hidden = get_task(Path((other_id, task_id)), State(state)).await;

        assert_eq!(found.data().id, task_id);
        assert_eq!(found.data().device_id, owner_id);
        assert_eq!(
            hidden,
            Err(ApiError::NotFound(format!(
                "task with id {} not found on device {}",
                task_id, other_id
            )))
        );
    }
}
