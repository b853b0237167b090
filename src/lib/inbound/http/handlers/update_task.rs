use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::device::models::device::DeviceId;
use crate::domain::device::models::task::{
    Severity, SeverityParseError, TaskId, TaskStatus, TaskStatusParseError, UpdateTaskRequest,
};
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, TaskResponseData};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskHttpRequestBody {
    status: String,
    severity: String,
    description: String,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateTaskHttpRequestError {
    #[error(transparent)]
    Status(#[from] TaskStatusParseError),
    #[error(transparent)]
    Severity(#[from] SeverityParseError),
}

impl From<ParseUpdateTaskHttpRequestError> for ApiError {
    fn from(e: ParseUpdateTaskHttpRequestError) -> Self {
        Self::UnprocessableEntity(e.to_string())
    }
}

impl UpdateTaskHttpRequestBody {
    fn try_into_domain(self) -> Result<UpdateTaskRequest, ParseUpdateTaskHttpRequestError> {
        let status = self.status.parse::<TaskStatus>()?;
        let severity = self.severity.parse::<Severity>()?;

        Ok(UpdateTaskRequest::new(status, severity, self.description))
    }
}

pub async fn update_task<DS: DeviceService>(
    Path((id, task_id)): Path<(i64, i64)>,
    State(state): State<AppState<DS>>,
    Json(body): Json<UpdateTaskHttpRequestBody>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let id = DeviceId::new(id)?;
    let task_id = TaskId::new(task_id)?;
    let domain_req = body.try_into_domain()?;

    state
        .device_service
        .update_task(&id, &task_id, &domain_req)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::models::device::{CreateDeviceRequest, DeviceName, DeviceType};
    use crate::domain::device::models::task::CreateTaskRequest;
    use crate::inbound::http::handlers::test_support;

    #[tokio::test]
    async fn test_close_task() {
        let state = test_support::state().await;
        let service = &state.device_service;
        let device = service
            .create_device(&CreateDeviceRequest::new(
                DeviceName::new("Kiln").unwrap(),
                2001,
                DeviceType::new("thermal").unwrap(),
                None,
            ))
            .await
            .unwrap();
        let task = service
            .create_task(
                device.id(),
                &CreateTaskRequest::new(TaskStatus::Open, Severity::Critical, "cracked".into()),
            )
            .await
            .unwrap();
        let body = UpdateTaskHttpRequestBody {
            status: "Closed".to_string(),
            severity: "Important".to_string(),
            description: "fixed".to_string(),
        };
        let path = (device.id().into_inner(), task.id().into_inner());

        let response = update_task(Path(path), State(state.clone()), Json(body))
            .await
            .unwrap();

        assert_eq!(response.data().status, "Closed");
        assert_eq!(response.data().severity, "Important");
        assert_eq!(response.data().description, "fixed");
        assert_eq!(response.data().device_id, device.id().into_inner());
        assert_eq!(response.data().created_at, task.created_at().to_rfc3339());
    }

    #[tokio::test]
    async fn test_update_missing_task() {
        let state = test_support::state().await;
        let device = state
            .device_service
            .create_device(&CreateDeviceRequest::new(
                DeviceName::new("Kiln").unwrap(),
                2001,
                DeviceType::new("thermal").unwrap(),
                None,
            ))
            .await
            .unwrap();
        let body = UpdateTaskHttpRequestBody {
            status: "Closed".to_string(),
            severity: "Important".to_string(),
            description: "fixed".to_string(),
        };
        let id = device.id().into_inner();

        let result = update_task(Path((id, 42)), State(state), Json(body)).await;

        assert_eq!(
            result,
            Err(ApiError::NotFound(format!(
                "task with id 42 not found on device {}",
                id
            )))
        );
    }
}
