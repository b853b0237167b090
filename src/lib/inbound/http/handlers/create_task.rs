use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::device::models::device::DeviceId;
use crate::domain::device::models::task::{
    CreateTaskRequest, Severity, SeverityParseError, TaskStatus, TaskStatusParseError,
};
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, TaskResponseData};

/// Body of a task creation request. The owning device always comes from the path, so any
/// `deviceId` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskHttpRequestBody {
    status: Option<String>,
    severity: String,
    description: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateTaskHttpRequestError {
    #[error(transparent)]
    Status(#[from] TaskStatusParseError),
    #[error(transparent)]
    Severity(#[from] SeverityParseError),
}

impl From<ParseCreateTaskHttpRequestError> for ApiError {
    fn from(e: ParseCreateTaskHttpRequestError) -> Self {
        Self::UnprocessableEntity(e.to_string())
    }
}

impl CreateTaskHttpRequestBody {
    fn try_into_domain(self) -> Result<CreateTaskRequest, ParseCreateTaskHttpRequestError> {
        let status = match self.status {
            Some(status) => status.parse::<TaskStatus>()?,
            None => TaskStatus::default(),
        };
        let severity = self.severity.parse::<Severity>()?;

        Ok(CreateTaskRequest::new(status, severity, self.description))
    }
}

pub async fn create_task<DS: DeviceService>(
    Path(id): Path<i64>,
    State(state): State<AppState<DS>>,
    Json(body): Json<CreateTaskHttpRequestBody>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let id = DeviceId::new(id)?;
    let domain_req = body.try_into_domain()?;

    state
        .device_service
        .create_task(&id, &domain_req)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}
