use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::device::models::device::{
    Device, DeviceError, DeviceIdError, DeviceIdMismatchError, DeviceWithTasks, StoreError,
};
use crate::domain::device::models::task::{MaintenanceTask, TaskError, TaskIdError};

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1.0 == other.1.0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.0
    }

    #[cfg(test)]
    pub fn data(&self) -> &T {
        &self.1.0.data
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    UnprocessableEntity(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::InternalServerError(format!("{:?}", e))
    }
}

impl From<DeviceError> for ApiError {
    fn from(e: DeviceError) -> Self {
        match e {
            DeviceError::NotFound { id } => {
                Self::NotFound(format!("device with id {} not found", id))
            }
            DeviceError::Store(cause) => cause.into(),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::DeviceNotFound { device_id } => {
                Self::NotFound(format!("device with id {} not found", device_id))
            }
            TaskError::NotFound { device_id, task_id } => Self::NotFound(format!(
                "task with id {} not found on device {}",
                task_id, device_id
            )),
            TaskError::Store(cause) => cause.into(),
        }
    }
}

impl From<DeviceIdError> for ApiError {
    fn from(e: DeviceIdError) -> Self {
        Self::UnprocessableEntity(e.to_string())
    }
}

impl From<TaskIdError> for ApiError {
    fn from(e: TaskIdError) -> Self {
        Self::UnprocessableEntity(e.to_string())
    }
}

impl From<DeviceIdMismatchError> for ApiError {
    fn from(e: DeviceIdMismatchError) -> Self {
        Self::BadRequest(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ApiError::*;

        match self {
            InternalServerError(e) => {
                tracing::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponseBody::new_error(
                        "Internal server error".to_string(),
                    )),
                )
                    .into_response()
            }
            BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponseBody::new_error(message)),
            )
                .into_response(),
            NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ApiResponseBody::new_error(message)),
            )
                .into_response(),
            UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponseBody::new_error(message)),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(message: String) -> Self {
        Self {
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponseData {
    pub id: i64,
    pub status: String,
    pub severity: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
    pub device_id: i64,
}

impl From<&MaintenanceTask> for TaskResponseData {
    fn from(task: &MaintenanceTask) -> Self {
        Self {
            id: task.id().into_inner(),
            status: task.status().to_string(),
            severity: task.severity().to_string(),
            description: task.description().to_string(),
            created_at: task.created_at().to_rfc3339(),
            updated_at: task.updated_at().to_rfc3339(),
            device_id: task.device_id().into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponseData {
    pub id: i64,
    pub name: String,
    pub year: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: String,
    /// Absent when the operation did not load the device's tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskResponseData>>,
}

impl From<&Device> for DeviceResponseData {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id().into_inner(),
            name: device.name().to_string(),
            year: device.year(),
            kind: device.kind().to_string(),
            created_at: device.created_at().to_rfc3339(),
            tasks: None,
        }
    }
}

impl From<&DeviceWithTasks> for DeviceResponseData {
    fn from(device: &DeviceWithTasks) -> Self {
        Self {
            tasks: Some(device.tasks().iter().map(|task| task.into()).collect()),
            ..DeviceResponseData::from(device.device())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevicesResponseData {
    pub devices: Vec<DeviceResponseData>,
}

impl From<&Vec<DeviceWithTasks>> for DevicesResponseData {
    fn from(devices: &Vec<DeviceWithTasks>) -> Self {
        Self {
            devices: devices.iter().map(|device| device.into()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TasksResponseData {
    pub tasks: Vec<TaskResponseData>,
}

impl From<&Vec<MaintenanceTask>> for TasksResponseData {
    fn from(tasks: &Vec<MaintenanceTask>) -> Self {
        Self {
            tasks: tasks.iter().map(|task| task.into()).collect(),
        }
    }
}
