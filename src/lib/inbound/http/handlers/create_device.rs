use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::device::models::device::{
    CreateDeviceRequest, DeviceName, DeviceNameEmptyError, DeviceType, DeviceTypeEmptyError,
    DeviceWithTasks,
};
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, DeviceResponseData};

/// Body of a device creation request. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceHttpRequestBody {
    name: String,
    year: i32,
    #[serde(rename = "type")]
    kind: String,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateDeviceHttpRequestError {
    #[error(transparent)]
    Name(#[from] DeviceNameEmptyError),
    #[error(transparent)]
    Kind(#[from] DeviceTypeEmptyError),
}

impl From<ParseCreateDeviceHttpRequestError> for ApiError {
    fn from(e: ParseCreateDeviceHttpRequestError) -> Self {
        Self::UnprocessableEntity(e.to_string())
    }
}

impl CreateDeviceHttpRequestBody {
    fn try_into_domain(self) -> Result<CreateDeviceRequest, ParseCreateDeviceHttpRequestError> {
        let name = DeviceName::new(&self.name)?;
        let kind = DeviceType::new(&self.kind)?;

        Ok(CreateDeviceRequest::new(
            name,
            self.year,
            kind,
            self.created_at,
        ))
    }
}

pub async fn create_device<DS: DeviceService>(
    State(state): State<AppState<DS>>,
    Json(body): Json<CreateDeviceHttpRequestBody>,
) -> Result<ApiSuccess<DeviceResponseData>, ApiError> {
    let domain_req = body.try_into_domain()?;
    state
        .device_service
        .create_device(&domain_req)
        .await
        .map_err(ApiError::from)
        .map(|device| {
            // A fresh device owns no tasks yet.
            let device = DeviceWithTasks::new(device, Vec::new());
            ApiSuccess::new(StatusCode::CREATED, (&device).into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::handlers::test_support;

    fn body(name: &str, kind: &str) -> CreateDeviceHttpRequestBody {
        CreateDeviceHttpRequestBody {
            name: name.to_string(),
            year: 2016,
            kind: kind.to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_device_success() {
        let state = test_support::state().await;

        let response = create_device(State(state), Json(body("Forklift", "vehicle")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.data().id, 1);
        assert_eq!(response.data().name, "Forklift");
        assert_eq!(response.data().kind, "vehicle");
        assert_eq!(response.data().tasks, Some(vec![]));

        let json = serde_json::to_value(response.data()).unwrap();
        assert_eq!(json["tasks"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_device_empty_name() {
        let state = test_support::state().await;

        let result = create_device(State(state), Json(body("  ", "vehicle"))).await;

        assert_eq!(
            result,
            Err(ApiError::UnprocessableEntity(
                "device name cannot be empty".to_string()
            ))
        );
    }

    #[test]
    fn test_body_ignores_client_id() {
        let parsed: CreateDeviceHttpRequestBody = serde_json::from_value(serde_json::json!({
            "id": 99,
            "name": "Forklift",
            "year": 2016,
            "type": "vehicle"
        }))
        .unwrap();

        assert_eq!(parsed, body("Forklift", "vehicle"));
    }
}
