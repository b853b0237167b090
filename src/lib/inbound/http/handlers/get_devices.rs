use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::device::models::task::{Severity, SeverityParseError};
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, DevicesResponseData};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchDevicesQuery {
    severity: Option<String>,
}

impl From<SeverityParseError> for ApiError {
    fn from(e: SeverityParseError) -> Self {
        Self::UnprocessableEntity(e.to_string())
    }
}

pub async fn list_devices<DS: DeviceService>(
    State(state): State<AppState<DS>>,
) -> Result<ApiSuccess<DevicesResponseData>, ApiError> {
    state
        .device_service
        .list_devices()
        .await
        .map_err(ApiError::from)
        .map(|ref devices| ApiSuccess::new(StatusCode::OK, devices.into()))
}

pub async fn search_devices<DS: DeviceService>(
    Query(query): Query<SearchDevicesQuery>,
    State(state): State<AppState<DS>>,
) -> Result<ApiSuccess<DevicesResponseData>, ApiError> {
    let severity = query
        .severity
        .as_deref()
        .map(str::parse::<Severity>)
        .transpose()?;

    state
        .device_service
        .filter_devices(severity)
        .await
        .map_err(ApiError::from)
        .map(|ref devices| ApiSuccess::new(StatusCode::OK, devices.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::models::device::{
        CreateDeviceRequest, DeviceId, DeviceName, DeviceType,
    };
    use crate::domain::device::models::task::{CreateTaskRequest, TaskStatus};
    use crate::inbound::http::handlers::test_support::{self, TestState};

    async fn seed(state: &TestState, name: &str, severities: &[Severity]) -> DeviceId {
        let service = &state.device_service;
        let req = CreateDeviceRequest::new(
            DeviceName::new(name).unwrap(),
            2010,
            DeviceType::new("pump").unwrap(),
            None,
        );
        let device = service.create_device(&req).await.unwrap();
        for severity in severities {
            let task = CreateTaskRequest::new(TaskStatus::Open, *severity, "check".to_string());
            service.create_task(device.id(), &task).await.unwrap();
        }
        *device.id()
    }

    #[tokio::test]
    async fn test_list_devices_nests_sorted_tasks() {
        let state = test_support::state().await;
        seed(&state, "Pump A", &[Severity::Unimportant, Severity::Critical]).await;
        seed(&state, "Pump B", &[]).await;

        let response = list_devices(State(state)).await.unwrap();

        let devices = &response.data().devices;
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Pump A");
        let severities: Vec<&str> = devices[0]
            .tasks
            .as_ref()
            .unwrap()
            .iter()
            .map(|t| t.severity.as_str())
            .collect();
        assert_eq!(severities, vec!["Critical", "Unimportant"]);
        assert_eq!(devices[1].tasks, Some(vec![]));
    }

    #[tokio::test]
    async fn test_search_devices_by_severity() {
        let state = test_support::state().await;
        seed(&state, "Pump A", &[Severity::Important]).await;
        let critical = seed(&state, "Pump B", &[Severity::Critical]).await;

        let query = SearchDevicesQuery {
            severity: Some("Critical".to_string()),
        };
        let response = search_devices(Query(query), State(state)).await.unwrap();

        let ids: Vec<i64> = response.data().devices.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![critical.into_inner()]);
    }

    #[tokio::test]
    async fn test_search_devices_rejects_unknown_severity() {
        let state = test_support::state().await;

        let query = SearchDevicesQuery {
            severity: Some("Urgent".to_string()),
        };
        let result = search_devices(Query(query), State(state)).await;

        assert!(matches!(result, Err(ApiError::UnprocessableEntity(_))));
    }
}
