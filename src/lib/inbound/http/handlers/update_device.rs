use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::device::models::device::{
    DeviceId, DeviceIdError, DeviceIdMismatchError, DeviceName, DeviceNameEmptyError, DeviceType,
    DeviceTypeEmptyError, UpdateDeviceRequest,
};
use crate::domain::device::ports::DeviceService;
use crate::inbound::http::AppState;
use crate::inbound::http::responses::{ApiError, ApiSuccess, DeviceResponseData};

/// Body of a device update. `id` may be repeated from the path but must then match it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateDeviceHttpRequestBody {
    id: Option<i64>,
    name: String,
    year: i32,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateDeviceHttpRequestError {
    #[error(transparent)]
    Id(#[from] DeviceIdError),
    #[error(transparent)]
    Name(#[from] DeviceNameEmptyError),
    #[error(transparent)]
    Kind(#[from] DeviceTypeEmptyError),
    #[error(transparent)]
    Mismatch(#[from] DeviceIdMismatchError),
}

impl From<ParseUpdateDeviceHttpRequestError> for ApiError {
    fn from(e: ParseUpdateDeviceHttpRequestError) -> Self {
        match e {
            ParseUpdateDeviceHttpRequestError::Mismatch(cause) => cause.into(),
            other => Self::UnprocessableEntity(other.to_string()),
        }
    }
}

impl UpdateDeviceHttpRequestBody {
    fn try_into_domain(
        self,
        id: i64,
    ) -> Result<UpdateDeviceRequest, ParseUpdateDeviceHttpRequestError> {
        let id = DeviceId::new(id)?;
        let body_id = self.id.map(DeviceId::new).transpose()?;
        let name = DeviceName::new(&self.name)?;
        let kind = DeviceType::new(&self.kind)?;

        Ok(UpdateDeviceRequest::new(id, body_id, name, self.year, kind)?)
    }
}

pub async fn update_device<DS: DeviceService>(
    Path(id): Path<i64>,
    State(state): State<AppState<DS>>,
    Json(body): Json<UpdateDeviceHttpRequestBody>,
) -> Result<ApiSuccess<DeviceResponseData>, ApiError> {
    let domain_req = body.try_into_domain(id)?;

    state
        .device_service
        .update_device(&domain_req)
        .await
        .map_err(ApiError::from)
        .map(|ref device| ApiSuccess::new(StatusCode::OK, device.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::models::device::CreateDeviceRequest;
    use crate::inbound::http::handlers::test_support;

    fn body(id: Option<i64>) -> UpdateDeviceHttpRequestBody {
        UpdateDeviceHttpRequestBody {
            id,
            name: "Boiler".to_string(),
            year: 2020,
            kind: "thermal".to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_device_success() {
        let state = test_support::state().await;
        let created = state
            .device_service
            .create_device(&CreateDeviceRequest::new(
                DeviceName::new("Kettle").unwrap(),
                1999,
                DeviceType::new("thermal").unwrap(),
                None,
            ))
            .await
            .unwrap();
        let id = created.id().into_inner();

        let response = update_device(Path(id), State(state), Json(body(Some(id))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.data().name, "Boiler");
        assert_eq!(response.data().year, 2020);
        assert_eq!(response.data().created_at, created.created_at().to_rfc3339());
    }

    #[tokio::test]
    async fn test_update_device_id_mismatch() {
        let state = test_support::state().await;

        let result = update_device(Path(1), State(state), Json(body(Some(2)))).await;

        assert_eq!(
            result,
            Err(ApiError::BadRequest(
                "device id 2 in body does not match device id 1".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_update_missing_device() {
        let state = test_support::state().await;

        let result = update_device(Path(3), State(state), Json(body(None))).await;

        assert_eq!(
            result,
            Err(ApiError::NotFound("device with id 3 not found".to_string()))
        );
    }
}
