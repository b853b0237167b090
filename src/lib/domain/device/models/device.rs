use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use thiserror::Error;

use crate::domain::device::models::task::{MaintenanceTask, Severity};

/// Represents always valid device identifier, as assigned by the store.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(i64);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0} is not a valid device id")]
pub struct DeviceIdError(i64);
impl DeviceId {
    pub fn new(raw_id: i64) -> Result<Self, DeviceIdError> {
        if raw_id <= 0 {
            Err(DeviceIdError(raw_id))
        } else {
            Ok(Self(raw_id))
        }
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

/// Represents always valid device name.
#[derive(Display, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceName(String);

#[derive(Clone, Debug, Error, PartialEq)]
#[error("device name cannot be empty")]
pub struct DeviceNameEmptyError;
impl DeviceName {
    pub fn new(raw_name: &str) -> Result<Self, DeviceNameEmptyError> {
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            Err(DeviceNameEmptyError)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

/// Represents always valid device type (category) label.
#[derive(Display, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeviceType(String);

#[derive(Clone, Debug, Error, PartialEq)]
#[error("device type cannot be empty")]
pub struct DeviceTypeEmptyError;
impl DeviceType {
    pub fn new(raw_type: &str) -> Result<Self, DeviceTypeEmptyError> {
        let trimmed = raw_type.trim();
        if trimmed.is_empty() {
            Err(DeviceTypeEmptyError)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Device {
    id: DeviceId,
    name: DeviceName,
    year: i32,
    kind: DeviceType,
    created_at: DateTime<Utc>,
}

impl Device {
    pub fn new(
        id: DeviceId,
        name: DeviceName,
        year: i32,
        kind: DeviceType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            year,
            kind,
            created_at,
        }
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn name(&self) -> &DeviceName {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &DeviceType {
        &self.kind
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    /// Returns a copy carrying the mutable fields of `req`. Id and creation time are kept.
    pub fn with_changes(&self, req: &UpdateDeviceRequest) -> Self {
        Self {
            id: self.id,
            name: req.name().clone(),
            year: req.year(),
            kind: req.kind().clone(),
            created_at: self.created_at,
        }
    }
}

/// A device together with the tasks it owns, as returned by a single query.
///
/// The task sequence is a snapshot; it is never written back through the device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceWithTasks {
    device: Device,
    tasks: Vec<MaintenanceTask>,
}

impl DeviceWithTasks {
    pub fn new(device: Device, tasks: Vec<MaintenanceTask>) -> Self {
        Self { device, tasks }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn tasks(&self) -> &[MaintenanceTask] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<MaintenanceTask> {
        self.tasks
    }

    pub fn has_task_with_severity(&self, severity: Severity) -> bool {
        self.tasks.iter().any(|t| t.severity() == severity)
    }

    /// Orders the owned tasks by ascending severity rank, newest first among equals.
    ///
    /// The sort is stable, so tasks equal on both keys keep their store order.
    pub fn with_sorted_tasks(mut self) -> Self {
        self.tasks.sort_by(|a, b| {
            a.severity()
                .rank()
                .cmp(&b.severity().rank())
                .then_with(|| b.created_at().cmp(a.created_at()))
        });
        self
    }
}

/// Data required by the domain to create a [Device].
#[derive(Clone, Debug, PartialEq, Eq, From)]
pub struct CreateDeviceRequest {
    name: DeviceName,
    year: i32,
    kind: DeviceType,
    created_at: Option<DateTime<Utc>>,
}

impl CreateDeviceRequest {
    pub fn new(
        name: DeviceName,
        year: i32,
        kind: DeviceType,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            name,
            year,
            kind,
            created_at,
        }
    }

    pub fn name(&self) -> &DeviceName {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &DeviceType {
        &self.kind
    }

    pub fn created_at(&self) -> Option<&DateTime<Utc>> {
        self.created_at.as_ref()
    }
}

/// A device about to be inserted. The store assigns its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDevice {
    name: DeviceName,
    year: i32,
    kind: DeviceType,
    created_at: DateTime<Utc>,
}

impl NewDevice {
    pub fn new(req: &CreateDeviceRequest, now: DateTime<Utc>) -> Self {
        Self {
            name: req.name().clone(),
            year: req.year(),
            kind: req.kind().clone(),
            created_at: req.created_at().copied().unwrap_or(now),
        }
    }

    pub fn name(&self) -> &DeviceName {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &DeviceType {
        &self.kind
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn into_device(self, id: DeviceId) -> Device {
        Device::new(id, self.name, self.year, self.kind, self.created_at)
    }
}

/// Data required by the domain to replace the mutable fields of a [Device].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateDeviceRequest {
    id: DeviceId,
    name: DeviceName,
    year: i32,
    kind: DeviceType,
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("device id {body_id} in body does not match device id {path_id}")]
pub struct DeviceIdMismatchError {
    pub path_id: DeviceId,
    pub body_id: DeviceId,
}

impl UpdateDeviceRequest {
    /// `body_id` is the identifier the caller repeated alongside the new fields, if any.
    pub fn new(
        id: DeviceId,
        body_id: Option<DeviceId>,
        name: DeviceName,
        year: i32,
        kind: DeviceType,
    ) -> Result<Self, DeviceIdMismatchError> {
        match body_id {
            Some(body_id) if body_id != id => Err(DeviceIdMismatchError {
                path_id: id,
                body_id,
            }),
            _ => Ok(Self {
                id,
                name,
                year,
                kind,
            }),
        }
    }

    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    pub fn name(&self) -> &DeviceName {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &DeviceType {
        &self.kind
    }
}

/// The backing store failed. Opaque to the domain.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StoreError(#[from] anyhow::Error);

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device with id {id} not found")]
    NotFound { id: DeviceId },
    #[error(transparent)]
    Store(#[from] StoreError),
}
