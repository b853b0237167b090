use std::str::FromStr;

use chrono::{DateTime, Utc};
use derive_more::Display;
use thiserror::Error;

use crate::domain::device::models::device::{DeviceId, StoreError};

/// Represents always valid maintenance task identifier, as assigned by the store.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(i64);

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0} is not a valid task id")]
pub struct TaskIdError(i64);
impl TaskId {
    pub fn new(raw_id: i64) -> Result<Self, TaskIdError> {
        if raw_id <= 0 {
            Err(TaskIdError(raw_id))
        } else {
            Ok(Self(raw_id))
        }
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

#[derive(Display, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Important,
    Unimportant,
}

impl Severity {
    /// Sort rank, most urgent first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Important => 1,
            Severity::Unimportant => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Important => "Important",
            Severity::Unimportant => "Unimportant",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("{0:?} is not a valid severity, expected Critical, Important or Unimportant")]
pub struct SeverityParseError(String);

impl FromStr for Severity {
    type Err = SeverityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Critical" => Ok(Severity::Critical),
            "Important" => Ok(Severity::Important),
            "Unimportant" => Ok(Severity::Unimportant),
            other => Err(SeverityParseError(other.to_string())),
        }
    }
}

/// Lifecycle marker of a task. Any status may follow any other.
#[derive(Display, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[default]
    Open,
    Closed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::Closed => "Closed",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("{0:?} is not a valid task status, expected Open or Closed")]
pub struct TaskStatusParseError(String);

impl FromStr for TaskStatus {
    type Err = TaskStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(TaskStatus::Open),
            "Closed" => Ok(TaskStatus::Closed),
            other => Err(TaskStatusParseError(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaintenanceTask {
    id: TaskId,
    device_id: DeviceId,
    status: TaskStatus,
    severity: Severity,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MaintenanceTask {
    pub fn new(
        id: TaskId,
        device_id: DeviceId,
        status: TaskStatus,
        severity: Severity,
        description: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            device_id,
            status,
            severity,
            description,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    /// Replaces status, severity and description, stamping `updated_at` with `now`.
    ///
    /// The owning device is pinned to `device_id`; creation time is untouched.
    pub fn patched(&self, device_id: DeviceId, req: &UpdateTaskRequest, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            device_id,
            status: req.status(),
            severity: req.severity(),
            description: req.description().to_string(),
            created_at: self.created_at,
            updated_at: now,
        }
    }
}

/// Data required by the domain to create a [MaintenanceTask].
///
/// Carries no device reference: the owner is always the device the task is created under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTaskRequest {
    status: TaskStatus,
    severity: Severity,
    description: String,
}

impl CreateTaskRequest {
    pub fn new(status: TaskStatus, severity: Severity, description: String) -> Self {
        Self {
            status,
            severity,
            description,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A task about to be inserted. The store assigns its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewMaintenanceTask {
    device_id: DeviceId,
    status: TaskStatus,
    severity: Severity,
    description: String,
    created_at: DateTime<Utc>,
}

impl NewMaintenanceTask {
    pub fn new(device_id: DeviceId, req: &CreateTaskRequest, now: DateTime<Utc>) -> Self {
        Self {
            device_id,
            status: req.status(),
            severity: req.severity(),
            description: req.description().to_string(),
            created_at: now,
        }
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    /// A fresh task has never been modified, so it is last updated at creation.
    pub fn into_task(self, id: TaskId) -> MaintenanceTask {
        MaintenanceTask::new(
            id,
            self.device_id,
            self.status,
            self.severity,
            self.description,
            self.created_at,
            self.created_at,
        )
    }
}

/// Replacement values for the mutable fields of a [MaintenanceTask].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    status: TaskStatus,
    severity: Severity,
    description: String,
}

impl UpdateTaskRequest {
    pub fn new(status: TaskStatus, severity: Severity, description: String) -> Self {
        Self {
            status,
            severity,
            description,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("device with id {device_id} not found")]
    DeviceNotFound { device_id: DeviceId },
    #[error("task with id {task_id} not found on device {device_id}")]
    NotFound { device_id: DeviceId, task_id: TaskId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod severity_tests {
    use super::*;

    #[test]
    fn test_rank_follows_urgency() {
        assert!(Severity::Critical.rank() < Severity::Important.rank());
        assert!(Severity::Important.rank() < Severity::Unimportant.rank());
    }

    #[test]
    fn test_parse_success() {
        assert_eq!("Important".parse::<Severity>(), Ok(Severity::Important));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let result = "critical".parse::<Severity>();
        let expected = Err(SeverityParseError("critical".to_string()));

        assert_eq!(result, expected);
    }

    #[test]
    fn test_display_matches_wire_name() {
        for severity in [Severity::Critical, Severity::Important, Severity::Unimportant] {
            assert_eq!(severity.to_string(), severity.as_str());
            assert_eq!(severity.to_string().parse::<Severity>(), Ok(severity));
        }
        assert_eq!(Severity::Unimportant.to_string(), "Unimportant");
    }
}
