use chrono::Utc;

use crate::domain::device::models::device::{
    CreateDeviceRequest, Device, DeviceError, DeviceId, DeviceWithTasks, NewDevice, StoreError,
    UpdateDeviceRequest,
};
use crate::domain::device::models::task::{
    CreateTaskRequest, MaintenanceTask, NewMaintenanceTask, Severity, TaskError, TaskId,
    UpdateTaskRequest,
};
use crate::domain::device::ports::{DeviceRepository, DeviceService};

/// Canonical implementation of the [DeviceService] port, through which the device domain API is
/// consumed.
///
/// Each operation does one read followed by at most one write. Nothing spans a transaction, so an
/// update racing a delete may see the record vanish between the two; that update reports
/// not-found.
#[derive(Debug, Clone)]
pub struct Service<R: DeviceRepository> {
    repo: R,
}

impl<R: DeviceRepository> Service<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    async fn require_device_with_tasks(
        &self,
        device_id: &DeviceId,
    ) -> Result<DeviceWithTasks, TaskError> {
        self.repo
            .load_device_with_tasks(device_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%device_id, "device not found");
                TaskError::DeviceNotFound {
                    device_id: *device_id,
                }
            })
    }
}

impl<R: DeviceRepository> DeviceService for Service<R> {
    async fn list_devices(&self) -> Result<Vec<DeviceWithTasks>, StoreError> {
        let mut devices = self.repo.load_all_devices_with_tasks().await?;
        devices.sort_by_key(|d| *d.device().id());

        tracing::debug!(count = devices.len(), "listed devices");
        Ok(devices
            .into_iter()
            .map(DeviceWithTasks::with_sorted_tasks)
            .collect())
    }

    async fn filter_devices(
        &self,
        severity: Option<Severity>,
    ) -> Result<Vec<DeviceWithTasks>, StoreError> {
        let devices = self.repo.load_all_devices_with_tasks().await?;

        let matching: Vec<DeviceWithTasks> = match severity {
            Some(severity) => devices
                .into_iter()
                .filter(|d| d.has_task_with_severity(severity))
                .collect(),
            None => devices,
        };

        tracing::debug!(?severity, count = matching.len(), "filtered devices");
        Ok(matching)
    }

    async fn get_device(&self, id: &DeviceId) -> Result<DeviceWithTasks, DeviceError> {
        match self.repo.load_device_with_tasks(id).await? {
            Some(device) => Ok(device.with_sorted_tasks()),
            None => {
                tracing::warn!(device_id = %id, "device not found");
                Err(DeviceError::NotFound { id: *id })
            }
        }
    }

    async fn create_device(&self, req: &CreateDeviceRequest) -> Result<Device, StoreError> {
        let device = self
            .repo
            .insert_device(&NewDevice::new(req, Utc::now()))
            .await?;

        tracing::info!(device_id = %device.id(), name = %device.name(), "created device");
        Ok(device)
    }

    async fn update_device(&self, req: &UpdateDeviceRequest) -> Result<Device, DeviceError> {
        let existing = self
            .repo
            .load_device(req.id())
            .await?
            .ok_or(DeviceError::NotFound { id: *req.id() })?;

        let device = self
            .repo
            .update_device(&existing.with_changes(req))
            .await?
            .ok_or_else(|| {
                tracing::warn!(device_id = %req.id(), "device removed before update was written");
                DeviceError::NotFound { id: *req.id() }
            })?;

        tracing::info!(device_id = %device.id(), "updated device");
        Ok(device)
    }

    async fn delete_device(&self, id: &DeviceId) -> Result<(), StoreError> {
        if self.repo.load_device(id).await?.is_none() {
            tracing::debug!(device_id = %id, "device already absent, nothing to delete");
            return Ok(());
        }

        self.repo.delete_device(id).await?;

        tracing::info!(device_id = %id, "deleted device");
        Ok(())
    }

    async fn list_tasks(&self, device_id: &DeviceId) -> Result<Vec<MaintenanceTask>, DeviceError> {
        self.get_device(device_id)
            .await
            .map(DeviceWithTasks::into_tasks)
    }

    async fn get_task(
        &self,
        device_id: &DeviceId,
        task_id: &TaskId,
    ) -> Result<MaintenanceTask, TaskError> {
        self.require_device_with_tasks(device_id)
            .await?
            .into_tasks()
            .into_iter()
            .find(|t| t.id() == task_id)
            .ok_or(TaskError::NotFound {
                device_id: *device_id,
                task_id: *task_id,
            })
    }

    async fn create_task(
        &self,
        device_id: &DeviceId,
        req: &CreateTaskRequest,
    ) -> Result<MaintenanceTask, DeviceError> {
        if self.repo.load_device(device_id).await?.is_none() {
            tracing::warn!(%device_id, "cannot create task, device not found");
            return Err(DeviceError::NotFound { id: *device_id });
        }

        let task = self
            .repo
            .insert_task(&NewMaintenanceTask::new(*device_id, req, Utc::now()))
            .await?;

        tracing::info!(%device_id, task_id = %task.id(), "created maintenance task");
        Ok(task)
    }

    async fn update_task(
        &self,
        device_id: &DeviceId,
        task_id: &TaskId,
        req: &UpdateTaskRequest,
    ) -> Result<MaintenanceTask, TaskError> {
        let device = self.require_device_with_tasks(device_id).await?;
        let existing = device
            .tasks()
            .iter()
            .find(|t| t.id() == task_id)
            .ok_or(TaskError::NotFound {
                device_id: *device_id,
                task_id: *task_id,
            })?;

        let task = self
            .repo
            .update_task(&existing.patched(*device_id, req, Utc::now()))
            .await?
            .ok_or_else(|| {
                tracing::warn!(%device_id, %task_id, "task removed before update was written");
                TaskError::NotFound {
                    device_id: *device_id,
                    task_id: *task_id,
                }
            })?;

        tracing::info!(%device_id, %task_id, status = %task.status(), "updated maintenance task");
        Ok(task)
    }

    async fn delete_task(&self, device_id: &DeviceId, task_id: &TaskId) -> Result<(), TaskError> {
        let device = self.require_device_with_tasks(device_id).await?;

        if !device.tasks().iter().any(|t| t.id() == task_id) {
            tracing::debug!(%device_id, %task_id, "task already absent, nothing to delete");
            return Ok(());
        }

        self.repo.delete_task(device_id, task_id).await?;

        tracing::info!(%device_id, %task_id, "deleted maintenance task");
        Ok(())
    }
}
