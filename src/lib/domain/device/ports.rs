use std::future::Future;

use crate::domain::device::models::device::{
    CreateDeviceRequest, Device, DeviceError, DeviceId, DeviceWithTasks, NewDevice, StoreError,
    UpdateDeviceRequest,
};
use crate::domain::device::models::task::{
    CreateTaskRequest, MaintenanceTask, NewMaintenanceTask, Severity, TaskError, TaskId,
    UpdateTaskRequest,
};

/// `DeviceService` is the public API for the device domain.
///
/// Every task operation is addressed through its owning device, which is resolved again on
/// each call.
pub trait DeviceService: Clone + Send + Sync + 'static {
    /// All devices by ascending id, each with its tasks in severity order.
    fn list_devices(&self) -> impl Future<Output = Result<Vec<DeviceWithTasks>, StoreError>> + Send;

    /// Devices owning at least one task of `severity`, or every device when `None`.
    /// Returned in store order.
    fn filter_devices(
        &self,
        severity: Option<Severity>,
    ) -> impl Future<Output = Result<Vec<DeviceWithTasks>, StoreError>> + Send;

    fn get_device(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<DeviceWithTasks, DeviceError>> + Send;

    fn create_device(
        &self,
        req: &CreateDeviceRequest,
    ) -> impl Future<Output = Result<Device, StoreError>> + Send;

    fn update_device(
        &self,
        req: &UpdateDeviceRequest,
    ) -> impl Future<Output = Result<Device, DeviceError>> + Send;

    /// Succeeds whether or not the device existed.
    fn delete_device(&self, id: &DeviceId) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn list_tasks(
        &self,
        device_id: &DeviceId,
    ) -> impl Future<Output = Result<Vec<MaintenanceTask>, DeviceError>> + Send;

    fn get_task(
        &self,
        device_id: &DeviceId,
        task_id: &TaskId,
    ) -> impl Future<Output = Result<MaintenanceTask, TaskError>> + Send;

    fn create_task(
        &self,
        device_id: &DeviceId,
        req: &CreateTaskRequest,
    ) -> impl Future<Output = Result<MaintenanceTask, DeviceError>> + Send;

    fn update_task(
        &self,
        device_id: &DeviceId,
        task_id: &TaskId,
        req: &UpdateTaskRequest,
    ) -> impl Future<Output = Result<MaintenanceTask, TaskError>> + Send;

    /// Succeeds when the task is already gone; fails only when the device is missing.
    fn delete_task(
        &self,
        device_id: &DeviceId,
        task_id: &TaskId,
    ) -> impl Future<Output = Result<(), TaskError>> + Send;
}

/// `DeviceRepository` represents a store of device and maintenance task data.
///
/// Lookups of a missing id yield `None`, never an error.
pub trait DeviceRepository: Send + Sync + Clone + 'static {
    fn load_device(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, StoreError>> + Send;

    fn load_device_with_tasks(
        &self,
        id: &DeviceId,
    ) -> impl Future<Output = Result<Option<DeviceWithTasks>, StoreError>> + Send;

    fn load_all_devices(&self) -> impl Future<Output = Result<Vec<Device>, StoreError>> + Send;

    fn load_all_devices_with_tasks(
        &self,
    ) -> impl Future<Output = Result<Vec<DeviceWithTasks>, StoreError>> + Send;

    fn insert_device(
        &self,
        device: &NewDevice,
    ) -> impl Future<Output = Result<Device, StoreError>> + Send;

    /// `None` when no row with the device's id exists.
    fn update_device(
        &self,
        device: &Device,
    ) -> impl Future<Output = Result<Option<Device>, StoreError>> + Send;

    /// Removes the device together with its tasks.
    fn delete_device(&self, id: &DeviceId) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn insert_task(
        &self,
        task: &NewMaintenanceTask,
    ) -> impl Future<Output = Result<MaintenanceTask, StoreError>> + Send;

    /// `None` when the task does not exist under its owning device.
    fn update_task(
        &self,
        task: &MaintenanceTask,
    ) -> impl Future<Output = Result<Option<MaintenanceTask>, StoreError>> + Send;

    fn delete_task(
        &self,
        device_id: &DeviceId,
        task_id: &TaskId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
