pub mod create_device;
pub mod create_task;
pub mod delete_device;
pub mod delete_task;
pub mod get_device;
pub mod get_devices;
pub mod get_task;
pub mod get_tasks;
pub mod update_device;
pub mod update_task;
