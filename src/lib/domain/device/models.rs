pub mod device;
pub mod task;
