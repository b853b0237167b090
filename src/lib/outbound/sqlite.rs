use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};

use crate::domain::device::models::device::{
    Device, DeviceId, DeviceName, DeviceType, DeviceWithTasks, NewDevice, StoreError,
};
use crate::domain::device::models::task::{
    MaintenanceTask, NewMaintenanceTask, Severity, TaskId, TaskStatus,
};
use crate::domain::device::ports::DeviceRepository;

#[derive(Debug, Clone)]
pub struct Sqlite {
    pool: SqlitePool,
}

impl Sqlite {
    pub async fn new(path: &str) -> Result<Sqlite, anyhow::Error> {
        let options = SqliteConnectOptions::from_str(path)
            .with_context(|| format!("invalid database path {}", path))?
            .create_if_missing(true);

        Self::connect(options, SqlitePoolOptions::new())
            .await
            .with_context(|| format!("failed to open database at {}", path))
    }

    /// A private database that lives as long as the returned handle.
    pub async fn in_memory() -> Result<Sqlite, anyhow::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // Every connection to `:memory:` is a separate database, so keep exactly one alive.
        let pool_options = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);

        Self::connect(options, pool_options)
            .await
            .context("failed to open in-memory database")
    }

    async fn connect(
        options: SqliteConnectOptions,
        pool_options: SqlitePoolOptions,
    ) -> Result<Sqlite, anyhow::Error> {
        let pool = pool_options
            .connect_with(options.pragma("foreign_keys", "ON"))
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run database migrations")?;

        Ok(Sqlite { pool })
    }

    async fn fetch_tasks(&self, device_id: &DeviceId) -> Result<Vec<MaintenanceTask>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            "SELECT id, device_id, status, severity, description, created_at, updated_at \
             FROM maintenance_tasks WHERE device_id = $1 ORDER BY id",
        )
        .bind(device_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to load tasks of device {}", device_id))?;

        rows.into_iter()
            .map(|row| row.try_into_domain().map_err(StoreError::from))
            .collect()
    }
}

#[derive(Debug, FromRow)]
struct DeviceRow {
    id: i64,
    name: String,
    year: i32,
    #[sqlx(rename = "type")]
    kind: String,
    created_at: DateTime<Utc>,
}

impl DeviceRow {
    fn try_into_domain(self) -> anyhow::Result<Device> {
        Ok(Device::new(
            DeviceId::new(self.id)?,
            DeviceName::new(&self.name)?,
            self.year,
            DeviceType::new(&self.kind)?,
            self.created_at,
        ))
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    id: i64,
    device_id: i64,
    status: String,
    severity: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn try_into_domain(self) -> anyhow::Result<MaintenanceTask> {
        Ok(MaintenanceTask::new(
            TaskId::new(self.id)?,
            DeviceId::new(self.device_id)?,
            TaskStatus::from_str(&self.status)?,
            Severity::from_str(&self.severity)?,
            self.description,
            self.created_at,
            self.updated_at,
        ))
    }
}

const DEVICE_COLUMNS: &str = "SELECT id, name, year, type, created_at FROM devices";

impl DeviceRepository for Sqlite {
    async fn load_device(&self, id: &DeviceId) -> Result<Option<Device>, StoreError> {
        let row = sqlx::query_as::<_, DeviceRow>(&format!("{DEVICE_COLUMNS} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load device {}", id))?;

        Ok(row.map(DeviceRow::try_into_domain).transpose()?)
    }

    async fn load_device_with_tasks(
        &self,
        id: &DeviceId,
    ) -> Result<Option<DeviceWithTasks>, StoreError> {
        let Some(device) = self.load_device(id).await? else {
            return Ok(None);
        };
        let tasks = self.fetch_tasks(id).await?;

        Ok(Some(DeviceWithTasks::new(device, tasks)))
    }

    async fn load_all_devices(&self) -> Result<Vec<Device>, StoreError> {
        let rows = sqlx::query_as::<_, DeviceRow>(&format!("{DEVICE_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .context("failed to load devices")?;

        rows.into_iter()
            .map(|row| row.try_into_domain().map_err(StoreError::from))
            .collect()
    }

    async fn load_all_devices_with_tasks(&self) -> Result<Vec<DeviceWithTasks>, StoreError> {
        let devices = self.load_all_devices().await?;

        let rows = sqlx::query_as::<_, TaskRow>(
            "SELECT id, device_id, status, severity, description, created_at, updated_at \
             FROM maintenance_tasks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to load maintenance tasks")?;

        let mut tasks_by_device: HashMap<DeviceId, Vec<MaintenanceTask>> = HashMap::new();
        for row in rows {
            let task = row.try_into_domain()?;
            tasks_by_device
                .entry(*task.device_id())
                .or_default()
                .push(task);
        }

        Ok(devices
            .into_iter()
            .map(|device| {
                let tasks = tasks_by_device.remove(device.id()).unwrap_or_default();
                DeviceWithTasks::new(device, tasks)
            })
            .collect())
    }

    async fn insert_device(&self, device: &NewDevice) -> Result<Device, StoreError> {
        let result = sqlx::query(
            "INSERT INTO devices (name, year, type, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(device.name().to_string())
        .bind(device.year())
        .bind(device.kind().to_string())
        .bind(*device.created_at())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to save device with name {:?}", device.name()))?;

        let id = DeviceId::new(result.last_insert_rowid())
            .context("store assigned an invalid device id")?;

        Ok(device.clone().into_device(id))
    }

    async fn update_device(&self, device: &Device) -> Result<Option<Device>, StoreError> {
        let result = sqlx::query("UPDATE devices SET name = $1, year = $2, type = $3 WHERE id = $4")
            .bind(device.name().to_string())
            .bind(device.year())
            .bind(device.kind().to_string())
            .bind(device.id().into_inner())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to update device {}", device.id()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(device.clone()))
    }

    async fn delete_device(&self, id: &DeviceId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete device {}", id))?;

        Ok(())
    }

    async fn insert_task(&self, task: &NewMaintenanceTask) -> Result<MaintenanceTask, StoreError> {
        let result = sqlx::query(
            "INSERT INTO maintenance_tasks \
             (device_id, status, severity, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5)",
        )
        .bind(task.device_id().into_inner())
        .bind(task.status().as_str())
        .bind(task.severity().as_str())
        .bind(task.description())
        .bind(*task.created_at())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to save task for device {}", task.device_id()))?;

        let id = TaskId::new(result.last_insert_rowid())
            .context("store assigned an invalid task id")?;

        Ok(task.clone().into_task(id))
    }

    async fn update_task(
        &self,
        task: &MaintenanceTask,
    ) -> Result<Option<MaintenanceTask>, StoreError> {
        let result = sqlx::query(
            "UPDATE maintenance_tasks \
             SET status = $1, severity = $2, description = $3, updated_at = $4 \
             WHERE id = $5 AND device_id = $6",
        )
        .bind(task.status().as_str())
        .bind(task.severity().as_str())
        .bind(task.description())
        .bind(*task.updated_at())
        .bind(task.id().into_inner())
        .bind(task.device_id().into_inner())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update task {}", task.id()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, device_id: &DeviceId, task_id: &TaskId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM maintenance_tasks WHERE id = $1 AND device_id = $2")
            .bind(task_id.into_inner())
            .bind(device_id.into_inner())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete task {} of device {}", task_id, device_id))?;

        Ok(())
    }
}
