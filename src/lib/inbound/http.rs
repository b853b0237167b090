use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use tokio::net;

use crate::domain::device::ports::DeviceService;
use crate::inbound::http::handlers::{
    create_device::create_device, create_task::create_task, delete_device::delete_device,
    delete_task::delete_task, get_device::get_device, get_devices::list_devices,
    get_devices::search_devices, get_task::get_task, get_tasks::list_tasks,
    update_device::update_device, update_task::update_task,
};

mod handlers;
mod responses;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig<'a> {
    pub port: &'a str,
}

#[derive(Debug, Clone)]
struct AppState<DS: DeviceService> {
    device_service: Arc<DS>,
}

pub struct HttpServer {
    router: axum::Router,
    listener: net::TcpListener,
}

impl HttpServer {
    pub async fn new(
        device_service: impl DeviceService,
        config: HttpServerConfig<'_>,
    ) -> anyhow::Result<Self> {
        let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
            |request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                tracing::info_span!("http_request", method = ?request.method(), uri)
            },
        );

        let state = AppState {
            device_service: Arc::new(device_service),
        };

        let router = axum::Router::new()
            .nest("/api", api_routes())
            .layer(trace_layer)
            .with_state(state);

        let listener = net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("failed to listen on {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self
            .listener
            .local_addr()
            .context("failed to read listener address")?;
        tracing::debug!("listening on {}", addr);

        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;

        Ok(())
    }
}

fn api_routes<DS: DeviceService>() -> Router<AppState<DS>> {
    Router::new()
        .route("/devices", get(list_devices).post(create_device))
        .route("/devices/search", get(search_devices))
        .route(
            "/devices/{id}",
            get(get_device).put(update_device).delete(delete_device),
        )
        .route("/devices/{id}/tasks", get(list_tasks).post(create_task))
        .route(
            "/devices/{id}/tasks/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
