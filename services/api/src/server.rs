use crate::cli::ServeArgs;
use crate::infra::{immunity_service, AppState};
use crate::routes::with_immunity_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use probable_immunity::config::AppConfig;
use probable_immunity::error::AppError;
use probable_immunity::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = immunity_service(config.intake.clone());
    let illnesses = service.illness_names();

    let app = with_immunity_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, ?illnesses, "probable immunity service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
