#[cfg(test)]
use metrics_exporter_prometheus::PrometheusBuilder;
use metrics_exporter_prometheus::PrometheusHandle;
use probable_immunity::config::IntakeConfig;
use probable_immunity::{IllnessRegistry, ImmunityService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

impl AppState {
    /// State backed by a recorder that is never installed globally.
    #[cfg(test)]
    pub(crate) fn detached(ready: bool) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        }
    }
}

pub(crate) fn immunity_service(intake: IntakeConfig) -> Arc<ImmunityService> {
    Arc::new(ImmunityService::new(
        Arc::new(IllnessRegistry::standard()),
        intake,
    ))
}
