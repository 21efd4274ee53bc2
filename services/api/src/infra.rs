use health_risk::config::AppConfig;
use health_risk::narrative::NarrativeService;
use health_risk::regions::RegionDataset;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) regions: RegionDataset,
    pub(crate) narrative: NarrativeService,
}

/// Region source selected by configuration: the file at `APP_REGIONS_PATH`
/// when set, otherwise the embedded reference data.
pub(crate) fn region_dataset(config: &AppConfig) -> RegionDataset {
    match &config.data.regions_path {
        Some(path) => RegionDataset::from_path(path),
        None => RegionDataset::embedded(),
    }
}
