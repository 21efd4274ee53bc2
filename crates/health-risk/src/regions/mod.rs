//! Region risk records: the static dataset, its normalisation into
//! presentation-ready records, and the per-category scoring strategy.

pub mod domain;
mod loader;
mod scoring;

pub use domain::{
    ByCategory, CategoryRisk, DiseaseCategory, EnvironmentalIndicators, ProcessedRegion,
    RawRegionRecord, RiskLevel, SymptomCounts,
};
pub use loader::{
    load_processed_regions, load_regions, normalize_symptoms, round_one_decimal, RegionDataset,
    RATE_BASE,
};
pub use scoring::{CategoryScorer, UniformScorer};

#[derive(Debug, thiserror::Error)]
pub enum RegionDataError {
    #[error("region data unavailable: {reason}")]
    DataUnavailable { reason: String },
    #[error("invalid region data: {reason}")]
    InvalidInput { reason: String },
    #[error("unknown region '{region_name}'")]
    NotFound { region_name: String },
}
