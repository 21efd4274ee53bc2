use super::domain::{ByCategory, EnvironmentalIndicators, ProcessedRegion, RawRegionRecord};
use super::scoring::{CategoryScorer, UniformScorer};
use super::RegionDataError;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const EMBEDDED_REGIONS: &str = include_str!("../../data/regions.json");

/// Residents per normalised rate unit.
pub const RATE_BASE: f64 = 10_000.0;

/// Rounds to one decimal place, halves away from zero (`51.25` -> `51.3`).
///
/// Every one-decimal figure the crate produces goes through here, both
/// normalised rates and the averages quoted in narrative prompts.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Symptom count per 10,000 residents, rounded with [`round_one_decimal`].
pub fn normalize_symptoms(symptoms: u64, population: u64) -> Result<f64, RegionDataError> {
    if population == 0 {
        return Err(RegionDataError::InvalidInput {
            reason: "population must be greater than zero".to_string(),
        });
    }

    let rate = (symptoms as f64 / population as f64) * RATE_BASE;
    Ok(round_one_decimal(rate))
}

#[derive(Debug, Clone)]
enum RegionSource {
    Embedded,
    File(PathBuf),
    Buffer(Arc<str>),
}

/// Backing store for region records plus the strategy used to score
/// categories when records are processed.
#[derive(Debug, Clone)]
pub struct RegionDataset {
    source: RegionSource,
    scorer: Arc<dyn CategoryScorer>,
}

impl RegionDataset {
    /// Reference dataset compiled into the crate.
    pub fn embedded() -> Self {
        Self::new(RegionSource::Embedded)
    }

    /// JSON file re-read on every load, so a file removed at runtime surfaces
    /// as [`RegionDataError::DataUnavailable`] on the next request.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::new(RegionSource::File(path.as_ref().to_path_buf()))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, RegionDataError> {
        let mut buffer = String::new();
        reader
            .read_to_string(&mut buffer)
            .map_err(|err| RegionDataError::DataUnavailable {
                reason: format!("failed to read region data: {err}"),
            })?;
        Ok(Self::new(RegionSource::Buffer(Arc::from(buffer))))
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn CategoryScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    fn new(source: RegionSource) -> Self {
        Self {
            source,
            scorer: Arc::new(UniformScorer),
        }
    }

    pub fn describe(&self) -> String {
        match &self.source {
            RegionSource::Embedded => "embedded".to_string(),
            RegionSource::File(path) => path.display().to_string(),
            RegionSource::Buffer(_) => "in-memory".to_string(),
        }
    }

    /// Raw records in source order.
    pub fn load_regions(&self) -> Result<Vec<RawRegionRecord>, RegionDataError> {
        let records: Vec<RawRegionRecord> = match &self.source {
            RegionSource::Embedded => parse_records(EMBEDDED_REGIONS)?,
            RegionSource::Buffer(raw) => parse_records(raw)?,
            RegionSource::File(path) => {
                let raw = std::fs::read_to_string(path).map_err(|err| {
                    RegionDataError::DataUnavailable {
                        reason: format!("failed to read {}: {err}", path.display()),
                    }
                })?;
                parse_records(&raw)?
            }
        };

        tracing::debug!(source = %self.describe(), count = records.len(), "loaded region records");
        Ok(records)
    }

    /// One processed region per raw record, preserving source order.
    pub fn load_processed_regions(&self) -> Result<Vec<ProcessedRegion>, RegionDataError> {
        self.load_regions()?
            .into_iter()
            .map(|record| self.process(record))
            .collect()
    }

    /// Case-insensitive lookup by region name.
    pub fn find_region(&self, region_name: &str) -> Result<ProcessedRegion, RegionDataError> {
        let wanted = region_name.trim().to_lowercase();
        self.load_processed_regions()?
            .into_iter()
            .find(|region| region.region_name.to_lowercase() == wanted)
            .ok_or_else(|| RegionDataError::NotFound {
                region_name: region_name.trim().to_string(),
            })
    }

    fn process(&self, record: RawRegionRecord) -> Result<ProcessedRegion, RegionDataError> {
        let population = record.population;
        let normalized = ByCategory::try_from_fn(|category| {
            normalize_symptoms(*record.symptoms.get(category), population).map_err(|_| {
                RegionDataError::InvalidInput {
                    reason: format!("region '{}' has a population of zero", record.region_name),
                }
            })
        })?;
        let categories = ByCategory::from_fn(|category| self.scorer.score(category, &record));

        Ok(ProcessedRegion {
            indicators: EnvironmentalIndicators {
                temperature: record.temperature,
                humidity: record.humidity,
                water_quality_index: record.water_quality_index,
                population,
            },
            region_name: record.region_name,
            overall_score: record.overall_score,
            overall_level: record.overall_level,
            categories,
            normalized,
        })
    }
}

impl Default for RegionDataset {
    fn default() -> Self {
        Self::embedded()
    }
}

/// Raw records from the embedded dataset.
pub fn load_regions() -> Result<Vec<RawRegionRecord>, RegionDataError> {
    RegionDataset::embedded().load_regions()
}

/// Processed records from the embedded dataset with uniform category scoring.
pub fn load_processed_regions() -> Result<Vec<ProcessedRegion>, RegionDataError> {
    RegionDataset::embedded().load_processed_regions()
}

fn parse_records(raw: &str) -> Result<Vec<RawRegionRecord>, RegionDataError> {
    serde_json::from_str(raw).map_err(|err| RegionDataError::DataUnavailable {
        reason: format!("malformed region data: {err}"),
    })
}
