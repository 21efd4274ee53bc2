use super::domain::{CategoryRisk, DiseaseCategory, RawRegionRecord};
use std::fmt::Debug;

/// Strategy producing the risk of one disease category for a region.
pub trait CategoryScorer: Debug + Send + Sync {
    fn score(&self, category: DiseaseCategory, record: &RawRegionRecord) -> CategoryRisk;
}

/// Assigns every category the region's overall score and level. The dataset
/// only carries a single aggregate score per region.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformScorer;

impl CategoryScorer for UniformScorer {
    fn score(&self, _category: DiseaseCategory, record: &RawRegionRecord) -> CategoryRisk {
        CategoryRisk {
            score: record.overall_score,
            level: record.overall_level,
        }
    }
}
