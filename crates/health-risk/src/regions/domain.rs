use serde::{Deserialize, Serialize};
use std::fmt;

/// Discretised risk band shared by regions and disease categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    /// Highest band first.
    pub fn ordered() -> [RiskLevel; 3] {
        [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low]
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseCategory {
    Waterborne,
    VectorBorne,
    Respiratory,
    Other,
}

impl DiseaseCategory {
    pub fn ordered() -> [DiseaseCategory; 4] {
        [
            DiseaseCategory::Waterborne,
            DiseaseCategory::VectorBorne,
            DiseaseCategory::Respiratory,
            DiseaseCategory::Other,
        ]
    }

    /// Serialized key, e.g. `vector_borne`.
    pub fn key(self) -> &'static str {
        match self {
            DiseaseCategory::Waterborne => "waterborne",
            DiseaseCategory::VectorBorne => "vector_borne",
            DiseaseCategory::Respiratory => "respiratory",
            DiseaseCategory::Other => "other",
        }
    }

    /// Human-facing label, e.g. `vector-borne`.
    pub fn label(self) -> &'static str {
        match self {
            DiseaseCategory::Waterborne => "waterborne",
            DiseaseCategory::VectorBorne => "vector-borne",
            DiseaseCategory::Respiratory => "respiratory",
            DiseaseCategory::Other => "other",
        }
    }
}

/// Per-category container matching the `{waterborne, vector_borne,
/// respiratory, other}` object shape used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByCategory<T> {
    pub waterborne: T,
    pub vector_borne: T,
    pub respiratory: T,
    pub other: T,
}

impl<T> ByCategory<T> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(DiseaseCategory) -> T,
    {
        Self {
            waterborne: f(DiseaseCategory::Waterborne),
            vector_borne: f(DiseaseCategory::VectorBorne),
            respiratory: f(DiseaseCategory::Respiratory),
            other: f(DiseaseCategory::Other),
        }
    }

    pub fn try_from_fn<F, E>(mut f: F) -> Result<Self, E>
    where
        F: FnMut(DiseaseCategory) -> Result<T, E>,
    {
        Ok(Self {
            waterborne: f(DiseaseCategory::Waterborne)?,
            vector_borne: f(DiseaseCategory::VectorBorne)?,
            respiratory: f(DiseaseCategory::Respiratory)?,
            other: f(DiseaseCategory::Other)?,
        })
    }

    pub fn get(&self, category: DiseaseCategory) -> &T {
        match category {
            DiseaseCategory::Waterborne => &self.waterborne,
            DiseaseCategory::VectorBorne => &self.vector_borne,
            DiseaseCategory::Respiratory => &self.respiratory,
            DiseaseCategory::Other => &self.other,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DiseaseCategory, &T)> {
        DiseaseCategory::ordered()
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

pub type SymptomCounts = ByCategory<u64>;

/// Row of the region dataset as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRegionRecord {
    pub region_name: String,
    pub symptoms: SymptomCounts,
    pub population: u64,
    pub temperature: f64,
    pub humidity: f64,
    pub water_quality_index: f64,
    pub overall_level: RiskLevel,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryRisk {
    pub score: f64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalIndicators {
    pub temperature: f64,
    pub humidity: f64,
    pub water_quality_index: f64,
    pub population: u64,
}

/// Presentation-ready region record served by `/api/regions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRegion {
    pub region_name: String,
    pub overall_score: f64,
    pub overall_level: RiskLevel,
    pub categories: ByCategory<CategoryRisk>,
    pub indicators: EnvironmentalIndicators,
    /// Symptom counts per 10,000 residents.
    pub normalized: ByCategory<f64>,
}

impl ProcessedRegion {
    /// Categories currently banded `HIGH`, in canonical order.
    pub fn high_risk_categories(&self) -> Vec<DiseaseCategory> {
        self.categories
            .iter()
            .filter(|(_, risk)| risk.level == RiskLevel::High)
            .map(|(category, _)| category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn risk_level_uses_upper_case_on_the_wire() {
        let level: RiskLevel = serde_json::from_value(json!("MEDIUM")).expect("level parses");
        assert_eq!(level, RiskLevel::Medium);
        assert_eq!(serde_json::to_value(RiskLevel::High).expect("serializes"), json!("HIGH"));
    }

    #[test]
    fn categories_iterate_in_canonical_order() {
        let counts = SymptomCounts {
            waterborne: 1,
            vector_borne: 2,
            respiratory: 3,
            other: 4,
        };
        let keys: Vec<_> = counts.iter().map(|(c, n)| (c.key(), *n)).collect();
        assert_eq!(
            keys,
            vec![
                ("waterborne", 1),
                ("vector_borne", 2),
                ("respiratory", 3),
                ("other", 4)
            ]
        );
    }

    #[test]
    fn vector_borne_label_is_hyphenated() {
        assert_eq!(DiseaseCategory::VectorBorne.label(), "vector-borne");
        assert_eq!(DiseaseCategory::VectorBorne.key(), "vector_borne");
    }
}
