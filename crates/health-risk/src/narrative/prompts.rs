use crate::regions::{round_one_decimal, DiseaseCategory, ProcessedRegion, RiskLevel};

pub const MINISTER_PERSONA: &str = "You are the Minister of Health of the Kingdom of Morocco. \
You speak in first person with the authority and gravitas of a senior government official. \
Your tone is dignified, caring toward citizens, and decisive. You reference \"our citizens,\" \
\"our regions,\" and \"the Kingdom.\" You are concise but warm—a trusted voice during health \
concerns. Write in English.";

/// Stand-in for the category list when no category is banded HIGH.
pub const UNSPECIFIED_CATEGORIES: &str = "multiple categories";

pub fn region_explanation_prompt(region: &ProcessedRegion) -> String {
    let categories = &region.categories;
    let normalized = &region.normalized;
    let indicators = &region.indicators;

    format!(
        "{persona}

As Minister of Health, deliver a brief 2-3 sentence assessment of the health situation in {name}. \
Use first person (\"I am closely monitoring...\" or \"I wish to inform citizens...\").

Region: {name}
Overall Risk Level: {overall_level} (Score: {overall_score})
Waterborne Disease Risk: {water_level} (Score: {water_score})
Vector-borne Disease Risk: {vector_level} (Score: {vector_score})
Respiratory Disease Risk: {resp_level} (Score: {resp_score})
Other Diseases: {other_level} (Score: {other_score})
Temperature: {temperature}°C
Humidity: {humidity}%
Water Quality Index: {water_quality}/100
Population: {population}

Normalized symptoms per 10k population:
- Waterborne: {norm_water}
- Vector-borne: {norm_vector}
- Respiratory: {norm_resp}
- Other: {norm_other}

Be specific about which disease categories concern you most. Sound like the Minister addressing citizens.",
        persona = MINISTER_PERSONA,
        name = region.region_name,
        overall_level = region.overall_level,
        overall_score = region.overall_score,
        water_level = categories.waterborne.level,
        water_score = categories.waterborne.score,
        vector_level = categories.vector_borne.level,
        vector_score = categories.vector_borne.score,
        resp_level = categories.respiratory.level,
        resp_score = categories.respiratory.score,
        other_level = categories.other.level,
        other_score = categories.other.score,
        temperature = indicators.temperature,
        humidity = indicators.humidity,
        water_quality = indicators.water_quality_index,
        population = group_thousands(indicators.population),
        norm_water = normalized.waterborne,
        norm_vector = normalized.vector_borne,
        norm_resp = normalized.respiratory,
        norm_other = normalized.other,
    )
}

pub fn alert_prompt(region: &ProcessedRegion) -> String {
    let high = region
        .high_risk_categories()
        .into_iter()
        .map(DiseaseCategory::label)
        .collect::<Vec<_>>();
    let high = if high.is_empty() {
        UNSPECIFIED_CATEGORIES.to_string()
    } else {
        high.join(", ")
    };

    format!(
        "{persona}

As Minister of Health, issue a SHORT official alert (2 sentences max) for {name}, which has been \
flagged as HIGH RISK. Speak in first person. Be urgent but reassuring—citizens must take the \
situation seriously while trusting that the Ministry is acting.

Overall Score: {score}
Highest Risk Categories: {high}
Temperature: {temperature}°C
Humidity: {humidity}%
Water Quality: {water_quality}/100

Write like an official Ministry bulletin.",
        persona = MINISTER_PERSONA,
        name = region.region_name,
        score = region.overall_score,
        temperature = region.indicators.temperature,
        humidity = region.indicators.humidity,
        water_quality = region.indicators.water_quality_index,
    )
}

/// Callers guarantee `regions` is non-empty.
pub fn national_summary_prompt(regions: &[ProcessedRegion]) -> String {
    let group_line = |level: RiskLevel| {
        let names = regions
            .iter()
            .filter(|region| region.overall_level == level)
            .map(|region| region.region_name.as_str())
            .collect::<Vec<_>>();
        let listed = if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        };
        (names.len(), listed)
    };
    let (high_count, high_names) = group_line(RiskLevel::High);
    let (medium_count, medium_names) = group_line(RiskLevel::Medium);
    let (low_count, low_names) = group_line(RiskLevel::Low);

    let mean = |category: DiseaseCategory| {
        let total: f64 = regions
            .iter()
            .map(|region| region.categories.get(category).score)
            .sum();
        round_one_decimal(total / regions.len() as f64)
    };

    format!(
        "{persona}

As Minister of Health, deliver a brief national health briefing (3-4 sentences) to the citizens \
of the Kingdom. Use first person. Acknowledge the overall situation, highlight regions requiring \
attention, and reaffirm the Ministry's commitment to protecting public health.

Total Regions: {total}
High Risk: {high_count} regions ({high_names})
Medium Risk: {medium_count} regions ({medium_names})
Low Risk: {low_count} regions ({low_names})

Average scores across all regions:
- Waterborne: {water:.1}
- Vector-borne: {vector:.1}
- Respiratory: {resp:.1}

Write like a ministerial address to the nation.",
        persona = MINISTER_PERSONA,
        total = regions.len(),
        water = mean(DiseaseCategory::Waterborne),
        vector = mean(DiseaseCategory::VectorBorne),
        resp = mean(DiseaseCategory::Respiratory),
    )
}

/// `1234567` -> `1,234,567`.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{ByCategory, CategoryRisk, EnvironmentalIndicators};

    fn region(name: &str, level: RiskLevel, score: f64) -> ProcessedRegion {
        ProcessedRegion {
            region_name: name.to_string(),
            overall_score: score,
            overall_level: level,
            categories: ByCategory::from_fn(|_| CategoryRisk { score, level }),
            indicators: EnvironmentalIndicators {
                temperature: 27.5,
                humidity: 41.0,
                water_quality_index: 58.0,
                population: 2_676_847,
            },
            normalized: ByCategory {
                waterborne: 2.7,
                vector_borne: 0.5,
                respiratory: 4.1,
                other: 1.3,
            },
        }
    }

    #[test]
    fn groups_population_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(142_955), "142,955");
        assert_eq!(group_thousands(2_676_847), "2,676,847");
    }

    #[test]
    fn explanation_embeds_region_facts() {
        let prompt = region_explanation_prompt(&region("Souss-Massa", RiskLevel::High, 66.2));
        assert!(prompt.starts_with(MINISTER_PERSONA));
        assert!(prompt.contains("Region: Souss-Massa"));
        assert!(prompt.contains("Overall Risk Level: HIGH (Score: 66.2)"));
        assert!(prompt.contains("Vector-borne Disease Risk: HIGH (Score: 66.2)"));
        assert!(prompt.contains("Temperature: 27.5°C"));
        assert!(prompt.contains("Humidity: 41%"));
        assert!(prompt.contains("Water Quality Index: 58/100"));
        assert!(prompt.contains("Population: 2,676,847"));
        assert!(prompt.contains("- Respiratory: 4.1"));
    }

    #[test]
    fn alert_lists_high_categories_with_hyphenated_labels() {
        let prompt = alert_prompt(&region("Drâa-Tafilalet", RiskLevel::High, 76.5));
        assert!(prompt.contains(
            "Highest Risk Categories: waterborne, vector-borne, respiratory, other"
        ));
        assert!(!prompt.contains(UNSPECIFIED_CATEGORIES));
    }

    #[test]
    fn alert_without_high_categories_falls_back_to_placeholder() {
        let prompt = alert_prompt(&region("Fès-Meknès", RiskLevel::Medium, 55.1));
        assert!(prompt.contains("Highest Risk Categories: multiple categories"));
    }

    #[test]
    fn summary_reports_true_count_groups_and_means() {
        let regions = vec![
            region("Marrakech-Safi", RiskLevel::High, 70.0),
            region("Casablanca-Settat", RiskLevel::Medium, 50.0),
            region("Rabat-Salé-Kénitra", RiskLevel::Medium, 35.0),
        ];
        let prompt = national_summary_prompt(&regions);
        assert!(prompt.contains("Total Regions: 3"));
        assert!(prompt.contains("High Risk: 1 regions (Marrakech-Safi)"));
        assert!(prompt.contains(
            "Medium Risk: 2 regions (Casablanca-Settat, Rabat-Salé-Kénitra)"
        ));
        assert!(prompt.contains("Low Risk: 0 regions (none)"));
        assert!(prompt.contains("- Waterborne: 51.7"));
        assert!(prompt.contains("- Respiratory: 51.7"));
    }

    #[test]
    fn summary_means_round_half_away_from_zero() {
        let regions = vec![
            region("Souss-Massa", RiskLevel::Medium, 50.0),
            region("Marrakech-Safi", RiskLevel::High, 52.5),
        ];
        let prompt = national_summary_prompt(&regions);
        assert!(prompt.contains("- Waterborne: 51.3"));
        assert!(prompt.contains("- Vector-borne: 51.3"));
        assert!(prompt.contains("- Respiratory: 51.3"));
    }

    #[test]
    fn persona_and_alert_keep_ministry_wording() {
        assert!(MINISTER_PERSONA
            .contains("concise but warm—a trusted voice during health concerns"));
        let prompt = alert_prompt(&region("Drâa-Tafilalet", RiskLevel::High, 76.5));
        assert!(prompt
            .contains("Be urgent but reassuring—citizens must take the situation seriously"));
    }
}
