use clap::{Args, Subcommand};
use health_risk::config::AppConfig;
use health_risk::error::AppError;
use health_risk::narrative::{NarrativeService, NarrativeText};
use health_risk::regions::{DiseaseCategory, ProcessedRegion, RegionDataset, RiskLevel};
use health_risk::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RegionsArgs {
    /// Read region records from this JSON file instead of the configured source
    #[arg(long)]
    pub(crate) regions: Option<PathBuf>,
    /// Only list regions at this overall level (LOW, MEDIUM, HIGH)
    #[arg(long, value_parser = parse_level)]
    pub(crate) level: Option<RiskLevel>,
    /// Print the processed records as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum NarrativeCommand {
    /// First-person assessment of one region
    Explain(RegionArgs),
    /// Short official alert for a high-risk region
    Alert(RegionArgs),
    /// National briefing covering every region
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RegionArgs {
    /// Region name (case-insensitive)
    pub(crate) region: String,
    /// Read region records from this JSON file instead of the configured source
    #[arg(long)]
    pub(crate) regions: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SummaryArgs {
    /// Read region records from this JSON file instead of the configured source
    #[arg(long)]
    pub(crate) regions: Option<PathBuf>,
}

pub(crate) fn parse_level(raw: &str) -> Result<RiskLevel, String> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "LOW" => Ok(RiskLevel::Low),
        "MEDIUM" => Ok(RiskLevel::Medium),
        "HIGH" => Ok(RiskLevel::High),
        _ => Err(format!("'{raw}' is not one of LOW, MEDIUM, HIGH")),
    }
}

fn dataset_for(config: &AppConfig, override_path: Option<PathBuf>) -> RegionDataset {
    match override_path.or_else(|| config.data.regions_path.clone()) {
        Some(path) => RegionDataset::from_path(path),
        None => RegionDataset::embedded(),
    }
}

pub(crate) fn run_regions_report(args: RegionsArgs) -> Result<(), AppError> {
    let RegionsArgs {
        regions,
        level,
        json,
    } = args;

    let config = AppConfig::load()?;
    let dataset = dataset_for(&config, regions);
    let processed: Vec<ProcessedRegion> = dataset
        .load_processed_regions()?
        .into_iter()
        .filter(|region| level.map_or(true, |wanted| region.overall_level == wanted))
        .collect();

    if json {
        println!("{}", render_regions_json(&processed)?);
        return Ok(());
    }

    render_regions_table(&processed, &dataset.describe());
    Ok(())
}

pub(crate) fn render_regions_json(regions: &[ProcessedRegion]) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(regions)?)
}

pub(crate) fn render_regions_table(regions: &[ProcessedRegion], source: &str) {
    println!("Regional health risk ({} regions, source: {})", regions.len(), source);

    for level in RiskLevel::ordered() {
        let banded: Vec<&ProcessedRegion> = regions
            .iter()
            .filter(|region| region.overall_level == level)
            .collect();
        if banded.is_empty() {
            continue;
        }

        println!("\n{level} risk");
        for region in banded {
            let rates = DiseaseCategory::ordered()
                .into_iter()
                .map(|category| {
                    format!(
                        "{} {:.1}",
                        category.label(),
                        region.normalized.get(category)
                    )
                })
                .collect::<Vec<_>>()
                .join(" | ");
            println!(
                "- {} (score {:.1}, pop {}, {:.1}°C, WQI {:.0}): {}",
                region.region_name,
                region.overall_score,
                region.indicators.population,
                region.indicators.temperature,
                region.indicators.water_quality_index,
                rates
            );
        }
    }
}

pub(crate) async fn run_narrative(command: NarrativeCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let service = NarrativeService::from_config(&config.narrative)?;

    let (heading, result) = match command {
        NarrativeCommand::Explain(RegionArgs { region, regions }) => {
            let region = dataset_for(&config, regions).find_region(&region)?;
            let heading = format!("Assessment for {}", region.region_name);
            (heading, service.region_explanation(&region).await)
        }
        NarrativeCommand::Alert(RegionArgs { region, regions }) => {
            let region = dataset_for(&config, regions).find_region(&region)?;
            let heading = format!("Alert for {}", region.region_name);
            (heading, service.alert_message(&region).await)
        }
        NarrativeCommand::Summary(SummaryArgs { regions }) => {
            let processed = dataset_for(&config, regions).load_processed_regions()?;
            let heading = format!("National briefing ({} regions)", processed.len());
            (heading, service.national_summary(&processed).await)
        }
    };

    let narrative = NarrativeText::resolve(result)?;
    println!("{heading}");
    if narrative.degraded {
        println!("(fallback text: generation unavailable)");
    }
    println!("\n{}", narrative.text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!(parse_level("high"), Ok(RiskLevel::High));
        assert_eq!(parse_level(" Medium "), Ok(RiskLevel::Medium));
        assert!(parse_level("severe").is_err());
    }

    #[test]
    fn json_report_lists_processed_regions() {
        let regions = RegionDataset::embedded()
            .load_processed_regions()
            .expect("embedded data");
        let body = render_regions_json(&regions).expect("serializes");
        let parsed: serde_json::Value = serde_json::from_str(&body).expect("valid json");
        let listed = parsed.as_array().expect("array");
        assert_eq!(listed.len(), 12);
        assert_eq!(listed[0]["region_name"], regions[0].region_name.as_str());
    }
}
