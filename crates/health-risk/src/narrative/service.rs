use super::client::{GeminiClient, GenerationError, TextGenerator};
use super::prompts;
use super::NarrativeError;
use crate::config::NarrativeConfig;
use crate::regions::ProcessedRegion;
use serde::Serialize;
use std::sync::Arc;

/// Ministerial narrative generation over a pluggable text backend.
#[derive(Clone)]
pub struct NarrativeService {
    generator: Arc<dyn TextGenerator>,
}

impl NarrativeService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn from_config(config: &NarrativeConfig) -> Result<Self, NarrativeError> {
        Ok(Self::new(Arc::new(GeminiClient::new(config)?)))
    }

    /// Two to three sentence first-person assessment of one region.
    pub async fn region_explanation(
        &self,
        region: &ProcessedRegion,
    ) -> Result<String, NarrativeError> {
        let prompt = prompts::region_explanation_prompt(region);
        self.generate(&prompt).await
    }

    /// Short bulletin for a region the caller has already judged high risk.
    pub async fn alert_message(&self, region: &ProcessedRegion) -> Result<String, NarrativeError> {
        let prompt = prompts::alert_prompt(region);
        self.generate(&prompt).await
    }

    pub async fn national_summary(
        &self,
        regions: &[ProcessedRegion],
    ) -> Result<String, NarrativeError> {
        if regions.is_empty() {
            return Err(NarrativeError::InvalidInput {
                reason: "at least one region is required for a national summary",
            });
        }

        let prompt = prompts::national_summary_prompt(regions);
        self.generate(&prompt).await
    }

    async fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        self.generator
            .generate(prompt)
            .await
            .map_err(NarrativeError::from)
    }
}

impl std::fmt::Debug for NarrativeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeService").finish_non_exhaustive()
    }
}

/// Narrative ready to render. `degraded` marks fallback text standing in for
/// a failed generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeText {
    pub text: String,
    pub degraded: bool,
}

impl NarrativeText {
    /// Applies the fallback policy: generation failures become their fixed
    /// user-facing text, input errors are handed back to the caller.
    pub fn resolve(result: Result<String, NarrativeError>) -> Result<Self, NarrativeError> {
        match result {
            Ok(text) => Ok(Self {
                text,
                degraded: false,
            }),
            Err(NarrativeError::Generation(err)) => Ok(Self::fallback(&err)),
            Err(other) => Err(other),
        }
    }

    fn fallback(err: &GenerationError) -> Self {
        tracing::warn!(error = %err, "narrative generation degraded to fallback text");
        Self {
            text: err.fallback_text().to_string(),
            degraded: true,
        }
    }
}
