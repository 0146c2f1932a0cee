use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    beacon::{Beacon, FileIdentity, NoopTracker, Tracker},
    navigator::DetailsStep,
    prompts::PromptSet,
};

/// Settings of the letter client, read once at start.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub output_dir: PathBuf,
    /// Analytics collection endpoint, tracking is off without one.
    pub tracking_url: Option<String>,
    pub identity_path: PathBuf,
    pub details_step: DetailsStep,
    /// JSON prompt set replacing the built-in reflections.
    pub prompts_path: Option<PathBuf>,
    pub intent_service_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            tracking_url: None,
            identity_path: PathBuf::from(".legacy_letter_anon_id"),
            details_step: DetailsStep::Disabled,
            prompts_path: None,
            intent_service_url: None,
        }
    }
}

fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl ClientConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let details_step = match non_empty("LETTER_DETAILS_STEP") {
            Some(value) => value.parse().context("LETTER_DETAILS_STEP")?,
            None => defaults.details_step,
        };

        Ok(Self {
            output_dir: non_empty("LETTER_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            tracking_url: non_empty("LETTER_TRACKING_URL"),
            identity_path: non_empty("LETTER_IDENTITY_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.identity_path),
            details_step,
            prompts_path: non_empty("LETTER_PROMPTS").map(PathBuf::from),
            intent_service_url: non_empty("INTENT_SERVICE_URL"),
        })
    }

    pub fn prompt_set(&self) -> anyhow::Result<PromptSet> {
        match &self.prompts_path {
            Some(path) => PromptSet::load(path),
            None => Ok(PromptSet::builtin()),
        }
    }

    /// The beacon when a tracking url is configured, a no-op otherwise.
    /// A malformed url disables tracking rather than the form.
    pub fn tracker(&self) -> Arc<dyn Tracker> {
        let Some(url) = &self.tracking_url else {
            return Arc::new(NoopTracker);
        };

        let identity = Arc::new(FileIdentity::new(&self.identity_path));
        match Beacon::new(url, identity) {
            Ok(beacon) => Arc::new(beacon),
            Err(err) => {
                log::warn!("Tracking disabled: {:#}", err);
                Arc::new(NoopTracker)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_use_builtin_prompts() {
        let config = ClientConfig::default();
        assert_eq!(config.prompt_set().unwrap(), PromptSet::builtin());
    }

    #[test]
    fn bad_tracking_url_falls_back() {
        let config = ClientConfig {
            tracking_url: Some("not a url".to_string()),
            ..ClientConfig::default()
        };
        // must not panic or fail
        config.tracker().track("page_view", None);
    }
}
