use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use speakband_core::{
    GrammarCheckConfig, GrammarCheckOutcome, GrammarError, Result, SpeakBandError,
};

use crate::check::GrammarCheck;

/// Client for the LanguageTool `/v2/check` endpoint.
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    config: GrammarCheckConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<RuleMatch>,
}

#[derive(Debug, Deserialize)]
struct RuleMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
    rule: Rule,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct Rule {
    id: String,
}

impl LanguageToolClient {
    pub fn new(config: GrammarCheckConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpeakBandError::Http(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Raw check call. Errors propagate; use the [`GrammarCheck`] impl for
    /// the degrading variant.
    pub async fn check_text(&self, text: &str) -> Result<Vec<GrammarError>> {
        let enabled = self.config.enabled_rules.join(",");
        let disabled = self.config.disabled_rules.join(",");
        let params = [
            ("text", text),
            ("language", self.config.language.as_str()),
            ("enabledRules", enabled.as_str()),
            ("disabledRules", disabled.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.api_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| SpeakBandError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SpeakBandError::GrammarApi(format!(
                "check failed with status {}",
                response.status()
            )));
        }

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| SpeakBandError::Http(e.to_string()))?;

        Ok(filter_matches(body.matches, &self.config.disabled_rules))
    }
}

#[async_trait]
impl GrammarCheck for LanguageToolClient {
    async fn check(&self, text: &str) -> GrammarCheckOutcome {
        match self.check_text(text).await {
            Ok(errors) => {
                debug!(issues = errors.len(), "grammar check complete");
                GrammarCheckOutcome::ok(errors)
            }
            Err(e) => {
                warn!("grammar check unavailable: {}", e);
                GrammarCheckOutcome::unavailable()
            }
        }
    }
}

/// Drops matches from disabled rules and maps the rest. The server is asked
/// to disable these rules already, but public instances have been seen to
/// return them anyway.
fn filter_matches(matches: Vec<RuleMatch>, disabled_rules: &[String]) -> Vec<GrammarError> {
    matches
        .into_iter()
        .filter(|m| !disabled_rules.iter().any(|rule| rule == &m.rule.id))
        .map(|m| GrammarError {
            offset: m.offset,
            length: m.length,
            message: m.message,
            replacements: m.replacements.into_iter().map(|r| r.value).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "matches": [
            {
                "message": "Possible spelling mistake found.",
                "offset": 2,
                "length": 4,
                "replacements": [{"value": "want"}, {"value": "what"}],
                "rule": {"id": "MORFOLOGIK_RULE_EN_US"}
            },
            {
                "message": "This sentence does not start with an uppercase letter.",
                "offset": 0,
                "length": 1,
                "replacements": [],
                "rule": {"id": "UPPERCASE_SENTENCE_START"}
            }
        ]
    }"#;

    #[test]
    fn test_parses_and_filters_disabled_rules() {
        let response: CheckResponse = serde_json::from_str(SAMPLE).unwrap();
        let disabled = vec!["UPPERCASE_SENTENCE_START".to_string(), "WHITESPACE_RULE".to_string()];
        let errors = filter_matches(response.matches, &disabled);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Possible spelling mistake found.");
        assert_eq!(errors[0].offset, 2);
        assert_eq!(errors[0].length, 4);
        assert_eq!(errors[0].replacements, ["want".to_string(), "what".to_string()]);
    }

    #[test]
    fn test_missing_matches_field_is_empty() {
        let response: CheckResponse = serde_json::from_str("{}").unwrap();
        assert!(filter_matches(response.matches, &[]).is_empty());
    }

    #[test]
    fn test_replacements_default_to_empty() {
        let response: CheckResponse = serde_json::from_str(
            r#"{"matches": [{"message": "m", "offset": 0, "length": 1, "rule": {"id": "X"}}]}"#,
        )
        .unwrap();
        let errors = filter_matches(response.matches, &[]);
        assert_eq!(errors[0].top_replacement(), None);
    }
}
