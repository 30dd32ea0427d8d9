use serde::{Deserialize, Serialize};

/// Top-level configuration for the analysis service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakBandConfig {
    #[serde(default)]
    pub grammar: GrammarCheckConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// LanguageTool endpoint and rule selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarCheckConfig {
    pub api_url: String,
    pub language: String,
    pub enabled_rules: Vec<String>,
    pub disabled_rules: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for GrammarCheckConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.languagetool.org/v2/check".to_string(),
            language: "en-US".to_string(),
            enabled_rules: vec![
                "GRAMMAR".to_string(),
                "TYPOS".to_string(),
                "STYLE".to_string(),
            ],
            disabled_rules: vec![
                "UPPERCASE_SENTENCE_START".to_string(),
                "WHITESPACE_RULE".to_string(),
            ],
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 5000 }
    }
}
