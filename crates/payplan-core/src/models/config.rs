//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

use super::schedule::DateLocale;

/// Tunable limits and defaults for extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Locale used to resolve ambiguous slash dates when the caller gives
    /// no hint.
    pub date_locale: DateLocale,

    /// Default currency code when none is detected.
    pub default_currency: String,

    /// Input is truncated to this many characters before splitting.
    pub max_input_chars: usize,

    /// Soft cap on items per result; overflow is dropped silently.
    pub max_items: usize,

    /// Fragments shorter than this after splitting are discarded as noise.
    pub min_block_chars: usize,

    /// Issue snippets are truncated to this many characters.
    pub snippet_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_locale: DateLocale::Us,
            default_currency: "USD".to_string(),
            max_input_chars: 16_000,
            max_items: 200,
            min_block_chars: 12,
            snippet_chars: 80,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.max_input_chars, 16_000);
        assert_eq!(config.max_items, 200);
        assert_eq!(config.default_currency, "USD");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ExtractionConfig =
            serde_json::from_str(r#"{"date_locale": "eu"}"#).unwrap();
        assert_eq!(config.date_locale, DateLocale::Eu);
        assert_eq!(config.max_items, 200);
    }
}
