//! Editor configuration
//!
//! Serde-backed settings for the split view and the surrounding editor's
//! debounce, loaded from and saved to a JSON file. Unknown fields are
//! tolerated and missing fields fall back to defaults, so older config
//! files keep working.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::PreviewMode;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fraction of the content width given to the source pane (0.1..=0.9)
    #[serde(default = "default_source_ratio")]
    pub source_ratio: f32,

    /// Columns reserved between the panes for the divider
    #[serde(default = "default_divider_width")]
    pub divider_width: usize,

    /// Show line numbers in the source gutter
    #[serde(default = "default_true")]
    pub line_numbers: bool,

    /// Default preview rendering mode
    #[serde(default)]
    pub preview: PreviewModeConfig,

    /// Quiet period in milliseconds before the evaluator recomputes
    /// (the debounce itself lives in the editor loop, not in this crate)
    #[serde(default = "default_debounce_ms")]
    pub eval_debounce_ms: u64,
}

/// Serializable counterpart of [`PreviewMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewModeConfig {
    #[default]
    Rendered,
    Plain,
}

impl From<PreviewModeConfig> for PreviewMode {
    fn from(mode: PreviewModeConfig) -> Self {
        match mode {
            PreviewModeConfig::Rendered => PreviewMode::Rendered,
            PreviewModeConfig::Plain => PreviewMode::Plain,
        }
    }
}

fn default_source_ratio() -> f32 {
    0.5
}

fn default_divider_width() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_ratio: default_source_ratio(),
            divider_width: default_divider_width(),
            line_numbers: default_true(),
            preview: PreviewModeConfig::default(),
            eval_debounce_ms: default_debounce_ms(),
        }
    }
}

impl Config {
    /// Split a total content width into (source, preview) pane widths,
    /// honoring `source_ratio` and the divider. Degenerate widths clamp to
    /// zero, which downstream disables wrapping rather than failing.
    pub fn pane_widths(&self, total_width: usize) -> (usize, usize) {
        let usable = total_width.saturating_sub(self.divider_width);
        let ratio = self.source_ratio.clamp(0.1, 0.9);
        let source = (usable as f32 * ratio).floor() as usize;
        (source, usable - source)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config from {}", path.display()))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("writing config to {}", path.display()))?;
        Ok(())
    }

    /// Default config file location (`<config dir>/calcdown/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calcdown").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source_ratio, 0.5);
        assert_eq!(config.eval_debounce_ms, 50);
        assert!(config.line_numbers);
        assert_eq!(config.preview, PreviewModeConfig::Rendered);
    }

    #[test]
    fn test_pane_widths_split_evenly() {
        let config = Config::default();
        let (source, preview) = config.pane_widths(83);
        assert_eq!(source, 40);
        assert_eq!(preview, 40);
    }

    #[test]
    fn test_pane_widths_degenerate_terminal() {
        let config = Config::default();
        assert_eq!(config.pane_widths(0), (0, 0));
        assert_eq!(config.pane_widths(2), (0, 0));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_parses() {
        let config: Config =
            serde_json::from_str(r#"{"source_ratio": 0.7, "preview": "plain"}"#).unwrap();
        assert_eq!(config.source_ratio, 0.7);
        assert_eq!(config.preview, PreviewModeConfig::Plain);
        assert_eq!(config.eval_debounce_ms, 50);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.source_ratio = 0.35;
        config.eval_debounce_ms = 120;
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Config::load(Path::new("/nonexistent/config.json")).is_err());
    }
}
