use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::difficulty::Difficulty;
use crate::kana::{Subset, Variant};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_variant")]
    pub variant: Variant,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default = "default_subsets")]
    pub subsets: Vec<String>,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_variant() -> Variant {
    Variant::Hiragana
}
fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}
fn default_subsets() -> Vec<String> {
    vec![Subset::DEFAULT.to_key().to_string()]
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kanapop")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            difficulty: default_difficulty(),
            subsets: default_subsets(),
            data_dir: default_data_dir(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize_subsets();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kanapop")
            .join("config.toml")
    }

    /// Drop unknown and repeated subset names, falling back to the default subset
    /// when nothing valid is left. Call after deserialization.
    pub fn normalize_subsets(&mut self) {
        let mut seen = BTreeSet::new();
        self.subsets = self
            .subsets
            .iter()
            .filter_map(|name| name.parse::<Subset>().ok())
            .filter(|subset| seen.insert(*subset))
            .map(|subset| subset.to_key().to_string())
            .collect();
        if self.subsets.is_empty() {
            self.subsets = default_subsets();
        }
    }

    pub fn enabled_subsets(&self) -> BTreeSet<Subset> {
        self.subsets
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.variant, Variant::Hiragana);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.subsets, vec!["basic".to_string()]);
        assert!(config.data_dir.contains("kanapop"));
    }

    #[test]
    fn test_config_serde_partial_fields() {
        let toml_str = r#"
variant = "katakana"
difficulty = "hard"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.variant, Variant::Katakana);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.subsets, default_subsets());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.subsets = vec!["voiced".to_string(), "combination".to_string()];
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.variant, deserialized.variant);
        assert_eq!(config.difficulty, deserialized.difficulty);
        assert_eq!(config.subsets, deserialized.subsets);
        assert_eq!(config.data_dir, deserialized.data_dir);
    }

    #[test]
    fn test_normalize_subsets_drops_unknown_and_duplicates() {
        let mut config = Config::default();
        config.subsets = vec![
            "Voiced".to_string(),
            "kanji".to_string(),
            "voiced".to_string(),
            "basic".to_string(),
        ];
        config.normalize_subsets();
        assert_eq!(config.subsets, vec!["voiced".to_string(), "basic".to_string()]);
    }

    #[test]
    fn test_normalize_subsets_empty_resets_to_default() {
        let mut config = Config::default();
        config.subsets = vec!["kanji".to_string()];
        config.normalize_subsets();
        assert_eq!(config.subsets, vec!["basic".to_string()]);
    }

    #[test]
    fn test_enabled_subsets_parses_names() {
        let mut config = Config::default();
        config.subsets = vec!["combination".to_string(), "basic".to_string()];
        assert_eq!(
            config.enabled_subsets(),
            BTreeSet::from([Subset::Basic, Subset::Combination])
        );
    }
}
