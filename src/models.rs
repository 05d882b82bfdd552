//! Data models and structures
//!
//! Defines studio modes, the per-mode prompt presets, and the runtime
//! configuration loaded from the environment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Create,
    Edit,
}

/// Presets offered while creating an image from text alone.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CreatePreset {
    #[default]
    Free,
    Sticker,
    /// Logo rendering; keeps the `text` id used by the preset picker.
    #[serde(rename = "text", alias = "logo")]
    Logo,
    Comic,
}

/// Presets offered while editing uploaded images.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EditPreset {
    #[default]
    AddRemove,
    Retouch,
    Style,
    /// Merges the primary and secondary images.
    Compose,
}

/// The preset in effect for a request, tagged with its mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Create(CreatePreset),
    Edit(EditPreset),
}

impl Preset {
    pub fn mode(&self) -> Mode {
        match self {
            Preset::Create(_) => Mode::Create,
            Preset::Edit(_) => Mode::Edit,
        }
    }

    pub fn is_compose(&self) -> bool {
        matches!(self, Preset::Edit(EditPreset::Compose))
    }
}

impl CreatePreset {
    pub const ALL: [CreatePreset; 4] = [
        CreatePreset::Free,
        CreatePreset::Sticker,
        CreatePreset::Logo,
        CreatePreset::Comic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreatePreset::Free => "free",
            CreatePreset::Sticker => "sticker",
            CreatePreset::Logo => "text",
            CreatePreset::Comic => "comic",
        }
    }
}

impl EditPreset {
    pub const ALL: [EditPreset; 4] = [
        EditPreset::AddRemove,
        EditPreset::Retouch,
        EditPreset::Style,
        EditPreset::Compose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditPreset::AddRemove => "add-remove",
            EditPreset::Retouch => "retouch",
            EditPreset::Style => "style",
            EditPreset::Compose => "compose",
        }
    }
}

impl fmt::Display for CreatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EditPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreatePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(CreatePreset::Free),
            "sticker" => Ok(CreatePreset::Sticker),
            "text" | "logo" => Ok(CreatePreset::Logo),
            "comic" => Ok(CreatePreset::Comic),
            other => Err(format!(
                "Unknown create preset '{}'. Expected one of: free, sticker, text, comic",
                other
            )),
        }
    }
}

impl FromStr for EditPreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add-remove" => Ok(EditPreset::AddRemove),
            "retouch" => Ok(EditPreset::Retouch),
            "style" => Ok(EditPreset::Style),
            "compose" => Ok(EditPreset::Compose),
            other => Err(format!(
                "Unknown edit preset '{}'. Expected one of: add-remove, retouch, style, compose",
                other
            )),
        }
    }
}

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_OUTPUT_DIR: &str = "output";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
    pub output_dir: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or_else(|| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let image_model = non_empty("GEMINI_IMAGE_MODEL")
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

        let request_timeout = match non_empty("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    crate::Error::Config(format!(
                        "GEMINI_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            gemini_api_key,
            image_model,
            gemini_base_url: non_empty("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            request_timeout,
            output_dir: non_empty("STUDIO_OUTPUT_DIR")
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_preset_serialization_uses_picker_ids() {
        assert_eq!(
            serde_json::to_string(&CreatePreset::Logo).unwrap(),
            "\"text\""
        );
        assert_eq!(
            serde_json::to_string(&EditPreset::AddRemove).unwrap(),
            "\"add-remove\""
        );
        let parsed: CreatePreset = serde_json::from_str("\"logo\"").unwrap();
        assert_eq!(parsed, CreatePreset::Logo);
    }

    #[test]
    fn test_preset_from_str_round_trips_ids() {
        for preset in CreatePreset::ALL {
            assert_eq!(preset.as_str().parse::<CreatePreset>().unwrap(), preset);
        }
        for preset in EditPreset::ALL {
            assert_eq!(preset.as_str().parse::<EditPreset>().unwrap(), preset);
        }
        assert!("blur".parse::<EditPreset>().is_err());
    }

    #[test]
    fn test_preset_mode() {
        assert_eq!(Preset::Create(CreatePreset::Comic).mode(), Mode::Create);
        assert_eq!(Preset::Edit(EditPreset::Style).mode(), Mode::Edit);
        assert!(Preset::Edit(EditPreset::Compose).is_compose());
        assert!(!Preset::Edit(EditPreset::Retouch).is_compose());
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "secret")])).unwrap();
        assert_eq!(config.gemini_api_key, "secret");
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.output_dir, "output");
    }

    #[test]
    fn test_config_falls_back_to_api_key() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "fallback")])).unwrap();
        assert_eq!(config.gemini_api_key, "fallback");
    }

    #[test]
    fn test_config_requires_api_key() {
        let err = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_IMAGE_MODEL", "gemini-3-pro-image-preview"),
            ("GEMINI_BASE_URL", "http://localhost:9000"),
            ("GEMINI_TIMEOUT_SECS", "15"),
            ("STUDIO_OUTPUT_DIR", "/tmp/studio"),
        ]))
        .unwrap();
        assert_eq!(config.image_model, "gemini-3-pro-image-preview");
        assert_eq!(config.gemini_base_url, "http://localhost:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.output_dir, "/tmp/studio");
    }
}
