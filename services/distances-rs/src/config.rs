//! TOML configuration for the distance pipeline.
//!
//! Every section is optional; an empty file yields the settings used for
//! the published dataset.
//!
//! ```toml
//! [engine]
//! transcription = "asjp"
//! vowels = ["i", "e", "E", "a", "o", "u"]
//! reduced_vowel = "3"
//!
//! [report]
//! precision = 4
//! italic_languages = ["latin", "oscan", "umbrian"]
//!
//! [report.pair_names]
//! "latin-oscan" = "Oscan ~ Latin"
//!
//! [ancient]
//! comparisons = [["oscan", "umbrian"], ["latin", "oscan"], ["latin", "umbrian"]]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use italic_phonetic::{PhonologicalEngine, Transcription, VowelCycle};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::DistanceError;
use crate::types::LanguagePair;

/// Full pipeline configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub ancient: AncientConfig,
}

impl Config {
    /// Read a config file.
    ///
    /// # Errors
    ///
    /// [`DistanceError::ConfigRead`] if the file is unreadable,
    /// [`DistanceError::ConfigParse`] if it does not match the schema,
    /// [`DistanceError::InvalidPrecision`] if the precision is out of range.
    pub fn load(path: &Path) -> Result<Self, DistanceError> {
        let raw = std::fs::read_to_string(path).map_err(|e| DistanceError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|e| DistanceError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.report.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Segmentation and vowel-cycle settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub transcription: Transcription,

    /// Ordered vowel ring; defaults to the transcription's standard cycle.
    #[serde(default)]
    pub vowels: Option<Vec<String>>,

    /// Schwa-like vowel; defaults to the transcription's standard symbol.
    #[serde(default)]
    pub reduced_vowel: Option<String>,
}

impl EngineConfig {
    /// Build the engine, validating any custom vowel cycle.
    pub fn build_engine(&self) -> Result<PhonologicalEngine, DistanceError> {
        let standard = VowelCycle::for_transcription(self.transcription);
        let cycle = match (&self.vowels, &self.reduced_vowel) {
            (None, None) => standard,
            (vowels, reduced) => VowelCycle::new(
                vowels.clone().unwrap_or_else(|| standard.vowels().to_vec()),
                reduced.clone().unwrap_or_else(|| standard.reduced().to_string()),
            )?,
        };
        Ok(PhonologicalEngine::new(self.transcription, cycle))
    }
}

/// Output table settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Decimal places kept in the per-pair means.
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Languages of the Italic family; a pair is Italic when both sides are.
    #[serde(default = "default_italic_languages")]
    pub italic_languages: Vec<String>,

    /// Display names keyed by pair label, layered over the study's names.
    /// Unlisted labels get `Left ~ Right`.
    #[serde(
        default = "default_pair_names",
        deserialize_with = "merge_pair_names"
    )]
    pub pair_names: BTreeMap<String, String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            italic_languages: default_italic_languages(),
            pair_names: default_pair_names(),
        }
    }
}

/// Means are `f64`; more decimals than this carry no information.
pub const MAX_PRECISION: u32 = 15;

impl ReportConfig {
    /// # Errors
    ///
    /// [`DistanceError::InvalidPrecision`] above [`MAX_PRECISION`].
    pub fn validate(&self) -> Result<(), DistanceError> {
        if self.precision > MAX_PRECISION {
            return Err(DistanceError::InvalidPrecision {
                precision: self.precision,
                max: MAX_PRECISION,
            });
        }
        Ok(())
    }

    pub fn display_name(&self, label: &str) -> String {
        if let Some(name) = self.pair_names.get(label) {
            return name.clone();
        }
        LanguagePair::parse(label)
            .map(|pair| pair.display_name())
            .unwrap_or_else(|| label.to_string())
    }

    /// Whether both languages of the label belong to the Italic family.
    pub fn is_italic(&self, label: &str) -> bool {
        let italic = |lang: &str| {
            self.italic_languages
                .iter()
                .any(|known| known.eq_ignore_ascii_case(lang))
        };
        LanguagePair::parse(label).is_some_and(|pair| italic(&pair.left) && italic(&pair.right))
    }
}

fn default_precision() -> u32 {
    4
}

fn default_italic_languages() -> Vec<String> {
    ["latin", "oscan", "umbrian"].map(String::from).to_vec()
}

fn default_pair_names() -> BTreeMap<String, String> {
    [
        ("oscan-umbrian", "Umbrian ~ Oscan"),
        ("latin-oscan", "Oscan ~ Latin"),
        ("latin-umbrian", "Umbrian ~ Latin"),
    ]
    .into_iter()
    .map(|(label, name)| (label.to_string(), name.to_string()))
    .collect()
}

fn merge_pair_names<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut names = default_pair_names();
    names.extend(BTreeMap::<String, String>::deserialize(deserializer)?);
    Ok(names)
}

/// Which columns of the ancient table are compared.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AncientConfig {
    #[serde(default = "default_comparisons")]
    pub comparisons: Vec<[String; 2]>,
}

impl Default for AncientConfig {
    fn default() -> Self {
        Self {
            comparisons: default_comparisons(),
        }
    }
}

impl AncientConfig {
    pub fn language_pairs(&self) -> Vec<LanguagePair> {
        self.comparisons
            .iter()
            .map(|[left, right]| LanguagePair::new(left.as_str(), right.as_str()))
            .collect()
    }
}

fn default_comparisons() -> Vec<[String; 2]> {
    [["oscan", "umbrian"], ["latin", "oscan"], ["latin", "umbrian"]]
        .into_iter()
        .map(|pair| pair.map(String::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.report.precision, 4);
        assert_eq!(config.ancient.comparisons.len(), 3);
        assert_eq!(config.engine.transcription, Transcription::Asjp);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [engine]
            transcription = "ipa"

            [report]
            precision = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.transcription, Transcription::Ipa);
        assert_eq!(config.report.precision, 2);
        assert_eq!(config.report.italic_languages, default_italic_languages());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("[report]\nprecission = 2").is_err());
    }

    #[test]
    fn test_custom_cycle() {
        let engine = EngineConfig {
            transcription: Transcription::Asjp,
            vowels: Some(vec!["i".into(), "e".into(), "a".into(), "o".into(), "u".into()]),
            reduced_vowel: None,
        }
        .build_engine()
        .unwrap();
        assert_eq!(engine.vowel_cycle().vowels().len(), 5);
        assert_eq!(engine.vowel_cycle().reduced(), "3");
    }

    #[test]
    fn test_invalid_cycle_is_rejected() {
        let result = EngineConfig {
            transcription: Transcription::Asjp,
            vowels: Some(vec!["a".into(), "e".into()]),
            reduced_vowel: None,
        }
        .build_engine();
        assert!(matches!(result, Err(DistanceError::Engine(_))));
    }

    #[test]
    fn test_names_and_italic_flag() {
        let report = ReportConfig::default();
        assert_eq!(report.display_name("latin-oscan"), "Oscan ~ Latin");
        assert_eq!(report.display_name("english-dutch"), "English ~ Dutch");
        assert_eq!(report.display_name("solo"), "solo");
        assert!(report.is_italic("latin-umbrian"));
        assert!(report.is_italic("Oscan~Umbrian"));
        assert!(!report.is_italic("english-french"));
        assert!(!report.is_italic("latin-greek"));
    }

    #[test]
    fn test_pair_names_extend_defaults() {
        let config: Config = toml::from_str(
            r#"
            [report.pair_names]
            "english-french" = "English ~ French (control)"
            "latin-oscan" = "Latin ~ Oscan"
            "#,
        )
        .unwrap();
        let report = &config.report;
        assert_eq!(report.display_name("english-french"), "English ~ French (control)");
        assert_eq!(report.display_name("latin-oscan"), "Latin ~ Oscan");
        assert_eq!(report.display_name("oscan-umbrian"), "Umbrian ~ Oscan");
        assert_eq!(report.display_name("latin-umbrian"), "Umbrian ~ Latin");
    }

    #[test]
    fn test_precision_is_bounded() {
        assert!(ReportConfig::default().validate().is_ok());

        let report = ReportConfig {
            precision: 400,
            ..ReportConfig::default()
        };
        assert!(matches!(
            report.validate(),
            Err(DistanceError::InvalidPrecision { precision: 400, max: MAX_PRECISION })
        ));
    }

    #[test]
    fn test_load_rejects_large_precision() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("distances.toml");
        std::fs::write(&path, "[report]\nprecision = 309\n").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(DistanceError::InvalidPrecision { precision: 309, .. })
        ));
    }
}
