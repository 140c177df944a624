//! Session Settings
//!
//! Loaded from JSON using the same camelCase keys the web client ships with:
//!
//! ```json
//! { "boardSize": 8, "gemTypes": 5,
//!   "scoreValues": { "3": 10, "4": 20, "5": 50 },
//!   "comboStep": 0.1, "seed": null }
//! ```
//!
//! Any missing key takes its default.

use std::path::Path;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::rng::clock_seed;
use crate::error::{ConfigError, SettingsError};
use crate::game::scoring::combo_step_units;
use crate::{
    DEFAULT_BOARD_SIZE, DEFAULT_COMBO_STEP, DEFAULT_GEM_TYPES, MAX_BOARD_SIZE, MAX_GEM_TYPES,
    MIN_BOARD_SIZE, MIN_GEM_TYPES,
};

/// Points awarded per run, keyed by run length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreValues {
    /// Run of exactly 3
    #[serde(rename = "3")]
    pub three: u32,
    /// Run of exactly 4
    #[serde(rename = "4")]
    pub four: u32,
    /// Run of 5 or longer
    #[serde(rename = "5")]
    pub five: u32,
}

impl Default for ScoreValues {
    fn default() -> Self {
        Self {
            three: 10,
            four: 20,
            five: 50,
        }
    }
}

/// Configuration for one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Board edge length (board is square)
    pub board_size: usize,
    /// Number of distinct gem ids
    pub gem_types: u32,
    /// Score table by run length
    pub score_values: ScoreValues,
    /// Multiplier added per cascade level (0.1 = +10% per level)
    pub combo_step: f64,
    /// Fixed seed; `None` seeds from the clock. Negative JSON seeds wrap
    /// to their two's-complement value; only the low 32 bits reach the RNG.
    #[serde(deserialize_with = "deserialize_seed")]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            gem_types: DEFAULT_GEM_TYPES,
            score_values: ScoreValues::default(),
            combo_step: DEFAULT_COMBO_STEP,
            seed: None,
        }
    }
}

/// Accept any JSON integer as a seed.
///
/// Binary formats carry the `u64` as written.
fn deserialize_seed<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum JsonSeed {
        Unsigned(u64),
        Signed(i64),
    }

    if !deserializer.is_human_readable() {
        return Option::<u64>::deserialize(deserializer);
    }
    Ok(Option::<JsonSeed>::deserialize(deserializer)?.map(|seed| match seed {
        JsonSeed::Unsigned(value) => value,
        JsonSeed::Signed(value) => value as u64,
    }))
}

impl Settings {
    /// Set a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the board edge length.
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Set the number of gem types.
    pub fn with_gem_types(mut self, gem_types: u32) -> Self {
        self.gem_types = gem_types;
        self
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&content)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check every value the engine depends on.
    ///
    /// Fewer than three gem types would let board generation loop forever,
    /// so it is refused here rather than discovered mid-game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
            });
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge {
                size: self.board_size,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.gem_types < MIN_GEM_TYPES {
            return Err(ConfigError::TooFewGemTypes {
                gem_types: self.gem_types,
                min: MIN_GEM_TYPES,
            });
        }
        if self.gem_types > MAX_GEM_TYPES {
            return Err(ConfigError::TooManyGemTypes {
                gem_types: self.gem_types,
                max: MAX_GEM_TYPES,
            });
        }
        if !self.combo_step.is_finite() || self.combo_step < 0.0 {
            return Err(ConfigError::InvalidComboStep {
                step: self.combo_step,
            });
        }
        if combo_step_units(self.combo_step).is_none() {
            return Err(ConfigError::ComboStepTooFine {
                step: self.combo_step,
            });
        }
        Ok(())
    }

    /// The configured seed, or the current clock if none is set.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_web_client() {
        let settings = Settings::default();
        assert_eq!(settings.board_size, 8);
        assert_eq!(settings.gem_types, 5);
        assert_eq!(settings.score_values, ScoreValues { three: 10, four: 20, five: 50 });
        assert!((settings.combo_step - 0.1).abs() < f64::EPSILON);
        assert_eq!(settings.seed, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_web_client_json() {
        let json = r#"{
            "boardSize": 6,
            "gemTypes": 4,
            "scoreValues": { "3": 5, "4": 15, "5": 40 },
            "comboStep": 0.25,
            "seed": 99
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.board_size, 6);
        assert_eq!(settings.gem_types, 4);
        assert_eq!(settings.score_values.four, 15);
        assert_eq!(settings.seed, Some(99));
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "scoreValues": { "5": 100 } }"#).unwrap();
        assert_eq!(settings.board_size, DEFAULT_BOARD_SIZE);
        assert_eq!(settings.score_values.three, 10);
        assert_eq!(settings.score_values.five, 100);
        assert_eq!(settings.seed, Some(7));
    }

    #[test]
    fn test_null_seed() {
        let settings = Settings::from_json(r#"{ "seed": null }"#).unwrap();
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_rejects_too_few_gem_types() {
        let err = Settings::default().with_gem_types(2).validate().unwrap_err();
        assert_eq!(err, ConfigError::TooFewGemTypes { gem_types: 2, min: 3 });

        let err = Settings::from_json(r#"{ "gemTypes": 1 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(ConfigError::TooFewGemTypes { .. })));
    }

    #[test]
    fn test_rejects_bad_board_sizes() {
        assert!(matches!(
            Settings::default().with_board_size(2).validate(),
            Err(ConfigError::BoardTooSmall { size: 2, .. })
        ));
        assert!(matches!(
            Settings::default().with_board_size(MAX_BOARD_SIZE + 1).validate(),
            Err(ConfigError::BoardTooLarge { .. })
        ));
        assert!(Settings::default().with_board_size(3).validate().is_ok());
    }

    #[test]
    fn test_rejects_too_many_gem_types() {
        assert!(Settings::default().with_gem_types(MAX_GEM_TYPES).validate().is_ok());
        assert!(matches!(
            Settings::default().with_gem_types(MAX_GEM_TYPES + 1).validate(),
            Err(ConfigError::TooManyGemTypes { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_combo_step() {
        let mut settings = Settings::default();
        settings.combo_step = -0.5;
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidComboStep { .. })));

        settings.combo_step = f64::NAN;
        assert!(settings.validate().is_err());

        settings.combo_step = 0.0;
        assert!(settings.validate().is_ok());

        settings.combo_step = 0.0125;
        assert!(settings.validate().is_ok());

        settings.combo_step = 1.0 / 3.0;
        assert!(matches!(settings.validate(), Err(ConfigError::ComboStepTooFine { .. })));
    }

    #[test]
    fn test_negative_seed_wraps() {
        let settings = Settings::from_json(r#"{ "seed": -1 }"#).unwrap();
        assert_eq!(settings.seed, Some(u64::MAX));
        // Low 32 bits drive the generator, as `-1 >>> 0` does.
        assert_eq!(settings.seed.map(|s| s as u32), Some(u32::MAX));

        let settings = Settings::from_json(r#"{ "seed": 12345 }"#).unwrap();
        assert_eq!(settings.seed, Some(12345));

        let json = Settings::default().with_seed(7).to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap().seed, Some(7));
    }

    #[test]
    fn test_seed_survives_bincode() {
        let settings = Settings::default().with_seed(u64::MAX);
        let bytes = bincode::serialize(&settings).unwrap();
        let back: Settings = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SettingsError::FileRead { .. }));
    }

    #[test]
    fn test_resolve_seed() {
        assert_eq!(Settings::default().with_seed(42).resolve_seed(), 42);
        assert!(Settings::default().resolve_seed() > 0);
    }

    #[test]
    fn test_json_roundtrip_keeps_score_keys() {
        let json = Settings::default().with_seed(3).to_json().unwrap();
        assert!(json.contains("\"scoreValues\":{\"3\":10,\"4\":20,\"5\":50}"));
        assert_eq!(Settings::from_json(&json).unwrap().seed, Some(3));
    }
}
