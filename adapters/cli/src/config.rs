//! Layered settings: built-in defaults, an optional TOML file, then flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tilecraft_core::{DEFAULT_BOARD_COLUMNS, DEFAULT_BOARD_ROWS};
use tilecraft_system_pursuit::PursuitTuning;

/// Contents of a `tilecraft.toml` file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) rows: Option<u32>,
    pub(crate) cols: Option<u32>,
    pub(crate) unlimited_moves: Option<bool>,
    pub(crate) pursuit: PursuitSection,
}

/// `[pursuit]` table tuning enemy behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PursuitSection {
    pub(crate) near_retreat_chance: f64,
    pub(crate) far_flee_chance: f64,
    pub(crate) drift_chance: f64,
}

impl Default for PursuitSection {
    fn default() -> Self {
        let tuning = PursuitTuning::default();
        Self {
            near_retreat_chance: tuning.near_retreat_chance(),
            far_flee_chance: tuning.far_flee_chance(),
            drift_chance: tuning.drift_chance(),
        }
    }
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("failed to parse config TOML")
    }
}

/// Values given on the command line; `None` defers to the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) rows: Option<u32>,
    pub(crate) cols: Option<u32>,
    pub(crate) unlimited_moves: bool,
}

/// Fully resolved settings for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Settings {
    pub(crate) seed: Option<u64>,
    pub(crate) rows: u32,
    pub(crate) cols: u32,
    pub(crate) unlimited_moves: bool,
    pub(crate) tuning: PursuitTuning,
}

impl Settings {
    pub(crate) fn resolve(file: &FileConfig, overrides: Overrides) -> Self {
        let pursuit = file.pursuit;
        Self {
            seed: overrides.seed.or(file.seed),
            rows: overrides.rows.or(file.rows).unwrap_or(DEFAULT_BOARD_ROWS),
            cols: overrides.cols.or(file.cols).unwrap_or(DEFAULT_BOARD_COLUMNS),
            unlimited_moves: overrides.unlimited_moves || file.unlimited_moves.unwrap_or(false),
            tuning: PursuitTuning::new(
                pursuit.near_retreat_chance,
                pursuit.far_flee_chance,
                pursuit.drift_chance,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let file = FileConfig::parse("").expect("empty config parses");
        let settings = Settings::resolve(&file, Overrides::default());

        assert_eq!(settings.seed, None);
        assert_eq!((settings.rows, settings.cols), (9, 9));
        assert!(!settings.unlimited_moves);
        assert_eq!(settings.tuning, PursuitTuning::default());
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig::parse(
            r#"
seed = 11
rows = 12
cols = 7

[pursuit]
far_flee_chance = 0.25
"#,
        )
        .expect("config parses");
        let settings = Settings::resolve(
            &file,
            Overrides {
                seed: Some(3),
                cols: Some(20),
                ..Overrides::default()
            },
        );

        assert_eq!(settings.seed, Some(3));
        assert_eq!((settings.rows, settings.cols), (12, 20));
        assert_eq!(settings.tuning.far_flee_chance(), 0.25);
        assert_eq!(
            settings.tuning.drift_chance(),
            PursuitTuning::default().drift_chance(),
            "unspecified tuning keys keep their defaults"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = FileConfig::parse("speed = 3").expect_err("unknown key must fail");
        assert!(format!("{error:#}").contains("speed"));
    }
}
