use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

const APP_NAME: &str = "wayfinder";
const CONFIG_FILE: &str = "finder.json";

/// Tunables for entity finders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// First search radius of a fresh query, in kilometres.
    pub min_radius_km: f64,
    /// Largest radius a fresh query searches, in kilometres.
    pub max_radius_km: f64,
    /// Multiplier applied to the radius between widening steps.
    pub widening_factor: f64,
    /// Number of new matches after which a widening pass stops.
    pub min_results: usize,
    /// Minimum Jaro-Winkler similarity for a fuzzy name match.
    pub fuzzy_threshold: f64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            min_radius_km: 2.0,
            max_radius_km: 25.0,
            widening_factor: 2.0,
            min_results: 1,
            fuzzy_threshold: 0.88,
        }
    }
}

impl FinderConfig {
    /// Read a JSON configuration file; absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading finder configuration");
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from the default location, falling back to
    /// defaults when no file exists there.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_radius(self.min_radius_km, self.max_radius_km)?;
        if self.widening_factor.is_nan() || self.widening_factor <= 1.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "widening factor must be greater than 1 (got {})",
                    self.widening_factor
                ),
            });
        }
        if self.min_results == 0 {
            return Err(Error::InvalidConfig {
                message: "min_results must be at least 1".to_string(),
            });
        }
        let threshold = self.fuzzy_threshold;
        if threshold.is_nan() || threshold <= 0.0 || threshold > 1.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "fuzzy threshold must lie in (0, 1] (got {})",
                    self.fuzzy_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Check that radius bounds are positive and ordered.
pub fn validate_radius(min_km: f64, max_km: f64) -> Result<()> {
    if min_km > 0.0 && min_km <= max_km && max_km.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidRadius {
            min: min_km,
            max: max_km,
        })
    }
}

/// Platform configuration path, e.g. `~/.config/wayfinder/finder.json`.
pub fn default_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = FinderConfig::default();
        assert_eq!(config.min_radius_km, 2.0);
        assert_eq!(config.max_radius_km, 25.0);
        config.validate().expect("defaults validate");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "max_radius_km": 40.0 }}"#).expect("write config");

        let config = FinderConfig::load(file.path()).expect("config loads");
        assert_eq!(config.max_radius_km, 40.0);
        assert_eq!(config.min_radius_km, 2.0);
    }

    #[test]
    fn inverted_radius_is_rejected() {
        let config = FinderConfig {
            min_radius_km: 30.0,
            ..FinderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidRadius { .. })
        ));
    }

    #[test]
    fn non_widening_factor_is_rejected() {
        let config = FinderConfig {
            widening_factor: 1.0,
            ..FinderConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig { .. })
        ));
    }
}
