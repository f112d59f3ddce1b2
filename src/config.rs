//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a complete
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fortunes::FortuneOverride;
use crate::solar_time::DEFAULT_REFERENCE_MERIDIAN;
use crate::spirits::SpiritException;

/// A point on the globe, in degrees (east and north positive).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

impl Location {
    /// Seoul, where birth records without a place are assumed to be from.
    pub const SEOUL: Location = Location {
        longitude: 126.9780,
        latitude: 37.5665,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineConfig {
    /// Meridian of the clock time inputs are given in.
    pub reference_meridian: f64,
    /// Used when the input has no longitude or latitude.
    pub default_location: Location,
    /// Used when the input has no hour.
    pub default_hour: u32,
    /// Timezone lunar dates are reckoned in, minutes east of UTC.
    pub lunar_utc_offset_minutes: i32,
    /// Life stages fixed for particular stem and branch pairs.
    pub fortune_overrides: Vec<FortuneOverride>,
    /// Charts whose spirits are fixed rather than detected.
    pub spirit_exceptions: Vec<SpiritException>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_meridian: DEFAULT_REFERENCE_MERIDIAN,
            default_location: Location::SEOUL,
            default_hour: 12,
            lunar_utc_offset_minutes: 540,
            fortune_overrides: Vec::new(),
            spirit_exceptions: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// ```
    /// use saju::EngineConfig;
    ///
    /// let config = EngineConfig::from_json_str(r#"{ "defaultHour": 0 }"#).unwrap();
    /// assert_eq!(0, config.default_hour);
    /// assert_eq!(135.0, config.reference_meridian);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        };
        if !in_range(self.reference_meridian, 180.0) {
            return invalid(
                "referenceMeridian",
                format!("{} is not within ±180°", self.reference_meridian),
            );
        }
        let Location {
            longitude,
            latitude,
        } = self.default_location;
        if !in_range(longitude, 180.0) || !in_range(latitude, 90.0) {
            return invalid(
                "defaultLocation",
                format!("({longitude}, {latitude}) is not on the globe"),
            );
        }
        if self.default_hour > 23 {
            return invalid("defaultHour", format!("{} is not in 0..=23", self.default_hour));
        }
        if !(-720..=840).contains(&self.lunar_utc_offset_minutes) {
            return invalid(
                "lunarUtcOffsetMinutes",
                format!("{} is not a UTC offset", self.lunar_utc_offset_minutes),
            );
        }
        if let Some(e) = self.spirit_exceptions.iter().find(|e| e.hour > 23) {
            return invalid(
                "spiritExceptions",
                format!("hour {} of {} is not in 0..=23", e.hour, e.date),
            );
        }
        Ok(())
    }
}

fn in_range(value: f64, bound: f64) -> bool {
    value.is_finite() && value.abs() <= bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{Branch, Stem};
    use crate::fortunes::LifeStage;
    use crate::spirits::Spirit;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EngineConfig::default(), EngineConfig::from_json_str("{}").unwrap());
    }

    #[test]
    fn tables_from_json() {
        let config = EngineConfig::from_json_str(
            r#"{
                "fortuneOverrides": [{ "stem": "戊", "branch": "子", "stage": "絶" }],
                "spiritExceptions": [
                    { "date": "1990-03-01", "hour": 7, "spirits": { "day": "將星殺" } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            FortuneOverride {
                stem: Stem::Wu,
                branch: Branch::Zi,
                stage: LifeStage::Extinction,
            },
            config.fortune_overrides[0]
        );
        let exception = &config.spirit_exceptions[0];
        assert_eq!("1990-03-01", exception.date.iso_gregorian());
        assert_eq!(Some(Spirit::General), exception.spirits.day);
        assert_eq!(None, exception.spirits.year);
    }

    #[test]
    fn rejects_bad_values() {
        for json in [
            r#"{ "defaultHour": 24 }"#,
            r#"{ "referenceMeridian": 200.0 }"#,
            r#"{ "defaultLocation": { "longitude": 0.0, "latitude": 91.0 } }"#,
            r#"{ "lunarUtcOffsetMinutes": 1000 }"#,
            r#"{ "spiritExceptions": [{ "date": "1990-03-01", "hour": 30, "spirits": {} }] }"#,
        ] {
            assert!(
                matches!(
                    EngineConfig::from_json_str(json),
                    Err(ConfigError::Invalid { .. })
                ),
                "{json}"
            );
        }
    }

    #[test]
    fn rejects_malformed_json() {
        for json in [
            "{",
            r#"{ "defaultHour": "noon" }"#,
            r#"{ "spiritExceptions": [{ "date": "1990-02-30", "hour": 1, "spirits": {} }] }"#,
            r#"{ "unknownField": 1 }"#,
        ] {
            assert!(
                matches!(EngineConfig::from_json_str(json), Err(ConfigError::Parse(_))),
                "{json}"
            );
        }
    }
}
