use serde::{Deserialize, Serialize};

use crate::types::ZmanimError;

/// Minutes before sunset at which candles are lit, unless configured otherwise.
pub const DEFAULT_CANDLE_LIGHTING_OFFSET: i64 = 18;

const MAX_OFFSET: i64 = 1440;

/// Offsets that tune the day-transition times.
///
/// A `havdalah_offset` of zero means "use the three stars marker"; any other
/// value places havdalah that many minutes after sunset.
///
/// ```
/// use zmanim::ZmanimConfig;
///
/// let config = ZmanimConfig::from_toml_str("candle_lighting_offset = 40").unwrap();
/// assert_eq!(config.candle_lighting_offset, 40);
/// assert_eq!(config.havdalah_offset, 0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZmanimConfig {
    /// Minutes before sunset
    pub candle_lighting_offset: i64,
    /// Minutes after sunset, 0 for three stars
    pub havdalah_offset: i64,
}

impl Default for ZmanimConfig {
    fn default() -> Self {
        Self {
            candle_lighting_offset: DEFAULT_CANDLE_LIGHTING_OFFSET,
            havdalah_offset: 0,
        }
    }
}

impl ZmanimConfig {
    pub fn new(candle_lighting_offset: i64, havdalah_offset: i64) -> Result<Self, ZmanimError> {
        let config = Self {
            candle_lighting_offset,
            havdalah_offset,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML table. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`ZmanimError::ConfigParse`] for malformed TOML or unknown keys,
    /// [`ZmanimError::InvalidConfig`] for negative offsets.
    pub fn from_toml_str(source: &str) -> Result<Self, ZmanimError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Offsets must lie within one day, `0..=1440` minutes.
    pub fn validate(&self) -> Result<(), ZmanimError> {
        for (name, offset) in [
            ("candle_lighting_offset", self.candle_lighting_offset),
            ("havdalah_offset", self.havdalah_offset),
        ] {
            if !(0..=MAX_OFFSET).contains(&offset) {
                return Err(ZmanimError::InvalidConfig(format!(
                    "{name} must be between 0 and {MAX_OFFSET} minutes, got {offset}"
                )));
            }
        }
        Ok(())
    }
}
