//! The closed set of light effects the device knows about

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A preset light effect; at most one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Off,
    Breathe,
    Fire,
    Rainbow,
}

/// Returned when a name does not belong to the effect set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown effect: {0}")]
pub struct UnknownEffect(pub String);

impl Effect {
    pub const ALL: [Effect; 4] = [Effect::Off, Effect::Breathe, Effect::Fire, Effect::Rainbow];

    /// Name used on the wire and in URL paths
    pub fn name(self) -> &'static str {
        match self {
            Effect::Off => "off",
            Effect::Breathe => "breathe",
            Effect::Fire => "fire",
            Effect::Rainbow => "rainbow",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Effect::ALL
            .into_iter()
            .find(|effect| effect.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}
