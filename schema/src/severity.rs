use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// Visual bucket a damage multiplier falls into.
///
/// Variant order is ascending by multiplier, so iterating with
/// `Severity::iter()` walks the legend from immunity to double weakness.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
pub enum Severity {
    #[strum(serialize = "Immunity")]
    Immunity,
    #[strum(serialize = "Double resistance")]
    DoubleResistance,
    #[strum(serialize = "Resistance")]
    Resistance,
    #[strum(serialize = "Neutral")]
    Neutral,
    #[strum(serialize = "Weakness")]
    Weakness,
    #[strum(serialize = "Double weakness")]
    DoubleWeakness,
}

impl Severity {
    /// The canonical multiplier this bucket stands for.
    pub fn multiplier(self) -> f64 {
        match self {
            Severity::Immunity => 0.0,
            Severity::DoubleResistance => 0.25,
            Severity::Resistance => 0.5,
            Severity::Neutral => 1.0,
            Severity::Weakness => 2.0,
            Severity::DoubleWeakness => 4.0,
        }
    }

    /// Human readable label, e.g. "Double resistance".
    pub fn label(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a sequential detail navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}
