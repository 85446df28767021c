//! Luck direction: forward/backward display classification.
//!
//! A pure function of the year pillar's leading character and the declared
//! gender. It is recomputed whenever either input changes and holds no state
//! of its own, so it can never go stale against the record. It is also
//! deliberately independent of whatever direction convention the calendar
//! bridge used internally for its own decade enumeration.

use serde::{Deserialize, Serialize};

use super::gender::Gender;
use super::pillar::{Polarity, Stem};

/// 大運の順逆（表示専用の区分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckDirection {
    Forward,
    Backward,
    Unknown,
}

impl LuckDirection {
    /// Classify from the year-pillar text and gender.
    ///
    /// - Empty pillar (derivation not yet run): `Unknown`.
    /// - Leading character in {乙, 丁, 己, 辛, 癸}: Yin; anything else,
    ///   including unrecognized characters, counts as Yang.
    /// - Forward iff (Male and Yang) or (Female and Yin).
    pub fn resolve(year_pillar: &str, gender: Gender) -> LuckDirection {
        let Some(first) = year_pillar.trim().chars().next() else {
            return LuckDirection::Unknown;
        };

        let polarity = Stem::from_char(first)
            .map(Stem::polarity)
            .unwrap_or(Polarity::Yang);

        match (gender, polarity) {
            (Gender::Male, Polarity::Yang) | (Gender::Female, Polarity::Yin) => {
                LuckDirection::Forward
            }
            _ => LuckDirection::Backward,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LuckDirection::Forward => "順行",
            LuckDirection::Backward => "逆行",
            LuckDirection::Unknown => "未算出",
        }
    }
}
