//! Domain model (pillars, birth moment, chart record, decision rules, ...).

pub mod birth;
pub mod chart;
pub mod daiun;
pub mod direction;
pub mod errors;
pub mod events;
pub mod gender;
pub mod ids;
pub mod pillar;

pub use birth::BirthMoment;
pub use chart::{ChartField, ChartRecord, ChartSnapshot};
pub use daiun::{CHILD_LIMIT_SLOT, DecadeLuckEntry, FIRST_FORMAL_SLOT, FirstDecade};
pub use direction::LuckDirection;
pub use errors::{DecadeAnomaly, MeishikiError};
pub use events::DomainEvent;
pub use gender::Gender;
pub use ids::SessionId;
pub use pillar::{Branch, FourPillars, PillarToken, Polarity, Stem};
