//! Decade-luck (大運) model: bridge entries and first-decade selection.
//!
//! This module defines the shape of the bridge's decade enumeration and the
//! one selection rule the core applies to it. The enumeration algorithm
//! itself belongs to the calendar bridge.

use super::errors::DecadeAnomaly;
use super::pillar::PillarToken;

/// Slot 0 of the bridge's sequence is the child-limit period (童限): the
/// interval before the first formal decade. It is part of the bridge's
/// contract, not an accident of indexing, and is never surfaced as "the
/// first decade".
pub const CHILD_LIMIT_SLOT: usize = 0;

/// Slot holding the first formal decade-luck period.
pub const FIRST_FORMAL_SLOT: usize = 1;

/// One decade-luck period as enumerated by the calendar bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecadeLuckEntry {
    /// Start of the period, apparent-age (数え年) convention.
    pub start_age: u8,

    /// Pillar token of the period. The child-limit entry carries none.
    pub gan_zhi: Option<PillarToken>,
}

/// The decade entry applied to the chart: the first formal period, or the
/// fallback when the bridge's sequence was too short to contain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstDecade {
    pub start_age: u8,
    pub gan_zhi: Option<PillarToken>,
}

impl FirstDecade {
    /// Fallback applied on an anomalous enumeration: age 1, no token.
    pub fn fallback() -> Self {
        Self {
            start_age: 1,
            gan_zhi: None,
        }
    }

    /// Select the displayed first decade from the bridge's sequence.
    ///
    /// Never fails: a sequence without a formal period (length <= 1) yields
    /// the fallback plus a non-fatal anomaly, and the caller still applies
    /// the four-pillar part of the result.
    pub fn select(sequence: &[DecadeLuckEntry]) -> (FirstDecade, Option<DecadeAnomaly>) {
        match sequence.get(FIRST_FORMAL_SLOT) {
            Some(entry) => (
                FirstDecade {
                    start_age: entry.start_age,
                    gan_zhi: entry.gan_zhi,
                },
                None,
            ),
            None => (
                FirstDecade::fallback(),
                Some(DecadeAnomaly {
                    sequence_len: sequence.len(),
                }),
            ),
        }
    }

    /// Token as record text; the fallback renders as the empty string.
    pub fn gan_zhi_text(&self) -> String {
        self.gan_zhi.map(|t| t.to_string()).unwrap_or_default()
    }
}
