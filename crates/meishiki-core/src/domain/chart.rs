//! Chart record and snapshot view.
//!
//! Design: Following the record-with-methods pattern — state changes go
//! through methods, and there are exactly two kinds of mutation: a
//! single-field user edit and the atomic bulk merge of a derivation.

use serde::{Deserialize, Serialize};

use super::daiun::FirstDecade;
use super::direction::LuckDirection;
use super::gender::Gender;
use super::ids::SessionId;
use super::pillar::FourPillars;

/// One user-editable scalar field of the chart form.
///
/// Computed fields (pillars, decade) are listed too: manual override after
/// automatic derivation is a supported path, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartField {
    Name,
    BirthYear,
    BirthMonth,
    BirthDay,
    BirthHour,
    YearPillar,
    MonthPillar,
    DayPillar,
    HourPillar,
    StartAge,
    FirstDaYun,
}

/// The merged record of user-entered and derived fields.
///
/// All computed fields stay editable text; the empty string means
/// "not yet computed". The record is created empty at session start and
/// discarded after submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub gender: Gender,

    pub birth_year: String,
    pub birth_month: String,
    pub birth_day: String,
    pub birth_hour: String,

    pub year_pillar: String,
    pub month_pillar: String,
    pub day_pillar: String,
    pub hour_pillar: String,

    /// 立運年齢（数え年）。導出時に数値から文字列化される。
    pub start_age: String,
    /// 第一大運の干支
    pub first_da_yun: String,
}

impl ChartRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite exactly one scalar field, leaving every other untouched.
    pub fn set_field(&mut self, field: ChartField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn field(&self, field: ChartField) -> &str {
        match field {
            ChartField::Name => &self.name,
            ChartField::BirthYear => &self.birth_year,
            ChartField::BirthMonth => &self.birth_month,
            ChartField::BirthDay => &self.birth_day,
            ChartField::BirthHour => &self.birth_hour,
            ChartField::YearPillar => &self.year_pillar,
            ChartField::MonthPillar => &self.month_pillar,
            ChartField::DayPillar => &self.day_pillar,
            ChartField::HourPillar => &self.hour_pillar,
            ChartField::StartAge => &self.start_age,
            ChartField::FirstDaYun => &self.first_da_yun,
        }
    }

    fn field_mut(&mut self, field: ChartField) -> &mut String {
        match field {
            ChartField::Name => &mut self.name,
            ChartField::BirthYear => &mut self.birth_year,
            ChartField::BirthMonth => &mut self.birth_month,
            ChartField::BirthDay => &mut self.birth_day,
            ChartField::BirthHour => &mut self.birth_hour,
            ChartField::YearPillar => &mut self.year_pillar,
            ChartField::MonthPillar => &mut self.month_pillar,
            ChartField::DayPillar => &mut self.day_pillar,
            ChartField::HourPillar => &mut self.hour_pillar,
            ChartField::StartAge => &mut self.start_age,
            ChartField::FirstDaYun => &mut self.first_da_yun,
        }
    }

    /// Atomic bulk merge of a successful derivation: the four pillar fields
    /// and the two decade fields change together, never piecemeal.
    pub fn apply_derivation(&mut self, pillars: &FourPillars, decade: &FirstDecade) {
        self.year_pillar = pillars.year.to_string();
        self.month_pillar = pillars.month.to_string();
        self.day_pillar = pillars.day.to_string();
        self.hour_pillar = pillars.hour.to_string();
        self.start_age = decade.start_age.to_string();
        self.first_da_yun = decade.gan_zhi_text();
    }

    /// Birth fields still absent/empty. Presence is the only local check;
    /// ranges and calendar validity belong to the bridge.
    pub fn missing_birth_fields(&self) -> Vec<&'static str> {
        [
            (&self.birth_year, "birth_year"),
            (&self.birth_month, "birth_month"),
            (&self.birth_day, "birth_day"),
            (&self.birth_hour, "birth_hour"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, name)| name)
        .collect()
    }

    /// Submission precondition: year pillar and first decade token present.
    /// Hand-entered values satisfy it just as derived ones do.
    pub fn submit_blockers(&self) -> Vec<&'static str> {
        [
            (&self.year_pillar, "year_pillar"),
            (&self.first_da_yun, "first_da_yun"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, name)| name)
        .collect()
    }

    /// Display-only direction, recomputed from the current year pillar and
    /// gender on every read.
    pub fn direction(&self) -> LuckDirection {
        LuckDirection::resolve(&self.year_pillar, self.gender)
    }
}

/// Read-only view handed to the downstream consumer on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub session_id: SessionId,
    /// Direction at snapshot time (display classification).
    pub direction: LuckDirection,
    pub record: ChartRecord,
}

impl ChartSnapshot {
    pub fn of(session_id: SessionId, record: &ChartRecord) -> Self {
        Self {
            session_id,
            direction: record.direction(),
            record: record.clone(),
        }
    }
}
