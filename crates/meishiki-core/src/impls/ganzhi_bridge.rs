//! GanZhiBridge - 六十干支の算術だけで動く開発用の暦変換ブリッジ
//!
//! # 実装詳細
//! - 年柱: 立春を2月4日固定で近似し、(年 - 4) mod 60
//! - 月柱: 節入りを固定日で近似した節月 + 五虎遁による月干
//! - 日柱: 連続する六十干支の日数え（1949-10-01 = 甲子 が基準）
//! - 時柱: 2時間刻みの時支 + 五鼠遁による時干
//! - 大運: 年干の陰陽 × 性別コードで順逆を決め、誕生日から節入りまでの
//!   日数 ÷ 3 を立運年齢とする。列の先頭は童限（干支なし）
//!
//! # 日界の扱い
//! 23時台は翌日の子時に帰属させ、日柱だけが23時に進む（年柱・月柱は
//! 暦日のまま）。伝統的な二通りの流儀の一方をこのブリッジの性質として
//! 固定し、テストで留めてある。
//!
//! # 近似について
//! 節入り日は実際には年によって±1日ずれる。節気の実時刻を持つ暦実装へ
//! 置き換える場合も `CalendarBridge` trait はこのままでよい。

use chrono::{Datelike, Days, NaiveDate};

use crate::domain::{BirthMoment, DecadeLuckEntry, FourPillars, PillarToken, Polarity};
use crate::ports::{BridgeError, CalendarBridge};

/// 対応範囲。外れる入力は拒否する。
const YEAR_MIN: i32 = 1900;
const YEAR_MAX: i32 = 2100;

/// 暦月（index 0 = 1月）ごとの節入り日の近似値:
/// 小寒6日・立春4日・啓蟄6日・清明5日・立夏6日・芒種6日・
/// 小暑7日・立秋8日・白露8日・寒露8日・立冬7日・大雪7日
const JIE_DAY: [u32; 12] = [6, 4, 6, 5, 6, 6, 7, 8, 8, 8, 7, 7];

/// 大運の本数（童限 + 正規9本）
const DECADE_COUNT: usize = 10;

/// 日柱の補正値: 西暦1年1月1日からの通算日数 + 14 ≡ 六十干支インデックス。
/// 1949-10-01 が甲子日（2000-01-01 が戊午日）になることで検証できる。
const DAY_CYCLE_OFFSET: i64 = 14;

#[derive(Debug, Clone, Copy, Default)]
pub struct GanZhiBridge;

impl GanZhiBridge {
    pub fn new() -> Self {
        Self
    }
}

impl CalendarBridge for GanZhiBridge {
    fn four_pillars(&self, birth: &BirthMoment) -> Result<FourPillars, BridgeError> {
        let date = checked_date(birth)?;
        let day = day_pillar(date, birth.hour)?;
        Ok(FourPillars {
            year: year_pillar(date),
            month: month_pillar(date),
            day,
            hour: hour_pillar(day, birth.hour),
        })
    }

    fn decade_luck_sequence(
        &self,
        birth: &BirthMoment,
        pillars: &FourPillars,
        gender_code: u8,
    ) -> Result<Vec<DecadeLuckEntry>, BridgeError> {
        let date = checked_date(birth)?;

        // 陽年の男・陰年の女が順行（性別コードは 男=1 / 女=0）
        let forward = (pillars.year.stem().polarity() == Polarity::Yang) == (gender_code == 1);

        let boundary_days = if forward {
            (next_jie(date)? - date).num_days()
        } else {
            (date - prev_jie(date)?).num_days()
        };
        // 3日を1年と数える。最低でも1歳
        let start_age = ((boundary_days as f64 / 3.0).round() as u8).max(1);

        let month_cycle = pillars.month.cycle_index() as i64;
        let mut sequence = Vec::with_capacity(DECADE_COUNT);
        sequence.push(DecadeLuckEntry {
            start_age: 1,
            gan_zhi: None, // 童限
        });
        for step in 1..DECADE_COUNT as i64 {
            let cycle = if forward {
                (month_cycle + step).rem_euclid(60)
            } else {
                (month_cycle - step).rem_euclid(60)
            };
            sequence.push(DecadeLuckEntry {
                start_age: start_age + 10 * (step as u8 - 1),
                gan_zhi: Some(PillarToken::from_cycle_index(cycle as usize)),
            });
        }
        Ok(sequence)
    }
}

fn checked_date(birth: &BirthMoment) -> Result<NaiveDate, BridgeError> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&birth.year) {
        return Err(BridgeError::OutOfRange(format!(
            "year {} outside {YEAR_MIN}..={YEAR_MAX}",
            birth.year
        )));
    }
    if birth.hour > 23 {
        return Err(BridgeError::InvalidDate(format!(
            "hour {} outside 0..=23",
            birth.hour
        )));
    }
    NaiveDate::from_ymd_opt(birth.year, birth.month, birth.day).ok_or_else(|| {
        BridgeError::InvalidDate(format!(
            "{:04}-{:02}-{:02} is not a calendar date",
            birth.year, birth.month, birth.day
        ))
    })
}

/// 立春（2月4日近似）前は前年扱い
fn effective_year(date: NaiveDate) -> i32 {
    if (date.month(), date.day()) < (2, 4) {
        date.year() - 1
    } else {
        date.year()
    }
}

fn year_pillar(date: NaiveDate) -> PillarToken {
    let cycle = (effective_year(date) as i64 - 4).rem_euclid(60) as usize;
    PillarToken::from_cycle_index(cycle)
}

/// 節月の序数（寅月=1 .. 丑月=12）
fn month_ordinal(date: NaiveDate) -> i64 {
    let month = date.month() as i64;
    let mut ordinal = month - 1; // 2月→1 .. 12月→11, 1月→0
    if date.day() < JIE_DAY[(month - 1) as usize] {
        ordinal -= 1;
    }
    if ordinal <= 0 {
        ordinal += 12;
    }
    ordinal
}

/// 五虎遁をインデックス計算に畳んだ形。甲年の寅月=丙寅（インデックス2）から
/// 5年=60ヶ月で一巡する。
fn month_pillar(date: NaiveDate) -> PillarToken {
    let year_group = (effective_year(date) as i64 - 4).rem_euclid(5);
    let cycle = (year_group * 12 + 2 + month_ordinal(date) - 1).rem_euclid(60);
    PillarToken::from_cycle_index(cycle as usize)
}

fn day_pillar(date: NaiveDate, hour: u32) -> Result<PillarToken, BridgeError> {
    // 23時台は翌日の子時（日柱はここで進む）
    let date = if hour == 23 {
        date.checked_add_days(Days::new(1)).ok_or_else(|| {
            BridgeError::OutOfRange(format!("no day after {date}"))
        })?
    } else {
        date
    };
    let cycle = (date.num_days_from_ce() as i64 + DAY_CYCLE_OFFSET).rem_euclid(60);
    Ok(PillarToken::from_cycle_index(cycle as usize))
}

/// 五鼠遁をインデックス計算に畳んだ形。甲日の子時=甲子（インデックス0）から。
fn hour_pillar(day: PillarToken, hour: u32) -> PillarToken {
    let branch = ((hour + 1) / 2) % 12;
    let cycle = (day.stem().index() % 5) * 12 + branch as usize;
    PillarToken::from_cycle_index(cycle % 60)
}

fn jie_date(year: i32, month: u32) -> Result<NaiveDate, BridgeError> {
    NaiveDate::from_ymd_opt(year, month, JIE_DAY[(month - 1) as usize])
        .ok_or_else(|| BridgeError::InvalidDate(format!("no jie date in {year}-{month}")))
}

/// date より後で最初の節入り（当日が節入りなら翌月のもの）
fn next_jie(date: NaiveDate) -> Result<NaiveDate, BridgeError> {
    let current = jie_date(date.year(), date.month())?;
    if date < current {
        Ok(current)
    } else if date.month() == 12 {
        jie_date(date.year() + 1, 1)
    } else {
        jie_date(date.year(), date.month() + 1)
    }
}

/// date 以前で最後の節入り（当日が節入りなら当日）
fn prev_jie(date: NaiveDate) -> Result<NaiveDate, BridgeError> {
    let current = jie_date(date.year(), date.month())?;
    if date >= current {
        Ok(current)
    } else if date.month() == 1 {
        jie_date(date.year() - 1, 12)
    } else {
        jie_date(date.year(), date.month() - 1)
    }
}
