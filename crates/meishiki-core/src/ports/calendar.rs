//! CalendarBridge port - 暦変換能力の抽象化
//!
//! 太陽暦の出生時点から四柱と大運列を得る外部能力。干支の計算・日界
//! （23時をどちらの日の子時に帰属させるか）の扱いは、すべて実装側の責務で、
//! コアは再検証しない。
//!
//! ローカル計算なのでネットワーク I/O は想定せず、trait は同期
//! （導出は記録を触る前に必ず完了まで待たれる）。

use thiserror::Error;

use crate::domain::{BirthMoment, DecadeLuckEntry, FourPillars};

/// ブリッジ境界のエラー。app 層には生のまま出さず、呼び出し側で
/// `MeishikiError::CalendarConversion` へ変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("date out of supported range: {0}")]
    OutOfRange(String),

    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
}

/// CalendarBridge は暦変換能力を提供
///
/// # 契約
/// - `four_pillars`: 出生時点 → 四柱。範囲外・暦として不正な日付は失敗
/// - `decade_luck_sequence`: 四柱と性別コードから大運列を列挙。
///   先頭（slot 0）は童限で、正規の第一大運は slot 1
/// - 性別コードは 男=1 / 女=0 固定（`Gender::bridge_code`）
pub trait CalendarBridge: Send + Sync {
    fn four_pillars(&self, birth: &BirthMoment) -> Result<FourPillars, BridgeError>;

    fn decade_luck_sequence(
        &self,
        birth: &BirthMoment,
        pillars: &FourPillars,
        gender_code: u8,
    ) -> Result<Vec<DecadeLuckEntry>, BridgeError>;
}
