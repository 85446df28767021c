//! Input validation: presence check of the birth-moment fields.

use crate::domain::{ChartRecord, MeishikiError};

/// 4つの出生フィールドが埋まっているかだけを検査する。
///
/// ローカルで行う検査はこれだけで、数値範囲や暦としての妥当性は
/// 暦変換ブリッジに委ねる。失敗時はブリッジを呼ばない。
pub fn validate_birth_fields(record: &ChartRecord) -> Result<(), MeishikiError> {
    let fields = record.missing_birth_fields();
    if fields.is_empty() {
        Ok(())
    } else {
        Err(MeishikiError::MissingField { fields })
    }
}
