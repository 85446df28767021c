//! Events - ドメインイベント
//!
//! すべてのエラー・警告は利用者に見える通知として扱う（§黙って握り潰さない）。
//! EventSink 経由で UI なりログなりに届ける。

use super::ids::SessionId;

/// DomainEvent はセッション内で発生した出来事
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// 導出結果を記録へ一括適用した
    DerivationApplied { session_id: SessionId },

    /// 大運列が短すぎたため代替値を適用した（非致命）
    DecadeAnomaly {
        session_id: SessionId,
        sequence_len: usize,
    },

    /// 必須の出生フィールドが未入力だった
    ValidationFailed {
        session_id: SessionId,
        missing: Vec<&'static str>,
    },

    /// 暦変換が失敗した。記録は変更されていない
    ConversionFailed {
        session_id: SessionId,
        message: String,
    },

    /// ガードにより操作（送信、または処理中の再導出）を拒否した
    Blocked {
        session_id: SessionId,
        reason: String,
    },

    /// 命式を下流の分析へ引き渡した
    Submitted { session_id: SessionId },
}

impl DomainEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            DomainEvent::DerivationApplied { session_id }
            | DomainEvent::DecadeAnomaly { session_id, .. }
            | DomainEvent::ValidationFailed { session_id, .. }
            | DomainEvent::ConversionFailed { session_id, .. }
            | DomainEvent::Blocked { session_id, .. }
            | DomainEvent::Submitted { session_id } => *session_id,
        }
    }

    /// 利用者向けの通知文
    pub fn notice(&self) -> String {
        match self {
            DomainEvent::DerivationApplied { .. } => "命式を算出しました".to_string(),
            DomainEvent::DecadeAnomaly { .. } => {
                "大運を取得できませんでした。手動での確認をおすすめします".to_string()
            }
            DomainEvent::ValidationFailed { missing, .. } => {
                format!("生年月日時を入力してください: {}", missing.join("/"))
            }
            DomainEvent::ConversionFailed { message, .. } => {
                format!("暦変換に失敗しました: {message}")
            }
            DomainEvent::Blocked { reason, .. } => {
                format!("操作できません: {reason}")
            }
            DomainEvent::Submitted { .. } => "命式を分析へ送信しました".to_string(),
        }
    }
}
