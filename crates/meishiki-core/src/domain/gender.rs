//! 性別 - 大運列挙とブリッジ連携の入力
//!
//! ブリッジに渡す数値コード（男=1 / 女=0）は固定の取り決め。ブリッジ側の
//! 大運列挙はこのコードで順逆を組み立てるため、入れ替えると画面上の順逆
//! 表示（こちらは独立に再計算される）と中身が静かに食い違う。

use serde::{Deserialize, Serialize};

/// 申告された性別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// 暦変換ブリッジ向けの数値コード。男=1 / 女=0 固定。
    pub const fn bridge_code(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
        }
    }
}
