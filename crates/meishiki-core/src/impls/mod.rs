//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **GanZhiBridge**: 六十干支の算術だけで動く開発用の暦変換ブリッジ
//! - **ScriptedBridge**: 台本どおりに応答するテスト用ブリッジ
//!
//! 天文暦ベースの本格的な暦変換（節気の実時刻を持つもの）は、同じ
//! `CalendarBridge` trait を実装する別クレートに配置する想定。

pub mod ganzhi_bridge;
pub mod scripted_bridge;

pub use self::ganzhi_bridge::GanZhiBridge;
pub use self::scripted_bridge::ScriptedBridge;
