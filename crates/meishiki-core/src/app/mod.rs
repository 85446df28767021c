//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせて導出の段取りを実装します。
//!
//! # 主要コンポーネント
//! - **validate**: 出生フィールドの存在チェック（ローカル検査はこれだけ）
//! - **Assembler**: 暦変換ブリッジ呼び出し → 第一大運の選択 → 原子的な結果
//! - **ChartSession**: 記録の唯一の書き手。編集・一括適用・送信ガード

pub mod assembler;
pub mod session;
pub mod validate;

pub use self::assembler::{Assembler, AssemblyResult};
pub use self::session::ChartSession;
pub use self::validate::validate_birth_fields;
