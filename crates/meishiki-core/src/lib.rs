//! meishiki-core
//!
//! 四柱推命の命式（四柱 + 第一大運）を、太陽暦の出生時点と申告された
//! 性別から導出するためのコア。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（pillar, birth, gender, daiun, direction,
//!   chart, errors, events, ids）
//! - **ports**: 抽象化レイヤー（CalendarBridge, ChartConsumer, EventSink）
//! - **app**: アプリケーションロジック（validate, Assembler, ChartSession）
//! - **impls**: 実装（GanZhiBridge など開発用）
//!
//! # 責務の線引き
//! 暦の計算（干支・日界・大運列の列挙）はすべて `CalendarBridge` の実装側。
//! コアが持つ判断は、入力検査、第一大運の選択（童限は表に出さない）、
//! 順逆の表示分類、そして記録の一括更新と送信ガードだけ。

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
