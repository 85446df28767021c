//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部の協力者（暦変換、下流の分析、通知先）への
//! インターフェースを提供し、実装の詳細を隠蔽します。

pub mod calendar;
pub mod consumer;
pub mod event_sink;

pub use self::calendar::{BridgeError, CalendarBridge};
pub use self::consumer::ChartConsumer;
pub use self::event_sink::{EventSink, NoopEventSink};
