//! ChartConsumer port - 送信先（下流の分析）の抽象化
//!
//! 送信ガードを通過した命式スナップショットの引き渡し先。人生曲線の分析など
//! 下流の処理内容とそのエラー処理は下流の責務で、コアは完了まで待つだけ。

use async_trait::async_trait;

use crate::domain::ChartSnapshot;

/// ChartConsumer は送信された命式を受け取る
///
/// 呼び出しが返るまでセッションの in-flight フラグが立ち、再送信と
/// 重複導出をブロックする。
#[async_trait]
pub trait ChartConsumer: Send + Sync {
    async fn submit(&self, chart: ChartSnapshot);
}
