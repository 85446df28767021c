use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::{Duration, sleep};

use meishiki_core::app::ChartSession;
use meishiki_core::domain::{ChartField, ChartSnapshot, DomainEvent, Gender};
use meishiki_core::impls::GanZhiBridge;
use meishiki_core::ports::{ChartConsumer, EventSink};

/// 通知を標準エラーへ流すだけの sink
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: DomainEvent) {
        eprintln!("[{}] {}", event.session_id(), event.notice());
    }
}

/// 下流の分析のかわりに、受け取った命式をそのまま表示する consumer
struct PrintingConsumer;

#[async_trait]
impl ChartConsumer for PrintingConsumer {
    async fn submit(&self, chart: ChartSnapshot) {
        // 本物の分析はそれなりに時間がかかる（その間セッションは in-flight）
        sleep(Duration::from_millis(300)).await;
        match serde_json::to_string_pretty(&chart) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("snapshot encode failed: {e}"),
        }
    }
}

#[tokio::main]
async fn main() {
    // (A) ブリッジ・通知先・送信先を用意してセッションを開く
    let mut session = ChartSession::new(
        Arc::new(GanZhiBridge::new()),
        Arc::new(PrintingConsumer),
        Arc::new(ConsoleSink),
    );

    // (B) 出生情報を入力（引数: 年 月 日 時 性別。省略時はサンプル値）
    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg = |index: usize, default: &str| {
        args.get(index)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };
    session.edit(ChartField::Name, arg(5, ""));
    session.edit(ChartField::BirthYear, arg(0, "1990"));
    session.edit(ChartField::BirthMonth, arg(1, "5"));
    session.edit(ChartField::BirthDay, arg(2, "15"));
    session.edit(ChartField::BirthHour, arg(3, "14"));
    session.set_gender(match arg(4, "male").as_str() {
        "female" | "f" | "女" => Gender::Female,
        _ => Gender::Male,
    });

    // (C) 導出して命式と順逆を表示
    if session.derive().is_err() {
        // 事情は ConsoleSink がすでに表示している
        return;
    }
    let record = session.record();
    println!(
        "四柱: {} {} {} {} ({})",
        record.year_pillar,
        record.month_pillar,
        record.day_pillar,
        record.hour_pillar,
        record.gender.label(),
    );
    println!(
        "大運: {}歳より {} / {}",
        record.start_age,
        record.first_da_yun,
        session.direction().label(),
    );

    // (D) 送信。ガードを通ると in-flight になり、下流の完了で解除される
    if let Ok(snapshot) = session.try_submit().await {
        println!("done: {}", snapshot.session_id);
    }
}
