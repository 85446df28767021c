//! Chart session: the single-writer state container.
//!
//! 記録 `ChartRecord` の書き手はこのセッションただ一つ。変更手段は
//! 「単一フィールドの編集」と「導出結果の一括適用」の2種類だけで、
//! 送信ガードの in-flight フラグが再送信と重複導出の両方を塞ぐ。
//! 排他制御は不要（ひとつの UI 文脈から逐次呼ばれる前提）。

use std::sync::Arc;

use crate::app::assembler::Assembler;
use crate::app::validate::validate_birth_fields;
use crate::domain::{
    BirthMoment, ChartField, ChartRecord, ChartSnapshot, DomainEvent, Gender, LuckDirection,
    MeishikiError, SessionId,
};
use crate::ports::{CalendarBridge, ChartConsumer, EventSink};

pub struct ChartSession {
    id: SessionId,
    record: ChartRecord,
    /// in-flight フラグ。ホストには「処理中」表示の根拠として見せる。
    loading: bool,
    assembler: Assembler,
    consumer: Arc<dyn ChartConsumer>,
    events: Arc<dyn EventSink>,
}

impl ChartSession {
    pub fn new(
        bridge: Arc<dyn CalendarBridge>,
        consumer: Arc<dyn ChartConsumer>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            id: SessionId::generate(),
            record: ChartRecord::new(),
            loading: false,
            assembler: Assembler::new(bridge),
            consumer,
            events,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn record(&self) -> &ChartRecord {
        &self.record
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// ホスト側から in-flight 状態を与える（処理中は送信・導出とも不可）。
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// 表示用の順逆。読み取りのたびに year_pillar と gender から再計算する。
    pub fn direction(&self) -> LuckDirection {
        self.record.direction()
    }

    /// Overwrite exactly one scalar field (user edit).
    pub fn edit(&mut self, field: ChartField, value: impl Into<String>) {
        self.record.set_field(field, value);
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.record.gender = gender;
    }

    /// Run the derivation for the currently entered birth moment.
    ///
    /// 成功時のみ記録が変わる（四柱 + 大運の6フィールドを一括適用）。
    /// 失敗時の記録はビット単位で元のまま。結果はすべて通知イベントになる。
    pub fn derive(&mut self) -> Result<(), MeishikiError> {
        let result = self.derive_inner();
        if let Err(err) = &result {
            self.events.emit(self.error_event(err));
        }
        result
    }

    fn derive_inner(&mut self) -> Result<(), MeishikiError> {
        if self.loading {
            return Err(MeishikiError::Blocked("processing in flight".to_string()));
        }

        validate_birth_fields(&self.record)?;
        let birth = BirthMoment::from_fields(
            &self.record.birth_year,
            &self.record.birth_month,
            &self.record.birth_day,
            &self.record.birth_hour,
        )?;

        let result = self.assembler.assemble(&birth, self.record.gender)?;

        self.record
            .apply_derivation(&result.pillars, &result.first_decade);
        if let Some(anomaly) = result.anomaly {
            self.events.emit(DomainEvent::DecadeAnomaly {
                session_id: self.id,
                sequence_len: anomaly.sequence_len,
            });
        }
        self.events.emit(DomainEvent::DerivationApplied {
            session_id: self.id,
        });
        Ok(())
    }

    /// Hand the current snapshot to the downstream consumer.
    ///
    /// ガードは2つ: in-flight でないこと、year_pillar と first_da_yun が
    /// 埋まっていること。手入力で埋めた値でも通る（手動上書きは正規の経路）。
    /// 引き渡し中は in-flight になり、下流の完了とともに解除される。
    pub async fn try_submit(&mut self) -> Result<ChartSnapshot, MeishikiError> {
        let result = self.submit_inner().await;
        if let Err(err) = &result {
            self.events.emit(self.error_event(err));
        }
        result
    }

    async fn submit_inner(&mut self) -> Result<ChartSnapshot, MeishikiError> {
        if self.loading {
            return Err(MeishikiError::Blocked("processing in flight".to_string()));
        }

        let blockers = self.record.submit_blockers();
        if !blockers.is_empty() {
            return Err(MeishikiError::Blocked(format!(
                "incomplete chart: {}",
                blockers.join("/")
            )));
        }

        let snapshot = ChartSnapshot::of(self.id, &self.record);
        let consumer = Arc::clone(&self.consumer);
        self.loading = true;
        consumer.submit(snapshot.clone()).await;
        self.loading = false;

        self.events.emit(DomainEvent::Submitted {
            session_id: self.id,
        });
        Ok(snapshot)
    }

    fn error_event(&self, err: &MeishikiError) -> DomainEvent {
        match err {
            MeishikiError::MissingField { fields } => DomainEvent::ValidationFailed {
                session_id: self.id,
                missing: fields.clone(),
            },
            MeishikiError::CalendarConversion(message) => DomainEvent::ConversionFailed {
                session_id: self.id,
                message: message.clone(),
            },
            MeishikiError::Blocked(reason) => DomainEvent::Blocked {
                session_id: self.id,
                reason: reason.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecadeLuckEntry, FourPillars, PillarToken};
    use crate::impls::ScriptedBridge;
    use crate::ports::BridgeError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingSink {
        events: Mutex<Vec<DomainEvent>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Mutex::new(Vec::new()),
            })
        }

        fn events(&self) -> Vec<DomainEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: DomainEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct RecordingConsumer {
        submissions: AtomicUsize,
        last: Mutex<Option<ChartSnapshot>>,
    }

    impl RecordingConsumer {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                submissions: AtomicUsize::new(0),
                last: Mutex::new(None),
            })
        }

        fn submissions(&self) -> usize {
            self.submissions.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl ChartConsumer for RecordingConsumer {
        async fn submit(&self, chart: ChartSnapshot) {
            self.submissions.fetch_add(1, Ordering::Relaxed);
            *self.last.lock().unwrap() = Some(chart);
        }
    }

    fn pillars() -> FourPillars {
        FourPillars {
            year: PillarToken::parse("庚午").unwrap(),
            month: PillarToken::parse("辛巳").unwrap(),
            day: PillarToken::parse("庚辰").unwrap(),
            hour: PillarToken::parse("癸未").unwrap(),
        }
    }

    fn sequence() -> Vec<DecadeLuckEntry> {
        vec![
            DecadeLuckEntry {
                start_age: 1,
                gan_zhi: None,
            },
            DecadeLuckEntry {
                start_age: 7,
                gan_zhi: PillarToken::parse("壬午"),
            },
        ]
    }

    struct Harness {
        session: ChartSession,
        bridge: Arc<ScriptedBridge>,
        sink: Arc<RecordingSink>,
        consumer: Arc<RecordingConsumer>,
    }

    fn harness() -> Harness {
        let bridge = Arc::new(ScriptedBridge::with_script(pillars(), sequence()));
        let sink = RecordingSink::new();
        let consumer = RecordingConsumer::new();
        let session = ChartSession::new(
            Arc::clone(&bridge) as Arc<dyn CalendarBridge>,
            Arc::clone(&consumer) as Arc<dyn ChartConsumer>,
            Arc::clone(&sink) as Arc<dyn EventSink>,
        );
        Harness {
            session,
            bridge,
            sink,
            consumer,
        }
    }

    fn enter_birth(session: &mut ChartSession) {
        session.edit(ChartField::BirthYear, "1990");
        session.edit(ChartField::BirthMonth, "5");
        session.edit(ChartField::BirthDay, "15");
        session.edit(ChartField::BirthHour, "14");
    }

    #[test]
    fn derive_populates_record_and_notifies() {
        let mut h = harness();
        enter_birth(&mut h.session);

        h.session.derive().unwrap();

        assert_eq!(h.session.record().year_pillar, "庚午");
        assert_eq!(h.session.record().first_da_yun, "壬午");
        assert_eq!(h.session.record().start_age, "7");
        assert_eq!(h.session.direction(), LuckDirection::Forward);
        assert!(matches!(
            h.sink.events().as_slice(),
            [DomainEvent::DerivationApplied { .. }]
        ));
    }

    #[test]
    fn derive_without_birth_fields_never_reaches_the_bridge() {
        let mut h = harness();
        h.session.edit(ChartField::BirthYear, "1990"); // 他3つは未入力

        let err = h.session.derive().unwrap_err();
        assert!(matches!(err, MeishikiError::MissingField { .. }));
        assert_eq!(h.bridge.pillar_calls(), 0);
        assert_eq!(h.session.record().year_pillar, "");
        assert!(matches!(
            h.sink.events().as_slice(),
            [DomainEvent::ValidationFailed { .. }]
        ));
    }

    #[test]
    fn bridge_failure_leaves_the_record_bit_for_bit_unchanged() {
        let mut h = harness();
        enter_birth(&mut h.session);
        h.session.derive().unwrap();
        h.session.edit(ChartField::Name, "山田");

        let before = h.session.record().clone();
        h.bridge
            .fail_four_pillars(BridgeError::OutOfRange("year 2101".to_string()));

        h.session.edit(ChartField::BirthYear, "2101");
        let err = h.session.derive().unwrap_err();
        assert!(matches!(err, MeishikiError::CalendarConversion(_)));

        // birth_year の編集以外、導出済みフィールドは一切動いていない
        let mut expected = before;
        expected.birth_year = "2101".to_string();
        assert_eq!(h.session.record(), &expected);
    }

    #[test]
    fn anomalous_sequence_applies_pillars_with_fallback() {
        let mut h = harness();
        h.bridge.set_sequence(vec![DecadeLuckEntry {
            start_age: 1,
            gan_zhi: None,
        }]);
        enter_birth(&mut h.session);

        h.session.derive().unwrap();

        assert_eq!(h.session.record().hour_pillar, "癸未");
        assert_eq!(h.session.record().start_age, "1");
        assert_eq!(h.session.record().first_da_yun, "");
        assert!(matches!(
            h.sink.events().as_slice(),
            [
                DomainEvent::DecadeAnomaly {
                    sequence_len: 1,
                    ..
                },
                DomainEvent::DerivationApplied { .. }
            ]
        ));
    }

    #[tokio::test]
    async fn submit_is_blocked_until_the_guard_fields_exist() {
        let mut h = harness();

        let err = h.session.try_submit().await.unwrap_err();
        assert!(matches!(err, MeishikiError::Blocked(_)));
        assert_eq!(h.consumer.submissions(), 0);

        // year_pillar だけでは足りない
        h.session.edit(ChartField::YearPillar, "庚午");
        let err = h.session.try_submit().await.unwrap_err();
        match err {
            MeishikiError::Blocked(reason) => assert!(reason.contains("first_da_yun")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(h.consumer.submissions(), 0);
    }

    #[tokio::test]
    async fn hand_entered_chart_submits_without_derivation() {
        let mut h = harness();
        h.session.edit(ChartField::YearPillar, "庚午");
        h.session.edit(ChartField::FirstDaYun, "壬午");

        let snapshot = h.session.try_submit().await.unwrap();

        assert_eq!(h.consumer.submissions(), 1);
        assert_eq!(snapshot.record.year_pillar, "庚午");
        assert_eq!(snapshot.direction, LuckDirection::Forward);
        assert!(!h.session.is_loading());
        assert!(
            h.sink
                .events()
                .iter()
                .any(|e| matches!(e, DomainEvent::Submitted { .. }))
        );
    }

    #[tokio::test]
    async fn derived_chart_submits_and_clears_the_loading_flag() {
        let mut h = harness();
        enter_birth(&mut h.session);
        h.session.derive().unwrap();

        let snapshot = h.session.try_submit().await.unwrap();

        assert_eq!(snapshot.session_id, h.session.id());
        assert_eq!(snapshot.record.first_da_yun, "壬午");
        assert!(!h.session.is_loading());
        assert_eq!(h.consumer.submissions(), 1);
    }

    #[tokio::test]
    async fn loading_flag_blocks_both_submission_and_derivation() {
        let mut h = harness();
        enter_birth(&mut h.session);
        h.session.derive().unwrap();
        h.session.set_loading(true);

        let err = h.session.try_submit().await.unwrap_err();
        assert!(matches!(err, MeishikiError::Blocked(_)));
        assert_eq!(h.consumer.submissions(), 0);

        let calls_before = h.bridge.pillar_calls();
        let err = h.session.derive().unwrap_err();
        assert!(matches!(err, MeishikiError::Blocked(_)));
        assert_eq!(h.bridge.pillar_calls(), calls_before);
    }

    #[test]
    fn non_numeric_birth_field_is_reported_as_conversion_failure() {
        let mut h = harness();
        enter_birth(&mut h.session);
        h.session.edit(ChartField::BirthMonth, "May");

        let err = h.session.derive().unwrap_err();
        assert!(matches!(err, MeishikiError::CalendarConversion(_)));
        assert_eq!(h.bridge.pillar_calls(), 0);
        assert!(matches!(
            h.sink.events().as_slice(),
            [DomainEvent::ConversionFailed { .. }]
        ));
    }
}
