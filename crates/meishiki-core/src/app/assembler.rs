//! Pillar & decade assembler: one bridge round-trip, one atomic result.
//!
//! The assembler is the only place that talks to the calendar bridge. Bridge
//! failures are converted to the domain error right here, so the bridge's
//! native error shape never travels further, and a failure can never leave a
//! half-built result behind.

use std::sync::Arc;

use crate::domain::{
    BirthMoment, DecadeAnomaly, FirstDecade, FourPillars, Gender, MeishikiError,
};
use crate::ports::CalendarBridge;

/// Everything a successful derivation produces. The caller applies it to the
/// chart record in one merge, never field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyResult {
    pub pillars: FourPillars,
    pub first_decade: FirstDecade,
    /// Non-fatal: set when the decade sequence had no formal first period
    /// and the fallback was substituted.
    pub anomaly: Option<DecadeAnomaly>,
}

pub struct Assembler {
    bridge: Arc<dyn CalendarBridge>,
}

impl Assembler {
    pub fn new(bridge: Arc<dyn CalendarBridge>) -> Self {
        Self { bridge }
    }

    /// Run the conversion for one birth moment.
    ///
    /// 1. 四柱を変換（失敗したらそこで終わり、何も返さない）
    /// 2. 大運列を列挙（性別コードは 男=1 / 女=0 固定）
    /// 3. slot 1 を第一大運として選択。列が短ければ代替値 + 警告
    pub fn assemble(
        &self,
        birth: &BirthMoment,
        gender: Gender,
    ) -> Result<AssemblyResult, MeishikiError> {
        let pillars = self
            .bridge
            .four_pillars(birth)
            .map_err(|e| MeishikiError::CalendarConversion(e.to_string()))?;

        let sequence = self
            .bridge
            .decade_luck_sequence(birth, &pillars, gender.bridge_code())
            .map_err(|e| MeishikiError::CalendarConversion(e.to_string()))?;

        let (first_decade, anomaly) = FirstDecade::select(&sequence);

        Ok(AssemblyResult {
            pillars,
            first_decade,
            anomaly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DecadeLuckEntry, PillarToken};
    use crate::impls::ScriptedBridge;
    use crate::ports::BridgeError;

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
            DecadeLuckEntry {
                start_age: 17,
                gan_zhi: PillarToken::parse("癸未"),
            },
        ]
    }

    fn birth() -> BirthMoment {
        BirthMoment::new(1990, 5, 15, 14)
    }

    #[test]
    fn assembles_pillars_and_first_formal_decade() {
        let bridge = Arc::new(ScriptedBridge::with_script(pillars(), sequence()));
        let assembler = Assembler::new(bridge);

        let result = assembler.assemble(&birth(), Gender::Male).unwrap();
        assert_eq!(result.pillars, pillars());
        assert_eq!(result.first_decade.start_age, 7);
        assert_eq!(result.first_decade.gan_zhi_text(), "壬午");
        assert!(result.anomaly.is_none());
    }

    #[test]
    fn identical_inputs_assemble_identically() {
        let bridge = Arc::new(ScriptedBridge::with_script(pillars(), sequence()));
        let assembler = Assembler::new(bridge);

        let first = assembler.assemble(&birth(), Gender::Male).unwrap();
        let second = assembler.assemble(&birth(), Gender::Male).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn pillar_failure_is_a_conversion_error_and_skips_the_sequence() {
        let bridge = Arc::new(ScriptedBridge::with_script(pillars(), sequence()));
        bridge.fail_four_pillars(BridgeError::OutOfRange("year 1899".to_string()));
        let assembler = Assembler::new(Arc::clone(&bridge) as Arc<dyn CalendarBridge>);

        let err = assembler.assemble(&birth(), Gender::Male).unwrap_err();
        match err {
            MeishikiError::CalendarConversion(msg) => assert!(msg.contains("1899")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(bridge.sequence_calls(), 0);
    }

    #[test]
    fn sequence_failure_is_a_conversion_error() {
        let bridge = Arc::new(ScriptedBridge::with_script(pillars(), sequence()));
        bridge.fail_sequence(BridgeError::InvalidDate("no luck".to_string()));
        let assembler = Assembler::new(bridge);

        let err = assembler.assemble(&birth(), Gender::Male).unwrap_err();
        assert!(matches!(err, MeishikiError::CalendarConversion(_)));
    }

    #[test]
    fn short_sequence_yields_fallback_with_anomaly() {
        let bridge = Arc::new(ScriptedBridge::with_script(pillars(), vec![]));
        let assembler = Assembler::new(bridge);

        let result = assembler.assemble(&birth(), Gender::Female).unwrap();
        assert_eq!(result.pillars, pillars());
        assert_eq!(result.first_decade, FirstDecade::fallback());
        assert_eq!(result.anomaly, Some(DecadeAnomaly { sequence_len: 0 }));
    }

    #[test]
    fn gender_code_reaches_the_bridge_unchanged() {
        let bridge = Arc::new(ScriptedBridge::with_script(pillars(), sequence()));
        let assembler = Assembler::new(Arc::clone(&bridge) as Arc<dyn CalendarBridge>);

        assembler.assemble(&birth(), Gender::Male).unwrap();
        assert_eq!(bridge.last_gender_code(), Some(1));

        assembler.assemble(&birth(), Gender::Female).unwrap();
        assert_eq!(bridge.last_gender_code(), Some(0));
    }
}
