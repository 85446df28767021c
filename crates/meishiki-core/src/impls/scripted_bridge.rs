//! ScriptedBridge - 台本どおりに応答するテスト用ブリッジ
//!
//! 固定の四柱・大運列（または失敗）を返し、呼び出し回数と受け取った
//! 性別コードを記録する。テストから挙動を差し替えられるように、
//! 台本は Mutex 越しに書き換え可能。

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{BirthMoment, DecadeLuckEntry, FourPillars};
use crate::ports::{BridgeError, CalendarBridge};

pub struct ScriptedBridge {
    script: Mutex<Script>,
    pillar_calls: AtomicUsize,
    sequence_calls: AtomicUsize,
    last_gender_code: Mutex<Option<u8>>,
}

struct Script {
    pillars: Result<FourPillars, BridgeError>,
    sequence: Result<Vec<DecadeLuckEntry>, BridgeError>,
}

impl ScriptedBridge {
    pub fn with_script(pillars: FourPillars, sequence: Vec<DecadeLuckEntry>) -> Self {
        Self {
            script: Mutex::new(Script {
                pillars: Ok(pillars),
                sequence: Ok(sequence),
            }),
            pillar_calls: AtomicUsize::new(0),
            sequence_calls: AtomicUsize::new(0),
            last_gender_code: Mutex::new(None),
        }
    }

    /// 以後の `four_pillars` を失敗させる
    pub fn fail_four_pillars(&self, error: BridgeError) {
        self.script.lock().unwrap().pillars = Err(error);
    }

    /// 以後の `decade_luck_sequence` を失敗させる
    pub fn fail_sequence(&self, error: BridgeError) {
        self.script.lock().unwrap().sequence = Err(error);
    }

    /// 大運列の台本を差し替える
    pub fn set_sequence(&self, sequence: Vec<DecadeLuckEntry>) {
        self.script.lock().unwrap().sequence = Ok(sequence);
    }

    pub fn pillar_calls(&self) -> usize {
        self.pillar_calls.load(Ordering::Relaxed)
    }

    pub fn sequence_calls(&self) -> usize {
        self.sequence_calls.load(Ordering::Relaxed)
    }

    /// 最後に受け取った性別コード（未呼び出しなら None）
    pub fn last_gender_code(&self) -> Option<u8> {
        *self.last_gender_code.lock().unwrap()
    }
}

impl CalendarBridge for ScriptedBridge {
    fn four_pillars(&self, _birth: &BirthMoment) -> Result<FourPillars, BridgeError> {
        self.pillar_calls.fetch_add(1, Ordering::Relaxed);
        self.script.lock().unwrap().pillars.clone()
    }

    fn decade_luck_sequence(
        &self,
        _birth: &BirthMoment,
        _pillars: &FourPillars,
        gender_code: u8,
    ) -> Result<Vec<DecadeLuckEntry>, BridgeError> {
        self.sequence_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_gender_code.lock().unwrap() = Some(gender_code);
        self.script.lock().unwrap().sequence.clone()
    }
}
