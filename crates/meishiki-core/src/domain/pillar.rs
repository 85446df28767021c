//! 干支の語彙 - 天干・地支・柱トークン
//!
//! 柱トークン（干支2文字）を生成するのは暦変換ブリッジだけで、コア側が
//! 自力で行うのは先頭文字（天干）の陰陽判定のみ。暦の計算はここには無い。

use std::fmt;

/// 天干の陰陽
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Yang,
    Yin,
}

/// 天干（十干）
///
/// 配列順がそのまま六十干支の天干側インデックス。偶数番が陽干、奇数番が陰干。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stem {
    Jia,  // 甲
    Yi,   // 乙
    Bing, // 丙
    Ding, // 丁
    Wu,   // 戊
    Ji,   // 己
    Geng, // 庚
    Xin,  // 辛
    Ren,  // 壬
    Gui,  // 癸
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    const CHARS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

    /// 十干インデックス（甲=0 .. 癸=9）
    pub fn index(self) -> usize {
        self as usize
    }

    /// インデックスから天干へ（mod 10 で巡回）
    pub fn from_index(index: usize) -> Stem {
        Stem::ALL[index % 10]
    }

    pub fn from_char(c: char) -> Option<Stem> {
        Stem::CHARS
            .iter()
            .position(|&s| s == c)
            .map(Stem::from_index)
    }

    pub fn as_char(self) -> char {
        Stem::CHARS[self.index()]
    }

    /// 陰陽。偶数番（甲丙戊庚壬）が陽、奇数番（乙丁己辛癸）が陰。
    pub fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

/// 地支（十二支）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Zi,   // 子
    Chou, // 丑
    Yin,  // 寅
    Mao,  // 卯
    Chen, // 辰
    Si,   // 巳
    Wu,   // 午
    Wei,  // 未
    Shen, // 申
    You,  // 酉
    Xu,   // 戌
    Hai,  // 亥
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    const CHARS: [char; 12] = [
        '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
    ];

    /// 十二支インデックス（子=0 .. 亥=11）
    pub fn index(self) -> usize {
        self as usize
    }

    /// インデックスから地支へ（mod 12 で巡回）
    pub fn from_index(index: usize) -> Branch {
        Branch::ALL[index % 12]
    }

    pub fn from_char(c: char) -> Option<Branch> {
        Branch::CHARS
            .iter()
            .position(|&b| b == c)
            .map(Branch::from_index)
    }

    pub fn as_char(self) -> char {
        Branch::CHARS[self.index()]
    }
}

/// 柱トークン（天干1文字 + 地支1文字）
///
/// 六十干支では天干と地支の陰陽が必ず一致する（甲子はあるが甲丑は無い）。
/// `parse` はその整合性まで検査するので、`PillarToken` は常に有効な組。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PillarToken {
    stem: Stem,
    branch: Branch,
}

impl PillarToken {
    pub fn stem(self) -> Stem {
        self.stem
    }

    pub fn branch(self) -> Branch {
        self.branch
    }

    /// 六十干支インデックス（甲子=0 .. 癸亥=59）から柱トークンへ
    pub fn from_cycle_index(index: usize) -> PillarToken {
        PillarToken {
            stem: Stem::from_index(index % 10),
            branch: Branch::from_index(index % 12),
        }
    }

    /// 六十干支インデックス（甲子=0 .. 癸亥=59）
    pub fn cycle_index(self) -> usize {
        let s = self.stem.index();
        let b = self.branch.index();
        // x ≡ s (mod 10) かつ x ≡ b (mod 12) の解は 0..60 に一意
        for k in 0..6 {
            let x = s + 10 * k;
            if x % 12 == b {
                return x;
            }
        }
        // 陰陽が食い違う組は parse/from_cycle_index が作らない
        unreachable!("invalid stem/branch pairing")
    }

    /// 干支2文字の文字列から柱トークンへ。陰陽の食い違う組は弾く。
    pub fn parse(text: &str) -> Option<PillarToken> {
        let mut chars = text.chars();
        let stem = Stem::from_char(chars.next()?)?;
        let branch = Branch::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        if stem.index() % 2 != branch.index() % 2 {
            return None;
        }
        Some(PillarToken { stem, branch })
    }
}

impl fmt::Display for PillarToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem.as_char(), self.branch.as_char())
    }
}

/// 四柱（年・月・日・時）
///
/// ブリッジの出力は常に4本揃っている。「未計算」はここではなく
/// `ChartRecord` 側の空文字列フィールドで表現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourPillars {
    pub year: PillarToken,
    pub month: PillarToken,
    pub day: PillarToken,
    pub hour: PillarToken,
}
