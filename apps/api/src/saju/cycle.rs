//! Sexagenary cycle primitives: heavenly stems, earthly branches, and the
//! stem-branch pairs that make up a pillar.

use std::fmt;

use serde::Serialize;

/// The five elements, in the generating order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub fn as_str(self) -> &'static str {
        match self {
            Element::Wood => "Wood",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Metal => "Metal",
            Element::Water => "Water",
        }
    }
}

/// The ten heavenly stems. The day pillar's stem is the Day Master,
/// the primary personality-typing key of the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stem {
    Gap,    // 甲
    Eul,    // 乙
    Byeong, // 丙
    Jeong,  // 丁
    Mu,     // 戊
    Gi,     // 己
    Gyeong, // 庚
    Sin,    // 辛
    Im,     // 壬
    Gye,    // 癸
}

pub const STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

impl Stem {
    pub fn from_index(i: u8) -> Self {
        STEMS[(i % 10) as usize]
    }

    pub fn index(self) -> u8 {
        STEMS.iter().position(|s| *s == self).unwrap() as u8
    }

    /// The Chinese character used on the wire and in prompts.
    pub fn hanja(self) -> char {
        match self {
            Stem::Gap => '甲',
            Stem::Eul => '乙',
            Stem::Byeong => '丙',
            Stem::Jeong => '丁',
            Stem::Mu => '戊',
            Stem::Gi => '己',
            Stem::Gyeong => '庚',
            Stem::Sin => '辛',
            Stem::Im => '壬',
            Stem::Gye => '癸',
        }
    }

    /// Consecutive stems pair up on one element: 甲乙 wood through 壬癸 water.
    pub fn element(self) -> Element {
        match self {
            Stem::Gap | Stem::Eul => Element::Wood,
            Stem::Byeong | Stem::Jeong => Element::Fire,
            Stem::Mu | Stem::Gi => Element::Earth,
            Stem::Gyeong | Stem::Sin => Element::Metal,
            Stem::Im | Stem::Gye => Element::Water,
        }
    }

    /// Yang stems sit at the even cycle positions.
    pub fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }

    /// Korean reading, e.g. "갑목" for 甲.
    pub fn korean(self) -> &'static str {
        match self {
            Stem::Gap => "갑목",
            Stem::Eul => "을목",
            Stem::Byeong => "병화",
            Stem::Jeong => "정화",
            Stem::Mu => "무토",
            Stem::Gi => "기토",
            Stem::Gyeong => "경금",
            Stem::Sin => "신금",
            Stem::Im => "임수",
            Stem::Gye => "계수",
        }
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hanja())
    }
}

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Branch {
    Ja,   // 子
    Chuk, // 丑
    In,   // 寅
    Myo,  // 卯
    Jin,  // 辰
    Sa,   // 巳
    O,    // 午
    Mi,   // 未
    Shin, // 申
    Yu,   // 酉
    Sul,  // 戌
    Hae,  // 亥
}

pub const BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Shin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

impl Branch {
    pub fn from_index(i: u8) -> Self {
        BRANCHES[(i % 12) as usize]
    }

    #[allow(dead_code)]
    pub fn index(self) -> u8 {
        BRANCHES.iter().position(|b| *b == self).unwrap() as u8
    }

    pub fn hanja(self) -> char {
        match self {
            Branch::Ja => '子',
            Branch::Chuk => '丑',
            Branch::In => '寅',
            Branch::Myo => '卯',
            Branch::Jin => '辰',
            Branch::Sa => '巳',
            Branch::O => '午',
            Branch::Mi => '未',
            Branch::Shin => '申',
            Branch::Yu => '酉',
            Branch::Sul => '戌',
            Branch::Hae => '亥',
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hanja())
    }
}

/// One pillar: a stem-branch pair, rendered as the familiar two-character
/// token (e.g. 甲子).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Pair at position `i` of the sexagenary cycle (0 = 甲子).
    pub fn from_cycle_index(i: u8) -> Self {
        Self {
            stem: Stem::from_index(i % 10),
            branch: Branch::from_index(i % 12),
        }
    }
}

impl fmt::Display for StemBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}
