use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::kana::ParseError;

// --- Variant ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Hiragana,
    Katakana,
}

impl Variant {
    pub fn to_key(self) -> &'static str {
        match self {
            Variant::Hiragana => "hiragana",
            Variant::Katakana => "katakana",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "hiragana" => Some(Variant::Hiragana),
            "katakana" => Some(Variant::Katakana),
            _ => None,
        }
    }

    pub fn all() -> &'static [Variant] {
        &[Variant::Hiragana, Variant::Katakana]
    }

    /// Entries of one subset of this variant's inventory, in table order.
    pub fn table(self, subset: Subset) -> &'static [(&'static str, &'static str)] {
        match (self, subset) {
            (Variant::Hiragana, Subset::Basic) => HIRAGANA_BASIC,
            (Variant::Hiragana, Subset::Voiced) => HIRAGANA_VOICED,
            (Variant::Hiragana, Subset::Combination) => HIRAGANA_COMBINATION,
            (Variant::Katakana, Subset::Basic) => KATAKANA_BASIC,
            (Variant::Katakana, Subset::Voiced) => KATAKANA_VOICED,
            (Variant::Katakana, Subset::Combination) => KATAKANA_COMBINATION,
        }
    }

    /// Every glyph of the full inventory, regardless of which subsets are enabled.
    pub fn glyphs(self) -> impl Iterator<Item = &'static str> {
        Subset::all()
            .iter()
            .flat_map(move |&subset| self.table(subset).iter().map(|&(_, glyph)| glyph))
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_key())
    }
}

impl FromStr for Variant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::from_key(&s.trim().to_ascii_lowercase()).ok_or_else(|| ParseError::new("variant", s))
    }
}

// --- Subset ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    Basic,
    Voiced,
    Combination,
}

impl Subset {
    /// Enabled whenever the configured selection resolves to nothing.
    pub const DEFAULT: Subset = Subset::Basic;

    pub fn to_key(self) -> &'static str {
        match self {
            Subset::Basic => "basic",
            Subset::Voiced => "voiced",
            Subset::Combination => "combination",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "basic" => Some(Subset::Basic),
            "voiced" => Some(Subset::Voiced),
            "combination" => Some(Subset::Combination),
            _ => None,
        }
    }

    pub fn all() -> &'static [Subset] {
        &[Subset::Basic, Subset::Voiced, Subset::Combination]
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_key())
    }
}

impl FromStr for Subset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subset::from_key(&s.trim().to_ascii_lowercase()).ok_or_else(|| ParseError::new("subset", s))
    }
}

// --- Active inventory ---

/// Union of the enabled subsets of one variant. Never empty: an empty selection
/// resolves to the default subset.
#[derive(Clone, Debug)]
pub struct ActiveInventory {
    subsets: BTreeSet<Subset>,
    entries: Vec<(&'static str, &'static str)>,
    fell_back: bool,
}

impl ActiveInventory {
    pub fn resolve(variant: Variant, enabled: &BTreeSet<Subset>) -> Self {
        let fell_back = enabled.is_empty();
        let subsets = if fell_back {
            BTreeSet::from([Subset::DEFAULT])
        } else {
            enabled.clone()
        };

        let entries = Subset::all()
            .iter()
            .filter(|&&s| subsets.contains(&s))
            .flat_map(|&s| variant.table(s).iter().copied())
            .collect();

        Self {
            subsets,
            entries,
            fell_back,
        }
    }

    /// Subsets actually in effect, including a forced default.
    pub fn subsets(&self) -> &BTreeSet<Subset> {
        &self.subsets
    }

    /// True when the requested selection was empty and the default subset was forced on.
    pub fn fell_back(&self) -> bool {
        self.fell_back
    }

    pub fn entries(&self) -> &[(&'static str, &'static str)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn glyph_for(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(k, _)| k == key)
            .map(|&(_, glyph)| glyph)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.glyph_for(key).is_some()
    }
}

// --- Static tables ---

const HIRAGANA_BASIC: &[(&str, &str)] = &[
    ("a", "あ"), ("i", "い"), ("u", "う"), ("e", "え"), ("o", "お"),
    ("ka", "か"), ("ki", "き"), ("ku", "く"), ("ke", "け"), ("ko", "こ"),
    ("sa", "さ"), ("shi", "し"), ("su", "す"), ("se", "せ"), ("so", "そ"),
    ("ta", "た"), ("chi", "ち"), ("tsu", "つ"), ("te", "て"), ("to", "と"),
    ("na", "な"), ("ni", "に"), ("nu", "ぬ"), ("ne", "ね"), ("no", "の"),
    ("ha", "は"), ("hi", "ひ"), ("fu", "ふ"), ("he", "へ"), ("ho", "ほ"),
    ("ma", "ま"), ("mi", "み"), ("mu", "む"), ("me", "め"), ("mo", "も"),
    ("ya", "や"), ("yu", "ゆ"), ("yo", "よ"),
    ("ra", "ら"), ("ri", "り"), ("ru", "る"), ("re", "れ"), ("ro", "ろ"),
    ("wa", "わ"), ("wo", "を"), ("n", "ん"),
];

const HIRAGANA_VOICED: &[(&str, &str)] = &[
    ("ga", "が"), ("gi", "ぎ"), ("gu", "ぐ"), ("ge", "げ"), ("go", "ご"),
    ("za", "ざ"), ("ji", "じ"), ("zu", "ず"), ("ze", "ぜ"), ("zo", "ぞ"),
    ("da", "だ"), ("di", "ぢ"), ("du", "づ"), ("de", "で"), ("do", "ど"),
    ("ba", "ば"), ("bi", "び"), ("bu", "ぶ"), ("be", "べ"), ("bo", "ぼ"),
    ("pa", "ぱ"), ("pi", "ぴ"), ("pu", "ぷ"), ("pe", "ぺ"), ("po", "ぽ"),
];

const HIRAGANA_COMBINATION: &[(&str, &str)] = &[
    ("kya", "きゃ"), ("kyu", "きゅ"), ("kyo", "きょ"),
    ("sha", "しゃ"), ("shu", "しゅ"), ("sho", "しょ"),
    ("cha", "ちゃ"), ("chu", "ちゅ"), ("cho", "ちょ"),
    ("nya", "にゃ"), ("nyu", "にゅ"), ("nyo", "にょ"),
    ("hya", "ひゃ"), ("hyu", "ひゅ"), ("hyo", "ひょ"),
    ("mya", "みゃ"), ("myu", "みゅ"), ("myo", "みょ"),
    ("rya", "りゃ"), ("ryu", "りゅ"), ("ryo", "りょ"),
    ("gya", "ぎゃ"), ("gyu", "ぎゅ"), ("gyo", "ぎょ"),
    ("ja", "じゃ"), ("ju", "じゅ"), ("jo", "じょ"),
    ("bya", "びゃ"), ("byu", "びゅ"), ("byo", "びょ"),
    ("pya", "ぴゃ"), ("pyu", "ぴゅ"), ("pyo", "ぴょ"),
];

const KATAKANA_BASIC: &[(&str, &str)] = &[
    ("a", "ア"), ("i", "イ"), ("u", "ウ"), ("e", "エ"), ("o", "オ"),
    ("ka", "カ"), ("ki", "キ"), ("ku", "ク"), ("ke", "ケ"), ("ko", "コ"),
    ("sa", "サ"), ("shi", "シ"), ("su", "ス"), ("se", "セ"), ("so", "ソ"),
    ("ta", "タ"), ("chi", "チ"), ("tsu", "ツ"), ("te", "テ"), ("to", "ト"),
    ("na", "ナ"), ("ni", "ニ"), ("nu", "ヌ"), ("ne", "ネ"), ("no", "ノ"),
    ("ha", "ハ"), ("hi", "ヒ"), ("fu", "フ"), ("he", "ヘ"), ("ho", "ホ"),
    ("ma", "マ"), ("mi", "ミ"), ("mu", "ム"), ("me", "メ"), ("mo", "モ"),
    ("ya", "ヤ"), ("yu", "ユ"), ("yo", "ヨ"),
    ("ra", "ラ"), ("ri", "リ"), ("ru", "ル"), ("re", "レ"), ("ro", "ロ"),
    ("wa", "ワ"), ("wo", "ヲ"), ("n", "ン"),
];

const KATAKANA_VOICED: &[(&str, &str)] = &[
    ("ga", "ガ"), ("gi", "ギ"), ("gu", "グ"), ("ge", "ゲ"), ("go", "ゴ"),
    ("za", "ザ"), ("ji", "ジ"), ("zu", "ズ"), ("ze", "ゼ"), ("zo", "ゾ"),
    ("da", "ダ"), ("di", "ヂ"), ("du", "ヅ"), ("de", "デ"), ("do", "ド"),
    ("ba", "バ"), ("bi", "ビ"), ("bu", "ブ"), ("be", "ベ"), ("bo", "ボ"),
    ("pa", "パ"), ("pi", "ピ"), ("pu", "プ"), ("pe", "ペ"), ("po", "ポ"),
];

const KATAKANA_COMBINATION: &[(&str, &str)] = &[
    ("kya", "キャ"), ("kyu", "キュ"), ("kyo", "キョ"),
    ("sha", "シャ"), ("shu", "シュ"), ("sho", "ショ"),
    ("cha", "チャ"), ("chu", "チュ"), ("cho", "チョ"),
    ("nya", "ニャ"), ("nyu", "ニュ"), ("nyo", "ニョ"),
    ("hya", "ヒャ"), ("hyu", "ヒュ"), ("hyo", "ヒョ"),
    ("mya", "ミャ"), ("myu", "ミュ"), ("myo", "ミョ"),
    ("rya", "リャ"), ("ryu", "リュ"), ("ryo", "リョ"),
    ("gya", "ギャ"), ("gyu", "ギュ"), ("gyo", "ギョ"),
    ("ja", "ジャ"), ("ju", "ジュ"), ("jo", "ジョ"),
    ("bya", "ビャ"), ("byu", "ビュ"), ("byo", "ビョ"),
    ("pya", "ピャ"), ("pyu", "ピュ"), ("pyo", "ピョ"),
];
