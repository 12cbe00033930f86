//! Per-character inspection for the status bar

use super::kind::EncodingKind;
use super::transcode::encode;

/// Rough classification of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCategory {
    LineFeed,
    CarriageReturn,
    Tab,
    Space,
    IdeographicSpace,
    Control,
    Hiragana,
    Katakana,
    Kanji,
    FullWidth,
    Other,
}

impl CharCategory {
    pub fn of(ch: char) -> Self {
        match ch {
            '\n' => CharCategory::LineFeed,
            '\r' => CharCategory::CarriageReturn,
            '\t' => CharCategory::Tab,
            ' ' => CharCategory::Space,
            '\u{3000}' => CharCategory::IdeographicSpace,
            c if c.is_control() => CharCategory::Control,
            '\u{3040}'..='\u{309F}' => CharCategory::Hiragana,
            '\u{30A0}'..='\u{30FF}' => CharCategory::Katakana,
            '\u{4E00}'..='\u{9FFF}' => CharCategory::Kanji,
            '\u{FF00}'..='\u{FFEF}' => CharCategory::FullWidth,
            _ => CharCategory::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CharCategory::LineFeed => "line feed",
            CharCategory::CarriageReturn => "carriage return",
            CharCategory::Tab => "tab",
            CharCategory::Space => "space",
            CharCategory::IdeographicSpace => "ideographic space",
            CharCategory::Control => "control",
            CharCategory::Hiragana => "hiragana",
            CharCategory::Katakana => "katakana",
            CharCategory::Kanji => "kanji",
            CharCategory::FullWidth => "full-width",
            CharCategory::Other => "",
        }
    }
}

/// What the status bar shows for the character under the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharInfo {
    /// Printable stand-in (`LF`, `TAB`, ...) or the character itself
    pub display: String,
    /// The character's bytes in the inspected encoding, without BOM
    pub bytes: Vec<u8>,
    pub category: CharCategory,
}

impl CharInfo {
    /// Bytes as space-separated upper-case hex, e.g. `E3 81 82`
    pub fn hex(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Describe `ch` as it would be stored in `kind`
pub fn inspect_char(ch: char, kind: EncodingKind) -> CharInfo {
    let category = CharCategory::of(ch);
    let display = match category {
        CharCategory::LineFeed => "LF".to_string(),
        CharCategory::CarriageReturn => "CR".to_string(),
        CharCategory::Tab => "TAB".to_string(),
        CharCategory::Space => "SP".to_string(),
        CharCategory::IdeographicSpace => "IDEOGRAPHIC SP".to_string(),
        CharCategory::Control => "CTRL".to_string(),
        _ => ch.to_string(),
    };

    let mut buf = [0u8; 4];
    let mut bytes = encode(ch.encode_utf8(&mut buf), kind).bytes;
    if kind.has_bom() {
        let bom_len = if kind == EncodingKind::Utf8Bom { 3 } else { 2 };
        bytes.drain(..bom_len);
    }

    CharInfo {
        display,
        bytes,
        category,
    }
}
