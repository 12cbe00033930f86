//! Encoding kinds and detection results

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Character encodings the editor can read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingKind {
    /// UTF-8 with a leading `EF BB BF`
    Utf8Bom,
    /// UTF-8 without BOM; also used for pure ASCII
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    ShiftJis,
    EucJp,
    /// ISO-2022-JP
    Jis,
}

impl EncodingKind {
    /// Every selectable encoding, in menu order
    pub const ALL: [EncodingKind; 7] = [
        EncodingKind::Utf8,
        EncodingKind::Utf8Bom,
        EncodingKind::ShiftJis,
        EncodingKind::EucJp,
        EncodingKind::Jis,
        EncodingKind::Utf16Le,
        EncodingKind::Utf16Be,
    ];

    /// Human-readable name for status bars and menus
    pub fn display_name(self) -> &'static str {
        match self {
            EncodingKind::Utf8Bom => "UTF-8 (BOM)",
            EncodingKind::Utf8 => "UTF-8",
            EncodingKind::Utf16Le => "UTF-16 LE",
            EncodingKind::Utf16Be => "UTF-16 BE",
            EncodingKind::ShiftJis => "Shift-JIS",
            EncodingKind::EucJp => "EUC-JP",
            EncodingKind::Jis => "JIS (ISO-2022-JP)",
        }
    }

    /// Whether files in this encoding are written with a byte order mark
    pub fn has_bom(self) -> bool {
        matches!(
            self,
            EncodingKind::Utf8Bom | EncodingKind::Utf16Le | EncodingKind::Utf16Be
        )
    }

    /// The matching `encoding_rs` codec
    pub(crate) fn codec(self) -> &'static encoding_rs::Encoding {
        match self {
            EncodingKind::Utf8Bom | EncodingKind::Utf8 => encoding_rs::UTF_8,
            EncodingKind::Utf16Le => encoding_rs::UTF_16LE,
            EncodingKind::Utf16Be => encoding_rs::UTF_16BE,
            EncodingKind::ShiftJis => encoding_rs::SHIFT_JIS,
            EncodingKind::EucJp => encoding_rs::EUC_JP,
            EncodingKind::Jis => encoding_rs::ISO_2022_JP,
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Unknown encoding label
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown encoding: {0}")]
pub struct ParseEncodingError(pub String);

impl FromStr for EncodingKind {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase().replace('_', "-");
        match label.as_str() {
            "utf-8" | "utf8" => Ok(EncodingKind::Utf8),
            "utf-8-bom" | "utf8-bom" | "utf-8bom" => Ok(EncodingKind::Utf8Bom),
            "utf-16le" | "utf-16-le" | "utf16le" => Ok(EncodingKind::Utf16Le),
            "utf-16be" | "utf-16-be" | "utf16be" => Ok(EncodingKind::Utf16Be),
            "shift-jis" | "sjis" | "cp932" | "windows-31j" => Ok(EncodingKind::ShiftJis),
            "euc-jp" | "eucjp" => Ok(EncodingKind::EucJp),
            "jis" | "iso-2022-jp" => Ok(EncodingKind::Jis),
            _ => Err(ParseEncodingError(s.to_string())),
        }
    }
}

/// Which rule produced a detection result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMethod {
    /// Empty input; nothing to inspect
    Default,
    Bom,
    JisEscape,
    Utf8Pattern,
    EucJpPattern,
    ShiftJisPattern,
    Ascii,
    Undetermined,
}

impl DetectionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMethod::Default => "default",
            DetectionMethod::Bom => "BOM",
            DetectionMethod::JisEscape => "JIS pattern",
            DetectionMethod::Utf8Pattern => "UTF-8 pattern",
            DetectionMethod::EucJpPattern => "EUC-JP pattern",
            DetectionMethod::ShiftJisPattern => "Shift-JIS pattern",
            DetectionMethod::Ascii => "ASCII",
            DetectionMethod::Undetermined => "undetermined",
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of `detect`
///
/// When `detected` is false the encoding is always `Utf8`, the safe fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectionResult {
    pub encoding: EncodingKind,
    pub detected: bool,
    pub method: DetectionMethod,
}

impl DetectionResult {
    pub(crate) fn found(encoding: EncodingKind, method: DetectionMethod) -> Self {
        Self {
            encoding,
            detected: true,
            method,
        }
    }

    pub(crate) fn fallback(method: DetectionMethod) -> Self {
        Self {
            encoding: EncodingKind::Utf8,
            detected: false,
            method,
        }
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        Self::fallback(DetectionMethod::Default)
    }
}
