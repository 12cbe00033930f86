//! Decoding bytes to text and encoding text back to bytes

use super::kind::EncodingKind;

/// Text decoded from a byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Malformed input was replaced with U+FFFD
    pub had_errors: bool,
}

/// Bytes produced from text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Some characters had no mapping and were written as `&#NNNN;`
    pub had_unmappable: bool,
}

/// Decode `bytes` as `kind`, stripping a BOM that matches the encoding.
///
/// Decoding never fails; malformed sequences become U+FFFD.
pub fn decode(bytes: &[u8], kind: EncodingKind) -> Decoded {
    let (text, had_errors) = kind.codec().decode_with_bom_removal(bytes);
    if had_errors {
        tracing::warn!(encoding = %kind, "malformed input replaced while decoding");
    }
    Decoded {
        text: text.into_owned(),
        had_errors,
    }
}

/// Encode `text` as `kind`, writing a BOM for the kinds that carry one.
pub fn encode(text: &str, kind: EncodingKind) -> Encoded {
    match kind {
        EncodingKind::Utf8 => Encoded {
            bytes: text.as_bytes().to_vec(),
            had_unmappable: false,
        },
        EncodingKind::Utf8Bom => {
            let mut bytes = Vec::with_capacity(text.len() + 3);
            bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
            bytes.extend_from_slice(text.as_bytes());
            Encoded {
                bytes,
                had_unmappable: false,
            }
        }
        // encoding_rs only encodes to UTF-8 for the UTF-16 labels
        EncodingKind::Utf16Le => Encoded {
            bytes: encode_utf16(text, u16::to_le_bytes, [0xFF, 0xFE]),
            had_unmappable: false,
        },
        EncodingKind::Utf16Be => Encoded {
            bytes: encode_utf16(text, u16::to_be_bytes, [0xFE, 0xFF]),
            had_unmappable: false,
        },
        EncodingKind::ShiftJis | EncodingKind::EucJp | EncodingKind::Jis => {
            let (bytes, _, had_unmappable) = kind.codec().encode(text);
            if had_unmappable {
                tracing::warn!(encoding = %kind, "unmappable characters written as references");
            }
            Encoded {
                bytes: bytes.into_owned(),
                had_unmappable,
            }
        }
    }
}

fn encode_utf16(text: &str, unit: fn(u16) -> [u8; 2], bom: [u8; 2]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&bom);
    for u in text.encode_utf16() {
        bytes.extend_from_slice(&unit(u));
    }
    bytes
}
