//! Byte-pattern encoding detection

use super::kind::{DetectionMethod, DetectionResult, EncodingKind};

const ESC: u8 = 0x1B;

/// Classify a byte buffer.
///
/// Rules are applied in priority order and the first one that fires wins:
/// BOM, ISO-2022-JP escapes, strict UTF-8 with at least one non-ASCII byte,
/// EUC-JP vs Shift-JIS scoring, pure ASCII. Anything left over falls back to
/// undetected UTF-8.
pub fn detect(bytes: &[u8]) -> DetectionResult {
    if bytes.is_empty() {
        return DetectionResult::default();
    }

    if let Some(kind) = detect_bom(bytes) {
        tracing::debug!(encoding = %kind, "encoding detected from BOM");
        return DetectionResult::found(kind, DetectionMethod::Bom);
    }

    if has_jis_escape(bytes) {
        tracing::debug!("ISO-2022-JP escape sequence found");
        return DetectionResult::found(EncodingKind::Jis, DetectionMethod::JisEscape);
    }

    let ascii_only = bytes.is_ascii();

    if !ascii_only && is_valid_utf8(bytes) {
        tracing::debug!("buffer is well-formed UTF-8");
        return DetectionResult::found(EncodingKind::Utf8, DetectionMethod::Utf8Pattern);
    }

    let euc = euc_jp_score(bytes);
    let sjis = shift_jis_score(bytes);
    tracing::debug!(euc, sjis, "double-byte scores");

    if euc > 0 || sjis > 0 {
        if euc > sjis {
            return DetectionResult::found(EncodingKind::EucJp, DetectionMethod::EucJpPattern);
        }
        if sjis > 0 {
            return DetectionResult::found(
                EncodingKind::ShiftJis,
                DetectionMethod::ShiftJisPattern,
            );
        }
    }

    if ascii_only {
        return DetectionResult::found(EncodingKind::Utf8, DetectionMethod::Ascii);
    }

    tracing::debug!("encoding undetermined, falling back to UTF-8");
    DetectionResult::fallback(DetectionMethod::Undetermined)
}

fn detect_bom(bytes: &[u8]) -> Option<EncodingKind> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        Some(EncodingKind::Utf8Bom)
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        Some(EncodingKind::Utf16Le)
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        Some(EncodingKind::Utf16Be)
    } else {
        None
    }
}

/// `ESC $ B`, `ESC $ @`, `ESC ( B` or `ESC ( J` anywhere in the buffer
fn has_jis_escape(bytes: &[u8]) -> bool {
    bytes.windows(3).any(|w| {
        w[0] == ESC
            && matches!(
                (w[1], w[2]),
                (b'$', b'B') | (b'$', b'@') | (b'(', b'B') | (b'(', b'J')
            )
    })
}

/// Structural UTF-8 check over the whole buffer.
///
/// Only lead/continuation bit patterns are verified; overlong forms and
/// surrogate code points are not rejected. A truncated trailing sequence
/// fails the check.
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let continuation = if b <= 0x7F {
            0
        } else if b & 0xE0 == 0xC0 {
            1
        } else if b & 0xF0 == 0xE0 {
            2
        } else if b & 0xF8 == 0xF0 {
            3
        } else {
            return false;
        };

        for _ in 0..continuation {
            i += 1;
            match bytes.get(i) {
                Some(&c) if c & 0xC0 == 0x80 => {}
                _ => return false,
            }
        }
        i += 1;
    }
    true
}

/// How much the buffer looks like EUC-JP. May be negative.
pub fn euc_jp_score(bytes: &[u8]) -> i64 {
    let mut score = 0i64;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        if (0xA1..=0xFE).contains(&b) && next.is_some_and(|n| (0xA1..=0xFE).contains(&n)) {
            score += 2;
            i += 2;
            continue;
        }

        // Half-width katakana: SS2 + one byte
        if b == 0x8E && next.is_some_and(|n| (0xA1..=0xDF).contains(&n)) {
            score += 1;
            i += 2;
            continue;
        }

        if (0x80..=0xA0).contains(&b) {
            score -= 1;
        }
        i += 1;
    }
    score
}

/// How much the buffer looks like Shift-JIS. May be negative.
pub fn shift_jis_score(bytes: &[u8]) -> i64 {
    let mut score = 0i64;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let is_lead = (0x81..=0x9F).contains(&b) || (0xE0..=0xFC).contains(&b);

        if is_lead {
            if let Some(&t) = bytes.get(i + 1) {
                if (0x40..=0x7E).contains(&t) || (0x80..=0xFC).contains(&t) {
                    score += 2;
                    i += 2;
                    continue;
                }
            }
        }

        if (0xA1..=0xDF).contains(&b) {
            score += 1;
        } else if b >= 0xFD {
            score -= 1;
        }
        i += 1;
    }
    score
}
