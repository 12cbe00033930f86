//! Character encoding detection and transcoding
//!
//! Files arrive as raw bytes. `detect` classifies them, `decode` turns them
//! into a `String`, and `encode` writes edited text back in the same encoding.
//!
//! ```text
//! bytes ──detect──▶ DetectionResult ──decode(kind)──▶ String
//!   ▲                                                   │
//!   └──────────────────── encode(kind) ◀────────────────┘
//! ```
//!
//! Detection is heuristic and tuned for Japanese text: BOMs and ISO-2022-JP
//! escape sequences are trusted outright, strict UTF-8 wins next, and EUC-JP
//! versus Shift-JIS is settled by byte-pair scoring.

mod detector;
mod inspect;
mod kind;
mod transcode;

pub use detector::{detect, euc_jp_score, is_valid_utf8, shift_jis_score};
pub use inspect::{inspect_char, CharCategory, CharInfo};
pub use kind::{DetectionMethod, DetectionResult, EncodingKind, ParseEncodingError};
pub use transcode::{decode, encode, Decoded, Encoded};
