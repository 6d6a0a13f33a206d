use serde::{Deserialize, Serialize};
use thiserror::Error;

/// このクレートで発生し得るすべてのエラー。
///
/// 引数の範囲チェックのように O(1) で判定できる前提条件違反はここで報告される。
/// 正規化済みであることのような O(n) の前提条件は `debug_assert!` でのみ検査される。
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    #[error("Level '{level}' is out of range (valid: 0..=30)")]
    LevelOutOfRange { level: u8 },

    #[error("Face '{face}' is out of range (valid: 0..=5)")]
    FaceOutOfRange { face: u8 },

    #[error("Level modulus '{level_mod}' is out of range (valid: 1..=3)")]
    LevelModOutOfRange { level_mod: u8 },

    #[error("CellId '{id:#018x}' is not a leaf cell")]
    NotLeaf { id: u64 },

    #[error("Range is inverted: min '{min:#018x}' > max '{max:#018x}'")]
    InvertedRange { min: u64, max: u64 },

    #[error("Token '{token}' is not a valid cell token")]
    InvalidToken { token: String },

    #[error("Decoding a cell cover is not supported")]
    DecodeUnsupported,
}
