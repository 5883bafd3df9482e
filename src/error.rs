use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

/// Errors.
///    Input errors: the cube or string handed to the solver is malformed.
///    Search errors: no solution within the configured depth caps.
///    Internal errors: a table or search invariant was broken; these never
///    occur on correctly built tables and are reported instead of ignored.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid color value")]
    InvalidColor,
    #[error("Invalid edge value")]
    InvalidEdge,
    #[error("One edge has to be flipped")]
    FlipError,
    #[error("Invalid corner value")]
    InvalidCorner,
    #[error("One corner has to be twisted")]
    TwistError,
    #[error("Two corners or two edges have to be exchanged")]
    ParityError,
    #[error("Invalid scramble string")]
    InvalidScramble,
    #[error("Invalid facelet string")]
    InvalidFaceletString,
    #[error("Invalid facelet reperesentation")]
    InvalidFaceletValue,
    #[error("Invalid cubie reperesentation")]
    InvalidCubieValue,
    #[error("No phase 1 solution within the depth limit")]
    Phase1Exhausted,
    #[error("No phase 2 solution within the depth limit")]
    Phase2Exhausted,
    #[error("Phase 1 moves did not reach the G1 subgroup")]
    G1Breach,
    #[error("Combined solution does not solve the cube")]
    VerificationFailure,
    #[error("Table {0} is corrupt")]
    TableCorrupt(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    TableEncode(#[from] EncodeError),
    #[error(transparent)]
    TableDecode(#[from] DecodeError),
}
