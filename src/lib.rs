//! # twophase
//! `twophase`: crate for generating Rubik's cube scrambles with [Kociemba's two phase algorithm](http://kociemba.org/cube.htm).
//!
//! A scramble is produced by sampling a uniformly random valid cube,
//! solving it with the two-phase solver and inverting the solution.

#[macro_use]
extern crate lazy_static;

/// Error define.
pub mod error;

/// Module containing 3x3 cube constants.
pub mod constants;

/// Module for represent a cube on the coordinate level.
pub mod coord;

/// Module for represent a cube on the cubie level.
pub mod cubie;

/// Module for represent a cube on the facelet level.
pub mod facelet;

/// Module for represent move and create/load move tables.
pub mod moves;

/// Module for create/load pruning tables. The pruning tables cut the search tree during the search.
pub mod pruning;

/// Module containing functions for scrambling the cube.
pub mod scramble;

/// Module for Solver.
pub mod solver;

use bincode::{
    config::{self, Configuration},
    decode_from_slice, encode_to_vec,
    error::DecodeError,
    Decode, Encode,
};
use std::sync::{Mutex, MutexGuard};
use std::{fs, path::Path};

use crate::error::Error;

const CONFIG: Configuration = config::standard();

/// Directory the move and pruning table caches live in.
pub const TABLE_DIR: &str = "tables";

static TABLE_LOCK: Mutex<()> = Mutex::new(());

/// Serializes create-or-load of the cache files, so concurrent first-time
/// callers never read a table another thread is still writing.
pub(crate) fn table_guard() -> MutexGuard<'static, ()> {
    TABLE_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

fn write_table<P, T: Encode>(path: P, table: &T) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let encoded = encode_to_vec(table, CONFIG)?;
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, encoded)?;
    Ok(())
}

fn decode_table<T: Decode<()>>(bytes: &[u8]) -> Result<T, Error> {
    let (decoded, written) = decode_from_slice(bytes, CONFIG)?;
    let additional = bytes.len() - written;

    if additional != 0 {
        return Err(DecodeError::UnexpectedEnd { additional })?;
    }
    Ok(decoded)
}
