//! Save/Load functionality for grid snapshots
//!
//! Uses bincode for compact binary serialization of every block.
//! Blocks are flattened to [`BlockRecord`]s, then respawned on load.
//! Only the grid is saved: the manager rediscovers everything after a load,
//! exactly as it would after a restart.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::grid::{BlockRecord, Grid};

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of a grid
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Grid display name
    pub grid_name: String,
    /// All blocks with their components
    pub blocks: Vec<BlockRecord>,
}

/// Save a grid to a writer
pub fn save_grid<W: Write>(writer: W, grid: &Grid) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        grid_name: grid.name.clone(),
        blocks: grid.to_records(),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a grid from a reader
pub fn load_grid<R: Read>(reader: R) -> Result<Grid, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(Grid::from_records(save_data.grid_name, save_data.blocks))
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
