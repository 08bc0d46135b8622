//! Full-machine state capture.
//!
//! A snapshot is a deep copy, never a reference: restoring one reproduces
//! the machine bit for bit, and equality and hashing over snapshots give
//! the embedding debug console its undo diffing and the tests their
//! whole-state assertions. Snapshots serialize through `serde`, and the
//! JSON round trip reproduces identical state and hash.

use serde::{Deserialize, Serialize};

use crate::core::cpu::CpuState;

/// Deep capture of CPU state, RAM, and instruction memory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    /// CPU registers, flags, PC, run state, latches, and counters.
    pub cpu: CpuState,
    /// Full RAM contents.
    pub ram: Vec<u16>,
    /// Full instruction memory contents.
    pub instructions: Vec<u16>,
}

impl Snapshot {
    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures; the snapshot itself is always
    /// serializable.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserializes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Fails on malformed or structurally incompatible input.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
