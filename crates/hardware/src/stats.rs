//! Simulation statistics collection and reporting.
//!
//! Tracks what the pipeline did, purely observationally:
//! 1. **Cycles:** Total clock edges stepped.
//! 2. **Retirement:** Instructions that completed writeback (bubbles and
//!    NOPs excluded).
//! 3. **Hazards:** Stall cycles and jump flushes issued by hazard control.

use serde::{Deserialize, Serialize};

/// Counters describing one simulation's pipeline activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions that completed writeback.
    pub instructions_retired: u64,
    /// Stall cycles issued by hazard control.
    pub stalls: u64,
    /// Decode slots flushed behind taken jumps.
    pub flushes: u64,
}

impl SimStats {
    /// Cycles per retired instruction, or zero before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints a short report to stdout.
    pub fn print(&self) {
        println!("cycles:       {}", self.cycles);
        println!("retired:      {}", self.instructions_retired);
        println!("stalls:       {}", self.stalls);
        println!("flushes:      {}", self.flushes);
        println!("cpi:          {:.2}", self.cpi());
    }
}
