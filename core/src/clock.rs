//! Wall-clock access.
//!
//! RULE: Nothing below the engine reads the system clock. Every state
//! transition takes an explicit `now_ms` parameter so the whole core is
//! replayable from timestamps alone; this module is the single place the
//! real clock is sampled.

use crate::types::EpochMs;
use chrono::Utc;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> EpochMs {
    Utc::now().timestamp_millis()
}
