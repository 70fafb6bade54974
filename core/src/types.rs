//! Shared primitive types used across the entire simulation.

/// Wall-clock time in milliseconds since the Unix epoch.
pub type EpochMs = i64;

/// A dimensionless count of nominal 30-second decay ticks.
/// 1.0 = one normal tick; offline catch-up passes larger fractional values.
pub type DecayUnits = f64;

/// The canonical save-slot identifier.
pub type SaveId = String;
