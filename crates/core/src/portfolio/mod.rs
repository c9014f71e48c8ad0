//! Portfolio module - point-in-time balance snapshots.

pub mod snapshot;
