//! Portfolio snapshot module - balance sheets and their atomic persistence.

mod snapshot_model;
mod snapshot_traits;
pub mod snapshot_writer;

pub use snapshot_model::*;
pub use snapshot_traits::*;
pub use snapshot_writer::*;
