//! State tracking for a single import
//!
//! # Components
//!
//! - `ImportState`: the stages of the import pipeline and their legal transitions
//! - `StateTracker`: walks one import through those stages and logs the transitions

mod import_state;
mod tracker;

pub use import_state::ImportState;
pub use tracker::StateTracker;
