//! Terminal reporting shared by every pipeline stage.

pub mod output;
pub(crate) mod progress;
