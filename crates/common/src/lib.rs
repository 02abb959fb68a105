//! Pieces shared by every crate in the workspace: tracing setup and the
//! small response types exposed by operational endpoints.

pub mod types;
pub mod utils;
