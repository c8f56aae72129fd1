//! CLI commands for relgen

pub mod dispatch;
pub mod generate;
pub mod split;
