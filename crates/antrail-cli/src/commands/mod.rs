//! CLI command implementations.

pub mod init;
pub mod maze;
pub mod replay;
pub mod run;
