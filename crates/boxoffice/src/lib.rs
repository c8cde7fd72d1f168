//! Boxoffice library interface for integration tests

#![allow(
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::too_many_lines
)]

pub mod cli;
pub mod commands;
pub mod init;
pub mod output;
pub mod prompt;
pub mod session;
pub mod shell;
