//! Command handlers for the `suds` CLI, one module per subcommand.

pub mod calc;
pub mod export;
pub mod import;
pub mod init;
pub mod oil;
pub mod recipe;
pub mod sync_cmd;
pub mod version;
