pub mod compile;
pub mod extract;
pub mod filter;
pub mod helper;
pub mod import;
pub mod init;
pub mod init_config;
pub mod stats;
pub mod update;

mod command_result;

pub use command_result::*;
pub use helper::CommandContext;
