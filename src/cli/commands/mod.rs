pub mod chart;
mod command_result;
pub mod export;
pub mod extract;
pub mod import_legacy;
pub mod init;

pub use command_result::*;
