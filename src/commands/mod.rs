pub mod completions;
pub mod config;
pub mod init;
pub mod quiz;
pub mod render;
pub mod session;
pub mod version;
