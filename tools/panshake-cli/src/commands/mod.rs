pub mod config;
pub mod info;
pub mod init;
pub mod preview;
pub mod shake;
