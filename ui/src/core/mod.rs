pub mod config;
pub mod format;
pub mod platform;
pub mod storage;
