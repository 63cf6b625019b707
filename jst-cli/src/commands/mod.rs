pub mod build;
pub mod compile;
pub mod diff;
pub mod init;
pub mod report;
pub mod targets;
