// Configuration loading

pub mod job;

pub use job::{ConfigError, JobConfig, OutputConfig};
