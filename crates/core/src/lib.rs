#![forbid(unsafe_code)]

pub mod assembly;
pub mod error;
pub mod ingest;
pub mod model;
pub mod scoring;
pub mod template;
pub mod time;
pub mod timer;

pub use time::Clock;
