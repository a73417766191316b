//! Producer and consumer pipelines
//!
//! The two sides share nothing in-process; the stream is the only link.

mod publish;
mod reader;

pub use publish::PublishPipeline;
pub use reader::ForecastReader;
