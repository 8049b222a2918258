pub mod analyzers;
pub mod config;
pub mod currency;
pub mod error;
pub mod output;
pub mod parser;
pub mod report;
pub mod vacancy;

pub use analyzers::analyzer::{PipelineRun, analyze};
pub use config::PipelineConfig;
pub use error::{ReportError, Result};
pub use report::ReportBundle;
