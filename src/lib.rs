pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod strip;

pub use config::StripConfig;
pub use error::StripError;
pub use report::StripReport;
pub use scanner::{Document, Trigger};
pub use strip::{strip_file, strip_text, StripOptions, Stripped};
