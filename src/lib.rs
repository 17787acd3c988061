#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod base_urls;
pub mod config;
pub mod logging;
pub mod models;
pub mod records;
pub mod url_paths;

pub use base_urls::{BaseUrls, DEFAULT_API_BASE_URL};
pub use config::{ConfigError, ResolverConfig};
pub use models::{QuestionRecord, QuizRecord};
pub use url_paths::{ImageUrlResolver, UrlKind};
