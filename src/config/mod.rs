//! Configuration module for linkslate
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use linkslate::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkslate.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.parallelism);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SelectorConfig};

// Re-export parser functions
pub use parser::load_config;
