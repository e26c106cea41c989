//! Configuration for a multi-site server process.
//!
//! ## Example
//!
//! ```no_run
//! use vhost_config::{default_sites, is_not_found, load, DEFAULT_CONFIG_FILE};
//!
//! let sites = match load(DEFAULT_CONFIG_FILE) {
//!     Ok(sites) => sites,
//!     Err(e) if is_not_found(&e) => default_sites(),
//!     Err(e) => return Err(e),
//! };
//!
//! for site in &sites {
//!     println!("serving {} from {}", site.address(), site.root);
//! }
//! # Ok::<(), vhost_config::ConfigError>(())
//! ```

pub mod config;
pub mod logging;

pub use config::{
    default_sites, is_not_found, load, load_with, ConfigError, Directive, Hook, Middleware,
    MiddlewareRegistry, ParseError, Parser, SiteConfig, TlsConfig, TomlParser, DEFAULT_CONFIG_FILE,
};
