//! Site configuration model and loading.

mod error;
mod hooks;
mod loader;
mod middleware;
mod parser;
mod resolve;
mod site;

pub use error::{is_not_found, ConfigError, HookError, ParseError};
pub use hooks::{argv_hook, command_hook};
pub use loader::{load, load_with};
pub use middleware::{Directive, Middleware, MiddlewareRegistry};
pub use parser::{Parser, TomlParser};
pub use resolve::{expand_env, expand_placeholders, expand_table};
pub use site::{default_sites, Hook, MiddlewareStack, SiteConfig, TlsConfig, DEFAULT_CONFIG_FILE};
