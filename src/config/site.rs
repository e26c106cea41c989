use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::HookError;
use super::middleware::Middleware;

pub(crate) const DEFAULT_HOST: &str = "localhost";
pub(crate) const DEFAULT_PORT: &str = "2015";
pub(crate) const DEFAULT_ROOT: &str = ".";

/// The configuration file loaded by convention when none is specified.
pub const DEFAULT_CONFIG_FILE: &str = "Sitefile";

/// A zero-argument action run at server start or shutdown.
pub type Hook = Arc<dyn Fn() -> Result<(), HookError> + Send + Sync>;

/// Middleware registered per path scope, in registration order.
pub type MiddlewareStack = BTreeMap<String, Vec<Arc<dyn Middleware>>>;

/// Configuration for one virtual host.
///
/// Produced by [`load`](crate::load) or [`default_sites`], never mutated
/// afterwards except for the loader stamping `source_path`.
#[derive(Clone, Default)]
pub struct SiteConfig {
    /// Hostname or IP to serve on. Empty matches any host.
    pub host: String,

    /// Port to listen on. May be a service name.
    pub port: String,

    /// Directory files are served from.
    pub root: String,

    pub tls: TlsConfig,

    pub middleware: MiddlewareStack,

    /// Run before any listener is opened; blocking and sequential.
    pub startup: Vec<Hook>,

    /// Run on termination; blocking and sequential.
    pub shutdown: Vec<Hook>,

    /// The file this site was loaded from.
    pub source_path: Option<PathBuf>,
}

impl SiteConfig {
    /// Returns `host:port`, bracketing the host if it contains a colon.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Names of the middleware registered under `scope`, in order.
    pub fn middleware_names(&self, scope: &str) -> Vec<&str> {
        self.middleware
            .get(scope)
            .map(|stack| stack.iter().map(|m| m.name()).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("root", &self.root)
            .field("tls", &self.tls)
            .field("middleware", &self.middleware)
            .field("startup", &self.startup.len())
            .field("shutdown", &self.shutdown.len())
            .field("source_path", &self.source_path)
            .finish()
    }
}

/// How TLS should be used for a site, if at all.
///
/// A certificate and key are both required when enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub enabled: bool,
    pub certificate: String,
    pub key: String,
}

/// Builds the configuration used when no config file exists: serve the
/// current directory on `localhost:2015`.
pub fn default_sites() -> Vec<SiteConfig> {
    vec![SiteConfig {
        root: DEFAULT_ROOT.to_string(),
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT.to_string(),
        ..SiteConfig::default()
    }]
}
