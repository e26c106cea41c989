//! Parsing of site blocks from a configuration source.

use std::io::Read;

use serde::Deserialize;

use super::hooks::{argv_hook, command_hook};
use super::middleware::{Directive, MiddlewareRegistry};
use super::resolve::expand_env;
use super::site::{SiteConfig, TlsConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_ROOT};
use super::ParseError;

/// Turns a readable source into site configurations.
///
/// Implementations return every site in declaration order, or an error;
/// never a partial result. `source_path` is left unset.
pub trait Parser {
    fn parse(&self, source: &mut dyn Read) -> Result<Vec<SiteConfig>, ParseError>;
}

/// Parses TOML documents made of `[[site]]` blocks.
///
/// ```toml
/// [[site]]
/// host = "example.com"
/// port = "8080"
/// root = "/srv/www"
/// startup = ["mkdir -p /srv/www/logs", ["touch", "/srv/www/a file"]]
///
/// [site.tls]
/// certificate = "cert.pem"
/// key = "key.pem"
///
/// [[site.middleware]]
/// scope = "/"
/// name = "gzip"
/// ```
///
/// `${NAME}` placeholders inside string values are replaced from the
/// environment. Keys and comments are left alone.
#[derive(Debug, Clone, Default)]
pub struct TomlParser {
    registry: MiddlewareRegistry,
}

impl TomlParser {
    pub fn new(registry: MiddlewareRegistry) -> Self {
        Self { registry }
    }

    pub fn parse_str(&self, contents: &str) -> Result<Vec<SiteConfig>, ParseError> {
        let mut table: toml::Table = toml::from_str(contents)?;
        expand_env(&mut table)?;
        let document: Document = toml::Value::Table(table).try_into()?;

        document
            .site
            .into_iter()
            .enumerate()
            .map(|(index, raw)| self.build_site(index, raw))
            .collect()
    }

    fn build_site(&self, index: usize, raw: RawSite) -> Result<SiteConfig, ParseError> {
        let tls = match raw.tls {
            Some(tls) => {
                let missing = |field| ParseError::MissingTlsMaterial { site: index, field };
                if tls.certificate.is_empty() {
                    return Err(missing("certificate"));
                }
                if tls.key.is_empty() {
                    return Err(missing("key"));
                }
                TlsConfig {
                    enabled: true,
                    certificate: tls.certificate,
                    key: tls.key,
                }
            }
            None => TlsConfig::default(),
        };

        let mut site = SiteConfig {
            host: raw.host,
            port: raw.port,
            root: raw.root,
            tls,
            ..SiteConfig::default()
        };

        for entry in raw.middleware {
            let directive = Directive {
                name: entry.name,
                args: entry.args,
            };
            let middleware = match self.registry.construct(&directive) {
                Some(Ok(middleware)) => middleware,
                Some(Err(message)) => {
                    return Err(ParseError::Directive {
                        site: index,
                        name: directive.name,
                        message,
                    })
                }
                None => {
                    return Err(ParseError::UnknownDirective {
                        site: index,
                        name: directive.name,
                    })
                }
            };
            site.middleware.entry(entry.scope).or_default().push(middleware);
        }

        let hook = |entry: RawHook| {
            match entry {
                RawHook::Line(line) => command_hook(&line),
                RawHook::Argv(argv) => argv_hook(argv),
            }
            .map_err(|message| ParseError::InvalidHook { site: index, message })
        };
        site.startup = raw.startup.into_iter().map(hook).collect::<Result<_, _>>()?;
        site.shutdown = raw.shutdown.into_iter().map(hook).collect::<Result<_, _>>()?;

        if site.tls.enabled && site.port == "80" {
            tracing::warn!(site = index, address = %site.address(), "tls enabled on port 80");
        }
        tracing::debug!(
            site = index,
            address = %site.address(),
            tls = site.tls.enabled,
            scopes = site.middleware.len(),
            "parsed site"
        );

        Ok(site)
    }
}

impl Parser for TomlParser {
    fn parse(&self, source: &mut dyn Read) -> Result<Vec<SiteConfig>, ParseError> {
        let mut contents = String::new();
        source.read_to_string(&mut contents)?;
        self.parse_str(&contents)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(default)]
    site: Vec<RawSite>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: String,
    #[serde(default = "default_root")]
    root: String,
    tls: Option<RawTls>,
    #[serde(default)]
    middleware: Vec<RawMiddleware>,
    #[serde(default)]
    startup: Vec<RawHook>,
    #[serde(default)]
    shutdown: Vec<RawHook>,
}

/// A hook command: a whitespace-split line or an explicit argument vector.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHook {
    Line(String),
    Argv(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTls {
    #[serde(default)]
    certificate: String,
    #[serde(default)]
    key: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMiddleware {
    #[serde(default = "default_scope")]
    scope: String,
    name: String,
    #[serde(default)]
    args: Vec<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

fn default_scope() -> String {
    "/".to_string()
}
