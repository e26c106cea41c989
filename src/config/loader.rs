use std::fs::File;
use std::io;
use std::path::Path;

use super::parser::{Parser, TomlParser};
use super::site::SiteConfig;
use super::ConfigError;
use crate::logging;

/// Loads a configuration file with the default [`TomlParser`].
///
/// See [`load_with`].
pub fn load(path: impl AsRef<Path>) -> Result<Vec<SiteConfig>, ConfigError> {
    load_with(path, &TomlParser::default())
}

/// Loads a configuration file, parses it, and returns one [`SiteConfig`] per
/// site in declaration order, each stamped with `path` as its source.
///
/// A missing file yields [`ConfigError::FileNotFound`]; check with
/// [`is_not_found`](crate::is_not_found) to fall back to
/// [`default_sites`](crate::default_sites). Other open failures are returned
/// as the underlying [`io::Error`].
///
/// Log timestamps are suppressed while the parser runs. Must not be called
/// concurrently with anything else that toggles them.
pub fn load_with<P>(path: impl AsRef<Path>, parser: &P) -> Result<Vec<SiteConfig>, ConfigError>
where
    P: Parser + ?Sized,
{
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading site configuration");

    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.to_path_buf(),
            source: e,
        },
        _ => ConfigError::Io(e),
    })?;

    let parsed = {
        let _quiet = logging::suppress_timestamps();
        parser.parse(&mut file)
    };

    let mut sites = parsed.map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for site in &mut sites {
        site.source_path = Some(path.to_path_buf());
    }

    tracing::debug!(path = %path.display(), sites = sites.len(), "loaded site configuration");
    Ok(sites)
}
