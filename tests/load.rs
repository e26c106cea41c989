use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use tempfile::{NamedTempFile, TempDir};
use vhost_config::{
    is_not_found, load, load_with, ConfigError, Directive, Middleware, MiddlewareRegistry,
    ParseError, Parser, SiteConfig, TomlParser,
};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

const THREE_SITES: &str = r#"
[[site]]
host = "example.com"
port = "80"
root = "/srv/example"

[[site]]
host = "secure.example.com"
port = "443"

[site.tls]
certificate = "/etc/tls/cert.pem"
key = "/etc/tls/key.pem"

[[site]]
host = "::1"
port = "8080"
"#;

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Sitefile");

    let err = load(&path).unwrap_err();
    assert!(is_not_found(&err));
    match err {
        ConfigError::FileNotFound { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_directory_is_not_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load(dir.path()).unwrap_err();
    assert!(!is_not_found(&err));
}

#[test]
fn test_parse_failure_returns_error() {
    let file = config_file("[[site]\nhost = ");
    let err = load(file.path()).unwrap_err();

    assert!(!is_not_found(&err));
    match err {
        ConfigError::Parse { path, source } => {
            assert_eq!(path, file.path());
            assert!(matches!(source, ParseError::Syntax(_)));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn test_sites_stamped_with_source_in_order() {
    let file = config_file(THREE_SITES);
    let sites = load(file.path()).unwrap();

    assert_eq!(sites.len(), 3);
    for site in &sites {
        assert_eq!(site.source_path.as_deref(), Some(file.path()));
    }

    let addresses: Vec<_> = sites.iter().map(SiteConfig::address).collect();
    assert_eq!(addresses, ["example.com:80", "secure.example.com:443", "[::1]:8080"]);
    assert_eq!(sites[0].root, "/srv/example");
    assert!(!sites[0].tls.enabled);
    assert!(sites[1].tls.enabled);
    assert_eq!(sites[1].tls.certificate, "/etc/tls/cert.pem");
    assert_eq!(sites[1].tls.key, "/etc/tls/key.pem");
}

#[test]
fn test_empty_file_has_no_sites() {
    let file = config_file("");
    assert!(load(file.path()).unwrap().is_empty());
}

#[test]
fn test_duplicate_addresses_pass_through() {
    let file = config_file("[[site]]\nport = \"80\"\n[[site]]\nport = \"80\"\n");
    let sites = load(file.path()).unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].address(), sites[1].address());
}

#[test]
fn test_load_is_idempotent() {
    let file = config_file(THREE_SITES);
    let first = load(file.path()).unwrap();
    let second = load(file.path()).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.host, b.host);
        assert_eq!(a.port, b.port);
        assert_eq!(a.root, b.root);
        assert_eq!(a.tls, b.tls);
        assert_eq!(a.source_path, b.source_path);
        assert_eq!(a.startup.len(), b.startup.len());
        assert_eq!(a.shutdown.len(), b.shutdown.len());
        assert!(a.middleware.keys().eq(b.middleware.keys()));
    }
}

#[derive(Debug)]
struct Tag(String);

impl Middleware for Tag {
    fn name(&self) -> &str {
        &self.0
    }
}

#[test]
fn test_load_with_registered_middleware() {
    let registry = MiddlewareRegistry::new().register("headers", |d: &Directive| {
        Ok(Arc::new(Tag(format!("{}:{}", d.name, d.args.join(",")))) as Arc<dyn Middleware>)
    });
    let file = config_file(
        r#"
        [[site]]
        host = "api.example.com"

        [[site.middleware]]
        scope = "/v1"
        name = "headers"
        args = ["X-Api", "1"]
        "#,
    );

    let sites = load_with(file.path(), &TomlParser::new(registry)).unwrap();
    assert_eq!(sites[0].middleware_names("/v1"), ["headers:X-Api,1"]);

    // The default parser knows no directives.
    let err = load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Parse { source: ParseError::UnknownDirective { .. }, .. }
    ));
}

struct CountingParser;

impl Parser for CountingParser {
    fn parse(&self, source: &mut dyn Read) -> Result<Vec<SiteConfig>, ParseError> {
        let mut contents = String::new();
        source.read_to_string(&mut contents)?;
        Ok(contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| SiteConfig {
                host: line.trim().to_string(),
                port: "80".to_string(),
                ..SiteConfig::default()
            })
            .collect())
    }
}

#[test]
fn test_load_with_custom_parser() {
    let file = config_file("alpha\n\nbeta\n");
    let sites = load_with(file.path(), &CountingParser).unwrap();

    let hosts: Vec<_> = sites.iter().map(|s| s.host.as_str()).collect();
    assert_eq!(hosts, ["alpha", "beta"]);
    assert!(sites.iter().all(|s| s.source_path.as_deref() == Some(Path::new(file.path()))));
}

#[cfg(unix)]
#[test]
fn test_startup_hooks_run_in_order() {
    let dir = TempDir::new().unwrap();
    let marker = dir.path().join("marker");
    let file = config_file(&format!(
        "[[site]]\nstartup = [\"touch {0}\", \"test -f {0}\"]\n",
        marker.display()
    ));

    let sites = load(file.path()).unwrap();
    for hook in &sites[0].startup {
        hook().unwrap();
    }
    assert!(marker.exists());
}
