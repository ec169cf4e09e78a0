//! API key sources.
//!
//! A [`CredentialProvider`] either yields a non-empty key or `None`. Providers are
//! interchangeable; [`CredentialChain`] tries several in order and keeps the first hit.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::provider::constants::groq;

pub const DEFAULT_KEY_FILES: &[&str] = &[".env", "groq_api_key.txt"];

pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(groq::API_KEY_ENV_VAR)
    }
}

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Scans key files in order for `GROQ_API_KEY=<value>` or a bare `gsk_` key.
///
/// The first match wins; nothing after it is read.
#[derive(Debug, Clone)]
pub struct KeyFileCredentials {
    paths: Vec<PathBuf>,
}

impl KeyFileCredentials {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn scan_file(path: &Path) -> Option<String> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping key file");
                return None;
            }
        };

        let key = contents.lines().find_map(parse_key_line);
        if key.is_some() {
            debug!(path = %path.display(), "Found API key in key file");
        }
        key
    }
}

impl Default for KeyFileCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_FILES.iter().copied())
    }
}

impl CredentialProvider for KeyFileCredentials {
    fn api_key(&self) -> Option<String> {
        self.paths.iter().find_map(|path| Self::scan_file(path))
    }
}

/// Extract a key from one line of a key file.
fn parse_key_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);

    if let Some((name, value)) = line.split_once('=') {
        if name.trim() != groq::API_KEY_ENV_VAR {
            return None;
        }
        let value = unquote(value.trim());
        return (!value.is_empty()).then(|| value.to_string());
    }

    line.starts_with(groq::API_KEY_PREFIX)
        .then(|| line.to_string())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    value
}

/// Ordered list of providers; the first one that yields a key wins.
#[derive(Default)]
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Environment first, then the key files.
    pub fn default_chain(key_files: Option<Vec<PathBuf>>) -> Self {
        let files = match key_files {
            Some(paths) if !paths.is_empty() => KeyFileCredentials::new(paths),
            _ => KeyFileCredentials::default(),
        };

        Self::new().with(EnvCredentials::default()).with(files)
    }
}

impl CredentialProvider for CredentialChain {
    fn api_key(&self) -> Option<String> {
        self.providers.iter().find_map(|provider| provider.api_key())
    }
}
