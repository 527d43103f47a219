//! Persists the session cookies between CLI invocations. A browser keeps the
//! `HttpOnly` session cookie for us; a short-lived process has to write it to
//! disk. The file holds one `name=value` pair per line, followed by
//! `; Path=/scope` when the server scoped the cookie below `/`. It is created
//! with owner-only permissions because the values are bearer credentials.

use super::errors::AppError;
use reqwest::cookie::{CookieStore, Jar};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    io::{ErrorKind, Write},
    path::Path,
    sync::Arc,
};
use tracing::debug;
use url::Url;

/// Restores a cookie jar from `path`; a missing file yields an empty jar.
///
/// # Errors
/// Returns `AppError::Io` when the file exists but cannot be read.
pub fn load_jar(path: &Path, url: &Url) -> Result<Arc<Jar>, AppError> {
    let jar = Jar::default();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };

    let mut restored = 0usize;
    for line in contents.lines().filter_map(parse_line) {
        let (pair, scope) = split_scope(line);
        let mut scoped = url.clone();
        scoped.set_path(scope);
        jar.add_cookie_str(&format!("{pair}; Path={scope}"), &scoped);
        restored += 1;
    }
    debug!(restored, "cookies restored");

    Ok(Arc::new(jar))
}

/// Writes every cookie the jar would send to any of `urls` into `path`. Each
/// cookie keeps the shortest of those paths it was visible at.
///
/// # Errors
/// Returns `AppError::Io` when the file cannot be written.
pub fn save_jar(jar: &Jar, path: &Path, urls: &[Url]) -> Result<(), AppError> {
    let mut urls: Vec<&Url> = urls.iter().collect();
    urls.sort_by_key(|url| url.path().len());

    let mut seen = BTreeSet::new();
    let mut cookies = BTreeMap::new();

    for url in urls {
        let Some(header) = jar.cookies(url) else {
            continue;
        };
        let Ok(header) = header.to_str() else {
            continue;
        };
        for pair in header.split(';').filter_map(parse_line) {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            if seen.insert((name.to_string(), value.to_string())) {
                cookies.insert(
                    (name.to_string(), url.path().to_string()),
                    value.to_string(),
                );
            }
        }
    }

    let contents: String = cookies
        .iter()
        .map(|((name, scope), value)| {
            if scope == "/" {
                format!("{name}={value}\n")
            } else {
                format!("{name}={value}; Path={scope}\n")
            }
        })
        .collect();

    write_private(path, &contents)?;
    debug!(saved = cookies.len(), "cookies saved");
    Ok(())
}

/// Empties the cookie file so the next invocation starts unauthenticated.
///
/// # Errors
/// Returns `AppError::Io` when the file cannot be written.
pub fn clear(path: &Path) -> Result<(), AppError> {
    write_private(path, "")
}

fn parse_line(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match line.split_once('=') {
        Some((name, _)) if !name.trim().is_empty() => Some(line),
        _ => None,
    }
}

/// Splits a stored line into the `name=value` pair and its path, `/` by default.
fn split_scope(line: &str) -> (&str, &str) {
    let (pair, attributes) = line.split_once(';').unwrap_or((line, ""));
    let scope = attributes
        .split(';')
        .filter_map(|attribute| attribute.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("path"))
        .map(|(_, value)| value.trim())
        .filter(|value| value.starts_with('/'))
        .unwrap_or("/");
    (pair.trim(), scope)
}

fn write_private(path: &Path, contents: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
