//! Serving the shell's assets over the `griffin://` custom protocol.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use wry::http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use wry::http::{Response, StatusCode};

pub const PROTOCOL: &str = "griffin";
pub const ORIGIN: &str = "griffin://localhost";

/// Resolves `griffin://localhost/<path>` to bytes: in-memory assets first,
/// then files under an optional base directory.
#[derive(Debug, Default)]
pub struct ContentProvider {
    base_dir: Option<PathBuf>,
    overrides: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self {
            base_dir,
            overrides: HashMap::new(),
        }
    }

    /// Register an in-memory asset.
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    /// Resolve a request path to MIME type and bytes.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.split(['?', '#']).next().unwrap_or("");
        let clean = clean.trim_start_matches('/');

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let base_dir = self.base_dir.as_ref()?;
        let file_path = base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot escape the base
        let canonical_base = std::fs::canonicalize(base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Owned(mime.to_string()), Cow::Owned(data)))
    }

    /// Build the protocol response for a full request URI.
    pub fn respond(&self, uri: &str) -> Response<Cow<'static, [u8]>> {
        let path = strip_origin(uri);
        match self.resolve(path) {
            Some((mime, data)) => {
                let mut response = Response::new(Cow::Owned(data.into_owned()));
                if let Ok(value) = HeaderValue::from_str(&mime) {
                    response.headers_mut().insert(CONTENT_TYPE, value);
                }
                response
                    .headers_mut()
                    .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ORIGIN));
                response
            }
            None => {
                tracing::warn!(path = %path, "custom protocol: asset not found");
                let mut response = Response::new(Cow::Borrowed(&b"Not Found"[..]));
                *response.status_mut() = StatusCode::NOT_FOUND;
                response
            }
        }
    }
}

/// Strip the scheme and host from a protocol URI. WebView2 rewrites
/// `griffin://localhost/x` to `http://griffin.localhost/x`.
fn strip_origin(uri: &str) -> &str {
    uri.strip_prefix("griffin://localhost/")
        .or_else(|| uri.strip_prefix("http://griffin.localhost/"))
        .or_else(|| uri.strip_prefix("griffin://localhost"))
        .or_else(|| uri.strip_prefix("griffin://"))
        .unwrap_or("")
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn provider_with_files() -> (TempDir, ContentProvider) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("css")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>disk</html>").unwrap();
        std::fs::write(dir.path().join("css/app.css"), "body{}").unwrap();
        let cp = ContentProvider::new(Some(dir.path().to_path_buf()));
        (dir, cp)
    }

    #[test]
    fn resolves_files_with_mime() {
        let (_dir, cp) = provider_with_files();
        let (mime, data) = cp.resolve("css/app.css").unwrap();
        assert_eq!(mime.as_ref(), "text/css");
        assert_eq!(data.as_ref(), b"body{}");
    }

    #[test]
    fn override_wins_over_disk() {
        let (_dir, mut cp) = provider_with_files();
        cp.add_override("index.html", "text/html", "<html>embedded</html>");
        let (_, data) = cp.resolve("/index.html").unwrap();
        assert_eq!(data.as_ref(), b"<html>embedded</html>");
    }

    #[test]
    fn query_string_is_ignored() {
        let (_dir, cp) = provider_with_files();
        assert!(cp.resolve("index.html?v=2").is_some());
    }

    #[test]
    fn overrides_work_without_base_dir() {
        let mut cp = ContentProvider::new(None);
        cp.add_override("index.html", "text/html", "x");
        assert!(cp.resolve("index.html").is_some());
        assert!(cp.resolve("other.html").is_none());
    }

    #[test]
    fn traversal_is_blocked() {
        let (dir, cp) = provider_with_files();
        let outside = dir.path().parent().unwrap().join("griffin-outside.txt");
        let _ = std::fs::write(&outside, "secret");
        assert!(cp.resolve("../griffin-outside.txt").is_none());
        assert!(cp.resolve("/etc/passwd").is_none());
        let _ = std::fs::remove_file(outside);
    }

    #[test]
    fn respond_sets_headers_and_404() {
        let (_dir, cp) = provider_with_files();
        let ok = cp.respond("griffin://localhost/index.html");
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.headers()[CONTENT_TYPE], "text/html");

        let rewritten = cp.respond("http://griffin.localhost/index.html");
        assert_eq!(rewritten.status(), StatusCode::OK);

        let missing = cp.respond("griffin://localhost/nope.js");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn mime_types() {
        assert_eq!(mime_from_extension(Path::new("a.mjs")), "application/javascript");
        assert_eq!(mime_from_extension(Path::new("a.unknown")), "application/octet-stream");
        assert_eq!(mime_from_extension(Path::new("noext")), "application/octet-stream");
    }
}
