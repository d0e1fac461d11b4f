//! Disk-backed serving of the prebuilt front end, with SPA fallback.
//!
//! Any request that matches no API route lands here. A path that names an
//! existing file under the static root is served with its guessed content
//! type; anything else falls back to `index.html` so client-side routing
//! works. 404 only when the root has no `index.html` either.

use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use super::AppState;

pub async fn serve_static(State(state): State<AppState>, uri: Uri) -> Response {
    let root = &state.config.static_root;
    let path = uri.path().trim_start_matches('/');

    if let Some(relative) = sanitize_path(path) {
        let candidate = root.join(&relative);
        if let Ok(bytes) = tokio::fs::read(&candidate).await {
            let mime = mime_guess::from_path(&candidate).first_or_octet_stream();
            return ([(header::CONTENT_TYPE, mime.as_ref())], bytes).into_response();
        }
    }

    // SPA fallback
    match tokio::fs::read(root.join("index.html")).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "text/html")], bytes).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

/// Reject empty paths and anything that could escape the static root.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    if path.is_empty() {
        return None;
    }
    let path = Path::new(path);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            // ParentDir, RootDir, Prefix: traversal attempts
            _ => return None,
        }
    }
    Some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass() {
        assert_eq!(
            sanitize_path("assets/app.js"),
            Some(PathBuf::from("assets/app.js"))
        );
    }

    #[test]
    fn empty_path_is_rejected() {
        assert_eq!(sanitize_path(""), None);
    }

    #[test]
    fn traversal_is_rejected() {
        assert_eq!(sanitize_path("../secrets.txt"), None);
        assert_eq!(sanitize_path("a/../../b"), None);
    }

    #[test]
    fn current_dir_components_collapse() {
        assert_eq!(sanitize_path("./a/./b"), Some(PathBuf::from("a/b")));
    }
}
