use crate::http::response::{CONTENT_LENGTH, Response};
use crate::http::server::DispatchError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

static STATIC_ASSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(html|js|css|png|jpg|jpeg)$").expect("valid asset pattern"));

const PAGES_DIR: &str = "pages";
const INDEX_PAGE: &str = "index.html";

#[derive(Debug, Error)]
pub enum StaticFilesError {
    #[error("Static files: path cannot be blank")]
    BlankPath,
    #[error("Static files: not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Static files: directory is not readable: {0}")]
    NotReadable(PathBuf),
    #[error("Static files: can't create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether a GET for `path` should be answered from disk.
pub fn is_static_asset(path: &str) -> bool {
    path == "/" || STATIC_ASSET_RE.is_match(path)
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// A validated directory that static GETs are served from.
///
/// `/` maps to `pages/index.html`, other `.html` files live under `pages/`,
/// everything else sits directly under the root.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    /// Uses `path` as the root, creating it if it does not exist yet.
    pub fn configure(path: impl AsRef<Path>) -> Result<StaticFiles, StaticFilesError> {
        let root = path.as_ref();
        if root.as_os_str().is_empty() || root.to_string_lossy().trim().is_empty() {
            return Err(StaticFilesError::BlankPath);
        }

        if root.exists() {
            if !root.is_dir() {
                return Err(StaticFilesError::NotADirectory(root.to_path_buf()));
            }
            if fs::read_dir(root).is_err() {
                return Err(StaticFilesError::NotReadable(root.to_path_buf()));
            }
        } else {
            fs::create_dir_all(root).map_err(|source| StaticFilesError::Create {
                path: root.to_path_buf(),
                source,
            })?;
            tracing::info!(root = %root.display(), "created static files directory");
        }

        Ok(StaticFiles {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a decoded request path to a file under the root.
    ///
    /// Returns `None` for paths that try to climb out of the root.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        if Path::new(relative)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }

        let resolved = if relative.is_empty() {
            self.root.join(PAGES_DIR).join(INDEX_PAGE)
        } else if path.ends_with(".html") {
            self.root.join(PAGES_DIR).join(relative)
        } else {
            self.root.join(relative)
        };
        Some(resolved)
    }

    pub fn serve(&self, path: &str) -> Result<Response, DispatchError> {
        let file = self.resolve(path);
        let content_type = content_type_for(file.as_deref().unwrap_or(Path::new(path)));

        if content_type.starts_with("image/") {
            return self.serve_image(file, content_type);
        }

        let not_found = || DispatchError::NotFound(format!("File {} not found", path));
        let file = file.filter(|f| f.is_file()).ok_or_else(not_found)?;
        match fs::read(&file) {
            Ok(content) => Ok(Response::new().body(content).content_type(content_type)),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) => {
                Err(not_found())
            }
            Err(e) => Err(DispatchError::Internal(e.into())),
        }
    }

    fn serve_image(&self, file: Option<PathBuf>, content_type: &str) -> Result<Response, DispatchError> {
        let Some(file) = file.filter(|f| f.is_file()) else {
            return Ok(Response::with_status(404, "Image not found"));
        };
        let content = fs::read(&file).map_err(anyhow::Error::from)?;
        let len = content.len().to_string();
        Ok(Response::new()
            .body(content)
            .content_type(content_type)
            .header(CONTENT_LENGTH, &len))
    }
}
