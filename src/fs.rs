//! Filesystem Abstraction Served by the Middleware

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use actix_files::Files;

use crate::error::OpenError;
use crate::path::{PathBufWrap, strip_prefix};

pub const DEFAULT_INDEX: &str = "index.html";

/// Backing store that can be served by [`Serve`](crate::Serve).
///
/// Implementations decide which request paths they answer for and must
/// hand back a file service that resolves those same paths.
pub trait ServeFileSystem: Send + Sync + 'static {
    type File: Read + Send + 'static;

    /// Report if `path`, once `prefix` is stripped, resolves to something
    /// this filesystem will serve.
    fn exists(&self, prefix: &str, path: &str) -> bool;

    /// Open the file at a prefix-stripped request path for reading.
    fn open(&self, path: &str) -> Result<Self::File, OpenError>;

    /// Build the actix-files service responsible for writing responses.
    fn file_service(&self) -> Files;
}

/// Local directory [`ServeFileSystem`].
#[derive(Clone, Debug)]
pub struct LocalFile {
    root: PathBuf,
    indexes: bool,
    index: String,
    hidden_files: bool,
}

impl LocalFile {
    /// Serve files below `root`.
    ///
    /// When `indexes` is true, directories without an index file are
    /// rendered as an html listing instead of being left unhandled.
    pub fn new<P: Into<PathBuf>>(root: P, indexes: bool) -> Self {
        Self {
            root: root.into(),
            indexes,
            index: DEFAULT_INDEX.to_owned(),
            hidden_files: false,
        }
    }
    pub fn index_file<S: Into<String>>(mut self, index: S) -> Self {
        self.index = index.into();
        self
    }
    pub fn hidden_files(mut self, hidden_files: bool) -> Self {
        self.hidden_files = hidden_files;
        self
    }
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        match PathBufWrap::parse_path(path, self.hidden_files) {
            Ok(rel) => Some(self.root.join(rel)),
            Err(err) => {
                log::debug!("rejected path {path:?}: {err}");
                None
            }
        }
    }
}

impl ServeFileSystem for LocalFile {
    type File = File;

    fn exists(&self, prefix: &str, path: &str) -> bool {
        let Some(path) = strip_prefix(prefix, path).and_then(|p| self.resolve(p)) else {
            return false;
        };
        match path.metadata() {
            Ok(meta) if meta.is_file() => true,
            Ok(meta) if meta.is_dir() => self.indexes || path.join(&self.index).is_file(),
            _ => false,
        }
    }

    fn open(&self, path: &str) -> Result<Self::File, OpenError> {
        let mut path = self.resolve(path).ok_or(OpenError::NotFound)?;
        if path.is_dir() {
            path.push(&self.index);
        }
        match path.is_file() {
            true => Ok(File::open(&path)?),
            false => Err(OpenError::NotFound),
        }
    }

    fn file_service(&self) -> Files {
        let mut files = Files::new("", &self.root)
            .index_file(self.index.clone())
            .redirect_to_slash_directory()
            .use_etag(false);
        if self.indexes {
            files = files.show_files_listing();
        }
        if self.hidden_files {
            files = files.use_hidden_files();
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "Gin Web Framework").unwrap();
        fs::write(dir.path().join(".secret"), "hidden").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::create_dir(dir.path().join("site")).unwrap();
        fs::write(dir.path().join("site").join("index.html"), "index").unwrap();
        dir
    }

    #[test]
    fn test_exists_files() {
        let dir = fixture();
        let fs = LocalFile::new(dir.path(), false);
        assert!(fs.exists("/", "/hello.txt"));
        assert!(!fs.exists("/", "/missing.txt"));
        assert!(!fs.exists("/", "/hello.txta"));
        assert!(!fs.exists("/static", "/hello.txt"));
        assert!(fs.exists("/static", "/static/hello.txt"));
        assert!(!fs.exists("/static", "/statichello.txt"));
    }

    #[test]
    fn test_exists_directories() {
        let dir = fixture();
        let listing = LocalFile::new(dir.path(), true);
        let plain = LocalFile::new(dir.path(), false);
        assert!(listing.exists("/", "/"));
        assert!(listing.exists("/", "/empty"));
        assert!(!plain.exists("/", "/"));
        assert!(!plain.exists("/", "/empty/"));
        assert!(plain.exists("/", "/site"));
        assert!(plain.exists("/", "/site/"));
        assert!(!LocalFile::new(dir.path(), false).index_file("main.html").exists("/", "/site"));
    }

    #[test]
    fn test_exists_rejects_escapes() {
        let dir = fixture();
        let inner = dir.path().join("site");
        let fs = LocalFile::new(&inner, true);
        assert!(dir.path().join("hello.txt").is_file());
        assert!(!fs.exists("/", "/../hello.txt"));
        assert!(!fs.exists("/", "/%2E%2E/hello.txt"));
        assert!(!fs.exists("/", "/..%5Chello.txt"));
        assert!(!fs.exists("/", "/\\hello.txt"));
    }

    #[test]
    fn test_exists_hidden_files() {
        let dir = fixture();
        assert!(!LocalFile::new(dir.path(), true).exists("/", "/.secret"));
        assert!(
            LocalFile::new(dir.path(), true)
                .hidden_files(true)
                .exists("/", "/.secret")
        );
    }

    #[test]
    fn test_open() {
        let dir = fixture();
        let fs = LocalFile::new(dir.path(), true);

        let mut content = String::new();
        fs.open("/hello.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "Gin Web Framework");

        let mut content = String::new();
        fs.open("/site/").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "index");

        assert!(matches!(fs.open("/empty"), Err(OpenError::NotFound)));
        assert!(matches!(fs.open("/missing"), Err(OpenError::NotFound)));
        assert!(matches!(fs.open("/../etc/passwd"), Err(OpenError::NotFound)));
    }
}
