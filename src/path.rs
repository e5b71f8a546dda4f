//! Request Path Resolution Relative to a Serving Root

use std::path::{Component, PathBuf};

use crate::error::UriSegmentError;

/// Strip a mount prefix from a request path.
///
/// The prefix only matches on a segment boundary, so `/static` matches
/// `/static` and `/static/app.js` but never `/staticfoo`. An empty or `/`
/// prefix matches every path.
pub fn strip_prefix<'a>(prefix: &str, path: &'a str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;
    match rest.is_empty() || rest.starts_with('/') {
        true => Some(rest),
        false => None,
    }
}

/// Relative on-disk path parsed from a url path.
///
/// Segment rules follow actix-files so that anything accepted here is
/// served identically by the file service, except that parent-directory
/// segments and backslashes are rejected outright.
#[derive(Debug, PartialEq, Eq)]
pub struct PathBufWrap(PathBuf);

impl PathBufWrap {
    pub fn parse_path(path: &str, hidden_files: bool) -> Result<Self, UriSegmentError> {
        let mut buf = PathBuf::new();

        // decoding the whole path at once is fine as long as `%2F` is refused
        let segment_count = path.matches('/').count();
        let path = percent_encoding::percent_decode_str(path)
            .decode_utf8()
            .map_err(|_| UriSegmentError::NotValidUtf8)?;
        if segment_count != path.matches('/').count() {
            return Err(UriSegmentError::BadChar('/'));
        }

        for segment in path.split('/') {
            if segment == ".." {
                return Err(UriSegmentError::ParentDir);
            } else if segment.is_empty() || segment == "." {
                continue;
            } else if !hidden_files && segment.starts_with('.') {
                return Err(UriSegmentError::BadStart('.'));
            } else if segment.starts_with('*') {
                return Err(UriSegmentError::BadStart('*'));
            } else if segment.contains('\\') {
                return Err(UriSegmentError::BadChar('\\'));
            } else if segment.contains('\0') {
                return Err(UriSegmentError::BadChar('\0'));
            } else if cfg!(windows) && segment.contains(':') {
                return Err(UriSegmentError::BadChar(':'));
            } else if let Some(c @ (':' | '<' | '>')) = segment.chars().last() {
                return Err(UriSegmentError::BadEnd(c));
            }
            buf.push(segment);
        }

        // anything but plain names could escape the root once joined
        if !buf.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(UriSegmentError::BadChar('/'));
        }
        Ok(Self(buf))
    }

    #[inline]
    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }
}

impl AsRef<std::path::Path> for PathBufWrap {
    fn as_ref(&self) -> &std::path::Path {
        &self.0
    }
}
