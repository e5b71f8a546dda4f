//! Serde Configuration for a Static File Mount

use std::path::PathBuf;

use serde::Deserialize;

use crate::factory::Serve;
use crate::fs::LocalFile;

/// Deserializable settings for a single static file mount.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticConfig {
    /// Url prefix the files are served under.
    ///
    /// Default is `/`
    pub prefix: String,
    /// Directory to serve files from.
    ///
    /// Default is `.`
    pub root: PathBuf,
    /// Render a listing for directories without an index file.
    pub listing: bool,
    /// Index file served for directory requests.
    ///
    /// Default is `index.html`
    pub index: Option<String>,
    /// Allow serving paths with segments starting with a `.`
    pub hidden_files: bool,
    /// Max-age in seconds advertised with `Cache-Control`.
    ///
    /// Missing or negative disables `ETag` and `Cache-Control` headers.
    pub cache_age: Option<i64>,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            prefix: "/".to_owned(),
            root: PathBuf::from("."),
            listing: false,
            index: None,
            hidden_files: false,
            cache_age: None,
        }
    }
}

impl StaticConfig {
    /// Cache max-age with the negative "disabled" sentinel resolved.
    pub fn max_age(&self) -> Option<u32> {
        self.cache_age
            .filter(|age| *age >= 0)
            .map(|age| u32::try_from(age).unwrap_or(u32::MAX))
    }

    pub fn filesystem(&self) -> LocalFile {
        let mut fs = LocalFile::new(self.root.clone(), self.listing).hidden_files(self.hidden_files);
        if let Some(index) = self.index.as_ref() {
            fs = fs.index_file(index.clone());
        }
        fs
    }

    pub fn into_middleware(&self) -> Serve<LocalFile> {
        Serve::new(&self.prefix, self.filesystem()).max_age(self.max_age())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: StaticConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.prefix, "/");
        assert_eq!(config.root, PathBuf::from("."));
        assert!(!config.listing);
        assert_eq!(config.max_age(), None);
    }

    #[test]
    fn test_cache_age_sentinel() {
        let config: StaticConfig = serde_yaml::from_str("cache_age: -1").unwrap();
        assert_eq!(config.max_age(), None);
        let config: StaticConfig = serde_yaml::from_str("cache_age: 0").unwrap();
        assert_eq!(config.max_age(), Some(0));
        let config: StaticConfig = serde_yaml::from_str("cache_age: 3600").unwrap();
        assert_eq!(config.max_age(), Some(3600));
        let config: StaticConfig = serde_yaml::from_str("cache_age: 99999999999").unwrap();
        assert_eq!(config.max_age(), Some(u32::MAX));
    }

    #[test]
    fn test_into_middleware() {
        let yaml = "prefix: /static\nroot: ./public\nlisting: true\ncache_age: 60\n";
        let config: StaticConfig = serde_yaml::from_str(yaml).unwrap();
        let serve = config.into_middleware();
        assert_eq!(serve.prefix(), "/static");
        assert_eq!(serve.filesystem().root(), std::path::Path::new("./public"));
    }

    #[test]
    fn test_unknown_fields() {
        assert!(serde_yaml::from_str::<StaticConfig>("cache: 10").is_err());
    }
}
