//! ドメイン型（Newtype）
//!
//! String / PathBuf を直接運ばず、意味のある型に包んで境界を明確にする。

use std::path::{Path, PathBuf};

/// ホームディレクトリのパス（config.json / logs の置き場所）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeDir(PathBuf);

impl HomeDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn config_path(&self) -> PathBuf {
        self.0.join("config.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.0.join("logs").join("cartspark.jsonl")
    }
}

impl std::ops::Deref for HomeDir {
    type Target = PathBuf;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for HomeDir {
    fn as_ref(&self) -> &Path {
        self.0.as_ref()
    }
}

impl From<PathBuf> for HomeDir {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

/// ドキュメント ID（10文字 base62、辞書順＝時系列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(String);

impl DocId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::ops::Deref for DocId {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DocId> for String {
    fn from(id: DocId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir_paths() {
        let home = HomeDir::new("/tmp/cs");
        assert_eq!(home.config_path(), PathBuf::from("/tmp/cs/config.json"));
        assert_eq!(home.log_path(), PathBuf::from("/tmp/cs/logs/cartspark.jsonl"));
    }
}
