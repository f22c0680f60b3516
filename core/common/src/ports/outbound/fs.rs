//! ファイルシステム Outbound ポート
//!
//! ストア・ログ・設定の読み込みはこの trait 経由でのみファイル I/O を行う。

use crate::error::Error;
use std::path::{Path, PathBuf};

/// ファイルシステム抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdFileSystem` やテスト用のメモリ FS など。
pub trait FileSystem: Send + Sync {
    fn read_to_string(&self, path: &Path) -> Result<String, Error>;
    fn write(&self, path: &Path, contents: &str) -> Result<(), Error>;
    fn rename(&self, from: &Path, to: &Path) -> Result<(), Error>;
    fn create_dir_all(&self, path: &Path) -> Result<(), Error>;
    fn remove_file(&self, path: &Path) -> Result<(), Error>;
    /// ディレクトリ直下のエントリのフルパス一覧（存在しなければ空）
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>, Error>;
    /// 追記用に開く（存在しなければ作成）。返した Writer を drop すると閉じる。
    fn open_append(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>, Error>;
    fn exists(&self, path: &Path) -> bool;

    /// 一時ファイルに書いてから rename する（途中状態のファイルを残さない）
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        self.write(&tmp, contents)?;
        self.rename(&tmp, path)
    }
}
