//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリ・ログイン中のプリンシパル・シークレットを環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. CARTSPARK_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/cartspark（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/cartspark
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// 空文字は未設定として扱う
    fn var(&self, key: &str) -> Option<String>;
}
