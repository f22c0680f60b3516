//! ゲストリストのローカル保存 Outbound ポート
//!
//! サーバー上の ID を持たない 1 件だけのリスト。

use crate::domain::CategoryMap;
use common::error::Error;

pub trait GuestListStore: Send + Sync {
    fn load(&self) -> Result<Option<CategoryMap>, Error>;

    /// None で保存を消す
    fn save(&self, items: Option<&CategoryMap>) -> Result<(), Error>;
}
