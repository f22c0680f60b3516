//! リスト文書ストア Outbound ポート
//!
//! 文書全体の上書きのみ（楽観ロックなし、最後に書いた方が勝つ）。

use crate::domain::{GroceryList, ListId, ListPatch, Uid};
use common::error::Error;

pub trait ListRepository: Send + Sync {
    fn get(&self, id: &ListId) -> Result<Option<GroceryList>, Error>;

    /// 新規作成（同じ ID があれば上書き）
    fn create(&self, list: &GroceryList) -> Result<(), Error>;

    /// set-with-merge。文書が無ければ Error を返す。
    fn merge(&self, id: &ListId, patch: ListPatch) -> Result<GroceryList, Error>;

    fn delete(&self, id: &ListId) -> Result<(), Error>;

    /// uid がメンバーに含まれるリストすべて（順序は不定）
    fn for_member(&self, uid: &Uid) -> Result<Vec<GroceryList>, Error>;
}
