//! 全カテゴリを必ず持つカテゴリマップ
//!
//! キーは常に 12 カテゴリすべて。保存データの読み込みでは欠けたキーを空で補い、
//! 未知のキーは捨てる。

use crate::domain::category::Category;
use crate::domain::error::ListError;
use crate::domain::list_item::{ItemAddress, ListItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// カテゴリ → アイテム列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<ListItem>>", into = "BTreeMap<String, Vec<ListItem>>")]
pub struct CategoryMap {
    entries: BTreeMap<Category, Vec<ListItem>>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl CategoryMap {
    /// 全カテゴリが空のマップ
    pub fn empty() -> Self {
        Self {
            entries: Category::ALL.iter().map(|c| (*c, Vec::new())).collect(),
        }
    }

    pub fn get(&self, category: Category) -> &[ListItem] {
        self.entries.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn push(&mut self, category: Category, item: ListItem) {
        self.entries.entry(category).or_default().push(item);
    }

    /// タクソノミー順に (カテゴリ, アイテム列) を返す
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ListItem])> + '_ {
        self.entries.iter().map(|(c, items)| (*c, items.as_slice()))
    }

    /// キー一覧（常に 12 件）
    pub fn categories(&self) -> Vec<Category> {
        self.entries.keys().copied().collect()
    }

    /// 全アイテム名をタクソノミー順に平坦化する
    pub fn flatten_names(&self) -> Vec<String> {
        self.entries
            .values()
            .flat_map(|items| items.iter().map(|i| i.name.clone()))
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn item(&self, addr: ItemAddress) -> Result<&ListItem, ListError> {
        self.get(addr.category)
            .get(addr.index)
            .ok_or_else(|| ListError::not_found(format!("item {}", addr)))
    }

    fn item_mut(&mut self, addr: ItemAddress) -> Result<&mut ListItem, ListError> {
        self.entries
            .get_mut(&addr.category)
            .and_then(|items| items.get_mut(addr.index))
            .ok_or_else(|| ListError::not_found(format!("item {}", addr)))
    }

    /// チェック状態を反転し、反転後の値を返す
    pub fn toggle(&mut self, addr: ItemAddress) -> Result<bool, ListError> {
        let item = self.item_mut(addr)?;
        item.checked = !item.checked;
        Ok(item.checked)
    }

    /// 名前を置き換える（チェック状態は保持）
    pub fn rename(&mut self, addr: ItemAddress, name: &str) -> Result<(), ListError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ListError::EmptyInput);
        }
        self.item_mut(addr)?.name = name.to_string();
        Ok(())
    }

    /// アイテムを取り除く。同カテゴリの後続の添字は 1 つ詰まる。
    pub fn remove(&mut self, addr: ItemAddress) -> Result<ListItem, ListError> {
        let items = self
            .entries
            .get_mut(&addr.category)
            .filter(|items| addr.index < items.len())
            .ok_or_else(|| ListError::not_found(format!("item {}", addr)))?;
        Ok(items.remove(addr.index))
    }
}

impl From<BTreeMap<String, Vec<ListItem>>> for CategoryMap {
    fn from(raw: BTreeMap<String, Vec<ListItem>>) -> Self {
        let mut map = CategoryMap::empty();
        for (key, items) in raw {
            if let Some(category) = Category::ALL.iter().find(|c| c.as_str() == key) {
                map.entries.insert(*category, items);
            }
        }
        map
    }
}

impl From<CategoryMap> for BTreeMap<String, Vec<ListItem>> {
    fn from(map: CategoryMap) -> Self {
        map.entries
            .into_iter()
            .map(|(c, items)| (c.as_str().to_string(), items))
            .collect()
    }
}
