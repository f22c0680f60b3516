//! リストの 1 アイテムとその位置

use crate::domain::category::Category;
use serde::{Deserialize, Serialize};

/// 買い物リストの 1 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

impl ListItem {
    /// 未チェックのアイテム
    pub fn unchecked(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checked: false,
        }
    }
}

/// 1 スナップショット内でのアイテムの位置（カテゴリ + 添字）
///
/// 削除で後続の添字がずれるため、別スナップショットに持ち越さない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAddress {
    pub category: Category,
    pub index: usize,
}

impl ItemAddress {
    pub fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }

    /// `<category>:<index>` 形式を解析する（例: `Dairy & Eggs:0`）
    pub fn parse(s: &str) -> Option<Self> {
        let (cat, idx) = s.rsplit_once(':')?;
        let category = Category::parse(cat)?;
        let index = idx.trim().parse::<usize>().ok()?;
        Some(Self { category, index })
    }
}

impl std::fmt::Display for ItemAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.category, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_defaults_to_false() {
        let item: ListItem = serde_json::from_str(r#"{"name":"milk"}"#).unwrap();
        assert_eq!(item, ListItem::unchecked("milk"));
    }

    #[test]
    fn test_address_parse_and_display() {
        let addr = ItemAddress::parse("dairy & eggs:2").unwrap();
        assert_eq!(addr, ItemAddress::new(Category::DairyEggs, 2));
        assert_eq!(addr.to_string(), "Dairy & Eggs:2");
        assert!(ItemAddress::parse("Dairy & Eggs").is_none());
        assert!(ItemAddress::parse("Snacks:0").is_none());
        assert!(ItemAddress::parse("Produce:-1").is_none());
    }
}
