//! 買い物リスト文書

use crate::domain::category_map::CategoryMap;
use crate::domain::ids::{ListId, Uid};
use serde::{Deserialize, Serialize};

/// アカウントのリスト文書
///
/// `items` が None なら未分類（Uninitialized）、Some なら全空でも分類済み。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    pub id: ListId,
    pub name: String,
    pub owner_id: Uid,
    #[serde(default)]
    pub members: Vec<Uid>,
    #[serde(default)]
    pub items: Option<CategoryMap>,
    #[serde(default)]
    pub planned_meals: Vec<String>,
    /// 作成時刻（Unix ms）
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<u64>,
}

impl GroceryList {
    /// 所有者だけをメンバーに持つ空のリスト
    pub fn new(id: ListId, name: impl Into<String>, owner: Uid, created_at: u64) -> Self {
        Self {
            id,
            name: name.into(),
            members: vec![owner.clone()],
            owner_id: owner,
            items: None,
            planned_meals: Vec::new(),
            created_at,
            last_updated: None,
        }
    }

    pub fn is_member(&self, uid: &Uid) -> bool {
        self.members.contains(uid)
    }

    pub fn apply(&mut self, patch: ListPatch) {
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(planned) = patch.planned_meals {
            self.planned_meals = planned;
        }
        if let Some(ts) = patch.last_updated {
            self.last_updated = Some(ts);
        }
        for uid in patch.add_members {
            if !self.members.contains(&uid) {
                self.members.push(uid);
            }
        }
    }
}

/// set-with-merge で書くフィールド（None は書かない）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPatch {
    /// Some(None) でリストを未分類に戻す
    pub items: Option<Option<CategoryMap>>,
    pub planned_meals: Option<Vec<String>>,
    pub last_updated: Option<u64>,
    /// 集合として追加するメンバー
    pub add_members: Vec<Uid>,
}

/// プレーンテキストに書き出す。空なら `Your list is empty!`。
pub fn export_plain_text(items: Option<&CategoryMap>) -> String {
    let Some(map) = items.filter(|m| !m.is_empty()) else {
        return "Your list is empty!".to_string();
    };
    let mut out = String::new();
    for (category, entries) in map.iter() {
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", category));
        for item in entries {
            out.push_str(&format!("- {}\n", item.name));
        }
        out.push('\n');
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::list_item::ListItem;

    fn uid(s: &str) -> Uid {
        Uid::parse(s).unwrap()
    }

    #[test]
    fn test_new_list_is_uninitialized_with_owner_member() {
        let list = GroceryList::new(ListId::parse("l1").unwrap(), "Weekly", uid("u1"), 10);
        assert!(list.items.is_none());
        assert_eq!(list.members, vec![uid("u1")]);
        assert!(list.is_member(&uid("u1")));
    }

    #[test]
    fn test_patch_merges_members_as_set() {
        let mut list = GroceryList::new(ListId::parse("l1").unwrap(), "Weekly", uid("u1"), 10);
        list.apply(ListPatch {
            add_members: vec![uid("u2"), uid("u1")],
            ..Default::default()
        });
        assert_eq!(list.members, vec![uid("u1"), uid("u2")]);
        list.apply(ListPatch {
            items: Some(Some(CategoryMap::empty())),
            last_updated: Some(20),
            ..Default::default()
        });
        assert!(list.items.is_some());
        assert_eq!(list.last_updated, Some(20));
        list.apply(ListPatch {
            items: Some(None),
            ..Default::default()
        });
        assert!(list.items.is_none());
    }

    #[test]
    fn test_export_plain_text() {
        let mut map = CategoryMap::empty();
        map.push(Category::Produce, ListItem::unchecked("apples"));
        map.push(Category::DairyEggs, ListItem::unchecked("milk"));
        map.push(Category::DairyEggs, ListItem::unchecked("eggs"));
        assert_eq!(
            export_plain_text(Some(&map)),
            "Produce:\n- apples\n\nDairy & Eggs:\n- milk\n- eggs"
        );
    }

    #[test]
    fn test_export_empty_list() {
        assert_eq!(export_plain_text(None), "Your list is empty!");
        assert_eq!(
            export_plain_text(Some(&CategoryMap::empty())),
            "Your list is empty!"
        );
    }

    #[test]
    fn test_document_uses_camel_case() {
        let list = GroceryList::new(ListId::parse("l1").unwrap(), "Weekly", uid("u1"), 10);
        let v = serde_json::to_value(&list).unwrap();
        assert_eq!(v["ownerId"], "u1");
        assert_eq!(v["plannedMeals"], serde_json::json!([]));
        assert!(v["items"].is_null());
    }
}
