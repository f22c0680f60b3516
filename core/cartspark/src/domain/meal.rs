//! 食事テンプレートと組み込みカタログ

use crate::domain::error::ListError;
use crate::domain::ids::{MealId, Uid};
use serde::{Deserialize, Serialize};

/// ユーザーが保存した食事テンプレート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: MealId,
    pub owner_id: Uid,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub created_at: u64,
}

/// 食事の入力（作成・編集共通）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDraft {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
}

impl MealDraft {
    /// 名前と材料テキストを検証する。材料は `,` または改行で区切る。
    pub fn parse(
        name: &str,
        ingredients_text: &str,
        instructions: Option<&str>,
    ) -> Result<Self, ListError> {
        let name = name.trim();
        let ingredients = split_ingredients(ingredients_text);
        if name.is_empty() || ingredients.is_empty() {
            return Err(ListError::EmptyInput);
        }
        Ok(Self {
            name: name.to_string(),
            ingredients,
            instructions: instructions
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        })
    }
}

/// 材料テキストを分割する
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// 名前の重複を除く（先に出たものを残す）
pub fn dedup_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

const CATALOG_JSON: &str = include_str!("../../data/meal_catalog.json");

/// 組み込みカタログの 1 件
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogMeal {
    pub name: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
}

impl CatalogMeal {
    /// タグ（または meal_type）に一致するか
    pub fn matches(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
            || self
                .meal_type
                .as_deref()
                .is_some_and(|m| m.eq_ignore_ascii_case(tag))
    }
}

/// 組み込みカタログを読む
pub fn catalog() -> Result<Vec<CatalogMeal>, serde_json::Error> {
    serde_json::from_str(CATALOG_JSON)
}
