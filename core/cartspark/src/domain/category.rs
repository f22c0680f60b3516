//! 食料品カテゴリの固定タクソノミー
//!
//! 並び順はプロンプト・表示・エクスポートすべてで共通。

use serde::{Deserialize, Serialize};

/// 食料品カテゴリ（12 種、この順で固定）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Produce")]
    Produce,
    #[serde(rename = "Bakery")]
    Bakery,
    #[serde(rename = "Meat & Seafood")]
    MeatSeafood,
    #[serde(rename = "Dairy & Eggs")]
    DairyEggs,
    #[serde(rename = "Pantry")]
    Pantry,
    #[serde(rename = "Frozen Foods")]
    FrozenFoods,
    #[serde(rename = "Beverages")]
    Beverages,
    #[serde(rename = "Household & Cleaning")]
    HouseholdCleaning,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Pets")]
    Pets,
    #[serde(rename = "Baby")]
    Baby,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
}

impl Category {
    /// タクソノミー順の全カテゴリ
    pub const ALL: [Category; 12] = [
        Category::Produce,
        Category::Bakery,
        Category::MeatSeafood,
        Category::DairyEggs,
        Category::Pantry,
        Category::FrozenFoods,
        Category::Beverages,
        Category::HouseholdCleaning,
        Category::PersonalCare,
        Category::Pets,
        Category::Baby,
        Category::Miscellaneous,
    ];

    /// 表示名（AI の JSON キーと同じ）
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Produce => "Produce",
            Category::Bakery => "Bakery",
            Category::MeatSeafood => "Meat & Seafood",
            Category::DairyEggs => "Dairy & Eggs",
            Category::Pantry => "Pantry",
            Category::FrozenFoods => "Frozen Foods",
            Category::Beverages => "Beverages",
            Category::HouseholdCleaning => "Household & Cleaning",
            Category::PersonalCare => "Personal Care",
            Category::Pets => "Pets",
            Category::Baby => "Baby",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// 表示名から解決する。CLI では大文字小文字を区別しない。
    pub fn parse(name: &str) -> Option<Category> {
        let name = name.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_taxonomy_order() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Produce",
                "Bakery",
                "Meat & Seafood",
                "Dairy & Eggs",
                "Pantry",
                "Frozen Foods",
                "Beverages",
                "Household & Cleaning",
                "Personal Care",
                "Pets",
                "Baby",
                "Miscellaneous",
            ]
        );
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::MeatSeafood).unwrap();
        assert_eq!(json, "\"Meat & Seafood\"");
        let back: Category = serde_json::from_str("\"Dairy & Eggs\"").unwrap();
        assert_eq!(back, Category::DairyEggs);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Category::parse("frozen foods"), Some(Category::FrozenFoods));
        assert_eq!(Category::parse(" Pets "), Some(Category::Pets));
        assert_eq!(Category::parse("Snacks"), None);
    }
}
