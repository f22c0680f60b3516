//! ドメイン型と純粋なロジック
//!
//! I/O を持たない。AI 応答の解析・プロンプト生成・リストのマージ規則はここに置く。

pub mod ai_reply;
pub mod billing;
pub mod category;
pub mod category_map;
pub mod command;
pub mod error;
pub mod ids;
pub mod list;
pub mod list_item;
pub mod meal;
pub mod meal_plan;
pub mod prompt;
pub mod user;

pub use ai_reply::MealIdea;
pub use category::Category;
pub use category_map::CategoryMap;
pub use error::{ListError, WebhookError};
pub use ids::{Email, ListId, MealId, Principal, Uid};
pub use list::{GroceryList, ListPatch};
pub use list_item::{ItemAddress, ListItem};
pub use meal::{CatalogMeal, Meal, MealDraft};
pub use meal_plan::{MealPlan, MealSlot, PlannedMeal, Weekday};
pub use user::{SubscriptionStatus, UserRecord};
