//! 食事テンプレートのストア Outbound ポート（プリンシパルごと）

use crate::domain::{Meal, MealId, Uid};
use common::error::Error;

pub trait MealRepository: Send + Sync {
    fn get(&self, owner: &Uid, id: &MealId) -> Result<Option<Meal>, Error>;
    fn save(&self, meal: &Meal) -> Result<(), Error>;
    fn delete(&self, owner: &Uid, id: &MealId) -> Result<(), Error>;
    fn list(&self, owner: &Uid) -> Result<Vec<Meal>, Error>;
}
