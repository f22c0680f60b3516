//! 献立プランのストア Outbound ポート（プリンシパルごとに 1 件）

use crate::domain::{MealPlan, Uid};
use common::error::Error;

pub trait MealPlanRepository: Send + Sync {
    fn get(&self, owner: &Uid) -> Result<Option<MealPlan>, Error>;
    fn save(&self, plan: &MealPlan) -> Result<(), Error>;
}
