//! 週間献立プランと、プランからの買い物リスト生成

use crate::domain::meal::dedup_names;
use crate::domain::{ListError, MealId, MealPlan, MealSlot, PlannedMeal, Principal, Weekday};
use crate::ports::outbound::{MealPlanRepository, MealRepository};
use crate::usecase::list_session::{ListDeps, ListSession, ListTarget};
use crate::usecase::lists::ListsUseCase;
use chrono::{TimeZone, Utc};
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct MealPlanUseCase {
    plans: Arc<dyn MealPlanRepository>,
    meals: Arc<dyn MealRepository>,
    lists: Arc<ListsUseCase>,
    list_deps: ListDeps,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

impl MealPlanUseCase {
    pub fn new(
        plans: Arc<dyn MealPlanRepository>,
        meals: Arc<dyn MealRepository>,
        lists: Arc<ListsUseCase>,
        list_deps: ListDeps,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            plans,
            meals,
            lists,
            list_deps,
            clock,
            log,
        }
    }

    fn save(&self, plan: &MealPlan) -> Result<(), ListError> {
        self.plans.save(plan).map_err(ListError::persistence)?;
        let _ = self.log.log(&LogRecord::new(
            LogLevel::Debug,
            "usecase",
            "store",
            "meal plan saved",
        ));
        Ok(())
    }

    /// プランを読む。無ければ空のプランを作って保存する。
    pub fn plan(&self, principal: &Principal) -> Result<MealPlan, ListError> {
        if let Some(plan) = self
            .plans
            .get(&principal.uid)
            .map_err(ListError::persistence)?
        {
            return Ok(plan);
        }
        let plan = MealPlan::empty(principal.uid.clone());
        self.save(&plan)?;
        Ok(plan)
    }

    pub fn add_to_plan(
        &self,
        principal: &Principal,
        meal_id: &MealId,
        day: Weekday,
        slot: MealSlot,
    ) -> Result<MealPlan, ListError> {
        let meal = self
            .meals
            .get(&principal.uid, meal_id)
            .map_err(ListError::persistence)?
            .ok_or_else(|| ListError::not_found(format!("meal {}", meal_id)))?;
        let mut plan = self.plan(principal)?;
        plan.add(
            day,
            slot,
            PlannedMeal {
                meal_id: meal.id,
                name: meal.name,
            },
        );
        self.save(&plan)?;
        Ok(plan)
    }

    pub fn remove_from_plan(
        &self,
        principal: &Principal,
        day: Weekday,
        slot: MealSlot,
        index: usize,
    ) -> Result<MealPlan, ListError> {
        let mut plan = self.plan(principal)?;
        plan.remove(day, slot, index).ok_or_else(|| {
            ListError::not_found(format!("{} {} #{}", day.as_str(), slot.as_str(), index))
        })?;
        self.save(&plan)?;
        Ok(plan)
    }

    /// 21 枠すべてを空にする（プラン自体は消さない）
    pub fn clear_plan(&self, principal: &Principal) -> Result<MealPlan, ListError> {
        let plan = MealPlan::empty(principal.uid.clone());
        self.save(&plan)?;
        Ok(plan)
    }

    /// プランの食事の材料で新しいリストを作って分類する
    ///
    /// 削除済みの食事は飛ばす。材料が 1 つも無ければ EmptyInput。
    pub fn generate_shopping_list(&self, principal: &Principal) -> Result<ListSession, ListError> {
        let plan = self.plan(principal)?;
        let mut ingredients = Vec::new();
        let mut meal_names = Vec::new();
        for planned in plan.planned() {
            let Some(meal) = self
                .meals
                .get(&principal.uid, &planned.meal_id)
                .map_err(ListError::persistence)?
            else {
                continue;
            };
            meal_names.push(meal.name);
            ingredients.extend(meal.ingredients);
        }
        let ingredients = dedup_names(ingredients);
        let meal_names = dedup_names(meal_names);
        if ingredients.is_empty() {
            return Err(ListError::EmptyInput);
        }

        let list = self
            .lists
            .create_list(principal, &shopping_list_name(self.clock.now_ms()), meal_names.clone())?;
        let mut session = ListSession::open(
            self.list_deps.clone(),
            ListTarget::Account {
                list: list.id.clone(),
                member: principal.uid.clone(),
            },
        )?;
        session.categorize(ingredients, meal_names)?;
        Ok(session)
    }
}

/// `Shopping List for YYYY-MM-DD`（UTC）
pub fn shopping_list_name(now_ms: u64) -> String {
    let date = Utc
        .timestamp_millis_opt(now_ms as i64)
        .single()
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!("Shopping List for {}", date)
}
