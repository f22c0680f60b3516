//! 食事テンプレートの管理と組み込みカタログ

use crate::domain::meal::{self, CatalogMeal, MealDraft};
use crate::domain::{ListError, ListId, Meal, MealId, Principal};
use crate::ports::outbound::MealRepository;
use crate::usecase::list_session::{ListDeps, ListSession, ListTarget};
use common::error::Error;
use common::ports::outbound::{Clock, IdGenerator, Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct MealsUseCase {
    meals: Arc<dyn MealRepository>,
    id_gen: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
    list_deps: ListDeps,
}

impl MealsUseCase {
    pub fn new(
        meals: Arc<dyn MealRepository>,
        id_gen: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
        list_deps: ListDeps,
    ) -> Self {
        Self {
            meals,
            id_gen,
            clock,
            log,
            list_deps,
        }
    }

    fn save(&self, meal: &Meal, msg: &str) -> Result<(), ListError> {
        self.meals.save(meal).map_err(ListError::persistence)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "store", msg).field("meal", meal.id.as_str()),
        );
        Ok(())
    }

    pub fn create_meal(
        &self,
        principal: &Principal,
        name: &str,
        ingredients_text: &str,
        instructions: Option<&str>,
    ) -> Result<Meal, ListError> {
        let draft = MealDraft::parse(name, ingredients_text, instructions)?;
        let meal = Meal {
            id: MealId::from(self.id_gen.next_id()),
            owner_id: principal.uid.clone(),
            name: draft.name,
            ingredients: draft.ingredients,
            instructions: draft.instructions,
            created_at: self.clock.now_ms(),
        };
        self.save(&meal, "meal created")?;
        Ok(meal)
    }

    pub fn get_meal(&self, principal: &Principal, id: &MealId) -> Result<Meal, ListError> {
        self.meals
            .get(&principal.uid, id)
            .map_err(ListError::persistence)?
            .ok_or_else(|| ListError::not_found(format!("meal {}", id)))
    }

    /// 名前と材料を置き換える。instructions は None なら元のまま。
    pub fn edit_meal(
        &self,
        principal: &Principal,
        id: &MealId,
        name: &str,
        ingredients_text: &str,
        instructions: Option<&str>,
    ) -> Result<Meal, ListError> {
        let draft = MealDraft::parse(name, ingredients_text, instructions)?;
        let mut meal = self.get_meal(principal, id)?;
        meal.name = draft.name;
        meal.ingredients = draft.ingredients;
        if draft.instructions.is_some() {
            meal.instructions = draft.instructions;
        }
        self.save(&meal, "meal updated")?;
        Ok(meal)
    }

    pub fn delete_meal(&self, principal: &Principal, id: &MealId) -> Result<(), ListError> {
        self.get_meal(principal, id)?;
        self.meals
            .delete(&principal.uid, id)
            .map_err(ListError::persistence)
    }

    /// 名前順（大文字小文字を区別しない）
    pub fn meals_for(&self, principal: &Principal) -> Result<Vec<Meal>, ListError> {
        let mut meals = self
            .meals
            .list(&principal.uid)
            .map_err(ListError::persistence)?;
        meals.sort_by_key(|m| m.name.to_lowercase());
        Ok(meals)
    }

    /// 食事の材料をリストに足して分類し直す
    pub fn add_meal_to_list(
        &self,
        principal: &Principal,
        meal_id: &MealId,
        list: &ListId,
    ) -> Result<ListSession, ListError> {
        let meal = self.get_meal(principal, meal_id)?;
        let mut session = ListSession::open(
            self.list_deps.clone(),
            ListTarget::Account {
                list: list.clone(),
                member: principal.uid.clone(),
            },
        )?;
        session.add_meal(&meal)?;
        Ok(session)
    }

    /// 組み込みカタログ（tag 指定でタグ・食事タイプで絞る）
    pub fn catalog(&self, tag: Option<&str>) -> Result<Vec<CatalogMeal>, Error> {
        let all = meal::catalog().map_err(|e| Error::system(format!("meal catalogue: {}", e)))?;
        Ok(match tag {
            Some(t) => all.into_iter().filter(|m| m.matches(t)).collect(),
            None => all,
        })
    }

    /// カタログの 1 件を自分の食事として保存する
    pub fn save_catalog_meal(&self, principal: &Principal, name: &str) -> Result<Meal, Error> {
        let entry = self
            .catalog(None)?
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ListError::not_found(format!("catalogue meal '{}'", name.trim())))?;
        let meal = self.create_meal(principal, &entry.name, &entry.ingredients.join("\n"), None)?;
        Ok(meal)
    }
}
