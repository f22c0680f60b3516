pub(crate) mod billing;
pub(crate) mod list_session;
pub(crate) mod lists;
pub(crate) mod meal_plan;
pub(crate) mod meals;

pub(crate) use billing::{BillingUseCase, WebhookAck};
pub(crate) use list_session::{ListDeps, ListSession, ListTarget};
pub(crate) use lists::ListsUseCase;
pub(crate) use meal_plan::MealPlanUseCase;
pub(crate) use meals::MealsUseCase;
