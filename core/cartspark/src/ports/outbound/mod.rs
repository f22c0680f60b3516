//! Outbound ポート: usecase が AI・文書ストア・認証を使うための trait

pub mod auth_session;
pub mod guest_list_store;
pub mod list_repository;
pub mod meal_plan_repository;
pub mod meal_repository;
pub mod text_generator;
pub mod user_repository;

pub use auth_session::AuthSession;
pub use guest_list_store::GuestListStore;
pub use list_repository::ListRepository;
pub use meal_plan_repository::MealPlanRepository;
pub use meal_repository::MealRepository;
pub use text_generator::TextGenerator;
pub use user_repository::UserRepository;
