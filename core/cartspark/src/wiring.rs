//! 配線: 標準アダプタで UseCase を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, StdClock, StdEnvResolver, StdFileSystem, StdIdGenerator};
use common::domain::HomeDir;
use common::error::Error;
use common::llm::{GeminiProvider, LlmDriver};
use common::ports::outbound::{Clock, EnvResolver, FileSystem, IdGenerator, Log};

use crate::adapter::{AppConfig, EnvAuthSession, JsonDocumentStore, LlmTextGenerator};
use crate::ports::outbound::{
    AuthSession, GuestListStore, ListRepository, MealPlanRepository, MealRepository,
    TextGenerator, UserRepository,
};
use crate::usecase::{BillingUseCase, ListDeps, ListsUseCase, MealPlanUseCase, MealsUseCase};

pub const WEBHOOK_SECRET_ENV: &str = "STRIPE_WEBHOOK_SECRET";

/// 配線で組み立てたユースケース群（main の Command ディスパッチで利用）
pub struct App {
    pub list_deps: ListDeps,
    pub lists: Arc<ListsUseCase>,
    pub meals: MealsUseCase,
    pub meal_plan: MealPlanUseCase,
    pub billing: BillingUseCase,
    pub auth: Arc<dyn AuthSession>,
    /// 構造化ログ（ファイルへ JSONL）。エラー時のコンソール表示とは別。
    pub logger: Arc<dyn Log>,
}

/// 外界とつながるポート（テストではスタブに差し替える）
pub struct Ports {
    pub generator: Arc<dyn TextGenerator>,
    pub store: Arc<JsonDocumentStore>,
    pub auth: Arc<dyn AuthSession>,
    pub clock: Arc<dyn Clock>,
    pub id_gen: Arc<dyn IdGenerator>,
    pub logger: Arc<dyn Log>,
    pub webhook_secret: Option<String>,
}

/// ポートから App を組み立てる
pub fn assemble(ports: Ports) -> App {
    let lists_repo: Arc<dyn ListRepository> = ports.store.clone();
    let guest: Arc<dyn GuestListStore> = ports.store.clone();
    let meals_repo: Arc<dyn MealRepository> = ports.store.clone();
    let plans_repo: Arc<dyn MealPlanRepository> = ports.store.clone();
    let users_repo: Arc<dyn UserRepository> = ports.store;

    let list_deps = ListDeps {
        generator: ports.generator,
        lists: Arc::clone(&lists_repo),
        guest,
        clock: Arc::clone(&ports.clock),
        log: Arc::clone(&ports.logger),
    };
    let lists = Arc::new(ListsUseCase::new(
        Arc::clone(&lists_repo),
        Arc::clone(&users_repo),
        Arc::clone(&ports.id_gen),
        Arc::clone(&ports.clock),
        Arc::clone(&ports.logger),
    ));
    let meals = MealsUseCase::new(
        Arc::clone(&meals_repo),
        Arc::clone(&ports.id_gen),
        Arc::clone(&ports.clock),
        Arc::clone(&ports.logger),
        list_deps.clone(),
    );
    let meal_plan = MealPlanUseCase::new(
        Arc::clone(&plans_repo),
        meals_repo,
        Arc::clone(&lists),
        list_deps.clone(),
        Arc::clone(&ports.clock),
        Arc::clone(&ports.logger),
    );
    let billing = BillingUseCase::new(
        users_repo,
        plans_repo,
        Arc::clone(&ports.clock),
        Arc::clone(&ports.logger),
        ports.webhook_secret,
    );
    App {
        list_deps,
        lists,
        meals,
        meal_plan,
        billing,
        auth: ports.auth,
        logger: ports.logger,
    }
}

/// 配線: 標準アダプタで App を組み立てる
///
/// ホームは CARTSPARK_HOME / XDG_CONFIG_HOME / HOME から解決する（-d は main で環境変数に反映済み）。
pub fn wire_cartspark() -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let env: Arc<dyn EnvResolver> = Arc::new(StdEnvResolver);
    let home: HomeDir = env.resolve_home_dir()?;
    let logger: Arc<dyn Log> = Arc::new(FileJsonLog::new(Arc::clone(&fs), home.log_path()));
    let config = AppConfig::load(fs.as_ref(), &home)?;

    let api_key = env.var(&config.llm.api_key_env);
    let provider = GeminiProvider::new(&config.llm, api_key);
    let generator: Arc<dyn TextGenerator> = Arc::new(LlmTextGenerator::new(LlmDriver::new(
        provider,
        config.llm.generation,
    )));
    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let id_gen: Arc<dyn IdGenerator> = Arc::new(StdIdGenerator::new(Arc::clone(&clock)));
    let store = Arc::new(JsonDocumentStore::new(
        Arc::clone(&fs),
        config.data_dir.clone(),
        Arc::clone(&logger),
    ));
    let auth: Arc<dyn AuthSession> = Arc::new(EnvAuthSession::new(Arc::clone(&env)));

    Ok(assemble(Ports {
        generator,
        store,
        auth,
        clock,
        id_gen,
        logger,
        webhook_secret: env.var(WEBHOOK_SECRET_ENV),
    }))
}
