//! usecase を束ねた結合テスト（スタブのポートと一時ディレクトリのストアで動かす）

mod lists_tests;
mod meal_plan_tests;
mod run_app_tests;

use crate::adapter::JsonDocumentStore;
use crate::domain::{CategoryMap, Principal, Uid};
use crate::ports::outbound::{AuthSession, GuestListStore, TextGenerator};
use crate::usecase::{ListDeps, ListSession, ListTarget};
use crate::wiring::{assemble, App, Ports};
use common::adapter::{NoopLog, StdFileSystem};
use common::domain::DocId;
use common::error::Error;
use common::llm::GenerationOutcome;
use common::ports::outbound::{Clock, IdGenerator};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const NOW_MS: u64 = 1_770_465_600_000;
pub const SECRET: &str = "whsec_test";

/// 名前のキーワードでカテゴリを決める分類スタブ
///
/// 分類プロンプトの `---` 以降を 1 行 1 アイテムとして、受け取った名前をそのまま返す。
/// 分類以外のプロンプトには scripted に積んだ応答を順に返す。
pub struct StubGenerator {
    scripted: Mutex<VecDeque<Result<GenerationOutcome, Error>>>,
    prompts: Mutex<Vec<String>>,
    pub trailing_comma: AtomicBool,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
            trailing_comma: AtomicBool::new(false),
        }
    }

    /// 次の 1 回の応答を差し替える（分類プロンプトにも効く）
    pub fn push(&self, outcome: Result<GenerationOutcome, Error>) {
        self.scripted.lock().unwrap().push_back(outcome);
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(GenerationOutcome::Text(text.to_string())));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn categorize(&self, prompt: &str) -> String {
        let list = prompt.split_once("---\n").map(|(_, l)| l).unwrap_or("");
        let mut by_key: Vec<(&str, Vec<String>)> = Vec::new();
        for name in list.lines() {
            let key = keyword_category(name);
            match by_key.iter_mut().find(|(k, _)| *k == key) {
                Some((_, names)) => names.push(name.to_string()),
                None => by_key.push((key, vec![name.to_string()])),
            }
        }
        let body: Vec<String> = by_key
            .iter()
            .map(|(k, names)| format!("{}: {}", serde_json::json!(k), serde_json::json!(names)))
            .collect();
        let comma = if self.trailing_comma.load(Ordering::SeqCst) {
            ","
        } else {
            ""
        };
        format!("```json\n{{{}{}}}\n```", body.join(", "), comma)
    }
}

impl TextGenerator for StubGenerator {
    fn generate(&self, prompt: &str) -> Result<GenerationOutcome, Error> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(next) = self.scripted.lock().unwrap().pop_front() {
            return next;
        }
        if prompt.starts_with("Categorize") {
            return Ok(GenerationOutcome::Text(self.categorize(prompt)));
        }
        Ok(GenerationOutcome::Empty)
    }
}

pub fn keyword_category(name: &str) -> &'static str {
    let n = name.to_lowercase();
    if ["milk", "egg", "cheese", "butter", "yogurt"].iter().any(|k| n.contains(k)) {
        "Dairy & Eggs"
    } else if ["bread", "bagel", "tortilla"].iter().any(|k| n.contains(k)) {
        "Bakery"
    } else if ["apple", "banana", "onion", "garlic", "lettuce", "tomato"]
        .iter()
        .any(|k| n.contains(k))
    {
        "Produce"
    } else if ["chicken", "beef", "salmon"].iter().any(|k| n.contains(k)) {
        "Meat & Seafood"
    } else if ["soap", "sponge"].iter().any(|k| n.contains(k)) {
        "Household & Cleaning"
    } else {
        "Pantry"
    }
}

pub struct FixedClock(pub AtomicU64);

impl FixedClock {
    pub fn new(ms: u64) -> Self {
        Self(AtomicU64::new(ms))
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// 呼ぶたびに id0001, id0002, ... を返す
pub struct SeqIdGenerator(AtomicU64);

impl SeqIdGenerator {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }
}

impl IdGenerator for SeqIdGenerator {
    fn next_id(&self) -> DocId {
        let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        DocId::new(format!("id{:04}", n))
    }
}

/// 呼び出しごとに差し替えられるログイン状態
pub struct StubAuth(pub Mutex<Option<Principal>>);

impl StubAuth {
    pub fn set(&self, principal: Option<Principal>) {
        *self.0.lock().unwrap() = principal;
    }
}

impl AuthSession for StubAuth {
    fn current(&self) -> Option<Principal> {
        self.0.lock().unwrap().clone()
    }
}

/// 保存だけ失敗させられるゲストリスト
pub struct FlakyGuestStore {
    inner: Arc<JsonDocumentStore>,
    pub fail_saves: AtomicBool,
}

impl GuestListStore for FlakyGuestStore {
    fn load(&self) -> Result<Option<CategoryMap>, Error> {
        GuestListStore::load(self.inner.as_ref())
    }

    fn save(&self, items: Option<&CategoryMap>) -> Result<(), Error> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::io_msg("disk full"));
        }
        GuestListStore::save(self.inner.as_ref(), items)
    }
}

pub fn principal(uid: &str, email: Option<&str>) -> Principal {
    Principal {
        uid: Uid::parse(uid).unwrap(),
        email: email.and_then(crate::domain::Email::parse),
    }
}

/// スタブで組み立てた App と、テストから触るためのハンドル
pub struct Harness {
    pub app: App,
    pub generator: Arc<StubGenerator>,
    pub store: Arc<JsonDocumentStore>,
    pub auth: Arc<StubAuth>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new(dir: &Path) -> Self {
        let generator = Arc::new(StubGenerator::new());
        let store = Arc::new(JsonDocumentStore::new(
            Arc::new(StdFileSystem),
            dir,
            Arc::new(NoopLog),
        ));
        let auth = Arc::new(StubAuth(Mutex::new(None)));
        let clock = Arc::new(FixedClock::new(NOW_MS));
        let app = assemble(Ports {
            generator: generator.clone(),
            store: Arc::clone(&store),
            auth: auth.clone(),
            clock: clock.clone(),
            id_gen: Arc::new(SeqIdGenerator::new()),
            logger: Arc::new(NoopLog),
            webhook_secret: Some(SECRET.to_string()),
        });
        Self {
            app,
            generator,
            store,
            auth,
            clock,
        }
    }

    pub fn guest_session(&self) -> ListSession {
        ListSession::open(self.app.list_deps.clone(), ListTarget::Guest).unwrap()
    }

    /// ゲスト保存だけ失敗を切り替えられる ListDeps
    pub fn flaky_guest_deps(&self) -> (ListDeps, Arc<FlakyGuestStore>) {
        let flaky = Arc::new(FlakyGuestStore {
            inner: Arc::clone(&self.store),
            fail_saves: AtomicBool::new(false),
        });
        let mut deps = self.app.list_deps.clone();
        deps.guest = flaky.clone();
        (deps, flaky)
    }
}

/// カテゴリ順に並べた (カテゴリ名, 名前) の一覧
pub fn entries(map: &CategoryMap) -> Vec<(String, String)> {
    map.iter()
        .flat_map(|(c, items)| {
            items
                .iter()
                .map(move |i| (c.as_str().to_string(), i.name.clone()))
        })
        .collect()
}

pub fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}
