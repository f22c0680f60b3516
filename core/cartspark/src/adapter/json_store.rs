//! ファイルに JSON 文書を置く文書ストア
//!
//! レイアウト（data_dir 配下）:
//! - lists/<list_id>.json
//! - users/<uid>.json
//! - email_to_uid/<email>.json
//! - meals/<uid>/<meal_id>.json
//! - meal_plans/<uid>.json
//! - guest_list.json
//!
//! 書き込みは一時ファイル + rename の全体上書き。ロックは取らない。

use crate::domain::{
    CategoryMap, Email, GroceryList, ListId, ListPatch, Meal, MealId, MealPlan, Uid, UserRecord,
};
use crate::ports::outbound::{
    GuestListStore, ListRepository, MealPlanRepository, MealRepository, UserRepository,
};
use common::error::Error;
use common::ports::outbound::{FileSystem, Log, LogLevel, LogRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const GUEST_LIST_FILENAME: &str = "guest_list.json";

/// email_to_uid/<email>.json の中身
#[derive(Debug, Serialize, Deserialize)]
struct EmailIndexEntry {
    uid: Uid,
}

/// ファイルベースの文書ストア
pub struct JsonDocumentStore {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    log: Arc<dyn Log>,
}

impl JsonDocumentStore {
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>, log: Arc<dyn Log>) -> Self {
        Self {
            fs,
            root: root.into(),
            log,
        }
    }

    fn list_path(&self, id: &ListId) -> PathBuf {
        self.root.join("lists").join(format!("{}.json", id))
    }

    fn user_path(&self, uid: &Uid) -> PathBuf {
        self.root.join("users").join(format!("{}.json", uid))
    }

    fn email_path(&self, email: &Email) -> PathBuf {
        self.root.join("email_to_uid").join(format!("{}.json", email))
    }

    fn meals_dir(&self, owner: &Uid) -> PathBuf {
        self.root.join("meals").join(owner.as_str())
    }

    fn meal_path(&self, owner: &Uid, id: &MealId) -> PathBuf {
        self.meals_dir(owner).join(format!("{}.json", id))
    }

    fn plan_path(&self, owner: &Uid) -> PathBuf {
        self.root.join("meal_plans").join(format!("{}.json", owner))
    }

    fn guest_path(&self) -> PathBuf {
        self.root.join(GUEST_LIST_FILENAME)
    }

    fn read_doc<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, Error> {
        if !self.fs.exists(path) {
            return Ok(None);
        }
        let content = self.fs.read_to_string(path)?;
        let doc = serde_json::from_str(&content)
            .map_err(|e| Error::json(format!("{}: {}", path.display(), e)))?;
        Ok(Some(doc))
    }

    fn write_doc<T: Serialize>(&self, path: &Path, doc: &T) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(doc)?;
        self.fs.write_atomic(path, &json)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Debug, "adapter", "store", "document written")
                .field("path", path.display().to_string()),
        );
        Ok(())
    }

    fn remove_doc(&self, path: &Path) -> Result<(), Error> {
        if self.fs.exists(path) {
            self.fs.remove_file(path)?;
        }
        Ok(())
    }

    fn read_all<T: DeserializeOwned>(&self, dir: &Path) -> Result<Vec<T>, Error> {
        let mut out = Vec::new();
        for path in self.fs.read_dir(dir)? {
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(doc) = self.read_doc(&path)? {
                out.push(doc);
            }
        }
        Ok(out)
    }
}

impl ListRepository for JsonDocumentStore {
    fn get(&self, id: &ListId) -> Result<Option<GroceryList>, Error> {
        self.read_doc(&self.list_path(id))
    }

    fn create(&self, list: &GroceryList) -> Result<(), Error> {
        self.write_doc(&self.list_path(&list.id), list)
    }

    fn merge(&self, id: &ListId, patch: ListPatch) -> Result<GroceryList, Error> {
        let path = self.list_path(id);
        let mut list: GroceryList = self
            .read_doc(&path)?
            .ok_or_else(|| Error::io_msg(format!("list '{}' does not exist", id)))?;
        list.apply(patch);
        self.write_doc(&path, &list)?;
        Ok(list)
    }

    fn delete(&self, id: &ListId) -> Result<(), Error> {
        self.remove_doc(&self.list_path(id))
    }

    fn for_member(&self, uid: &Uid) -> Result<Vec<GroceryList>, Error> {
        let lists: Vec<GroceryList> = self.read_all(&self.root.join("lists"))?;
        Ok(lists.into_iter().filter(|l| l.is_member(uid)).collect())
    }
}

impl GuestListStore for JsonDocumentStore {
    fn load(&self) -> Result<Option<CategoryMap>, Error> {
        self.read_doc(&self.guest_path())
    }

    fn save(&self, items: Option<&CategoryMap>) -> Result<(), Error> {
        match items {
            Some(map) => self.write_doc(&self.guest_path(), map),
            None => self.remove_doc(&self.guest_path()),
        }
    }
}

impl MealRepository for JsonDocumentStore {
    fn get(&self, owner: &Uid, id: &MealId) -> Result<Option<Meal>, Error> {
        self.read_doc(&self.meal_path(owner, id))
    }

    fn save(&self, meal: &Meal) -> Result<(), Error> {
        self.write_doc(&self.meal_path(&meal.owner_id, &meal.id), meal)
    }

    fn delete(&self, owner: &Uid, id: &MealId) -> Result<(), Error> {
        self.remove_doc(&self.meal_path(owner, id))
    }

    fn list(&self, owner: &Uid) -> Result<Vec<Meal>, Error> {
        self.read_all(&self.meals_dir(owner))
    }
}

impl MealPlanRepository for JsonDocumentStore {
    fn get(&self, owner: &Uid) -> Result<Option<MealPlan>, Error> {
        self.read_doc(&self.plan_path(owner))
    }

    fn save(&self, plan: &MealPlan) -> Result<(), Error> {
        self.write_doc(&self.plan_path(&plan.owner_id), plan)
    }
}

impl UserRepository for JsonDocumentStore {
    fn get(&self, uid: &Uid) -> Result<Option<UserRecord>, Error> {
        self.read_doc(&self.user_path(uid))
    }

    fn save(&self, uid: &Uid, record: &UserRecord) -> Result<(), Error> {
        self.write_doc(&self.user_path(uid), record)
    }

    fn uid_for_email(&self, email: &Email) -> Result<Option<Uid>, Error> {
        let entry: Option<EmailIndexEntry> = self.read_doc(&self.email_path(email))?;
        Ok(entry.map(|e| e.uid))
    }

    fn index_email(&self, email: &Email, uid: &Uid) -> Result<(), Error> {
        self.write_doc(&self.email_path(email), &EmailIndexEntry { uid: uid.clone() })
    }
}
