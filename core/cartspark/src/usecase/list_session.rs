//! 1 つのリストに対する操作セッション
//!
//! 状態は 2 段階で持つ。`pending` は手元の最新、`confirmed` は最後に書き込み・読み込みに
//! 成功した内容。1 アイテム操作の保存に失敗すると pending が先行したままになり、
//! 次の reload でストアの内容が勝つ。分類パスは成功したときだけ両方を置き換える。

use crate::domain::ai_reply::{self, MealIdea};
use crate::domain::list::export_plain_text;
use crate::domain::meal::dedup_names;
use crate::domain::prompt;
use crate::domain::{CategoryMap, ItemAddress, ListError, ListId, ListItem, ListPatch, Meal, Uid};
use crate::ports::outbound::{GuestListStore, ListRepository, TextGenerator};
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use std::sync::Arc;

/// 操作対象のリスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    /// ローカル保存のゲストリスト
    Guest,
    /// アカウントのリスト（member はメンバーであることを確認する）
    Account { list: ListId, member: Uid },
}

/// セッションが使うポート群
#[derive(Clone)]
pub struct ListDeps {
    pub generator: Arc<dyn TextGenerator>,
    pub lists: Arc<dyn ListRepository>,
    pub guest: Arc<dyn GuestListStore>,
    pub clock: Arc<dyn Clock>,
    pub log: Arc<dyn Log>,
}

/// リストの中身のスナップショット
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSnapshot {
    pub items: Option<CategoryMap>,
    pub planned_meals: Vec<String>,
}

/// リスト操作のアプリケーション状態
pub struct ListSession {
    deps: ListDeps,
    target: ListTarget,
    confirmed: ListSnapshot,
    pending: ListSnapshot,
    needs_resort: bool,
    suggestions: Vec<String>,
    ignored_suggestions: Vec<String>,
}

impl ListSession {
    /// ストアから読み込んでセッションを開く
    pub fn open(deps: ListDeps, target: ListTarget) -> Result<Self, ListError> {
        let snapshot = load_snapshot(&deps, &target)?;
        Ok(Self {
            deps,
            target,
            confirmed: snapshot.clone(),
            pending: snapshot,
            needs_resort: false,
            suggestions: Vec::new(),
            ignored_suggestions: Vec::new(),
        })
    }

    /// ストアの内容で confirmed と pending を置き換える（ストアが勝つ）
    pub fn reload(&mut self) -> Result<(), ListError> {
        let snapshot = load_snapshot(&self.deps, &self.target)?;
        self.confirmed = snapshot.clone();
        self.pending = snapshot;
        Ok(())
    }

    pub fn target(&self) -> &ListTarget {
        &self.target
    }

    /// 手元の最新の中身（None なら未分類）
    pub fn items(&self) -> Option<&CategoryMap> {
        self.pending.items.as_ref()
    }

    pub fn planned_meals(&self) -> &[String] {
        &self.pending.planned_meals
    }

    #[cfg(test)]
    pub fn confirmed(&self) -> &ListSnapshot {
        &self.confirmed
    }

    /// 手元の変更がすべて保存済みか
    #[cfg(test)]
    pub fn is_synced(&self) -> bool {
        self.pending == self.confirmed
    }

    /// 名前の編集後、分類し直すべきか
    pub fn needs_resort(&self) -> bool {
        self.needs_resort
    }

    #[cfg(test)]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    #[cfg(test)]
    pub fn ignored_suggestions(&self) -> &[String] {
        &self.ignored_suggestions
    }

    /// 前回までに表示した提案を除外リストに入れる（CLI で持ち越す用）
    pub fn ignore_suggestions<I: IntoIterator<Item = String>>(&mut self, names: I) {
        self.ignored_suggestions.extend(names);
    }

    fn current_names(&self) -> Vec<String> {
        self.pending
            .items
            .as_ref()
            .map(CategoryMap::flatten_names)
            .unwrap_or_default()
    }

    fn log(&self, level: LogLevel, kind: &str, msg: &str) -> LogRecord {
        let rec = LogRecord::new(level, "usecase", kind, msg);
        match &self.target {
            ListTarget::Guest => rec.field("list", "guest"),
            ListTarget::Account { list, .. } => rec.field("list", list.as_str()),
        }
    }

    fn generate(&self, prompt: &str) -> Result<String, ListError> {
        let outcome = self
            .deps
            .generator
            .generate(prompt)
            .map_err(|e| ListError::AiUnavailable(e.to_string()))?;
        ai_reply::reply_text(outcome)
    }

    /// ストアへ書き込む。成功したら pending と confirmed を揃える。
    fn persist(&mut self, snapshot: ListSnapshot, stamp: bool) -> Result<(), ListError> {
        match &self.target {
            ListTarget::Guest => self
                .deps
                .guest
                .save(snapshot.items.as_ref())
                .map_err(ListError::persistence)?,
            ListTarget::Account { list, .. } => {
                let patch = ListPatch {
                    items: Some(snapshot.items.clone()),
                    planned_meals: stamp.then(|| snapshot.planned_meals.clone()),
                    last_updated: stamp.then(|| self.deps.clock.now_ms()),
                    ..Default::default()
                };
                self.deps
                    .lists
                    .merge(list, patch)
                    .map_err(ListError::persistence)?;
            }
        }
        self.confirmed = snapshot.clone();
        self.pending = snapshot;
        Ok(())
    }

    /// 分類パス: 名前をまとめて AI に送り、全カテゴリを置き換える
    ///
    /// チェック状態はすべて外れる。失敗したら何も変えない。
    pub fn categorize(&mut self, names: Vec<String>, planned_meals: Vec<String>) -> Result<(), ListError> {
        let count = names.len();
        let result = self.run_categorize(names, planned_meals);
        let rec = match &result {
            Ok(()) => self
                .log(LogLevel::Info, "ai", "categorization pass succeeded")
                .field("items", count),
            Err(e) => self
                .log(LogLevel::Warn, "ai", "categorization pass failed")
                .field("error", e.to_string()),
        };
        let _ = self.deps.log.log(&rec);
        result
    }

    fn run_categorize(&mut self, names: Vec<String>, planned_meals: Vec<String>) -> Result<(), ListError> {
        let prompt = prompt::categorization_prompt(&names.join("\n"))?;
        let items = ai_reply::parse_categorization(&self.generate(&prompt)?)?;
        self.persist(
            ListSnapshot {
                items: Some(items),
                planned_meals,
            },
            true,
        )?;
        self.needs_resort = false;
        self.suggestions.clear();
        self.ignored_suggestions.clear();
        Ok(())
    }

    /// 改行区切りのテキストを既存のアイテムに足して分類し直す
    pub fn add_items(&mut self, text: &str) -> Result<(), ListError> {
        let new_names: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if new_names.is_empty() {
            return Err(ListError::EmptyInput);
        }
        let mut names = self.current_names();
        names.extend(new_names);
        let planned = self.pending.planned_meals.clone();
        self.categorize(names, planned)
    }

    /// 今の名前で分類し直す。未分類なら何もしない。
    pub fn resort(&mut self) -> Result<(), ListError> {
        if self.pending.items.is_none() {
            return Ok(());
        }
        let names = self.current_names();
        let planned = self.pending.planned_meals.clone();
        self.categorize(names, planned)
    }

    /// 食事の材料を足し（重複は除く）、献立名を記録して分類し直す
    pub fn add_meal(&mut self, meal: &Meal) -> Result<(), ListError> {
        let names = dedup_names(
            self.current_names()
                .into_iter()
                .chain(meal.ingredients.iter().cloned()),
        );
        let planned = dedup_names(
            self.pending
                .planned_meals
                .iter()
                .cloned()
                .chain(std::iter::once(meal.name.clone())),
        );
        self.categorize(names, planned)
    }

    /// pending の中身を書き換えてから保存する
    fn mutate<R>(
        &mut self,
        f: impl FnOnce(&mut CategoryMap) -> Result<R, ListError>,
    ) -> Result<R, ListError> {
        let map = self
            .pending
            .items
            .as_mut()
            .ok_or_else(|| ListError::not_found("the list has no items yet"))?;
        let out = f(map)?;
        let snapshot = self.pending.clone();
        if let Err(e) = self.persist(snapshot, false) {
            let _ = self.deps.log.log(
                &self
                    .log(LogLevel::Warn, "store", "item update not saved")
                    .field("error", e.to_string()),
            );
            return Err(e);
        }
        Ok(out)
    }

    /// チェックを反転する。反転後の値を返す。
    pub fn toggle_check(&mut self, addr: ItemAddress) -> Result<bool, ListError> {
        self.mutate(|map| map.toggle(addr))
    }

    /// 名前を変える。カテゴリは変わらないため needs_resort を立てる。
    pub fn rename_item(&mut self, addr: ItemAddress, name: &str) -> Result<(), ListError> {
        if name.trim().is_empty() {
            return Err(ListError::EmptyInput);
        }
        let result = self.mutate(|map| map.rename(addr, name));
        if !matches!(result, Err(ListError::NotFound(_))) {
            self.needs_resort = true;
        }
        result
    }

    pub fn delete_item(&mut self, addr: ItemAddress) -> Result<ListItem, ListError> {
        self.mutate(|map| map.remove(addr))
    }

    /// リストを未分類に戻す。ゲストは保存ファイルを消す。
    pub fn clear(&mut self) -> Result<(), ListError> {
        self.needs_resort = false;
        self.suggestions.clear();
        self.ignored_suggestions.clear();
        if self.pending.items.is_none() && self.confirmed.items.is_none() {
            return Ok(());
        }
        let snapshot = ListSnapshot {
            items: None,
            planned_meals: self.pending.planned_meals.clone(),
        };
        self.persist(snapshot, false)
    }

    pub fn export_plain_text(&self) -> String {
        export_plain_text(self.pending.items.as_ref())
    }

    /// 追加アイテムを提案させる。前回の提案は除外リストに移る。
    pub fn suggest_items(&mut self) -> Result<&[String], ListError> {
        let names = self.current_names();
        if names.is_empty() {
            return Err(ListError::EmptyInput);
        }
        let previous = std::mem::take(&mut self.suggestions);
        self.ignored_suggestions.extend(previous);
        let prompt = prompt::suggestion_prompt(&names, &self.ignored_suggestions)?;
        let text = self.generate(&prompt)?;
        self.suggestions = ai_reply::parse_suggestions(&text);
        let _ = self.deps.log.log(
            &self
                .log(LogLevel::Info, "ai", "suggestions received")
                .field("count", self.suggestions.len()),
        );
        Ok(&self.suggestions)
    }

    /// 今のアイテムから作れる献立を提案させる
    pub fn meal_idea(&self) -> Result<MealIdea, ListError> {
        let names = self.current_names();
        if names.is_empty() {
            return Err(ListError::EmptyInput);
        }
        let prompt = prompt::meal_idea_prompt(&names)?;
        ai_reply::parse_meal_idea(&self.generate(&prompt)?)
    }
}

fn load_snapshot(deps: &ListDeps, target: &ListTarget) -> Result<ListSnapshot, ListError> {
    match target {
        ListTarget::Guest => Ok(ListSnapshot {
            items: deps.guest.load().map_err(ListError::persistence)?,
            planned_meals: Vec::new(),
        }),
        ListTarget::Account { list, member } => {
            let doc = deps
                .lists
                .get(list)
                .map_err(ListError::persistence)?
                .ok_or_else(|| ListError::not_found(format!("list {}", list)))?;
            if !doc.is_member(member) {
                return Err(ListError::not_permitted(format!(
                    "you are not a member of list {}",
                    list
                )));
            }
            Ok(ListSnapshot {
                items: doc.items,
                planned_meals: doc.planned_meals,
            })
        }
    }
}
