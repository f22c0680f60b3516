//! アカウントのリスト管理（作成・一覧・削除・共有）

use crate::domain::{Email, GroceryList, ListError, ListId, ListPatch, Principal};
use crate::ports::outbound::{ListRepository, UserRepository};
use common::ports::outbound::{Clock, IdGenerator, Log, LogLevel, LogRecord};
use std::sync::Arc;

pub struct ListsUseCase {
    lists: Arc<dyn ListRepository>,
    users: Arc<dyn UserRepository>,
    id_gen: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn Log>,
}

impl ListsUseCase {
    pub fn new(
        lists: Arc<dyn ListRepository>,
        users: Arc<dyn UserRepository>,
        id_gen: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        log: Arc<dyn Log>,
    ) -> Self {
        Self {
            lists,
            users,
            id_gen,
            clock,
            log,
        }
    }

    /// 空のリストを作る（所有者だけがメンバー）
    pub fn create_list(
        &self,
        principal: &Principal,
        name: &str,
        planned_meals: Vec<String>,
    ) -> Result<GroceryList, ListError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ListError::EmptyInput);
        }
        let mut list = GroceryList::new(
            ListId::from(self.id_gen.next_id()),
            name,
            principal.uid.clone(),
            self.clock.now_ms(),
        );
        list.planned_meals = planned_meals;
        self.lists.create(&list).map_err(ListError::persistence)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "store", "list created")
                .field("list", list.id.as_str()),
        );
        Ok(list)
    }

    /// メンバーになっているリスト（新しい順）
    pub fn lists_for(&self, principal: &Principal) -> Result<Vec<GroceryList>, ListError> {
        let mut lists = self
            .lists
            .for_member(&principal.uid)
            .map_err(ListError::persistence)?;
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(lists)
    }

    fn require(&self, id: &ListId) -> Result<GroceryList, ListError> {
        self.lists
            .get(id)
            .map_err(ListError::persistence)?
            .ok_or_else(|| ListError::not_found(format!("list {}", id)))
    }

    /// 所有者だけが削除できる
    pub fn delete_list(&self, principal: &Principal, id: &ListId) -> Result<(), ListError> {
        let list = self.require(id)?;
        if list.owner_id != principal.uid {
            return Err(ListError::not_permitted("only the owner can delete a list"));
        }
        self.lists.delete(id).map_err(ListError::persistence)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "store", "list deleted")
                .field("list", id.as_str()),
        );
        Ok(())
    }

    /// メールアドレスのユーザーをメンバーに加える
    pub fn share_list(
        &self,
        principal: &Principal,
        id: &ListId,
        email: &str,
    ) -> Result<GroceryList, ListError> {
        if email.trim().is_empty() {
            return Err(ListError::EmptyInput);
        }
        let email = Email::parse(email).ok_or_else(|| ListError::not_found("user"))?;
        let list = self.require(id)?;
        if !list.is_member(&principal.uid) {
            return Err(ListError::not_permitted(format!(
                "you are not a member of list {}",
                id
            )));
        }
        let invited = self
            .users
            .uid_for_email(&email)
            .map_err(ListError::persistence)?
            .ok_or_else(|| ListError::not_found("user"))?;
        let updated = self
            .lists
            .merge(
                id,
                ListPatch {
                    add_members: vec![invited],
                    ..Default::default()
                },
            )
            .map_err(ListError::persistence)?;
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Info, "usecase", "store", "list shared")
                .field("list", id.as_str())
                .field("members", updated.members.len()),
        );
        Ok(updated)
    }
}
