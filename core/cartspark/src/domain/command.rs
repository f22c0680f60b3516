//! cartspark コマンドの enum（Command Pattern）
//!
//! 引数解析の結果を enum に落とし、main の Runner が match でディスパッチする。
//! `list` が None のリスト操作はゲストリストを対象にする。

use crate::domain::{ItemAddress, ListId, MealId, MealSlot, Weekday};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// ヘルプ表示
    Help,

    /// リストを表示（show）
    Show { list: Option<ListId> },
    /// アイテムを追加して分類（add <item>...、空なら標準入力から読む）
    Add { list: Option<ListId>, items: Vec<String> },
    /// 分類し直す（resort）
    Resort { list: Option<ListId> },
    /// チェックを反転（check <category:index>）
    Check { list: Option<ListId>, addr: ItemAddress },
    /// 名前を変更（rename <category:index> <name>）
    Rename {
        list: Option<ListId>,
        addr: ItemAddress,
        name: String,
    },
    /// アイテムを削除（rm <category:index>）
    RemoveItem { list: Option<ListId>, addr: ItemAddress },
    /// リストを空にする（clear）
    Clear { list: Option<ListId> },
    /// プレーンテキストで出力（export）
    Export { list: Option<ListId> },
    /// 追加アイテムの提案（suggest [--ignore <item>]...）
    Suggest {
        list: Option<ListId>,
        ignore: Vec<String>,
    },
    /// 献立アイデア（idea）
    Idea { list: Option<ListId> },

    /// list ls
    ListLs,
    /// list create <name>
    ListCreate { name: String },
    /// list delete <id>
    ListDelete { id: ListId },
    /// list share <id> <email>
    ListShare { id: ListId, email: String },

    /// meal ls
    MealLs,
    /// meal create <name> <ingredients> [--instructions <text>]
    MealCreate {
        name: String,
        ingredients: String,
        instructions: Option<String>,
    },
    /// meal edit <id> <name> <ingredients> [--instructions <text>]
    MealEdit {
        id: MealId,
        name: String,
        ingredients: String,
        instructions: Option<String>,
    },
    /// meal delete <id>
    MealDelete { id: MealId },
    /// meal add-to-list <meal> <list>
    MealToList { meal: MealId, list: ListId },
    /// meal catalog [--tag <tag>]
    Catalog { tag: Option<String> },
    /// meal save <catalogue name>
    CatalogSave { name: String },

    /// plan show
    PlanShow,
    /// plan add <meal> <day> <slot>
    PlanAdd {
        meal: MealId,
        day: Weekday,
        slot: MealSlot,
    },
    /// plan remove <day> <slot> <index>
    PlanRemove {
        day: Weekday,
        slot: MealSlot,
        index: usize,
    },
    /// plan clear
    PlanClear,
    /// plan shop
    PlanShop,

    /// account signup
    Signup,
    /// account status
    Status,

    /// webhook --signature <header> [file]（省略時は標準入力）
    Webhook {
        signature: String,
        payload_file: Option<PathBuf>,
    },
}

impl Command {
    /// ログ用のコマンド名
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Show { .. } => "show",
            Command::Add { .. } => "add",
            Command::Resort { .. } => "resort",
            Command::Check { .. } => "check",
            Command::Rename { .. } => "rename",
            Command::RemoveItem { .. } => "rm",
            Command::Clear { .. } => "clear",
            Command::Export { .. } => "export",
            Command::Suggest { .. } => "suggest",
            Command::Idea { .. } => "idea",
            Command::ListLs => "list ls",
            Command::ListCreate { .. } => "list create",
            Command::ListDelete { .. } => "list delete",
            Command::ListShare { .. } => "list share",
            Command::MealLs => "meal ls",
            Command::MealCreate { .. } => "meal create",
            Command::MealEdit { .. } => "meal edit",
            Command::MealDelete { .. } => "meal delete",
            Command::MealToList { .. } => "meal add-to-list",
            Command::Catalog { .. } => "meal catalog",
            Command::CatalogSave { .. } => "meal save",
            Command::PlanShow => "plan show",
            Command::PlanAdd { .. } => "plan add",
            Command::PlanRemove { .. } => "plan remove",
            Command::PlanClear => "plan clear",
            Command::PlanShop => "plan shop",
            Command::Signup => "account signup",
            Command::Status => "account status",
            Command::Webhook { .. } => "webhook",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Help.name(), "help");
        assert_eq!(Command::PlanShop.name(), "plan shop");
        assert_eq!(
            Command::Add {
                list: None,
                items: vec!["milk".to_string()]
            }
            .name(),
            "add"
        );
    }
}
