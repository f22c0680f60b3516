mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;
#[cfg(test)]
mod tests;

use std::io::Read;
use std::process;

use cli::{parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::command::Command;
use domain::{CategoryMap, GroceryList, ListError, ListId, MealIdea, MealPlan, Principal};
use ports::inbound::RunCartSpark;
use usecase::{ListSession, ListTarget, WebhookAck};
use wiring::{wire_cartspark, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl RunCartSpark for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let name = config.command.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command started").field("command", name),
        );
        let result = self.dispatch(config.command);
        let rec = match &result {
            Ok(code) => LogRecord::new(LogLevel::Info, "cli", "lifecycle", "command finished")
                .field("command", name)
                .field("exit_code", *code),
            Err(e) => LogRecord::new(LogLevel::Error, "cli", "error", e.to_string())
                .field("command", name)
                .field("exit_code", e.exit_code()),
        };
        let _ = self.app.logger.log(&rec);
        result
    }
}

impl Runner {
    /// ログイン中のプリンシパル。アカウント専用の操作で使う。
    fn principal(&self) -> Result<Principal, Error> {
        self.app.auth.current().ok_or_else(|| {
            ListError::not_permitted("sign in first (set CARTSPARK_UID)").into()
        })
    }

    /// `-l` が無ければゲストリスト、あればログイン中ユーザーのアカウントリスト
    fn open_session(&self, list: Option<ListId>) -> Result<ListSession, Error> {
        let target = match list {
            None => ListTarget::Guest,
            Some(list) => ListTarget::Account {
                list,
                member: self.principal()?.uid,
            },
        };
        Ok(ListSession::open(self.app.list_deps.clone(), target)?)
    }

    fn dispatch(&self, command: Command) -> Result<i32, Error> {
        match command {
            Command::Help => {
                print_help();
                Ok(0)
            }
            Command::Show { list } => {
                let session = self.open_session(list)?;
                print_session(&session);
                Ok(0)
            }
            Command::Add { list, items } => {
                let text = if items.is_empty() {
                    read_stdin()?
                } else {
                    items.join("\n")
                };
                let mut session = self.open_session(list)?;
                session.add_items(&text)?;
                print_session(&session);
                Ok(0)
            }
            Command::Resort { list } => {
                let mut session = self.open_session(list)?;
                session.resort()?;
                print_session(&session);
                Ok(0)
            }
            Command::Check { list, addr } => {
                let mut session = self.open_session(list)?;
                let checked = session.toggle_check(addr)?;
                println!("{} {}", if checked { "checked" } else { "unchecked" }, addr);
                Ok(0)
            }
            Command::Rename { list, addr, name } => {
                let mut session = self.open_session(list)?;
                session.rename_item(addr, &name)?;
                println!("renamed {}", addr);
                if session.needs_resort() {
                    println!("(run `cartspark resort` to re-categorize)");
                }
                Ok(0)
            }
            Command::RemoveItem { list, addr } => {
                let mut session = self.open_session(list)?;
                let removed = session.delete_item(addr)?;
                println!("removed {}", removed.name);
                Ok(0)
            }
            Command::Clear { list } => {
                let mut session = self.open_session(list)?;
                session.clear()?;
                println!("list cleared");
                Ok(0)
            }
            Command::Export { list } => {
                let session = self.open_session(list)?;
                println!("{}", session.export_plain_text());
                Ok(0)
            }
            Command::Suggest { list, ignore } => {
                let mut session = self.open_session(list)?;
                session.ignore_suggestions(ignore);
                let suggestions = session.suggest_items()?;
                if suggestions.is_empty() {
                    println!("(no suggestions)");
                }
                for s in suggestions {
                    println!("{}", s);
                }
                Ok(0)
            }
            Command::Idea { list } => {
                let session = self.open_session(list)?;
                print_meal_idea(&session.meal_idea()?);
                Ok(0)
            }

            Command::ListLs => {
                let principal = self.principal()?;
                print_lists(&self.app.lists.lists_for(&principal)?, &principal);
                Ok(0)
            }
            Command::ListCreate { name } => {
                let list = self.app.lists.create_list(&self.principal()?, &name, Vec::new())?;
                println!("{}", list.id);
                Ok(0)
            }
            Command::ListDelete { id } => {
                self.app.lists.delete_list(&self.principal()?, &id)?;
                println!("deleted {}", id);
                Ok(0)
            }
            Command::ListShare { id, email } => {
                let list = self.app.lists.share_list(&self.principal()?, &id, &email)?;
                println!("shared {} ({} members)", list.id, list.members.len());
                Ok(0)
            }

            Command::MealLs => {
                let meals = self.app.meals.meals_for(&self.principal()?)?;
                if meals.is_empty() {
                    println!("(no meals)");
                }
                for m in meals {
                    println!("{:20} {} ({} ingredients)", m.id.as_str(), m.name, m.ingredients.len());
                }
                Ok(0)
            }
            Command::MealCreate {
                name,
                ingredients,
                instructions,
            } => {
                let meal = self.app.meals.create_meal(
                    &self.principal()?,
                    &name,
                    &ingredients,
                    instructions.as_deref(),
                )?;
                println!("{}", meal.id);
                Ok(0)
            }
            Command::MealEdit {
                id,
                name,
                ingredients,
                instructions,
            } => {
                let meal = self.app.meals.edit_meal(
                    &self.principal()?,
                    &id,
                    &name,
                    &ingredients,
                    instructions.as_deref(),
                )?;
                println!("updated {}", meal.id);
                Ok(0)
            }
            Command::MealDelete { id } => {
                self.app.meals.delete_meal(&self.principal()?, &id)?;
                println!("deleted {}", id);
                Ok(0)
            }
            Command::MealToList { meal, list } => {
                let session = self.app.meals.add_meal_to_list(&self.principal()?, &meal, &list)?;
                print_session(&session);
                Ok(0)
            }
            Command::Catalog { tag } => {
                let entries = self.app.meals.catalog(tag.as_deref())?;
                if entries.is_empty() {
                    println!("(no catalogue meals)");
                }
                for e in entries {
                    println!("{:32} [{}] {}", e.name, e.tags.join(", "), e.ingredients.join(", "));
                }
                Ok(0)
            }
            Command::CatalogSave { name } => {
                let meal = self.app.meals.save_catalog_meal(&self.principal()?, &name)?;
                println!("{}", meal.id);
                Ok(0)
            }

            Command::PlanShow => {
                let plan = self.app.meal_plan.plan(&self.principal()?)?;
                print_plan(&plan);
                Ok(0)
            }
            Command::PlanAdd { meal, day, slot } => {
                let plan = self
                    .app
                    .meal_plan
                    .add_to_plan(&self.principal()?, &meal, day, slot)?;
                print_plan(&plan);
                Ok(0)
            }
            Command::PlanRemove { day, slot, index } => {
                let plan = self
                    .app
                    .meal_plan
                    .remove_from_plan(&self.principal()?, day, slot, index)?;
                print_plan(&plan);
                Ok(0)
            }
            Command::PlanClear => {
                self.app.meal_plan.clear_plan(&self.principal()?)?;
                println!("meal plan cleared");
                Ok(0)
            }
            Command::PlanShop => {
                let session = self.app.meal_plan.generate_shopping_list(&self.principal()?)?;
                if let ListTarget::Account { list, .. } = session.target() {
                    println!("created list {}", list);
                }
                print_session(&session);
                Ok(0)
            }

            Command::Signup => {
                let principal = self.principal()?;
                let record = self.app.billing.on_user_created(&principal)?;
                println!(
                    "account {} initialized ({})",
                    principal.uid,
                    record.subscription_status.as_str()
                );
                Ok(0)
            }
            Command::Status => {
                let status = self.app.billing.subscription_status(&self.principal()?)?;
                println!("{}", status.as_str());
                Ok(0)
            }
            Command::Webhook {
                signature,
                payload_file,
            } => {
                let payload = match payload_file {
                    Some(path) => std::fs::read_to_string(&path).map_err(|e| {
                        Error::io_msg(format!("{}: {}", path.display(), e))
                    })?,
                    None => read_stdin()?,
                };
                match self.app.billing.handle_webhook(&payload, &signature)? {
                    WebhookAck::Activated { uid } => println!("200 subscription activated for {}", uid),
                    WebhookAck::Ignored { event_type } => println!("200 ignored {}", event_type),
                }
                Ok(0)
            }
        }
    }
}

fn read_stdin() -> Result<String, Error> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| Error::io_msg(format!("stdin: {}", e)))?;
    Ok(text)
}

fn print_items(items: &CategoryMap) {
    for (category, list) in items.iter() {
        if list.is_empty() {
            continue;
        }
        println!("{}", category);
        for (i, item) in list.iter().enumerate() {
            let mark = if item.checked { "x" } else { " " };
            println!("  [{}] {:>2} {}", mark, i, item.name);
        }
    }
}

fn print_session(session: &ListSession) {
    match session.items() {
        Some(items) if !items.is_empty() => print_items(items),
        _ => println!("Your list is empty!"),
    }
    if !session.planned_meals().is_empty() {
        println!();
        println!("Planned meals: {}", session.planned_meals().join(", "));
    }
}

fn print_meal_idea(idea: &MealIdea) {
    println!("{}", idea.title);
    println!();
    println!("You have: {}", idea.has.join(", "));
    if !idea.needs.is_empty() {
        println!("You need: {}", idea.needs.join(", "));
    }
    println!();
    println!("{}", idea.instructions);
}

fn print_lists(lists: &[GroceryList], principal: &Principal) {
    if lists.is_empty() {
        println!("(no lists)");
        return;
    }
    println!("{:20} {:6} {:>5} {}", "ID", "ROLE", "ITEMS", "NAME");
    for l in lists {
        let role = if l.owner_id == principal.uid { "owner" } else { "member" };
        let count = l.items.as_ref().map(CategoryMap::item_count).unwrap_or(0);
        println!("{:20} {:6} {:>5} {}", l.id.as_str(), role, count, l.name);
    }
}

fn print_plan(plan: &MealPlan) {
    if plan.is_empty() {
        println!("(meal plan is empty)");
        return;
    }
    for day in domain::Weekday::ALL {
        let day_plan = plan.day(day);
        for slot in domain::MealSlot::ALL {
            for (i, meal) in day_plan.slot(slot).iter().enumerate() {
                println!("{:9} {:9} {} {}", day.as_str(), slot.as_str(), i, meal.name);
            }
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("cartspark: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: cartspark [-h] [-d|--home-dir directory] [<command> [args...]]");
}

fn print_help() {
    println!("Usage: cartspark [-h] [-d|--home-dir directory] [<command> [args...]]");
    println!("  -h, --help            Display this help message.");
    println!("  -d, --home-dir        Specify a home directory (sets CARTSPARK_HOME for this process).");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!("  -l, --list <id>       Operate on an account list instead of the local guest list.");
    println!();
    println!("Environment:");
    println!("  CARTSPARK_HOME         Home directory (config.json, data/, logs/). Default: $XDG_CONFIG_HOME/cartspark or ~/.config/cartspark.");
    println!("  CARTSPARK_UID          Signed-in user id. Unset means guest mode.");
    println!("  CARTSPARK_EMAIL        Signed-in user's email address.");
    println!("  GEMINI_API_KEY         API key for categorization (name configurable in config.json).");
    println!("  STRIPE_WEBHOOK_SECRET  Secret for verifying billing webhooks.");
    println!();
    println!("List commands:");
    println!("  show                   Show the list grouped by category with item addresses.");
    println!("  add <item>...          Add items (stdin if omitted) and re-categorize the whole list.");
    println!("  resort                 Re-categorize the current items.");
    println!("  check <cat:idx>        Toggle an item's checked state.");
    println!("  rename <cat:idx> <name> Rename an item in place.");
    println!("  rm <cat:idx>           Remove an item.");
    println!("  clear                  Reset the list to uncategorized.");
    println!("  export                 Print the list as plain text.");
    println!("  suggest [--ignore <item>]... Suggest items that may be missing.");
    println!("  idea                   Suggest a meal from the current items.");
    println!();
    println!("  list ls | create <name> | delete <id> | share <id> <email>");
    println!("  meal ls | create | edit | delete | add-to-list | catalog [--tag <tag>] | save <name>");
    println!("  plan show | add <meal> <day> <slot> | remove <day> <slot> <index> | clear | shop");
    println!("  account signup | status");
    println!("  webhook --signature <header> [file]");
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // -d/--home-dir 指定時は CARTSPARK_HOME を設定し、resolve_home_dir() がその配下を使うようにする
    if let Some(ref h) = config.home_dir {
        std::env::set_var("CARTSPARK_HOME", h);
    }
    let app = wire_cartspark()?;
    let runner = Runner { app };
    runner.run(config)
}
