use crate::domain::command::Command;
use crate::domain::{ItemAddress, ListId, MealId, MealSlot, Weekday};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use std::path::PathBuf;

/// CLI から受け取った設定
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub home_dir: Option<String>,
    pub command: Command,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_dir: None,
            command: Command::Help,
        }
    }
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn global_args(cmd: clap::Command) -> clap::Command {
    cmd.disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Specify a home directory (sets CARTSPARK_HOME for this process)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
}

fn list_arg() -> clap::Arg {
    clap::Arg::new("list")
        .short('l')
        .long("list")
        .value_name("id")
        .help("Saved list id (omit for the guest list)")
        .num_args(1)
}

fn addr_arg() -> clap::Arg {
    clap::Arg::new("addr")
        .value_name("category:index")
        .help("Item address, e.g. \"Dairy & Eggs:0\"")
        .required(true)
}

fn required(name: &'static str, value_name: &'static str) -> clap::Arg {
    clap::Arg::new(name).value_name(value_name).required(true)
}

fn build_list_subcommand() -> clap::Command {
    clap::Command::new("list")
        .about("Saved lists: ls / create / delete / share")
        .subcommand_required(true)
        .subcommand(clap::Command::new("ls").about("List your saved lists"))
        .subcommand(
            clap::Command::new("create")
                .about("Create a new saved list")
                .arg(required("name", "name")),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a list you own")
                .arg(required("id", "id")),
        )
        .subcommand(
            clap::Command::new("share")
                .about("Share a list with another user by email")
                .arg(required("id", "id"))
                .arg(required("email", "email")),
        )
}

fn instructions_arg() -> clap::Arg {
    clap::Arg::new("instructions")
        .long("instructions")
        .value_name("text")
        .num_args(1)
}

fn build_meal_subcommand() -> clap::Command {
    clap::Command::new("meal")
        .about("Meal templates and the built-in catalogue")
        .subcommand_required(true)
        .subcommand(clap::Command::new("ls").about("List your meals"))
        .subcommand(
            clap::Command::new("create")
                .about("Create a meal (ingredients separated by commas or newlines)")
                .arg(required("name", "name"))
                .arg(required("ingredients", "ingredients"))
                .arg(instructions_arg()),
        )
        .subcommand(
            clap::Command::new("edit")
                .about("Replace a meal's name and ingredients")
                .arg(required("id", "id"))
                .arg(required("name", "name"))
                .arg(required("ingredients", "ingredients"))
                .arg(instructions_arg()),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a meal")
                .arg(required("id", "id")),
        )
        .subcommand(
            clap::Command::new("add-to-list")
                .about("Add a meal's ingredients to a saved list and re-sort it")
                .arg(required("meal", "meal-id"))
                .arg(required("list", "list-id")),
        )
        .subcommand(
            clap::Command::new("catalog")
                .about("Show the built-in meal suggestions")
                .arg(
                    clap::Arg::new("tag")
                        .long("tag")
                        .value_name("tag")
                        .help("Filter by tag (vegetarian, gluten-free, breakfast, ...)")
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("save")
                .about("Save a catalogue meal as your own")
                .arg(required("name", "name")),
        )
}

fn build_plan_subcommand() -> clap::Command {
    clap::Command::new("plan")
        .about("Weekly meal plan")
        .subcommand_required(true)
        .subcommand(clap::Command::new("show").about("Show the meal plan"))
        .subcommand(
            clap::Command::new("add")
                .about("Put a meal on a day and slot")
                .arg(required("meal", "meal-id"))
                .arg(required("day", "day"))
                .arg(required("slot", "breakfast|lunch|dinner")),
        )
        .subcommand(
            clap::Command::new("remove")
                .about("Remove a meal from a day and slot")
                .arg(required("day", "day"))
                .arg(required("slot", "breakfast|lunch|dinner"))
                .arg(required("index", "index")),
        )
        .subcommand(clap::Command::new("clear").about("Clear the whole week"))
        .subcommand(
            clap::Command::new("shop").about("Create a categorized shopping list from the plan"),
        )
}

fn build_clap_command() -> clap::Command {
    global_args(
        clap::Command::new("cartspark")
            .about("Grocery lists and meal plans, categorized by AI")
            .subcommand_required(false)
            .disable_help_subcommand(true)
            .subcommand(clap::Command::new("help").about("Display this help message"))
            .subcommand(clap::Command::new("show").about("Show the list").arg(list_arg()))
            .subcommand(
                clap::Command::new("add")
                    .about("Add items (one per argument, or one per line on stdin) and categorize")
                    .arg(list_arg())
                    .arg(clap::Arg::new("items").num_args(0..).value_name("item")),
            )
            .subcommand(clap::Command::new("resort").about("Re-categorize the list").arg(list_arg()))
            .subcommand(
                clap::Command::new("check")
                    .about("Toggle an item's checked state")
                    .arg(list_arg())
                    .arg(addr_arg()),
            )
            .subcommand(
                clap::Command::new("rename")
                    .about("Rename an item")
                    .arg(list_arg())
                    .arg(addr_arg())
                    .arg(required("name", "name")),
            )
            .subcommand(
                clap::Command::new("rm")
                    .about("Delete an item")
                    .arg(list_arg())
                    .arg(addr_arg()),
            )
            .subcommand(clap::Command::new("clear").about("Clear the list").arg(list_arg()))
            .subcommand(
                clap::Command::new("export")
                    .about("Print the list as plain text")
                    .arg(list_arg()),
            )
            .subcommand(
                clap::Command::new("suggest")
                    .about("Ask the AI for related items")
                    .arg(list_arg())
                    .arg(
                        clap::Arg::new("ignore")
                            .long("ignore")
                            .value_name("item")
                            .help("Item not to suggest (repeatable)")
                            .action(ArgAction::Append),
                    ),
            )
            .subcommand(
                clap::Command::new("idea")
                    .about("Ask the AI for a meal idea from the list")
                    .arg(list_arg()),
            )
            .subcommand(build_list_subcommand())
            .subcommand(build_meal_subcommand())
            .subcommand(build_plan_subcommand())
            .subcommand(
                clap::Command::new("account")
                    .about("Account lifecycle")
                    .subcommand_required(true)
                    .subcommand(
                        clap::Command::new("signup")
                            .about("Create the user document, email index and meal plan"),
                    )
                    .subcommand(clap::Command::new("status").about("Show the subscription status")),
            )
            .subcommand(
                clap::Command::new("webhook")
                    .about("Handle a billing webhook payload (file or stdin)")
                    .arg(
                        clap::Arg::new("signature")
                            .long("signature")
                            .value_name("header")
                            .help("Value of the Stripe-Signature header")
                            .required(true)
                            .num_args(1),
                    )
                    .arg(clap::Arg::new("file").value_name("file")),
            ),
    )
}

fn str_arg(m: &clap::ArgMatches, name: &str) -> String {
    m.get_one::<String>(name).cloned().unwrap_or_default()
}

fn list_id(s: &str) -> Result<ListId, Error> {
    ListId::parse(s).ok_or_else(|| Error::invalid_argument(format!("invalid {}: '{}'", ListId::WHAT, s)))
}

fn meal_id(s: &str) -> Result<MealId, Error> {
    MealId::parse(s).ok_or_else(|| Error::invalid_argument(format!("invalid {}: '{}'", MealId::WHAT, s)))
}

fn opt_list(m: &clap::ArgMatches) -> Result<Option<ListId>, Error> {
    m.get_one::<String>("list").map(|s| list_id(s)).transpose()
}

fn addr(m: &clap::ArgMatches) -> Result<ItemAddress, Error> {
    let s = str_arg(m, "addr");
    ItemAddress::parse(&s).ok_or_else(|| {
        Error::invalid_argument(format!(
            "invalid item address '{}': expected <category>:<index>",
            s
        ))
    })
}

fn day(m: &clap::ArgMatches) -> Result<Weekday, Error> {
    let s = str_arg(m, "day");
    Weekday::parse(&s).ok_or_else(|| Error::invalid_argument(format!("invalid day: '{}'", s)))
}

fn slot(m: &clap::ArgMatches) -> Result<MealSlot, Error> {
    let s = str_arg(m, "slot");
    MealSlot::parse(&s).ok_or_else(|| {
        Error::invalid_argument(format!("invalid slot '{}': expected breakfast, lunch or dinner", s))
    })
}

fn many(m: &clap::ArgMatches, name: &str) -> Vec<String> {
    m.get_many::<String>(name)
        .map(|i| i.cloned().collect())
        .unwrap_or_default()
}

fn matches_to_command(matches: &clap::ArgMatches) -> Result<Command, Error> {
    if matches.get_flag("help") {
        return Ok(Command::Help);
    }
    let command = match matches.subcommand() {
        None | Some(("help", _)) => Command::Help,
        Some(("show", m)) => Command::Show { list: opt_list(m)? },
        Some(("add", m)) => Command::Add {
            list: opt_list(m)?,
            items: many(m, "items"),
        },
        Some(("resort", m)) => Command::Resort { list: opt_list(m)? },
        Some(("check", m)) => Command::Check {
            list: opt_list(m)?,
            addr: addr(m)?,
        },
        Some(("rename", m)) => Command::Rename {
            list: opt_list(m)?,
            addr: addr(m)?,
            name: str_arg(m, "name"),
        },
        Some(("rm", m)) => Command::RemoveItem {
            list: opt_list(m)?,
            addr: addr(m)?,
        },
        Some(("clear", m)) => Command::Clear { list: opt_list(m)? },
        Some(("export", m)) => Command::Export { list: opt_list(m)? },
        Some(("suggest", m)) => Command::Suggest {
            list: opt_list(m)?,
            ignore: many(m, "ignore"),
        },
        Some(("idea", m)) => Command::Idea { list: opt_list(m)? },
        Some(("list", lm)) => match lm.subcommand() {
            Some(("create", m)) => Command::ListCreate {
                name: str_arg(m, "name"),
            },
            Some(("delete", m)) => Command::ListDelete {
                id: list_id(&str_arg(m, "id"))?,
            },
            Some(("share", m)) => Command::ListShare {
                id: list_id(&str_arg(m, "id"))?,
                email: str_arg(m, "email"),
            },
            _ => Command::ListLs,
        },
        Some(("meal", mm)) => match mm.subcommand() {
            Some(("create", m)) => Command::MealCreate {
                name: str_arg(m, "name"),
                ingredients: str_arg(m, "ingredients"),
                instructions: m.get_one::<String>("instructions").cloned(),
            },
            Some(("edit", m)) => Command::MealEdit {
                id: meal_id(&str_arg(m, "id"))?,
                name: str_arg(m, "name"),
                ingredients: str_arg(m, "ingredients"),
                instructions: m.get_one::<String>("instructions").cloned(),
            },
            Some(("delete", m)) => Command::MealDelete {
                id: meal_id(&str_arg(m, "id"))?,
            },
            Some(("add-to-list", m)) => Command::MealToList {
                meal: meal_id(&str_arg(m, "meal"))?,
                list: list_id(&str_arg(m, "list"))?,
            },
            Some(("catalog", m)) => Command::Catalog {
                tag: m.get_one::<String>("tag").cloned(),
            },
            Some(("save", m)) => Command::CatalogSave {
                name: str_arg(m, "name"),
            },
            _ => Command::MealLs,
        },
        Some(("plan", pm)) => match pm.subcommand() {
            Some(("add", m)) => Command::PlanAdd {
                meal: meal_id(&str_arg(m, "meal"))?,
                day: day(m)?,
                slot: slot(m)?,
            },
            Some(("remove", m)) => {
                let raw = str_arg(m, "index");
                let index = raw
                    .parse::<usize>()
                    .map_err(|_| Error::invalid_argument(format!("invalid index: '{}'", raw)))?;
                Command::PlanRemove {
                    day: day(m)?,
                    slot: slot(m)?,
                    index,
                }
            }
            Some(("clear", _)) => Command::PlanClear,
            Some(("shop", _)) => Command::PlanShop,
            _ => Command::PlanShow,
        },
        Some(("account", am)) => match am.subcommand() {
            Some(("signup", _)) => Command::Signup,
            _ => Command::Status,
        },
        Some(("webhook", m)) => Command::Webhook {
            signature: str_arg(m, "signature"),
            payload_file: m.get_one::<String>("file").map(PathBuf::from),
        },
        Some((name, _)) => {
            return Err(Error::invalid_argument(format!(
                "Command '{}' is not implemented.",
                name
            )))
        }
    };
    Ok(command)
}

/// 引数列を解析する（先頭はプログラム名）
pub fn parse_args_from<I, T>(args: I) -> Result<ParseOutcome, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(Config {
        home_dir: matches.get_one::<String>("home-dir").cloned(),
        command: matches_to_command(&matches)?,
    }))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args_os())
}

/// 補完スクリプトを標準出力に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "cartspark", &mut std::io::stdout());
}
