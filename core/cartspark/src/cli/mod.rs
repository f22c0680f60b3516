//! CLI 引数の解析（clap）
//!
//! 解析結果は domain::command::Command に落とし、ディスパッチは main の Runner が行う。

mod args;

pub use args::{parse_args, print_completion, Config, ParseOutcome};
#[cfg(test)]
pub use args::parse_args_from;
