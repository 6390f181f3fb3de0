//! # matbank 命令行入口
//!
//! ## 子命令
//! - `fetch` - 从 PubChem 批量获取化合物
//! - `enrich` - 为材料表补充物性与混合焓
//! - `run` - 获取 + 补充完整流水线
//! - `properties` - 列出支持的物性

use clap::Parser;
use matbank::cli::Cli;
use matbank::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
