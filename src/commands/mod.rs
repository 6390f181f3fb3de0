//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `pubchem/`, `properties/`, `persist/`, `utils/`
//! - 子模块: fetch, enrich, run, properties

pub mod enrich;
pub mod fetch;
pub mod properties;
pub mod run;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Fetch(args) => fetch::execute(args),
        Commands::Enrich(args) => enrich::execute(args),
        Commands::Run(args) => run::execute(args),
        Commands::Properties(args) => properties::execute(args),
    }
}
