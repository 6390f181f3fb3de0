//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `fetch`: 从 PubChem 批量获取化合物
//! - `enrich`: 为材料表补充物性与混合焓
//! - `run`: 获取 + 补充完整流水线
//! - `properties`: 列出支持的物性
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: fetch, enrich, run, properties

pub mod enrich;
pub mod fetch;
pub mod properties;
pub mod run;

use clap::{Parser, Subcommand};

/// matbank - 化合物物性库构建工具
#[derive(Parser)]
#[command(name = "matbank")]
#[command(version)]
#[command(about = "Build a compound property bank from PubChem", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch SMILES, IUPAC name and formula for a CID range from PubChem
    Fetch(fetch::FetchArgs),

    /// Add physical properties and mixing enthalpies to a material table
    Enrich(enrich::EnrichArgs),

    /// Fetch a CID range, then enrich it (fetched table is saved first)
    Run(run::RunArgs),

    /// List supported properties and the solvent/fraction grid
    Properties(properties::PropertiesArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "matbank",
            "run",
            "--start",
            "1",
            "--end",
            "250",
            "--properties",
            "melting point,density",
            "--run-name",
            "screen",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.range.batch_size, 100);
                assert_eq!(args.pubchem.delay_ms, 200);
                assert_eq!(
                    args.enrich.properties,
                    vec!["melting point".to_string(), "density".to_string()]
                );
                assert_eq!(args.enrich.row_delay_ms, 2);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_enrich_requires_properties() {
        assert!(Cli::try_parse_from(["matbank", "enrich", "bank.parquet", "--run-name", "x"]).is_err());
    }
}
