//! 命令行接口定义

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    /// 配置文件路径（JSON）
    ///
    /// 也可通过 `NIRI_XDG_V6_CONFIG` 环境变量设置，命令行参数优先。
    /// 都未设置时使用默认配置。
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// 在无头后端上回放场景并逐行打印协作方收到的调用
    Replay {
        /// 场景文件路径（JSON）
        scenario: PathBuf,
    },
    /// 验证配置文件
    Validate,
    /// 生成 shell 自动补全脚本
    Completions { shell: Shell },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_replay_with_global_config() {
        let cli = Cli::parse_from(["niri-xdg-v6", "replay", "a.json", "--config", "c.json"]);
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert!(matches!(cli.subcommand, Sub::Replay { scenario } if scenario == PathBuf::from("a.json")));
    }
}
