//! 作用：niri-xdg-v6 命令行入口
//! 说明：初始化日志和性能追踪，加载配置，执行子命令
//! 特性：
//!   - replay: 回放 JSON 场景并逐行打印协作方收到的调用
//!   - validate: 只检查配置文件
//!   - completions: 生成 shell 补全脚本

#[macro_use]
extern crate tracing; // 日志宏

use std::env; // 环境变量
use std::io::{self, Write as _}; // 标准输出
use std::path::PathBuf; // 配置/场景路径

use anyhow::Context as _; // 错误上下文
use clap::{CommandFactory, Parser}; // 命令行解析
use niri_xdg_v6::cli::{Cli, Sub}; // 命令行定义
use niri_xdg_v6::config::Config; // 适配器配置
use niri_xdg_v6::scenario::Scenario; // 场景回放
use tracing_subscriber::EnvFilter; // 日志过滤

// 默认日志过滤级别（RUST_LOG 未设置时）
const DEFAULT_LOG_FILTER: &str = "niri_xdg_v6=info";

// 函数：程序入口
// 流程：
//   1. 初始化日志（RUST_LOG 或默认过滤级别，输出到 stderr）
//   2. 解析命令行，completions 不需要配置，直接处理
//   3. 启动 tracy 客户端
//   4. 加载配置（命令行 > 环境变量 > 默认值）
//   5. 执行子命令
fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    if let Sub::Completions { shell } = cli.subcommand {
        clap_complete::generate(shell, &mut Cli::command(), "niri-xdg-v6", &mut io::stdout());
        return Ok(());
    }

    tracy_client::Client::start();

    let config = match config_path(cli.config) {
        Some(path) => Config::load(&path)?,
        None => {
            debug!("no config file given, using defaults");
            Config::default()
        }
    };

    match cli.subcommand {
        Sub::Validate => {
            info!("config is valid");
        }
        Sub::Replay { scenario } => {
            let scenario = Scenario::load(&scenario)?;
            let effects = scenario.run(config).context("error replaying scenario")?;

            let mut stdout = io::stdout().lock();
            for effect in effects {
                writeln!(stdout, "{effect}")?;
            }
        }
        Sub::Completions { .. } => (),
    }

    Ok(())
}

// 函数：从环境变量读取配置路径（空值视为未设置）
fn env_config_path() -> Option<PathBuf> {
    env::var_os("NIRI_XDG_V6_CONFIG")
        .filter(|x| !x.is_empty())
        .map(PathBuf::from)
}

// 函数：确定配置路径
// 说明：显式指定的路径优先，其次是环境变量
fn config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(env_config_path)
}
