// apps/sgs_cli/src/main.rs

//! SGS 命令行界面
//!
//! 在盒子网格上驱动动态 Smagorinsky 亚格子模型，并提供配置校验与
//! 注册表查询。库层通过 `log` 输出，此处由 tracing 订阅器统一收集。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// 动态局部平均 Smagorinsky 模型命令行工具
#[derive(Parser)]
#[command(name = "sgs_cli")]
#[command(author = "SgsLab Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dynamic local-average Smagorinsky SGS model driver", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 在衰减 Taylor-Green 涡上运行模型
    Run(commands::run::RunArgs),
    /// 显示已注册的模型、滤波器与滤波宽度
    Info(commands::info::InfoArgs),
    /// 验证 LES 配置文件
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // try_init 同时桥接 log 记录
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish()
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
