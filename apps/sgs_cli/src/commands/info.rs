// apps/sgs_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示已注册的模型、滤波器、滤波宽度与默认配置。

use anyhow::{Context, Result};
use clap::Args;
use sgs_config::LesProperties;
use sgs_physics::{DELTA_TYPES, FILTER_TYPES, MODEL_TYPES};
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 显示系统信息
    #[arg(long)]
    pub system: bool,

    /// 显示默认配置
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== SGS 信息 ===");

    if args.system {
        print_system_info();
    }

    if args.defaults {
        print_default_config()?;
    }

    if !args.system && !args.defaults {
        print_registry();
        println!();
        print_default_config()?;
    }

    Ok(())
}

fn print_registry() {
    println!("=== 已注册类型 ===");
    println!("SGS 模型:   {}", MODEL_TYPES.join(", "));
    println!("测试滤波器: {}", FILTER_TYPES.join(", "));
    println!("滤波宽度:   {}", DELTA_TYPES.join(", "));
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("sgs_cli 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
    println!("并行线程: {}", std::thread::available_parallelism().map_or(1, |n| n.get()));
}

fn print_default_config() -> Result<()> {
    println!("=== 默认配置 ===");
    let text = LesProperties::default()
        .to_json_pretty()
        .context("序列化默认配置失败")?;
    println!("{}", text);
    Ok(())
}
