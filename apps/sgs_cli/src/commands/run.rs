// apps/sgs_cli/src/commands/run.rs

//! 运行模型命令
//!
//! 在 `[0, 2π]³` 盒子网格上构造衰减 Taylor-Green 涡速度场，逐步调用
//! `correct` 并输出 νsgs 与 k 的统计。速度场按解析解给出，不求解动量方程。

use anyhow::{bail, Context, Result};
use clap::Args;
use glam::DVec3;
use sgs_config::{ConfigSource, FileConfigSource, LesProperties, StaticConfigSource};
use sgs_mesh::{check_mesh, BoxMeshGenerator, FvMesh};
use sgs_physics::prelude::*;
use std::f64::consts::TAU;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// 运行参数
#[derive(Args)]
pub struct RunArgs {
    /// LES 配置文件路径（缺省使用内置默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 每个方向的单元数
    #[arg(short = 'n', long, default_value = "16")]
    pub cells: usize,

    /// 步数
    #[arg(short, long, default_value = "10")]
    pub steps: usize,

    /// 时间步长 [s]
    #[arg(long, default_value = "0.1")]
    pub dt: f64,

    /// 分子粘度 [m²/s]
    #[arg(long, default_value = "1e-3")]
    pub nu: f64,

    /// 覆盖配置中的测试滤波器类型
    #[arg(short, long)]
    pub filter: Option<String>,

    /// 每步结束后重新读取配置
    #[arg(long)]
    pub reread: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== SGS 模型运行 ===");

    if args.cells < 2 {
        bail!("每个方向至少需要 2 个单元, 实际 {}", args.cells);
    }

    let mesh = Arc::new(
        BoxMeshGenerator::new(args.cells, args.cells, args.cells)
            .with_lengths(TAU, TAU, TAU)
            .build()
            .context("生成网格失败")?,
    );
    let report = check_mesh(&mesh).context("网格检查失败")?;
    info!(
        "网格: {} 单元, {} 面, 体积 {:.4}, 闭合残差 {:.2e}",
        report.n_cells, report.n_faces, report.total_volume, report.max_closedness
    );

    let config = config_source(&args)?;
    let transport: Arc<dyn TransportModel> =
        Arc::new(Newtonian::new(&mesh, args.nu).context("分子粘度无效")?);
    let fields = FieldRepository::new().uniform_scalar("k", 0.0);

    let mut velocity = taylor_green(&mesh, 0.0, args.nu)?;
    let mut model = {
        let ctx = ModelContext::new(&velocity, Arc::clone(&transport), config, &fields);
        new_sgs_model(&ctx).context("构造 SGS 模型失败")?
    };
    info!("模型: {}", model.type_name());

    let start = Instant::now();
    for step in 1..=args.steps {
        let time = step as f64 * args.dt;
        velocity = taylor_green(&mesh, time, args.nu)?;
        let grad_u = fvc::grad(&velocity);

        model
            .correct(&velocity, &grad_u)
            .with_context(|| format!("第 {} 步更新失败", step))?;

        let nu_sgs = model.nu_sgs();
        let k = model.k();
        info!(
            "step {:>4} t={:.3}: nuSgs [{:.4e}, {:.4e}] mean {:.4e}, k [{:.4e}, {:.4e}] mean {:.4e}",
            step,
            time,
            nu_sgs.min(),
            nu_sgs.max(),
            nu_sgs.weighted_average(),
            k.min(),
            k.max(),
            k.weighted_average()
        );

        let violations = clip_violations(nu_sgs, &transport.nu());
        if violations > 0 {
            warn!("{} 个单元 νsgs < −ν", violations);
        }

        if args.reread && !model.read() {
            warn!("重新读取配置失败，沿用当前配置");
        }
    }

    let epsilon = model.epsilon();
    info!("=== 运行完成 ===");
    info!("总步数: {}", args.steps);
    info!("计算时间: {:.3} s", start.elapsed().as_secs_f64());
    info!(
        "最终 epsilon: [{:.4e}, {:.4e}], nuEff 最小值 {:.4e}",
        epsilon.min(),
        epsilon.max(),
        model.nu_eff().min()
    );

    Ok(())
}

fn config_source(args: &RunArgs) -> Result<Arc<dyn ConfigSource>> {
    let mut props = match &args.config {
        Some(path) => {
            info!("配置文件: {}", path.display());
            LesProperties::from_file(path)
                .with_context(|| format!("读取配置失败: {}", path.display()))?
        }
        None => LesProperties::default(),
    };

    match (&args.config, &args.filter) {
        // 文件配置未被覆盖时，重读直接回到文件
        (Some(path), None) => Ok(Arc::new(FileConfigSource::new(path))),
        (_, filter) => {
            if let Some(filter) = filter {
                props = props.with_filter(filter.as_str());
                if filter == "laplace" && props.coeffs.width_coeff.is_none() {
                    props.coeffs.width_coeff = Some(2.0);
                }
            }
            Ok(Arc::new(StaticConfigSource::new(props)))
        }
    }
}

/// 衰减 Taylor-Green 涡
///
/// `U = e^{−3νt}·(sin x cos y cos z, −cos x sin y cos z, 0)`
fn taylor_green(mesh: &Arc<FvMesh>, time: f64, nu: f64) -> Result<VolVectorField> {
    let decay = (-3.0 * nu * time).exp();
    let values = mesh
        .cell_centres()
        .iter()
        .map(|c| {
            DVec3::new(
                c.x.sin() * c.y.cos() * c.z.cos(),
                -c.x.cos() * c.y.sin() * c.z.cos(),
                0.0,
            ) * decay
        })
        .collect();
    VolVectorField::from_internal("U", mesh, values).context("构造速度场失败")
}

fn clip_violations(nu_sgs: &VolScalarField, nu: &VolScalarField) -> usize {
    nu_sgs
        .internal()
        .iter()
        .zip(nu.internal())
        .filter(|(s, n)| **s < -**n)
        .count()
}
