// crates/sgs_physics/src/models/base.rs

//! LES 模型公共部分
//!
//! 持有配置、滤波宽度与输运模型，负责配置重读。具体模型在此之上
//! 管理自己的 SGS 场。

use sgs_config::{ConfigSource, LesProperties, ModelCoeffs};
use sgs_foundation::SgsResult;
use sgs_mesh::FvMesh;
use std::sync::Arc;

use super::ModelContext;
use crate::delta::LesDelta;
use crate::fields::{SurfaceScalarField, VolScalarField};
use crate::transport::TransportModel;

/// 已加载、尚未生效的配置
#[derive(Debug, Clone)]
pub struct StagedConfig {
    properties: LesProperties,
    delta: LesDelta,
}

impl StagedConfig {
    /// 新配置
    pub fn properties(&self) -> &LesProperties {
        &self.properties
    }

    /// 新的模型系数
    pub fn coeffs(&self) -> &ModelCoeffs {
        &self.properties.coeffs
    }
}

/// LES 模型基础
pub struct LesModelBase {
    type_name: &'static str,
    mesh: Arc<FvMesh>,
    phi: SurfaceScalarField,
    transport: Arc<dyn TransportModel>,
    config: Arc<dyn ConfigSource>,
    properties: LesProperties,
    delta: LesDelta,
}

impl LesModelBase {
    /// 读取配置并计算滤波宽度
    pub fn new(type_name: &'static str, ctx: &ModelContext<'_>) -> SgsResult<Self> {
        let properties = ctx.config.load()?;
        let mesh = Arc::clone(ctx.velocity.mesh());
        let delta = LesDelta::new(&mesh, &properties.delta)?;

        log::debug!(
            "{}: 配置来源 {}, 输运模型 {}",
            type_name,
            ctx.config.describe(),
            ctx.transport.name()
        );

        Ok(Self {
            type_name,
            mesh,
            phi: ctx.phi.clone(),
            transport: Arc::clone(&ctx.transport),
            config: Arc::clone(&ctx.config),
            properties,
            delta,
        })
    }

    /// 每步公共更新（刷新滤波宽度）
    pub fn correct(&mut self) {
        self.delta.correct();
    }

    /// 加载并校验新配置，不修改当前状态
    ///
    /// 加载或校验失败时返回 `None`。
    /// 具体模型在自身参数也校验通过后再调用 [`Self::commit`]。
    pub fn stage_read(&self) -> Option<StagedConfig> {
        let properties = match self.config.load() {
            Ok(p) => p,
            Err(e) => {
                log::debug!("{}: 重新读取配置失败 ({}): {}", self.type_name, self.config.describe(), e);
                return None;
            }
        };

        let delta = match LesDelta::new(&self.mesh, &properties.delta) {
            Ok(d) => d,
            Err(e) => {
                log::debug!("{}: 滤波宽度配置无效: {}", self.type_name, e);
                return None;
            }
        };

        if properties.model != self.type_name {
            log::debug!(
                "{}: 运行期不切换模型，忽略 model = {}",
                self.type_name,
                properties.model
            );
        }

        Some(StagedConfig { properties, delta })
    }

    /// 使暂存的配置生效
    pub fn commit(&mut self, staged: StagedConfig) {
        self.delta = staged.delta;
        self.properties = staged.properties;
    }

    /// 网格
    pub fn mesh(&self) -> &Arc<FvMesh> {
        &self.mesh
    }

    /// 面通量
    pub fn phi(&self) -> &SurfaceScalarField {
        &self.phi
    }

    /// 滤波宽度场
    pub fn delta(&self) -> &VolScalarField {
        self.delta.field()
    }

    /// 滤波宽度
    pub fn les_delta(&self) -> &LesDelta {
        &self.delta
    }

    /// 分子粘度
    pub fn nu(&self) -> VolScalarField {
        self.transport.nu()
    }

    /// 当前配置
    pub fn properties(&self) -> &LesProperties {
        &self.properties
    }

    /// 模型系数
    pub fn coeffs(&self) -> &ModelCoeffs {
        &self.properties.coeffs
    }

    /// 耗散系数 c_e
    pub fn ce(&self) -> f64 {
        self.properties.coeffs.ce
    }
}
