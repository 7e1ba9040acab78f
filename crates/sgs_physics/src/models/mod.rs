// crates/sgs_physics/src/models/mod.rs

//! SGS 湍流模型
//!
//! 所有模型实现 [`SgsModel`]，通过 [`new_sgs_model`] 按配置中的
//! `model` 名称创建。
//!
//! # 模型列表
//!
//! | 名称 | 类型 |
//! |------|------|
//! | `dynLocalAverageSmagorinsky` | [`DynLocalAverageSmagorinsky`] |

pub mod base;
pub mod dyn_local_average_smagorinsky;

pub use base::{LesModelBase, StagedConfig};
pub use dyn_local_average_smagorinsky::DynLocalAverageSmagorinsky;

use sgs_config::ConfigSource;
use sgs_foundation::{SgsError, SgsResult};
use std::sync::Arc;

use crate::fields::{
    SurfaceScalarField, VolScalarField, VolSymmTensorField, VolTensorField, VolVectorField,
};
use crate::initial::FieldSource;
use crate::numerics::fvc;
use crate::transport::TransportModel;

/// 已注册的模型名称
pub const MODEL_TYPES: &[&str] = &[DynLocalAverageSmagorinsky::TYPE_NAME];

/// 亚格子尺度模型
///
/// `correct` 是唯一修改 `nuSgs`、`k` 的入口；`read` 只更新参数。
pub trait SgsModel: Send + Sync {
    /// 模型名称
    fn type_name(&self) -> &'static str;

    /// 由当前速度及其梯度更新 SGS 场
    fn correct(&mut self, velocity: &VolVectorField, grad_u: &VolTensorField) -> SgsResult<()>;

    /// 亚格子涡粘性 νsgs
    fn nu_sgs(&self) -> &VolScalarField;

    /// 亚格子湍动能 k
    fn k(&self) -> &VolScalarField;

    /// 滤波宽度 Δ
    fn delta(&self) -> &VolScalarField;

    /// 重新读取配置，返回是否成功
    fn read(&mut self) -> bool;

    /// 有效粘度 `νsgs + ν`
    fn nu_eff(&self) -> VolScalarField;

    /// 亚格子耗散率 `ε = c_e·k^{3/2}/Δ`
    fn epsilon(&self) -> VolScalarField;

    /// 亚格子应力 `B = 2/3·k·I − 2·νsgs·D`
    fn b(&self) -> VolSymmTensorField;

    /// 有效偏应力 `−νeff·dev(∇U + ∇Uᵀ)`
    fn dev_beff(&self) -> VolSymmTensorField;
}

/// 模型构造上下文
pub struct ModelContext<'a> {
    /// 速度场
    pub velocity: &'a VolVectorField,
    /// 面通量
    pub phi: SurfaceScalarField,
    /// 输运模型
    pub transport: Arc<dyn TransportModel>,
    /// 配置源
    pub config: Arc<dyn ConfigSource>,
    /// 初始场来源
    pub fields: &'a dyn FieldSource,
}

impl<'a> ModelContext<'a> {
    /// 创建上下文，面通量由速度插值计算
    pub fn new(
        velocity: &'a VolVectorField,
        transport: Arc<dyn TransportModel>,
        config: Arc<dyn ConfigSource>,
        fields: &'a dyn FieldSource,
    ) -> Self {
        Self {
            velocity,
            phi: fvc::flux(velocity),
            transport,
            config,
            fields,
        }
    }

    /// 指定面通量
    pub fn with_phi(mut self, phi: SurfaceScalarField) -> Self {
        self.phi = phi;
        self
    }
}

/// 按配置中的模型名称创建 SGS 模型
pub fn new_sgs_model(ctx: &ModelContext<'_>) -> SgsResult<Box<dyn SgsModel>> {
    let properties = ctx.config.load()?;
    log::info!("选择 SGS 模型: {}", properties.model);

    match properties.model.as_str() {
        DynLocalAverageSmagorinsky::TYPE_NAME => Ok(Box::new(DynLocalAverageSmagorinsky::new(ctx)?)),
        other => Err(SgsError::unknown_model(other, MODEL_TYPES)),
    }
}
