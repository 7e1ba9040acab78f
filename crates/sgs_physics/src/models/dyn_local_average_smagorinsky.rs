// crates/sgs_physics/src/models/dyn_local_average_smagorinsky.rs

//! 局部平均动态 Smagorinsky 模型
//!
//! 涡粘性与亚格子动能的系数不再取常数，而是由已解析场经测试滤波器
//! `F(·)` 动态估计，并对分子、分母分别做邻域平均以稳定估计。
//!
//! # 系数估计
//!
//! ```text
//! LL   = dev(F(U⊗U) − F(U)⊗F(U))
//! MM   = Δ²·(F(|D|·D) − 4·|F(D)|·F(D))
//! c_D  = ⟨LL:MM⟩ / max(⟨MM:MM⟩, VSMALL)
//!
//! KK   = ½·(F(|U|²) − |F(U)|²)
//! mm   = Δ²·(4·|F(D)|² − F(|D|²))
//! c_I  = ⟨KK·mm⟩ / max(⟨mm²⟩, VSMALL)
//! ```
//!
//! 其中 `⟨·⟩` 为面积加权邻域平均，`D = dev(symm(∇U))`，`|D| = √(D:D)`。
//!
//! # 场更新
//!
//! ```text
//! k    = c_I·Δ²·|D|²
//! νsgs = max(c_D·Δ²·|D|, −ν)
//! ```
//!
//! `k` 不做截断，可能为负。`νsgs ≥ −ν` 保证有效粘度非负。

use sgs_foundation::{SgsError, SgsResult, VSMALL};
use sgs_mesh::FvMesh;
use std::sync::Arc;

use super::{LesModelBase, ModelContext, SgsModel};
use crate::filters::{new_filter, LesFilter};
use crate::fields::algebra::{
    dev, divide, double_dot, isotropic, mag, mag_sqr, max, pow, sqr, sqr_scalar, sqrt, symm,
};
use crate::fields::{
    BoundaryCondition, FieldValue, VolField, VolScalarField, VolSymmTensorField, VolTensorField,
    VolVectorField,
};
use crate::numerics::fvc;

/// 局部平均动态 Smagorinsky 模型
pub struct DynLocalAverageSmagorinsky {
    base: LesModelBase,
    k: VolScalarField,
    nu_sgs: VolScalarField,
    filter: Box<dyn LesFilter>,
    /// 最近一次 `correct` 的应变率，只供 `b`、`dev_beff` 使用
    strain_rate: VolSymmTensorField,
}

impl DynLocalAverageSmagorinsky {
    /// 模型名称
    pub const TYPE_NAME: &'static str = "dynLocalAverageSmagorinsky";

    /// 创建模型
    ///
    /// 依次读取配置、初始场 `k`、测试滤波器；缺少 `k` 或滤波器类型未知时失败。
    /// `nuSgs` 可选，提供时沿用其边界条件。构造完成前先用初始速度更新一次 SGS 场。
    pub fn new(ctx: &ModelContext<'_>) -> SgsResult<Self> {
        let base = LesModelBase::new(Self::TYPE_NAME, ctx)?;
        let k = ctx.fields.scalar("k", base.mesh())?;
        let nu_sgs = initial_nu_sgs(ctx, base.mesh())?;
        let filter = new_filter(base.mesh(), base.coeffs())?;
        Self::assemble(base, k, nu_sgs, filter, ctx.velocity)
    }

    /// 使用指定测试滤波器创建模型（忽略配置中的 `coeffs.filter`）
    pub fn with_filter(ctx: &ModelContext<'_>, filter: Box<dyn LesFilter>) -> SgsResult<Self> {
        let base = LesModelBase::new(Self::TYPE_NAME, ctx)?;
        let k = ctx.fields.scalar("k", base.mesh())?;
        let nu_sgs = initial_nu_sgs(ctx, base.mesh())?;
        Self::assemble(base, k, nu_sgs, filter, ctx.velocity)
    }

    fn assemble(
        base: LesModelBase,
        k: VolScalarField,
        nu_sgs: VolScalarField,
        filter: Box<dyn LesFilter>,
        velocity: &VolVectorField,
    ) -> SgsResult<Self> {
        check_size("U", velocity, base.mesh())?;
        let strain_rate = strain_rate(&fvc::grad(velocity));

        let mut model = Self {
            base,
            k,
            nu_sgs,
            filter,
            strain_rate,
        };
        let d = model.strain_rate.clone();
        model.update_sub_grid_scale_fields(velocity, &d);
        model.print_coeffs();
        Ok(model)
    }

    // =========================================================================
    // 动态系数
    // =========================================================================

    /// 涡粘性系数 c_D
    pub fn c_d(&self, velocity: &VolVectorField, d: &VolSymmTensorField) -> VolScalarField {
        let filter = self.filter.as_ref();
        let delta_sqr = sqr_scalar(self.base.delta());

        let filtered_u = filter.filter_vector(velocity);
        let ll = dev(&(&filter.filter_symm_tensor(&sqr(velocity)) - &sqr(&filtered_u)));

        let filtered_d = filter.filter_symm_tensor(d);
        let mm = &delta_sqr
            * &(&filter.filter_symm_tensor(&(&mag(d) * d))
                - &(&(&mag(&filtered_d) * &filtered_d) * 4.0));

        let mut mmmm = fvc::average(&mag_sqr(&mm));
        mmmm.clamp_min(VSMALL);

        let llmm = double_dot(&ll, &mm);
        divide(&fvc::average(&llmm), &mmmm).named("cD")
    }

    /// 亚格子动能系数 c_I
    pub fn c_i(&self, velocity: &VolVectorField, d: &VolSymmTensorField) -> VolScalarField {
        let filter = self.filter.as_ref();
        let delta_sqr = sqr_scalar(self.base.delta());

        let filtered_u = filter.filter_vector(velocity);
        let kk = &(&filter.filter_scalar(&mag_sqr(velocity)) - &mag_sqr(&filtered_u)) * 0.5;

        let filtered_d = filter.filter_symm_tensor(d);
        let mm = &delta_sqr
            * &(&(&sqr_scalar(&mag(&filtered_d)) * 4.0)
                - &filter.filter_scalar(&sqr_scalar(&mag(d))));

        let mut mmmm = fvc::average(&mag_sqr(&mm));
        mmmm.clamp_min(VSMALL);

        let kkmm = &kk * &mm;
        divide(&fvc::average(&kkmm), &mmmm).named("cI")
    }

    fn update_sub_grid_scale_fields(&mut self, velocity: &VolVectorField, d: &VolSymmTensorField) {
        let c_d = self.c_d(velocity, d);
        let delta_sqr = sqr_scalar(self.base.delta());
        let candidate = &(&c_d * &delta_sqr) * &sqrt(&mag_sqr(d));

        let nu = self.base.nu();
        let lower = &nu * -1.0;
        self.nu_sgs.assign(&max(&candidate, &lower));
        self.nu_sgs.correct_boundary_conditions();
    }

    // =========================================================================
    // 访问
    // =========================================================================

    /// 公共部分
    pub fn base(&self) -> &LesModelBase {
        &self.base
    }

    /// 测试滤波器
    pub fn filter(&self) -> &dyn LesFilter {
        self.filter.as_ref()
    }

    /// 最近一次更新使用的应变率 `D`
    pub fn strain_rate(&self) -> &VolSymmTensorField {
        &self.strain_rate
    }

    /// 打印模型系数（受 `printCoeffs` 控制）
    pub fn print_coeffs(&self) {
        if !self.base.properties().print_coeffs {
            return;
        }
        let delta = self.base.les_delta();
        log::info!(
            "{}Coeffs: filter {}, ce {}, delta {} (deltaCoeff {})",
            Self::TYPE_NAME,
            self.filter.describe(),
            self.base.ce(),
            delta.kind().name(),
            delta.delta_coeff()
        );
    }
}

impl SgsModel for DynLocalAverageSmagorinsky {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn correct(&mut self, velocity: &VolVectorField, grad_u: &VolTensorField) -> SgsResult<()> {
        check_size("U", velocity, self.base.mesh())?;
        check_size("gradU", grad_u, self.base.mesh())?;

        self.base.correct();

        let d = strain_rate(grad_u);

        let c_i = self.c_i(velocity, &d);
        let k = &(&c_i * &sqr_scalar(self.base.delta())) * &mag_sqr(&d);
        self.k.assign(&k);

        self.update_sub_grid_scale_fields(velocity, &d);
        self.strain_rate = d;

        log::trace!(
            "{}: nuSgs [{:.3e}, {:.3e}], k [{:.3e}, {:.3e}]",
            Self::TYPE_NAME,
            self.nu_sgs.min(),
            self.nu_sgs.max(),
            self.k.min(),
            self.k.max()
        );
        Ok(())
    }

    fn nu_sgs(&self) -> &VolScalarField {
        &self.nu_sgs
    }

    fn k(&self) -> &VolScalarField {
        &self.k
    }

    fn delta(&self) -> &VolScalarField {
        self.base.delta()
    }

    fn read(&mut self) -> bool {
        let Some(staged) = self.base.stage_read() else {
            return false;
        };
        // 滤波器失败时不修改参数，基础配置也不生效
        if let Err(e) = self.filter.read(staged.coeffs()) {
            log::debug!("{}: 测试滤波器参数更新失败: {}", Self::TYPE_NAME, e);
            return false;
        }
        self.base.commit(staged);
        true
    }

    fn nu_eff(&self) -> VolScalarField {
        (&self.nu_sgs + &self.base.nu()).named("nuEff")
    }

    fn epsilon(&self) -> VolScalarField {
        let k_pos = self.k.map("max(k,0)", |k| k.max(0.0));
        let numerator = &pow(&k_pos, 1.5) * self.base.ce();
        divide(&numerator, self.base.delta()).named("epsilon")
    }

    fn b(&self) -> VolSymmTensorField {
        let isotropic_part = isotropic(&(&self.k * (2.0 / 3.0)));
        let deviatoric_part = &(&self.nu_sgs * &self.strain_rate) * 2.0;
        (&isotropic_part - &deviatoric_part).named("B")
    }

    fn dev_beff(&self) -> VolSymmTensorField {
        // dev(∇U + ∇Uᵀ) = 2D
        (&(&self.nu_eff() * &self.strain_rate) * -2.0).named("devBeff")
    }
}

/// 初始 `nuSgs`：字段来源中有则读取（含边界条件），否则为零梯度的 0
fn initial_nu_sgs(ctx: &ModelContext<'_>, mesh: &Arc<FvMesh>) -> SgsResult<VolScalarField> {
    if ctx.fields.contains("nuSgs") {
        ctx.fields.scalar("nuSgs", mesh)
    } else {
        Ok(VolScalarField::uniform("nuSgs", mesh, 0.0, BoundaryCondition::ZeroGradient))
    }
}

/// 应变率 `D = dev(symm(∇U))`
fn strain_rate(grad_u: &VolTensorField) -> VolSymmTensorField {
    dev(&symm(grad_u)).named("D")
}

fn check_size<T: FieldValue>(name: &'static str, field: &VolField<T>, mesh: &FvMesh) -> SgsResult<()> {
    if field.len() != mesh.n_cells() {
        return Err(SgsError::size_mismatch(name, mesh.n_cells(), field.len()));
    }
    if field.boundary().len() != mesh.n_boundary_faces() {
        return Err(SgsError::size_mismatch(
            name,
            mesh.n_boundary_faces(),
            field.boundary().len(),
        ));
    }
    Ok(())
}
