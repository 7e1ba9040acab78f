// crates/sgs_physics/src/filters/laplace.rs

//! 拉普拉斯滤波器

use rayon::prelude::*;
use sgs_config::ModelCoeffs;
use sgs_foundation::{SgsError, SgsResult};
use sgs_mesh::FvMesh;
use std::sync::Arc;

use super::LesFilter;
use crate::fields::{
    FieldValue, SurfaceScalarField, VolField, VolScalarField, VolSymmTensorField, VolVectorField,
};
use crate::numerics::fvc;

/// 拉普拉斯滤波器 `F(φ) = φ + ∇·(c∇φ)`
///
/// 单元系数 `c = V^{2/3}/widthCoeff`，线性插值到面。
#[derive(Debug, Clone)]
pub struct LaplaceFilter {
    mesh: Arc<FvMesh>,
    width_coeff: f64,
    coeff: SurfaceScalarField,
}

impl LaplaceFilter {
    /// 类型名称
    pub const TYPE_NAME: &'static str = "laplace";

    /// 由宽度系数创建
    pub fn new(mesh: &Arc<FvMesh>, width_coeff: f64) -> SgsResult<Self> {
        check_width(width_coeff)?;
        Ok(Self {
            mesh: Arc::clone(mesh),
            width_coeff,
            coeff: face_coeff(mesh, width_coeff),
        })
    }

    /// 由模型系数创建（`widthCoeff` 必需）
    pub fn from_coeffs(mesh: &Arc<FvMesh>, coeffs: &ModelCoeffs) -> SgsResult<Self> {
        Self::new(mesh, required_width(coeffs)?)
    }

    /// 宽度系数
    pub fn width_coeff(&self) -> f64 {
        self.width_coeff
    }

    fn apply<T: FieldValue>(&self, field: &VolField<T>) -> VolField<T> {
        let lap = fvc::laplacian(&self.coeff, field);
        let internal = field
            .internal()
            .par_iter()
            .zip(lap.internal().par_iter())
            .map(|(&phi, &l)| phi + l)
            .collect();
        field.like(format!("laplaceFilter({})", field.name()), internal)
    }
}

fn required_width(coeffs: &ModelCoeffs) -> SgsResult<f64> {
    coeffs
        .width_coeff
        .ok_or_else(|| SgsError::config("laplace 滤波器需要 coeffs.widthCoeff"))
}

fn check_width(width_coeff: f64) -> SgsResult<()> {
    if !(width_coeff > 0.0) || !width_coeff.is_finite() {
        return Err(SgsError::config(format!(
            "widthCoeff 必须为正的有限值: {}",
            width_coeff
        )));
    }
    Ok(())
}

fn face_coeff(mesh: &Arc<FvMesh>, width_coeff: f64) -> SurfaceScalarField {
    let cell_coeff: Vec<f64> = mesh
        .cell_volumes()
        .iter()
        .map(|v| v.powf(2.0 / 3.0) / width_coeff)
        .collect();
    let cell_field = VolScalarField::extrapolated("laplaceFilterCoeff", Arc::clone(mesh), cell_coeff);
    fvc::interpolate(&cell_field)
}

impl LesFilter for LaplaceFilter {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn filter_scalar(&self, field: &VolScalarField) -> VolScalarField {
        self.apply(field)
    }

    fn filter_vector(&self, field: &VolVectorField) -> VolVectorField {
        self.apply(field)
    }

    fn filter_symm_tensor(&self, field: &VolSymmTensorField) -> VolSymmTensorField {
        self.apply(field)
    }

    fn read(&mut self, coeffs: &ModelCoeffs) -> SgsResult<()> {
        let width_coeff = required_width(coeffs)?;
        check_width(width_coeff)?;
        self.coeff = face_coeff(&self.mesh, width_coeff);
        self.width_coeff = width_coeff;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{}(widthCoeff={})", Self::TYPE_NAME, self.width_coeff)
    }
}
