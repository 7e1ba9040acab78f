// crates/sgs_physics/src/filters/simple.rs

//! 简单面积加权滤波器

use sgs_config::ModelCoeffs;
use sgs_foundation::SgsResult;
use sgs_mesh::FvMesh;
use std::sync::Arc;

use super::LesFilter;
use crate::fields::{FieldValue, VolField, VolScalarField, VolSymmTensorField, VolVectorField};
use crate::numerics::fvc;

/// 简单滤波器 `F(φ)_P = Σ_f |S_f|·φ_f / Σ_f |S_f|`
///
/// 无可调参数，`read` 总是成功。
#[derive(Debug, Clone)]
pub struct SimpleFilter {
    mesh: Arc<FvMesh>,
}

impl SimpleFilter {
    /// 类型名称
    pub const TYPE_NAME: &'static str = "simple";

    /// 创建
    pub fn new(mesh: &Arc<FvMesh>) -> Self {
        Self {
            mesh: Arc::clone(mesh),
        }
    }

    fn apply<T: FieldValue>(&self, field: &VolField<T>) -> VolField<T> {
        debug_assert_eq!(field.len(), self.mesh.n_cells());
        let averaged = fvc::average(field);
        field.like(format!("simpleFilter({})", field.name()), averaged.internal().to_vec())
    }
}

impl LesFilter for SimpleFilter {
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

    fn read(&mut self, _coeffs: &ModelCoeffs) -> SgsResult<()> {
        Ok(())
    }
}
