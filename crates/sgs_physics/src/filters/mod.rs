// crates/sgs_physics/src/filters/mod.rs

//! LES 测试滤波器
//!
//! 动态模型用测试滤波器 `F(·)` 在比网格更粗的尺度上重新过滤已解析场。
//!
//! | 名称 | 定义 | 参数 |
//! |------|------|------|
//! | `simple` | `Σ_f |S_f|·φ_f / Σ_f |S_f|` | 无 |
//! | `laplace` | `φ + ∇·(c∇φ)`，`c = V^{2/3}/widthCoeff` | `widthCoeff` |
//!
//! 过滤结果沿用输入场的边界条件并重新计算边界值。

mod laplace;
mod simple;

pub use laplace::LaplaceFilter;
pub use simple::SimpleFilter;

use sgs_config::ModelCoeffs;
use sgs_foundation::{SgsError, SgsResult};
use sgs_mesh::FvMesh;
use std::fmt::Debug;
use std::sync::Arc;

use crate::fields::{VolScalarField, VolSymmTensorField, VolVectorField};

/// 已注册的滤波器类型
pub const FILTER_TYPES: &[&str] = &[SimpleFilter::TYPE_NAME, LaplaceFilter::TYPE_NAME];

/// LES 滤波器
pub trait LesFilter: Send + Sync + Debug {
    /// 类型名称
    fn type_name(&self) -> &'static str;

    /// 过滤标量场
    fn filter_scalar(&self, field: &VolScalarField) -> VolScalarField;

    /// 过滤向量场
    fn filter_vector(&self, field: &VolVectorField) -> VolVectorField;

    /// 过滤对称张量场
    fn filter_symm_tensor(&self, field: &VolSymmTensorField) -> VolSymmTensorField;

    /// 按新的模型系数重新设置参数
    ///
    /// 失败时不修改任何参数。
    fn read(&mut self, coeffs: &ModelCoeffs) -> SgsResult<()>;

    /// 参数描述（用于日志）
    fn describe(&self) -> String {
        self.type_name().to_string()
    }
}

/// 按 `coeffs.filter` 创建滤波器
pub fn new_filter(mesh: &Arc<FvMesh>, coeffs: &ModelCoeffs) -> SgsResult<Box<dyn LesFilter>> {
    let filter: Box<dyn LesFilter> = match coeffs.filter.as_str() {
        SimpleFilter::TYPE_NAME => Box::new(SimpleFilter::new(mesh)),
        LaplaceFilter::TYPE_NAME => Box::new(LaplaceFilter::from_coeffs(mesh, coeffs)?),
        other => return Err(SgsError::unknown_filter(other, FILTER_TYPES)),
    };
    log::debug!("选择测试滤波器: {}", filter.describe());
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgs_mesh::BoxMeshGenerator;

    fn coeffs(filter: &str, width: Option<f64>) -> ModelCoeffs {
        ModelCoeffs {
            filter: filter.to_string(),
            width_coeff: width,
            ..ModelCoeffs::default()
        }
    }

    #[test]
    fn test_factory_selects_by_name() {
        let mesh = Arc::new(BoxMeshGenerator::new(2, 2, 2).build().unwrap());
        assert_eq!(new_filter(&mesh, &coeffs("simple", None)).unwrap().type_name(), "simple");
        let laplace = new_filter(&mesh, &coeffs("laplace", Some(2.0))).unwrap();
        assert_eq!(laplace.type_name(), "laplace");
        assert!(laplace.describe().contains('2'));
    }

    #[test]
    fn test_unknown_filter() {
        let mesh = Arc::new(BoxMeshGenerator::new(1, 1, 1).build().unwrap());
        match new_filter(&mesh, &coeffs("anisotropic", None)) {
            Err(SgsError::UnknownFilter { name, available }) => {
                assert_eq!(name, "anisotropic");
                assert_eq!(available, vec!["simple", "laplace"]);
            }
            other => panic!("期望 UnknownFilter, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_laplace_requires_width() {
        let mesh = Arc::new(BoxMeshGenerator::new(1, 1, 1).build().unwrap());
        assert!(matches!(
            new_filter(&mesh, &coeffs("laplace", None)),
            Err(SgsError::Config { .. })
        ));
    }
}
