// crates/sgs_physics/src/transport.rs

//! 输运模型：分子运动粘度 ν

use sgs_foundation::{SgsError, SgsResult};
use sgs_mesh::FvMesh;
use std::sync::Arc;

use crate::fields::{BoundaryCondition, VolScalarField};

/// 输运模型
pub trait TransportModel: Send + Sync {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 分子运动粘度场
    fn nu(&self) -> VolScalarField;
}

/// 牛顿流体，均匀粘度
#[derive(Debug, Clone)]
pub struct Newtonian {
    mesh: Arc<FvMesh>,
    nu: f64,
}

impl Newtonian {
    /// 创建牛顿流体（`nu` 必须为正的有限值）
    pub fn new(mesh: &Arc<FvMesh>, nu: f64) -> SgsResult<Self> {
        if !(nu > 0.0) || !nu.is_finite() {
            return Err(SgsError::invalid_input(format!("运动粘度必须为正: {}", nu)));
        }
        Ok(Self {
            mesh: Arc::clone(mesh),
            nu,
        })
    }

    /// 粘度值
    pub fn value(&self) -> f64 {
        self.nu
    }
}

impl TransportModel for Newtonian {
    fn name(&self) -> &'static str {
        "Newtonian"
    }

    fn nu(&self) -> VolScalarField {
        VolScalarField::uniform("nu", &self.mesh, self.nu, BoundaryCondition::ZeroGradient)
    }
}

/// 逐单元给定的粘度场
#[derive(Debug, Clone)]
pub struct CellViscosity {
    nu: VolScalarField,
}

impl CellViscosity {
    /// 由粘度场创建（所有单元值必须为正）
    pub fn new(nu: VolScalarField) -> SgsResult<Self> {
        if let Some(bad) = nu.internal().iter().find(|v| !(**v > 0.0) || !v.is_finite()) {
            return Err(SgsError::invalid_input(format!("运动粘度必须为正: {}", bad)));
        }
        Ok(Self { nu: nu.named("nu") })
    }
}

impl TransportModel for CellViscosity {
    fn name(&self) -> &'static str {
        "cellViscosity"
    }

    fn nu(&self) -> VolScalarField {
        self.nu.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgs_mesh::BoxMeshGenerator;

    #[test]
    fn test_newtonian() {
        let mesh = Arc::new(BoxMeshGenerator::new(2, 1, 1).build().unwrap());
        let model = Newtonian::new(&mesh, 1e-5).unwrap();
        let nu = model.nu();
        assert_eq!(nu.name(), "nu");
        assert!(nu.internal().iter().all(|&v| v == 1e-5));
        assert!(Newtonian::new(&mesh, 0.0).is_err());
        assert!(Newtonian::new(&mesh, f64::NAN).is_err());
    }

    #[test]
    fn test_cell_viscosity_rejects_negative() {
        let mesh = Arc::new(BoxMeshGenerator::new(2, 1, 1).build().unwrap());
        let nu = VolScalarField::from_internal("v", &mesh, vec![1e-3, -1e-3]).unwrap();
        assert!(CellViscosity::new(nu).is_err());
        let nu = VolScalarField::from_internal("v", &mesh, vec![1e-3, 2e-3]).unwrap();
        assert_eq!(CellViscosity::new(nu).unwrap().nu().value(1), 2e-3);
    }
}
