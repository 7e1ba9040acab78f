// crates/sgs_physics/src/initial.rs

//! 初始场来源
//!
//! 模型构造时按名称读取必需的初始场（如 `k`），缺失即为致命错误。

use sgs_foundation::{SgsError, SgsResult};
use sgs_mesh::FvMesh;
use std::collections::HashMap;
use std::sync::Arc;

use crate::fields::{BoundaryCondition, VolScalarField};

/// 初始场来源
pub trait FieldSource: Send + Sync {
    /// 读取标量场
    fn scalar(&self, name: &str, mesh: &Arc<FvMesh>) -> SgsResult<VolScalarField>;

    /// 是否包含指定场
    fn contains(&self, name: &str) -> bool;
}

#[derive(Debug, Clone)]
enum InitialScalar {
    Uniform(f64, BoundaryCondition<f64>),
    Values(Vec<f64>),
}

/// 内存初始场仓库
#[derive(Debug, Clone, Default)]
pub struct FieldRepository {
    scalars: HashMap<String, InitialScalar>,
}

impl FieldRepository {
    /// 创建空仓库
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记均匀零梯度标量场
    pub fn uniform_scalar(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert_uniform(name, value, BoundaryCondition::ZeroGradient);
        self
    }

    /// 登记均匀标量场
    pub fn insert_uniform(
        &mut self,
        name: impl Into<String>,
        value: f64,
        condition: BoundaryCondition<f64>,
    ) {
        self.scalars
            .insert(name.into(), InitialScalar::Uniform(value, condition));
    }

    /// 登记逐单元标量值（零梯度边界）
    pub fn insert_values(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.scalars.insert(name.into(), InitialScalar::Values(values));
    }

    /// 已登记的场名称
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scalars.keys().map(String::as_str)
    }
}

impl FieldSource for FieldRepository {
    fn scalar(&self, name: &str, mesh: &Arc<FvMesh>) -> SgsResult<VolScalarField> {
        match self.scalars.get(name) {
            Some(InitialScalar::Uniform(value, condition)) => {
                Ok(VolScalarField::uniform(name, mesh, *value, *condition))
            }
            Some(InitialScalar::Values(values)) => {
                VolScalarField::from_internal(name, mesh, values.clone())
            }
            None => Err(SgsError::missing_field(name)),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.scalars.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgs_mesh::BoxMeshGenerator;

    #[test]
    fn test_repository_lookup() {
        let mesh = Arc::new(BoxMeshGenerator::new(2, 1, 1).build().unwrap());
        let mut repo = FieldRepository::new().uniform_scalar("k", 0.1);
        repo.insert_values("p", vec![1.0, 2.0]);

        let k = repo.scalar("k", &mesh).unwrap();
        assert_eq!(k.name(), "k");
        assert!(k.internal().iter().all(|&v| v == 0.1));
        assert_eq!(repo.scalar("p", &mesh).unwrap().value(1), 2.0);
        assert!(repo.contains("p"));
        assert_eq!(repo.names().count(), 2);
    }

    #[test]
    fn test_missing_field() {
        let mesh = Arc::new(BoxMeshGenerator::new(1, 1, 1).build().unwrap());
        let repo = FieldRepository::new();
        assert!(matches!(
            repo.scalar("k", &mesh),
            Err(SgsError::MissingField { ref name }) if name == "k"
        ));
    }

    #[test]
    fn test_wrong_size_values() {
        let mesh = Arc::new(BoxMeshGenerator::new(2, 1, 1).build().unwrap());
        let mut repo = FieldRepository::new();
        repo.insert_values("k", vec![1.0]);
        assert!(matches!(
            repo.scalar("k", &mesh),
            Err(SgsError::SizeMismatch { .. })
        ));
    }
}
