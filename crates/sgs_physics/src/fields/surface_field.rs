// crates/sgs_physics/src/fields/surface_field.rs

//! 面场

use sgs_mesh::FvMesh;
use std::sync::Arc;

use super::FieldValue;

/// 面场，按全局面编号存放（内部面在前）
#[derive(Debug, Clone)]
pub struct SurfaceField<T: FieldValue> {
    name: String,
    mesh: Arc<FvMesh>,
    values: Vec<T>,
}

/// 面标量场（如面通量 `phi`）
pub type SurfaceScalarField = SurfaceField<f64>;

impl<T: FieldValue> SurfaceField<T> {
    /// 由面值创建
    ///
    /// # Panics
    ///
    /// 面值数量与网格面数不一致时 panic。
    pub fn new(name: impl Into<String>, mesh: Arc<FvMesh>, values: Vec<T>) -> Self {
        assert_eq!(values.len(), mesh.n_faces(), "面场大小与网格面数不一致");
        Self {
            name: name.into(),
            mesh,
            values,
        }
    }

    /// 均匀面场
    pub fn uniform(name: impl Into<String>, mesh: &Arc<FvMesh>, value: T) -> Self {
        Self::new(name, Arc::clone(mesh), vec![value; mesh.n_faces()])
    }

    /// 名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 网格
    pub fn mesh(&self) -> &Arc<FvMesh> {
        &self.mesh
    }

    /// 全部面值
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// 单个面值
    #[inline]
    pub fn value(&self, face: usize) -> T {
        self.values[face]
    }

    /// 边界面值
    pub fn boundary_values(&self) -> &[T] {
        &self.values[self.mesh.n_internal_faces()..]
    }

    /// 面数
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
