// crates/sgs_physics/src/fields/vol_field.rs

//! 体场 VolField
//!
//! 内部值按单元存放，边界值按边界面存放，每个边界片一个
//! [`BoundaryCondition`]。逐元素运算返回 `Calculated` 场，
//! 边界值由同一运算作用于操作数的边界值得到。
//!
//! 逐元素运算要求操作数定义在同一网格上，大小不一致视为编程错误并 panic；
//! 对外接口（模型 `correct`）在进入运算前先检查大小并返回错误。

use glam::{DMat3, DVec3};
use rayon::prelude::*;
use sgs_foundation::{SgsError, SgsResult, SymmTensor};
use sgs_mesh::FvMesh;
use std::ops::{Add, Mul, Sub};
use std::sync::Arc;

use super::boundary::BoundaryCondition;
use super::FieldValue;

/// 体场
#[derive(Debug, Clone)]
pub struct VolField<T: FieldValue> {
    name: String,
    mesh: Arc<FvMesh>,
    internal: Vec<T>,
    boundary: Vec<T>,
    conditions: Vec<BoundaryCondition<T>>,
}

/// 体标量场
pub type VolScalarField = VolField<f64>;
/// 体向量场
pub type VolVectorField = VolField<DVec3>;
/// 体对称张量场
pub type VolSymmTensorField = VolField<SymmTensor>;
/// 体张量场
pub type VolTensorField = VolField<DMat3>;

impl<T: FieldValue> VolField<T> {
    // =========================================================================
    // 构造
    // =========================================================================

    /// 均匀场，所有边界片使用同一边界条件
    pub fn uniform(
        name: impl Into<String>,
        mesh: &Arc<FvMesh>,
        value: T,
        condition: BoundaryCondition<T>,
    ) -> Self {
        let mut field = Self {
            name: name.into(),
            mesh: Arc::clone(mesh),
            internal: vec![value; mesh.n_cells()],
            boundary: vec![value; mesh.n_boundary_faces()],
            conditions: vec![condition; mesh.patches().len()],
        };
        field.correct_boundary_conditions();
        field
    }

    /// 由单元值创建零梯度场
    pub fn from_internal(
        name: impl Into<String>,
        mesh: &Arc<FvMesh>,
        internal: Vec<T>,
    ) -> SgsResult<Self> {
        let conditions = vec![BoundaryCondition::ZeroGradient; mesh.patches().len()];
        Self::with_conditions(name, mesh, internal, conditions)
    }

    /// 由单元值与逐片边界条件创建
    pub fn with_conditions(
        name: impl Into<String>,
        mesh: &Arc<FvMesh>,
        internal: Vec<T>,
        conditions: Vec<BoundaryCondition<T>>,
    ) -> SgsResult<Self> {
        if internal.len() != mesh.n_cells() {
            return Err(SgsError::size_mismatch(
                "internal",
                mesh.n_cells(),
                internal.len(),
            ));
        }
        if conditions.len() != mesh.patches().len() {
            return Err(SgsError::size_mismatch(
                "conditions",
                mesh.patches().len(),
                conditions.len(),
            ));
        }
        let boundary = (0..mesh.n_boundary_faces())
            .map(|bf| internal[mesh.boundary_owner(bf)])
            .collect();
        let mut field = Self {
            name: name.into(),
            mesh: Arc::clone(mesh),
            internal,
            boundary,
            conditions,
        };
        field.correct_boundary_conditions();
        Ok(field)
    }

    /// 零梯度外推场（运算结果，边界值取 owner 单元值）
    pub(crate) fn extrapolated(name: impl Into<String>, mesh: Arc<FvMesh>, internal: Vec<T>) -> Self {
        debug_assert_eq!(internal.len(), mesh.n_cells());
        let boundary = (0..mesh.n_boundary_faces())
            .map(|bf| internal[mesh.boundary_owner(bf)])
            .collect();
        let n_patches = mesh.patches().len();
        Self {
            name: name.into(),
            mesh,
            internal,
            boundary,
            conditions: vec![BoundaryCondition::ZeroGradient; n_patches],
        }
    }

    /// 运算结果场（全部边界片为 `Calculated`）
    pub(crate) fn calculated(
        name: impl Into<String>,
        mesh: Arc<FvMesh>,
        internal: Vec<T>,
        boundary: Vec<T>,
    ) -> Self {
        debug_assert_eq!(internal.len(), mesh.n_cells());
        debug_assert_eq!(boundary.len(), mesh.n_boundary_faces());
        let n_patches = mesh.patches().len();
        Self {
            name: name.into(),
            mesh,
            internal,
            boundary,
            conditions: vec![BoundaryCondition::Calculated; n_patches],
        }
    }

    /// 使用本场的边界条件包装新的单元值
    ///
    /// `Calculated` 边界片沿用本场的边界值，其余片按条件重新计算。
    pub fn like(&self, name: impl Into<String>, internal: Vec<T>) -> Self {
        assert_eq!(internal.len(), self.internal.len(), "单元值数量不一致");
        let mut field = Self {
            name: name.into(),
            mesh: Arc::clone(&self.mesh),
            internal,
            boundary: self.boundary.clone(),
            conditions: self.conditions.clone(),
        };
        field.correct_boundary_conditions();
        field
    }

    // =========================================================================
    // 访问
    // =========================================================================

    /// 场名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 重命名
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 网格
    pub fn mesh(&self) -> &Arc<FvMesh> {
        &self.mesh
    }

    /// 单元值
    pub fn internal(&self) -> &[T] {
        &self.internal
    }

    /// 可变单元值
    pub fn internal_mut(&mut self) -> &mut [T] {
        &mut self.internal
    }

    /// 边界面值
    pub fn boundary(&self) -> &[T] {
        &self.boundary
    }

    /// 单元值
    #[inline]
    pub fn value(&self, cell: usize) -> T {
        self.internal[cell]
    }

    /// 边界面值
    #[inline]
    pub fn boundary_value(&self, boundary_face: usize) -> T {
        self.boundary[boundary_face]
    }

    /// 边界条件（每片一个）
    pub fn conditions(&self) -> &[BoundaryCondition<T>] {
        &self.conditions
    }

    /// 修改某一边界片的条件（随后需调用 [`Self::correct_boundary_conditions`]）
    pub fn set_condition(&mut self, patch: usize, condition: BoundaryCondition<T>) {
        self.conditions[patch] = condition;
    }

    /// 单元数
    pub fn len(&self) -> usize {
        self.internal.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.internal.is_empty()
    }

    /// 单元值与边界值是否全部有限
    pub fn is_finite(&self) -> bool {
        self.internal.iter().all(FieldValue::is_finite_value)
            && self.boundary.iter().all(FieldValue::is_finite_value)
    }

    // =========================================================================
    // 边界与赋值
    // =========================================================================

    /// 按边界条件重新计算边界值
    pub fn correct_boundary_conditions(&mut self) {
        let mesh = &self.mesh;
        for (patch, condition) in mesh.patches().iter().zip(&self.conditions) {
            for bf in patch.boundary_faces() {
                let owner = self.internal[mesh.boundary_owner(bf)];
                self.boundary[bf] = condition.evaluate(owner, self.boundary[bf]);
            }
        }
    }

    /// 赋值：复制单元值与非固定边界片的边界值，保留本场名称与条件
    pub fn assign(&mut self, other: &VolField<T>) {
        self.check_compatible(other);
        self.internal.copy_from_slice(&other.internal);
        let mesh = &self.mesh;
        for (patch, condition) in mesh.patches().iter().zip(&self.conditions) {
            if condition.is_fixed() {
                continue;
            }
            let range = patch.boundary_faces();
            self.boundary[range.clone()].copy_from_slice(&other.boundary[range]);
        }
    }

    // =========================================================================
    // 逐元素运算
    // =========================================================================

    /// 逐元素映射
    pub fn map<U, F>(&self, name: impl Into<String>, f: F) -> VolField<U>
    where
        U: FieldValue,
        F: Fn(T) -> U + Send + Sync,
    {
        let internal = self.internal.par_iter().map(|&v| f(v)).collect();
        let boundary = self.boundary.iter().map(|&v| f(v)).collect();
        VolField::calculated(name, Arc::clone(&self.mesh), internal, boundary)
    }

    /// 两场逐元素组合
    pub fn zip_map<U, V, F>(&self, other: &VolField<U>, name: impl Into<String>, f: F) -> VolField<V>
    where
        U: FieldValue,
        V: FieldValue,
        F: Fn(T, U) -> V + Send + Sync,
    {
        self.check_compatible(other);
        let internal = self
            .internal
            .par_iter()
            .zip(other.internal.par_iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        let boundary = self
            .boundary
            .iter()
            .zip(&other.boundary)
            .map(|(&a, &b)| f(a, b))
            .collect();
        VolField::calculated(name, Arc::clone(&self.mesh), internal, boundary)
    }

    fn check_compatible<U: FieldValue>(&self, other: &VolField<U>) {
        assert_eq!(
            self.internal.len(),
            other.internal.len(),
            "场 {} 与 {} 单元数不一致",
            self.name,
            other.name
        );
        assert_eq!(
            self.boundary.len(),
            other.boundary.len(),
            "场 {} 与 {} 边界面数不一致",
            self.name,
            other.name
        );
    }
}

// =============================================================================
// 标量场专用
// =============================================================================

impl VolField<f64> {
    /// 单元最小值
    pub fn min(&self) -> f64 {
        self.internal.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// 单元最大值
    pub fn max(&self) -> f64 {
        self.internal.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// 体积加权平均
    pub fn weighted_average(&self) -> f64 {
        let volumes = self.mesh.cell_volumes();
        let total: f64 = volumes.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.internal
            .iter()
            .zip(volumes)
            .map(|(v, vol)| v * vol)
            .sum::<f64>()
            / total
    }

    /// 下限截断（单元值与边界值）
    pub fn clamp_min(&mut self, floor: f64) {
        self.internal.par_iter_mut().for_each(|v| *v = v.max(floor));
        self.boundary.iter_mut().for_each(|v| *v = v.max(floor));
    }
}

// =============================================================================
// 运算符
// =============================================================================

impl<'a, T: FieldValue> Add<&'a VolField<T>> for &'a VolField<T> {
    type Output = VolField<T>;

    fn add(self, rhs: &'a VolField<T>) -> VolField<T> {
        self.zip_map(rhs, format!("({}+{})", self.name, rhs.name), |a, b| a + b)
    }
}

impl<'a, T: FieldValue> Sub<&'a VolField<T>> for &'a VolField<T> {
    type Output = VolField<T>;

    fn sub(self, rhs: &'a VolField<T>) -> VolField<T> {
        self.zip_map(rhs, format!("({}-{})", self.name, rhs.name), |a, b| a - b)
    }
}

impl<T: FieldValue> Mul<f64> for &VolField<T> {
    type Output = VolField<T>;

    fn mul(self, s: f64) -> VolField<T> {
        self.map(format!("({}*{})", s, self.name), move |a| a * s)
    }
}

/// 标量场乘以任意场
impl<'a, T: FieldValue> Mul<&'a VolField<T>> for &'a VolField<f64> {
    type Output = VolField<T>;

    fn mul(self, rhs: &'a VolField<T>) -> VolField<T> {
        self.zip_map(rhs, format!("({}*{})", self.name, rhs.name), |s, v| v * s)
    }
}
