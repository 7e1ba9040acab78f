// crates/sgs_physics/src/numerics/fvc.rs

//! 显式有限体积算子（fvc）
//!
//! 所有算子按单元收集其面贡献（CSR 单元→面映射），单元间互不依赖，
//! 使用 rayon 并行。面求和顺序固定，结果确定。
//!
//! # 符号约定
//!
//! 面积向量 `S_f` 由 owner 指向 neighbour，对 owner 单元为外法向，
//! 对 neighbour 单元取负号。

use glam::DMat3;
use rayon::prelude::*;
use sgs_foundation::tensor::outer;
use sgs_mesh::FvMesh;
use std::sync::Arc;

use crate::fields::{
    FieldValue, SurfaceField, SurfaceScalarField, VolField, VolTensorField, VolVectorField,
};

// ============================================================
// 插值与面求和
// ============================================================

/// 线性插值到面
///
/// 内部面 `φ_f = w·φ_P + (1-w)·φ_N`，边界面取场的边界值。
pub fn interpolate<T: FieldValue>(field: &VolField<T>) -> SurfaceField<T> {
    let mesh = field.mesh();
    let n_internal = mesh.n_internal_faces();
    let internal = field.internal();
    let boundary = field.boundary();

    let values = (0..mesh.n_faces())
        .into_par_iter()
        .map(|face| match mesh.neighbour(face) {
            Some(n) => {
                let w = mesh.weight(face);
                internal[mesh.owner(face)] * w + internal[n] * (1.0 - w)
            }
            None => boundary[face - n_internal],
        })
        .collect();

    SurfaceField::new(
        format!("interpolate({})", field.name()),
        Arc::clone(mesh),
        values,
    )
}

/// 面场的单元求和 `Σ_f φ_f`（不带方向符号）
pub fn surface_sum<T: FieldValue>(field: &SurfaceField<T>) -> Vec<T> {
    let mesh = field.mesh();
    mesh.cells()
        .into_par_iter()
        .map(|cell| {
            mesh.cell_faces(cell)
                .iter()
                .fold(T::ZERO, |acc, &f| acc + field.value(f))
        })
        .collect()
}

/// 面积模加权的单元求和 `Σ_f |S_f|·φ_f`
fn mag_sf_weighted_sum<T: FieldValue>(mesh: &FvMesh, face_values: &[T]) -> Vec<T> {
    mesh.cells()
        .into_par_iter()
        .map(|cell| {
            mesh.cell_faces(cell)
                .iter()
                .fold(T::ZERO, |acc, &f| acc + face_values[f] * mesh.mag_sf(f))
        })
        .collect()
}

/// 面通量 `φ = U_f · S_f`
pub fn flux(velocity: &VolVectorField) -> SurfaceScalarField {
    let mesh = velocity.mesh();
    let u_f = interpolate(velocity);
    let values = (0..mesh.n_faces())
        .into_par_iter()
        .map(|face| u_f.value(face).dot(mesh.face_area(face)))
        .collect();
    SurfaceField::new("phi", Arc::clone(mesh), values)
}

// ============================================================
// 平均
// ============================================================

/// 面积加权邻域平均
///
/// ```text
/// average(φ)_P = Σ_f |S_f|·φ_f / Σ_f |S_f|
/// ```
///
/// 面值由线性插值得到；结果边界值取插值面值（即原场边界值）。
pub fn average<T: FieldValue>(field: &VolField<T>) -> VolField<T> {
    let mesh = field.mesh();
    let face_values = interpolate(field);
    let sums = mag_sf_weighted_sum(mesh, face_values.values());

    let internal = sums
        .into_par_iter()
        .enumerate()
        .map(|(cell, sum)| {
            let total: f64 = mesh.cell_faces(cell).iter().map(|&f| mesh.mag_sf(f)).sum();
            sum * (1.0 / total)
        })
        .collect();

    VolField::calculated(
        format!("average({})", field.name()),
        Arc::clone(mesh),
        internal,
        face_values.boundary_values().to_vec(),
    )
}

// ============================================================
// 梯度
// ============================================================

/// Gauss 线性梯度 `(∇U)_ij = (1/V) Σ_f S_i U_j`
///
/// 结果边界值取 owner 单元梯度（零梯度外推）。
pub fn grad(field: &VolVectorField) -> VolTensorField {
    let mesh = field.mesh();
    let u_f = interpolate(field);

    let internal = mesh
        .cells()
        .into_par_iter()
        .map(|cell| {
            let sum = mesh.cell_faces(cell).iter().fold(DMat3::ZERO, |acc, &f| {
                let sign = if mesh.owner(f) == cell { 1.0 } else { -1.0 };
                acc + outer(mesh.face_area(f) * sign, u_f.value(f))
            });
            sum * (1.0 / mesh.cell_volume(cell))
        })
        .collect();

    VolField::extrapolated(format!("grad({})", field.name()), Arc::clone(mesh), internal)
}

// ============================================================
// 拉普拉斯
// ============================================================

/// 拉普拉斯 `∇·(Γ∇φ)`，Γ 为面系数，无非正交修正
///
/// ```text
/// (1/V_P) Σ_f Γ_f |S_f| δ_f (φ_N − φ_P)
/// ```
///
/// 边界面的 `φ_N` 取场的边界值，零梯度边界贡献为零。
pub fn laplacian<T: FieldValue>(gamma: &SurfaceScalarField, field: &VolField<T>) -> VolField<T> {
    let mesh = field.mesh();
    assert_eq!(gamma.len(), mesh.n_faces(), "扩散系数面数不一致");
    let n_internal = mesh.n_internal_faces();
    let internal = field.internal();
    let boundary = field.boundary();

    let values: Vec<T> = mesh
        .cells()
        .into_par_iter()
        .map(|cell| {
            let phi_p = internal[cell];
            let sum = mesh.cell_faces(cell).iter().fold(T::ZERO, |acc, &f| {
                let phi_n = match mesh.other_cell(f, cell) {
                    Some(n) => internal[n],
                    None => boundary[f - n_internal],
                };
                let coeff = gamma.value(f) * mesh.mag_sf(f) * mesh.delta_coeff(f);
                acc + (phi_n - phi_p) * coeff
            });
            sum * (1.0 / mesh.cell_volume(cell))
        })
        .collect();

    VolField::extrapolated(
        format!("laplacian({},{})", gamma.name(), field.name()),
        Arc::clone(mesh),
        values,
    )
}
