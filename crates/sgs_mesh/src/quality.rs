// crates/sgs_mesh/src/quality.rs

//! 网格质量评估
//!
//! 检查单元闭合性（`Σ_f ±S_f ≈ 0`）并给出体积统计。

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::fv_mesh::FvMesh;

/// 闭合性容差（相对）
pub const CLOSEDNESS_TOLERANCE: f64 = 1e-8;

/// 网格检查报告
#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    /// 单元数
    pub n_cells: usize,
    /// 面数
    pub n_faces: usize,
    /// 总体积
    pub total_volume: f64,
    /// 最小单元体积
    pub min_volume: f64,
    /// 最大单元体积
    pub max_volume: f64,
    /// 最大闭合残差比 `|Σ±S_f| / Σ|S_f|`
    pub max_closedness: f64,
}

/// 单元闭合残差比
pub fn cell_closedness(mesh: &FvMesh, cell: usize) -> f64 {
    let mut sum = DVec3::ZERO;
    let mut mag_sum = 0.0;
    for &f in mesh.cell_faces(cell) {
        let sign = if mesh.owner(f) == cell { 1.0 } else { -1.0 };
        sum += mesh.face_area(f) * sign;
        mag_sum += mesh.mag_sf(f);
    }
    if mag_sum > 0.0 {
        sum.length() / mag_sum
    } else {
        0.0
    }
}

/// 检查网格
///
/// 任一单元闭合残差超过 [`CLOSEDNESS_TOLERANCE`] 时返回错误。
pub fn check_mesh(mesh: &FvMesh) -> MeshResult<MeshReport> {
    let mut max_closedness = 0.0_f64;
    for cell in mesh.cells() {
        let ratio = cell_closedness(mesh, cell);
        if ratio > CLOSEDNESS_TOLERANCE {
            return Err(MeshError::OpenCell { cell, ratio });
        }
        max_closedness = max_closedness.max(ratio);
    }

    let volumes = mesh.cell_volumes();
    let min_volume = volumes.iter().cloned().fold(f64::MAX, f64::min);
    let max_volume = volumes.iter().cloned().fold(0.0_f64, f64::max);

    Ok(MeshReport {
        n_cells: mesh.n_cells(),
        n_faces: mesh.n_faces(),
        total_volume: mesh.total_volume(),
        min_volume,
        max_volume,
        max_closedness,
    })
}
