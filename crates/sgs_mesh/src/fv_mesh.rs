// crates/sgs_mesh/src/fv_mesh.rs

//! 有限体积网格
//!
//! 只读 SoA 布局网格，构造后不可修改。
//!
//! # 设计要点
//!
//! 1. **SoA布局**: 单元与面的几何量分别存放在连续数组中
//! 2. **面排序**: 内部面在前，边界面按边界片连续存放
//! 3. **压缩邻接**: 单元到面的映射使用 offsets + indices
//! 4. **预计算插值权重**: 线性插值权重与面距离系数在构造时计算

use glam::DVec3;
use sgs_foundation::SMALL;

use crate::error::{MeshError, MeshResult};

/// 内部面定义
#[derive(Debug, Clone, Copy)]
pub struct InternalFace {
    /// owner 单元
    pub owner: usize,
    /// neighbour 单元
    pub neighbour: usize,
    /// 面中心
    pub centre: DVec3,
    /// 面积向量（owner → neighbour）
    pub area: DVec3,
}

/// 边界面定义
#[derive(Debug, Clone, Copy)]
pub struct BoundaryFace {
    /// owner 单元
    pub owner: usize,
    /// 面中心
    pub centre: DVec3,
    /// 面积向量（指向域外）
    pub area: DVec3,
}

/// 一个边界片上的面
#[derive(Debug, Clone)]
pub struct PatchFaces {
    /// 边界片名称
    pub name: String,
    /// 面列表
    pub faces: Vec<BoundaryFace>,
}

/// 网格构造原料
#[derive(Debug, Clone, Default)]
pub struct MeshParts {
    /// 单元中心
    pub cell_centres: Vec<DVec3>,
    /// 单元体积
    pub cell_volumes: Vec<f64>,
    /// 内部面
    pub internal_faces: Vec<InternalFace>,
    /// 边界片
    pub patches: Vec<PatchFaces>,
}

/// 边界片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// 名称
    pub name: String,
    /// 起始面（全局面编号）
    pub start: usize,
    /// 面数量
    pub size: usize,
    /// 在边界面数组中的起始位置
    pub boundary_start: usize,
}

impl Patch {
    /// 全局面编号范围
    #[inline]
    pub fn faces(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.size
    }

    /// 边界面编号范围（边界面数组内）
    #[inline]
    pub fn boundary_faces(&self) -> std::ops::Range<usize> {
        self.boundary_start..self.boundary_start + self.size
    }
}

/// 有限体积网格
#[derive(Debug, Clone)]
pub struct FvMesh {
    // ===== 单元数据 =====
    n_cells: usize,
    cell_centres: Vec<DVec3>,
    cell_volumes: Vec<f64>,
    cell_face_offsets: Vec<usize>,
    cell_face_indices: Vec<usize>,

    // ===== 面数据 =====
    n_internal_faces: usize,
    face_centres: Vec<DVec3>,
    face_areas: Vec<DVec3>,
    face_mag_areas: Vec<f64>,
    face_owner: Vec<usize>,
    face_neighbour: Vec<usize>,
    face_weights: Vec<f64>,
    face_delta_coeffs: Vec<f64>,

    // ===== 边界数据 =====
    patches: Vec<Patch>,
}

impl FvMesh {
    /// 从原料构造并校验
    pub fn from_parts(parts: MeshParts) -> MeshResult<Self> {
        let n_cells = parts.cell_centres.len();
        if parts.cell_volumes.len() != n_cells {
            return Err(MeshError::invalid_topology(
                "from_parts",
                format!(
                    "单元中心 {} 个, 单元体积 {} 个",
                    n_cells,
                    parts.cell_volumes.len()
                ),
            ));
        }
        for (i, &v) in parts.cell_volumes.iter().enumerate() {
            if !(v > SMALL) {
                return Err(MeshError::degenerate("cell", i, "volume", v));
            }
        }

        let n_internal_faces = parts.internal_faces.len();
        let n_boundary: usize = parts.patches.iter().map(|p| p.faces.len()).sum();
        let n_faces = n_internal_faces + n_boundary;

        let mut face_centres = Vec::with_capacity(n_faces);
        let mut face_areas = Vec::with_capacity(n_faces);
        let mut face_owner = Vec::with_capacity(n_faces);
        let mut face_neighbour = Vec::with_capacity(n_internal_faces);

        for (f, face) in parts.internal_faces.iter().enumerate() {
            if face.owner >= n_cells || face.neighbour >= n_cells {
                return Err(MeshError::invalid_topology(
                    "from_parts",
                    format!(
                        "内部面 {} 引用单元 ({}, {}) 超出 0..{}",
                        f, face.owner, face.neighbour, n_cells
                    ),
                ));
            }
            if face.owner == face.neighbour {
                return Err(MeshError::invalid_topology(
                    "from_parts",
                    format!("内部面 {} 的 owner 与 neighbour 相同", f),
                ));
            }
            face_centres.push(face.centre);
            face_areas.push(face.area);
            face_owner.push(face.owner);
            face_neighbour.push(face.neighbour);
        }

        let mut patches = Vec::with_capacity(parts.patches.len());
        for patch in &parts.patches {
            let start = face_centres.len();
            for face in &patch.faces {
                if face.owner >= n_cells {
                    return Err(MeshError::invalid_topology(
                        "from_parts",
                        format!("边界片 '{}' 的面引用单元 {} 超出 0..{}", patch.name, face.owner, n_cells),
                    ));
                }
                face_centres.push(face.centre);
                face_areas.push(face.area);
                face_owner.push(face.owner);
            }
            patches.push(Patch {
                name: patch.name.clone(),
                start,
                size: patch.faces.len(),
                boundary_start: start - n_internal_faces,
            });
        }

        let face_mag_areas: Vec<f64> = face_areas.iter().map(|a| a.length()).collect();
        for (f, &mag) in face_mag_areas.iter().enumerate() {
            if !(mag > SMALL) {
                return Err(MeshError::degenerate("face", f, "area", mag));
            }
        }

        // 单元 → 面 压缩邻接
        let mut counts = vec![0usize; n_cells];
        for (f, &o) in face_owner.iter().enumerate() {
            counts[o] += 1;
            if f < n_internal_faces {
                counts[face_neighbour[f]] += 1;
            }
        }
        let mut cell_face_offsets = Vec::with_capacity(n_cells + 1);
        cell_face_offsets.push(0);
        for c in 0..n_cells {
            let last = cell_face_offsets[c];
            cell_face_offsets.push(last + counts[c]);
        }
        let mut cursor = cell_face_offsets[..n_cells].to_vec();
        let mut cell_face_indices = vec![0usize; cell_face_offsets[n_cells]];
        for (f, &o) in face_owner.iter().enumerate() {
            cell_face_indices[cursor[o]] = f;
            cursor[o] += 1;
            if f < n_internal_faces {
                let n = face_neighbour[f];
                cell_face_indices[cursor[n]] = f;
                cursor[n] += 1;
            }
        }

        // 线性插值权重与距离系数
        let mut face_weights = Vec::with_capacity(n_faces);
        let mut face_delta_coeffs = Vec::with_capacity(n_faces);
        for f in 0..n_faces {
            let sf = face_areas[f];
            let cf = face_centres[f];
            let cp = parts.cell_centres[face_owner[f]];
            if f < n_internal_faces {
                let cn = parts.cell_centres[face_neighbour[f]];
                let d_own = sf.dot(cf - cp).abs();
                let d_nei = sf.dot(cn - cf).abs();
                let w = if d_own + d_nei > SMALL {
                    d_nei / (d_own + d_nei)
                } else {
                    0.5
                };
                face_weights.push(w);
                let d = (cn - cp).length();
                if !(d > SMALL) {
                    return Err(MeshError::degenerate("face", f, "owner-neighbour distance", d));
                }
                face_delta_coeffs.push(1.0 / d);
            } else {
                face_weights.push(1.0);
                let n_hat = sf / face_mag_areas[f];
                let d = n_hat.dot(cf - cp).abs();
                if !(d > SMALL) {
                    return Err(MeshError::degenerate("face", f, "boundary distance", d));
                }
                face_delta_coeffs.push(1.0 / d);
            }
        }

        log::debug!(
            "FvMesh: {} 单元, {} 面 ({} 内部), {} 边界片",
            n_cells,
            n_faces,
            n_internal_faces,
            patches.len()
        );

        Ok(Self {
            n_cells,
            cell_centres: parts.cell_centres,
            cell_volumes: parts.cell_volumes,
            cell_face_offsets,
            cell_face_indices,
            n_internal_faces,
            face_centres,
            face_areas,
            face_mag_areas,
            face_owner,
            face_neighbour,
            face_weights,
            face_delta_coeffs,
            patches,
        })
    }

    // =========================================================================
    // 基本统计
    // =========================================================================

    /// 单元数量
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// 面数量
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.face_owner.len()
    }

    /// 内部面数量
    #[inline]
    pub fn n_internal_faces(&self) -> usize {
        self.n_internal_faces
    }

    /// 边界面数量
    #[inline]
    pub fn n_boundary_faces(&self) -> usize {
        self.n_faces() - self.n_internal_faces
    }

    // =========================================================================
    // 单元访问
    // =========================================================================

    /// 单元中心
    #[inline]
    pub fn cell_centre(&self, cell: usize) -> DVec3 {
        self.cell_centres[cell]
    }

    /// 全部单元中心
    #[inline]
    pub fn cell_centres(&self) -> &[DVec3] {
        &self.cell_centres
    }

    /// 单元体积
    #[inline]
    pub fn cell_volume(&self, cell: usize) -> f64 {
        self.cell_volumes[cell]
    }

    /// 全部单元体积
    #[inline]
    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// 单元关联的面
    #[inline]
    pub fn cell_faces(&self, cell: usize) -> &[usize] {
        &self.cell_face_indices[self.cell_face_offsets[cell]..self.cell_face_offsets[cell + 1]]
    }

    /// 单元邻居（不含边界）
    pub fn cell_neighbours(&self, cell: usize) -> impl Iterator<Item = usize> + '_ {
        self.cell_faces(cell)
            .iter()
            .filter_map(move |&f| self.other_cell(f, cell))
    }

    /// 全部单元范围
    #[inline]
    pub fn cells(&self) -> std::ops::Range<usize> {
        0..self.n_cells
    }

    // =========================================================================
    // 面访问
    // =========================================================================

    /// 面中心
    #[inline]
    pub fn face_centre(&self, face: usize) -> DVec3 {
        self.face_centres[face]
    }

    /// 面积向量 `S_f`
    #[inline]
    pub fn face_area(&self, face: usize) -> DVec3 {
        self.face_areas[face]
    }

    /// 面积模 `|S_f|`
    #[inline]
    pub fn mag_sf(&self, face: usize) -> f64 {
        self.face_mag_areas[face]
    }

    /// 面 owner 单元
    #[inline]
    pub fn owner(&self, face: usize) -> usize {
        self.face_owner[face]
    }

    /// 面 neighbour 单元（边界面返回 None）
    #[inline]
    pub fn neighbour(&self, face: usize) -> Option<usize> {
        self.face_neighbour.get(face).copied()
    }

    /// 面另一侧的单元
    #[inline]
    pub fn other_cell(&self, face: usize, cell: usize) -> Option<usize> {
        let n = self.neighbour(face)?;
        if self.face_owner[face] == cell {
            Some(n)
        } else {
            Some(self.face_owner[face])
        }
    }

    /// owner 侧线性插值权重 `w`，面值 `φ_f = w·φ_P + (1-w)·φ_N`
    #[inline]
    pub fn weight(&self, face: usize) -> f64 {
        self.face_weights[face]
    }

    /// 面距离系数 `1/|d|`
    #[inline]
    pub fn delta_coeff(&self, face: usize) -> f64 {
        self.face_delta_coeffs[face]
    }

    /// 是否为边界面
    #[inline]
    pub fn is_boundary_face(&self, face: usize) -> bool {
        face >= self.n_internal_faces
    }

    /// 内部面范围
    #[inline]
    pub fn internal_faces(&self) -> std::ops::Range<usize> {
        0..self.n_internal_faces
    }

    // =========================================================================
    // 边界访问
    // =========================================================================

    /// 全部边界片
    #[inline]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// 按名称查找边界片
    pub fn find_patch(&self, name: &str) -> Option<usize> {
        self.patches.iter().position(|p| p.name == name)
    }

    /// 全局面编号 → 边界面编号
    #[inline]
    pub fn boundary_index(&self, face: usize) -> usize {
        face - self.n_internal_faces
    }

    /// 边界面的 owner 单元
    #[inline]
    pub fn boundary_owner(&self, boundary_face: usize) -> usize {
        self.face_owner[self.n_internal_faces + boundary_face]
    }

    /// 总体积
    pub fn total_volume(&self) -> f64 {
        self.cell_volumes.iter().sum()
    }
}
