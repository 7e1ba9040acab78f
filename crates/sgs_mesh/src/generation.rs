// crates/sgs_mesh/src/generation.rs

//! 网格生成模块
//!
//! 提供结构化六面体盒子网格生成，用于测试、验证和命令行演示。
//!
//! # 使用示例
//!
//! ```rust
//! use sgs_mesh::generation::BoxMeshGenerator;
//!
//! let mesh = BoxMeshGenerator::new(8, 8, 8)
//!     .with_lengths(2.0 * std::f64::consts::PI, 2.0 * std::f64::consts::PI, 2.0 * std::f64::consts::PI)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(mesh.n_cells(), 512);
//! assert_eq!(mesh.n_boundary_faces(), 6 * 64);
//! ```

use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::fv_mesh::{BoundaryFace, FvMesh, InternalFace, MeshParts, PatchFaces};

/// 边界片名称（按 -x, +x, -y, +y, -z, +z 顺序）
pub const BOX_PATCH_NAMES: [&str; 6] = ["xMin", "xMax", "yMin", "yMax", "zMin", "zMax"];

/// 盒子网格生成器
///
/// 单元编号 `i + nx·(j + ny·k)`，内部面按 x、y、z 方向依次生成。
#[derive(Debug, Clone)]
pub struct BoxMeshGenerator {
    /// 各方向单元数
    n: [usize; 3],
    /// 各方向域长度
    lengths: DVec3,
    /// 原点
    origin: DVec3,
}

impl BoxMeshGenerator {
    /// 创建单位立方体上的生成器
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            n: [nx, ny, nz],
            lengths: DVec3::ONE,
            origin: DVec3::ZERO,
        }
    }

    /// 设置域长度
    pub fn with_lengths(mut self, lx: f64, ly: f64, lz: f64) -> Self {
        self.lengths = DVec3::new(lx, ly, lz);
        self
    }

    /// 设置原点
    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    /// 单元数量
    pub fn n_cells(&self) -> usize {
        self.n[0] * self.n[1] * self.n[2]
    }

    #[inline]
    fn cell_id(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.n[0] * (j + self.n[1] * k)
    }

    /// 生成网格
    pub fn build(&self) -> MeshResult<FvMesh> {
        let [nx, ny, nz] = self.n;
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(MeshError::InvalidDimensions(format!(
                "单元数必须为正: {}x{}x{}",
                nx, ny, nz
            )));
        }
        if !(self.lengths.min_element() > 0.0) || !self.lengths.is_finite() {
            return Err(MeshError::InvalidDimensions(format!(
                "域长度必须为正: {:?}",
                self.lengths
            )));
        }

        let h = self.lengths / DVec3::new(nx as f64, ny as f64, nz as f64);
        let volume = h.x * h.y * h.z;
        let area = DVec3::new(h.y * h.z, h.x * h.z, h.x * h.y);

        let centre = |i: usize, j: usize, k: usize| {
            self.origin + DVec3::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5) * h
        };

        let n_cells = self.n_cells();
        let mut cell_centres = Vec::with_capacity(n_cells);
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    cell_centres.push(centre(i, j, k));
                }
            }
        }

        let mut internal_faces = Vec::new();
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let c = self.cell_id(i, j, k);
                    let cc = centre(i, j, k);
                    if i + 1 < nx {
                        internal_faces.push(InternalFace {
                            owner: c,
                            neighbour: self.cell_id(i + 1, j, k),
                            centre: cc + DVec3::new(0.5 * h.x, 0.0, 0.0),
                            area: DVec3::new(area.x, 0.0, 0.0),
                        });
                    }
                    if j + 1 < ny {
                        internal_faces.push(InternalFace {
                            owner: c,
                            neighbour: self.cell_id(i, j + 1, k),
                            centre: cc + DVec3::new(0.0, 0.5 * h.y, 0.0),
                            area: DVec3::new(0.0, area.y, 0.0),
                        });
                    }
                    if k + 1 < nz {
                        internal_faces.push(InternalFace {
                            owner: c,
                            neighbour: self.cell_id(i, j, k + 1),
                            centre: cc + DVec3::new(0.0, 0.0, 0.5 * h.z),
                            area: DVec3::new(0.0, 0.0, area.z),
                        });
                    }
                }
            }
        }

        let mut patches: Vec<PatchFaces> = BOX_PATCH_NAMES
            .iter()
            .map(|name| PatchFaces {
                name: name.to_string(),
                faces: Vec::new(),
            })
            .collect();

        for axis in 0..3 {
            let (a, b) = ((axis + 1) % 3, (axis + 2) % 3);
            for ib in 0..self.n[b] {
                for ia in 0..self.n[a] {
                    for (side, idx) in [(0usize, 0usize), (1, self.n[axis] - 1)] {
                        let mut ijk = [0usize; 3];
                        ijk[axis] = idx;
                        ijk[a] = ia;
                        ijk[b] = ib;
                        let c = self.cell_id(ijk[0], ijk[1], ijk[2]);
                        let sign = if side == 0 { -1.0 } else { 1.0 };
                        let mut offset = DVec3::ZERO;
                        offset[axis] = sign * 0.5 * h[axis];
                        let mut sf = DVec3::ZERO;
                        sf[axis] = sign * area[axis];
                        patches[2 * axis + side].faces.push(BoundaryFace {
                            owner: c,
                            centre: cell_centres[c] + offset,
                            area: sf,
                        });
                    }
                }
            }
        }

        FvMesh::from_parts(MeshParts {
            cell_centres,
            cell_volumes: vec![volume; n_cells],
            internal_faces,
            patches,
        })
    }
}
