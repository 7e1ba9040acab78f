// crates/sgs_mesh/src/lib.rs

//! SGS 网格模块
//!
//! 提供有限体积法所需的只读网格（单元/面/边界片），以及测试与
//! 演示用的六面体盒子网格生成器。
//!
//! # 核心类型
//!
//! - [`FvMesh`]: SoA 布局的只读有限体积网格
//! - [`BoxMeshGenerator`]: 结构化六面体网格生成器
//!
//! # 面编号约定
//!
//! 内部面在前，边界面在后并按边界片分组连续存放。面积向量
//! `S_f` 由 owner 指向 neighbour（边界面指向域外）。
//!
//! # 示例
//!
//! ```rust
//! use sgs_mesh::BoxMeshGenerator;
//!
//! let mesh = BoxMeshGenerator::new(4, 3, 2).build().unwrap();
//! assert_eq!(mesh.n_cells(), 24);
//! assert_eq!(mesh.patches().len(), 6);
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod fv_mesh;
pub mod generation;
pub mod quality;

pub use error::{MeshError, MeshResult};
pub use fv_mesh::{BoundaryFace, FvMesh, InternalFace, MeshParts, Patch, PatchFaces};
pub use generation::BoxMeshGenerator;
pub use quality::{check_mesh, MeshReport};
