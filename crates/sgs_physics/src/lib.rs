// crates/sgs_physics/src/lib.rs

//! SGS 物理层
//!
//! 在有限体积网格上实现 LES 亚格子尺度闭合：
//!
//! - [`fields`]: 体场/面场、边界条件与逐元素代数
//! - [`numerics::fvc`]: 显式有限体积算子
//! - [`filters`]: 测试滤波器（`simple`、`laplace`）
//! - [`delta`]: 滤波宽度（`cubeRootVol`、`maxDeltaxyz`）
//! - [`transport`]: 分子粘度
//! - [`initial`]: 初始场来源
//! - [`models`]: SGS 模型与工厂（`dynLocalAverageSmagorinsky`）
//!
//! # 示例
//!
//! ```no_run
//! use std::sync::Arc;
//! use glam::DVec3;
//! use sgs_config::{LesProperties, StaticConfigSource};
//! use sgs_mesh::BoxMeshGenerator;
//! use sgs_physics::prelude::*;
//!
//! let mesh = Arc::new(BoxMeshGenerator::new(8, 8, 8).build().unwrap());
//! let u = VolVectorField::uniform("U", &mesh, DVec3::X, BoundaryCondition::ZeroGradient);
//! let transport = Arc::new(Newtonian::new(&mesh, 1e-5).unwrap());
//! let config = Arc::new(StaticConfigSource::new(LesProperties::default()));
//! let fields = FieldRepository::new().uniform_scalar("k", 0.0);
//!
//! let ctx = ModelContext::new(&u, transport, config, &fields);
//! let mut model = new_sgs_model(&ctx).unwrap();
//! model.correct(&u, &fvc::grad(&u)).unwrap();
//! assert!(model.nu_sgs().min() >= -1e-5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod delta;
pub mod fields;
pub mod filters;
pub mod initial;
pub mod models;
pub mod numerics;
pub mod transport;

pub use delta::{DeltaKind, LesDelta, DELTA_TYPES};
pub use filters::{new_filter, LaplaceFilter, LesFilter, SimpleFilter, FILTER_TYPES};
pub use initial::{FieldRepository, FieldSource};
pub use models::{
    new_sgs_model, DynLocalAverageSmagorinsky, LesModelBase, ModelContext, SgsModel, MODEL_TYPES,
};
pub use transport::{CellViscosity, Newtonian, TransportModel};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::fields::{
        BoundaryCondition, FieldValue, SurfaceScalarField, VolField, VolScalarField,
        VolSymmTensorField, VolTensorField, VolVectorField,
    };
    pub use crate::filters::{LesFilter, FILTER_TYPES};
    pub use crate::initial::{FieldRepository, FieldSource};
    pub use crate::models::{new_sgs_model, ModelContext, SgsModel, MODEL_TYPES};
    pub use crate::numerics::fvc;
    pub use crate::transport::{Newtonian, TransportModel};
}
