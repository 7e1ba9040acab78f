// crates/sgs_foundation/src/lib.rs

//! SGS Foundation Layer
//!
//! 基础层，提供整个工作区共享的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型 [`SgsError`]
//! - [`constants`]: 数值下限常量（`VSMALL`、`SMALL`）
//! - [`tensor`]: 对称张量与张量代数原语（`dev`、`symm`、`sqr`、双点积、模）
//!
//! # 示例
//!
//! ```
//! use sgs_foundation::tensor::{sqr, SymmTensor};
//! use glam::DVec3;
//!
//! let uu = sqr(DVec3::new(1.0, 2.0, 0.0));
//! assert_eq!(uu.xy, 2.0);
//! assert!(uu.dev().tr().abs() < 1e-14);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constants;
pub mod error;
pub mod tensor;

// 重导出常用类型
pub use constants::{SMALL, VSMALL};
pub use error::{SgsError, SgsResult};
pub use tensor::{SymmTensor, Tensor, Vector};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::constants::{SMALL, VSMALL};
    pub use crate::error::{SgsError, SgsResult};
    pub use crate::tensor::{outer, sqr, symm, two_symm, SymmTensor, Tensor, TensorExt, Vector};
}
