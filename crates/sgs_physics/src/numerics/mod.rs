// crates/sgs_physics/src/numerics/mod.rs

//! 数值算子
//!
//! - [`fvc`]: 显式有限体积算子（插值、平均、梯度、拉普拉斯、面求和）

pub mod fvc;
