// crates/sgs_physics/src/delta.rs

//! LES 滤波宽度 Δ
//!
//! | 类型 | 定义 |
//! |------|------|
//! | `cubeRootVol` | `Δ = c·V^{1/3}` |
//! | `maxDeltaxyz` | `Δ = c·max_f 2·|n̂_f·(C_f − C_P)|` |
//!
//! 其中 `c` 为 `deltaCoeff`。

use rayon::prelude::*;
use sgs_config::DeltaConfig;
use sgs_foundation::{SgsError, SgsResult};
use sgs_mesh::FvMesh;
use std::sync::Arc;

use crate::fields::VolScalarField;

/// 已注册的滤波宽度类型
pub const DELTA_TYPES: &[&str] = &["cubeRootVol", "maxDeltaxyz"];

/// 滤波宽度类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    /// 单元体积立方根
    CubeRootVol,
    /// 单元中心到各面距离的最大两倍值
    MaxDeltaxyz,
}

impl DeltaKind {
    /// 按名称解析
    pub fn parse(name: &str) -> SgsResult<Self> {
        match name {
            "cubeRootVol" => Ok(Self::CubeRootVol),
            "maxDeltaxyz" => Ok(Self::MaxDeltaxyz),
            other => Err(SgsError::unknown_delta(other, DELTA_TYPES)),
        }
    }

    /// 名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::CubeRootVol => "cubeRootVol",
            Self::MaxDeltaxyz => "maxDeltaxyz",
        }
    }
}

/// LES 滤波宽度
#[derive(Debug, Clone)]
pub struct LesDelta {
    kind: DeltaKind,
    delta_coeff: f64,
    mesh: Arc<FvMesh>,
    field: VolScalarField,
}

impl LesDelta {
    /// 按配置创建并计算
    pub fn new(mesh: &Arc<FvMesh>, config: &DeltaConfig) -> SgsResult<Self> {
        let kind = DeltaKind::parse(&config.kind)?;
        let field = compute(mesh, kind, config.delta_coeff);
        Ok(Self {
            kind,
            delta_coeff: config.delta_coeff,
            mesh: Arc::clone(mesh),
            field,
        })
    }

    /// 重新计算（静态网格上结果不变）
    pub fn correct(&mut self) {
        self.field = compute(&self.mesh, self.kind, self.delta_coeff);
    }

    /// 宽度场
    pub fn field(&self) -> &VolScalarField {
        &self.field
    }

    /// 类型
    pub fn kind(&self) -> DeltaKind {
        self.kind
    }

    /// 宽度系数
    pub fn delta_coeff(&self) -> f64 {
        self.delta_coeff
    }
}

fn compute(mesh: &Arc<FvMesh>, kind: DeltaKind, delta_coeff: f64) -> VolScalarField {
    let values: Vec<f64> = match kind {
        DeltaKind::CubeRootVol => mesh
            .cell_volumes()
            .par_iter()
            .map(|v| delta_coeff * v.cbrt())
            .collect(),
        DeltaKind::MaxDeltaxyz => mesh
            .cells()
            .into_par_iter()
            .map(|cell| {
                let centre = mesh.cell_centre(cell);
                let max_dist = mesh
                    .cell_faces(cell)
                    .iter()
                    .map(|&f| {
                        let n = mesh.face_area(f) / mesh.mag_sf(f);
                        2.0 * n.dot(mesh.face_centre(f) - centre).abs()
                    })
                    .fold(0.0_f64, f64::max);
                delta_coeff * max_dist
            })
            .collect(),
    };

    VolScalarField::extrapolated("delta", Arc::clone(mesh), values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sgs_mesh::BoxMeshGenerator;

    fn config(kind: &str, coeff: f64) -> DeltaConfig {
        DeltaConfig {
            kind: kind.to_string(),
            delta_coeff: coeff,
        }
    }

    #[test]
    fn test_cube_root_vol() {
        let mesh = Arc::new(BoxMeshGenerator::new(2, 2, 2).build().unwrap());
        let delta = LesDelta::new(&mesh, &config("cubeRootVol", 1.0)).unwrap();
        assert!(delta.field().internal().iter().all(|&d| (d - 0.5).abs() < 1e-12));
        assert!(delta.field().boundary().iter().all(|&d| (d - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_max_deltaxyz_on_stretched_cells() {
        let mesh = Arc::new(
            BoxMeshGenerator::new(2, 1, 1)
                .with_lengths(1.0, 2.0, 0.25)
                .build()
                .unwrap(),
        );
        let delta = LesDelta::new(&mesh, &config("maxDeltaxyz", 2.0)).unwrap();
        // 单元尺寸 0.5 x 2 x 0.25，最大方向为 2
        assert!(delta.field().internal().iter().all(|&d| (d - 4.0).abs() < 1e-12));
    }

    #[test]
    fn test_unknown_delta_type() {
        let mesh = Arc::new(BoxMeshGenerator::new(1, 1, 1).build().unwrap());
        assert!(matches!(
            LesDelta::new(&mesh, &config("vanDriest", 1.0)),
            Err(SgsError::UnknownDelta { .. })
        ));
    }

    #[test]
    fn test_correct_is_stable() {
        let mesh = Arc::new(BoxMeshGenerator::new(2, 2, 1).build().unwrap());
        let mut delta = LesDelta::new(&mesh, &config("cubeRootVol", 1.5)).unwrap();
        let before = delta.field().internal().to_vec();
        delta.correct();
        assert_eq!(delta.field().internal(), before.as_slice());
        assert_eq!(delta.kind(), DeltaKind::CubeRootVol);
        assert_eq!(delta.delta_coeff(), 1.5);
    }
}
