// crates/sgs_physics/tests/dynamic_coefficients.rs
//!
//! 动态系数估计与 SGS 场更新的性质测试
//!
//! 覆盖：逐单元参考值、粘性截断不变量、零应变、退化分母、估计幂等、
//! 恒等滤波器、均匀速度、k 不截断、导出量一致性。

use glam::{DMat3, DVec3};
use sgs_config::{LesProperties, ModelCoeffs, StaticConfigSource};
use sgs_foundation::{tensor, SgsResult, SymmTensor, VSMALL};
use sgs_mesh::{BoxMeshGenerator, FvMesh};
use sgs_physics::fields::algebra::{dev, symm};
use sgs_physics::prelude::*;
use sgs_physics::{CellViscosity, DynLocalAverageSmagorinsky};
use std::f64::consts::PI;
use std::sync::Arc;

const NU: f64 = 1e-5;

// ============================================================
// 辅助
// ============================================================

fn periodic_box(n: usize) -> Arc<FvMesh> {
    Arc::new(
        BoxMeshGenerator::new(n, n, n)
            .with_lengths(2.0 * PI, 2.0 * PI, 2.0 * PI)
            .build()
            .unwrap(),
    )
}

/// 边长为 2 的幂的盒子，线性插值权重精确为 1/2
fn dyadic_box(n: usize) -> Arc<FvMesh> {
    Arc::new(BoxMeshGenerator::new(n, n, n).build().unwrap())
}

/// Taylor–Green 涡叠加确定性扰动
fn taylor_green(mesh: &Arc<FvMesh>, perturbation: f64) -> VolVectorField {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((seed >> 33) as f64) / (u32::MAX as f64) - 0.5
    };
    let values = mesh
        .cell_centres()
        .iter()
        .map(|c| {
            DVec3::new(
                c.x.sin() * c.y.cos() * c.z.cos(),
                -c.x.cos() * c.y.sin() * c.z.cos(),
                0.0,
            ) + DVec3::new(next(), next(), next()) * perturbation
        })
        .collect();
    VolVectorField::from_internal("U", mesh, values).unwrap()
}

fn properties(filter: &str) -> LesProperties {
    let mut props = LesProperties::default().with_filter(filter);
    props.print_coeffs = false;
    if filter == "laplace" {
        props.coeffs.width_coeff = Some(2.0);
    }
    props
}

fn build(velocity: &VolVectorField, props: LesProperties) -> SgsResult<DynLocalAverageSmagorinsky> {
    let mesh = velocity.mesh();
    let transport = Arc::new(Newtonian::new(mesh, NU)?);
    let config = Arc::new(StaticConfigSource::new(props));
    let fields = FieldRepository::new().uniform_scalar("k", 0.0);
    let ctx = ModelContext::new(velocity, transport, config, &fields);
    DynLocalAverageSmagorinsky::new(&ctx)
}

fn build_with_filter(
    velocity: &VolVectorField,
    filter: Box<dyn LesFilter>,
) -> DynLocalAverageSmagorinsky {
    let mesh = velocity.mesh();
    let transport = Arc::new(Newtonian::new(mesh, NU).unwrap());
    let config = Arc::new(StaticConfigSource::new(properties("simple")));
    let fields = FieldRepository::new().uniform_scalar("k", 0.0);
    let ctx = ModelContext::new(velocity, transport, config, &fields);
    DynLocalAverageSmagorinsky::with_filter(&ctx, filter).unwrap()
}

fn zero_strain(mesh: &Arc<FvMesh>) -> VolSymmTensorField {
    let zero = VolTensorField::uniform("gradU", mesh, DMat3::ZERO, BoundaryCondition::ZeroGradient);
    dev(&symm(&zero))
}

/// 单元值与边界面值，逐元素运算同时作用于两者
#[derive(Debug, Clone)]
struct Raw<T> {
    cells: Vec<T>,
    boundary: Vec<T>,
}

impl<T: FieldValue> Raw<T> {
    fn of(field: &VolField<T>) -> Self {
        Self {
            cells: field.internal().to_vec(),
            boundary: field.boundary().to_vec(),
        }
    }

    fn map<U: FieldValue>(&self, f: impl Fn(T) -> U) -> Raw<U> {
        Raw {
            cells: self.cells.iter().map(|&v| f(v)).collect(),
            boundary: self.boundary.iter().map(|&v| f(v)).collect(),
        }
    }

    fn zip<U: FieldValue, V: FieldValue>(&self, other: &Raw<U>, f: impl Fn(T, U) -> V) -> Raw<V> {
        Raw {
            cells: self.cells.iter().zip(&other.cells).map(|(&a, &b)| f(a, b)).collect(),
            boundary: self
                .boundary
                .iter()
                .zip(&other.boundary)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// 面积加权面平均，直接由网格几何计算；边界值不变
    fn face_average(&self, mesh: &FvMesh) -> Self {
        let n_internal = mesh.n_internal_faces();
        let cells = mesh
            .cells()
            .map(|cell| {
                let mut sum = T::ZERO;
                let mut total = 0.0;
                for &face in mesh.cell_faces(cell) {
                    let value = match mesh.neighbour(face) {
                        Some(n) => {
                            let w = mesh.weight(face);
                            self.cells[mesh.owner(face)] * w + self.cells[n] * (1.0 - w)
                        }
                        None => self.boundary[face - n_internal],
                    };
                    sum = sum + value * mesh.mag_sf(face);
                    total += mesh.mag_sf(face);
                }
                sum * (1.0 / total)
            })
            .collect();
        Self {
            cells,
            boundary: self.boundary.clone(),
        }
    }

    /// 边界值取 owner 单元值
    fn zero_gradient(mut self, mesh: &FvMesh) -> Self {
        for bf in 0..mesh.n_boundary_faces() {
            self.boundary[bf] = self.cells[mesh.boundary_owner(bf)];
        }
        self
    }
}

/// 简单滤波器的参考实现
fn simple_filter<T: FieldValue>(mesh: &FvMesh, field: &Raw<T>) -> Raw<T> {
    field.face_average(mesh)
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}

fn assert_close(name: &str, actual: &[f64], expected: &[f64], rel: f64) {
    assert_eq!(actual.len(), expected.len());
    let tol = rel * max_abs(expected).max(f64::MIN_POSITIVE);
    for (cell, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= tol, "{} 单元 {}: {} vs {}", name, cell, a, e);
    }
}

/// 返回原场的滤波器
#[derive(Debug)]
struct IdentityFilter;

impl LesFilter for IdentityFilter {
    fn type_name(&self) -> &'static str {
        "identity"
    }
    fn filter_scalar(&self, field: &VolScalarField) -> VolScalarField {
        field.clone()
    }
    fn filter_vector(&self, field: &VolVectorField) -> VolVectorField {
        field.clone()
    }
    fn filter_symm_tensor(&self, field: &VolSymmTensorField) -> VolSymmTensorField {
        field.clone()
    }
    fn read(&mut self, _coeffs: &ModelCoeffs) -> SgsResult<()> {
        Ok(())
    }
}

/// 放大两倍的"滤波器"，使 c_I 为负
#[derive(Debug)]
struct DoublingFilter;

impl LesFilter for DoublingFilter {
    fn type_name(&self) -> &'static str {
        "doubling"
    }
    fn filter_scalar(&self, field: &VolScalarField) -> VolScalarField {
        field * 2.0
    }
    fn filter_vector(&self, field: &VolVectorField) -> VolVectorField {
        field * 2.0
    }
    fn filter_symm_tensor(&self, field: &VolSymmTensorField) -> VolSymmTensorField {
        field * 2.0
    }
    fn read(&mut self, _coeffs: &ModelCoeffs) -> SgsResult<()> {
        Ok(())
    }
}

fn assert_clip_invariant(model: &dyn SgsModel, nu: &VolScalarField) {
    for (cell, (&nu_sgs, &nu)) in model
        .nu_sgs()
        .internal()
        .iter()
        .zip(nu.internal())
        .enumerate()
    {
        assert!(nu_sgs >= -nu, "单元 {}: nuSgs = {} < -nu = {}", cell, nu_sgs, -nu);
    }
    for (bf, &nu_sgs) in model.nu_sgs().boundary().iter().enumerate() {
        assert!(nu_sgs >= -nu.boundary_value(bf), "边界面 {}: nuSgs = {}", bf, nu_sgs);
    }
}

// ============================================================
// 逐单元参考值
// ============================================================

#[test]
fn test_coefficients_match_cellwise_reference() {
    let mesh = periodic_box(8);
    let u = taylor_green(&mesh, 0.3);
    let mut model = build(&u, properties("simple")).unwrap();
    let grad_u = fvc::grad(&u);
    let d = dev(&symm(&grad_u));

    // 输入：U 零梯度，D 与 Δ 边界取 owner 值
    let u_raw = Raw::of(&u);
    let d_raw = Raw::of(&d);
    let delta_sqr = Raw::of(model.delta()).map(|v| v * v);

    // c_D
    let filtered_u = simple_filter(&mesh, &u_raw).zero_gradient(&mesh);
    let ll = simple_filter(&mesh, &u_raw.map(tensor::sqr))
        .zip(&filtered_u.map(tensor::sqr), |a: SymmTensor, b| (a - b).dev());
    let filtered_d = simple_filter(&mesh, &d_raw);
    let mm = delta_sqr.zip(
        &simple_filter(&mesh, &d_raw.map(|v: SymmTensor| v * v.mag()))
            .zip(&filtered_d, |a, fd: SymmTensor| a - fd * (4.0 * fd.mag())),
        |ds, t| t * ds,
    );
    let mmmm = mm.map(|t: SymmTensor| t.mag_sqr()).face_average(&mesh);
    let llmm = ll.zip(&mm, |a: SymmTensor, b| a.double_dot(&b)).face_average(&mesh);
    let c_d_ref: Vec<f64> = llmm
        .cells
        .iter()
        .zip(&mmmm.cells)
        .map(|(n, m)| n / m.max(VSMALL))
        .collect();

    // c_I
    let kk = simple_filter(&mesh, &u_raw.map(|v: DVec3| v.length_squared()))
        .zip(&filtered_u, |a, fu: DVec3| 0.5 * (a - fu.length_squared()));
    let filtered_d_sqr = simple_filter(&mesh, &d_raw.map(|v: SymmTensor| v.mag_sqr()));
    let mm_scalar = delta_sqr.zip(
        &filtered_d.zip(&filtered_d_sqr, |fd: SymmTensor, a: f64| 4.0 * fd.mag_sqr() - a),
        |ds, m| ds * m,
    );
    let mm_sqr = mm_scalar.map(|m| m * m).face_average(&mesh);
    let kkmm = kk.zip(&mm_scalar, |a, b| a * b).face_average(&mesh);
    let c_i_ref: Vec<f64> = kkmm
        .cells
        .iter()
        .zip(&mm_sqr.cells)
        .map(|(n, m)| n / m.max(VSMALL))
        .collect();

    assert!(max_abs(&c_d_ref) > 0.0);
    assert!(max_abs(&c_i_ref) > 0.0);
    assert_close("cD", model.c_d(&u, &d).internal(), &c_d_ref, 1e-9);
    assert_close("cI", model.c_i(&u, &d).internal(), &c_i_ref, 1e-9);

    model.correct(&u, &grad_u).unwrap();

    let k_ref: Vec<f64> = mesh
        .cells()
        .map(|c| c_i_ref[c] * delta_sqr.cells[c] * d_raw.cells[c].mag_sqr())
        .collect();
    assert_close("k", model.k().internal(), &k_ref, 1e-9);

    let nu_sgs_ref: Vec<f64> = mesh
        .cells()
        .map(|c| (c_d_ref[c] * delta_sqr.cells[c] * d_raw.cells[c].mag()).max(-NU))
        .collect();
    assert_close("nuSgs", model.nu_sgs().internal(), &nu_sgs_ref, 1e-9);

    // 负 c_D 的单元被截断到 −ν
    let clipped = model.nu_sgs().internal().iter().filter(|&&v| v == -NU).count();
    assert!(clipped > 0, "没有单元被截断");
    assert!(clipped < mesh.n_cells());
    let nu = VolScalarField::uniform("nu", &mesh, NU, BoundaryCondition::ZeroGradient);
    assert_clip_invariant(&model, &nu);
}

// ============================================================
// 截断不变量
// ============================================================

#[test]
fn test_clip_invariant_after_construction_and_correct() {
    let mesh = periodic_box(8);
    for filter in ["simple", "laplace"] {
        let u = taylor_green(&mesh, 0.3);
        let mut model = build(&u, properties(filter)).unwrap();
        let nu = VolScalarField::uniform("nu", &mesh, NU, BoundaryCondition::ZeroGradient);
        assert_clip_invariant(&model, &nu);

        for step in 0..3 {
            let u = taylor_green(&mesh, 0.1 * (step + 1) as f64);
            model.correct(&u, &fvc::grad(&u)).unwrap();
            assert_clip_invariant(&model, &nu);
            assert!(model.nu_sgs().is_finite());
            assert!(model.k().is_finite());
        }
    }
}

#[test]
fn test_clip_invariant_with_varying_viscosity() {
    let mesh = periodic_box(6);
    let u = taylor_green(&mesh, 0.5);
    let nu_values: Vec<f64> = (0..mesh.n_cells()).map(|c| 1e-6 * (1 + c % 7) as f64).collect();
    let nu = VolScalarField::from_internal("nu", &mesh, nu_values).unwrap();

    let transport = Arc::new(CellViscosity::new(nu.clone()).unwrap());
    let config = Arc::new(StaticConfigSource::new(properties("simple")));
    let fields = FieldRepository::new().uniform_scalar("k", 0.0);
    let ctx = ModelContext::new(&u, transport, config, &fields);
    let mut model = DynLocalAverageSmagorinsky::new(&ctx).unwrap();

    model.correct(&u, &fvc::grad(&u)).unwrap();
    assert_clip_invariant(&model, &nu);
    assert!(model.nu_eff().min() >= 0.0);
}

// ============================================================
// 零应变与退化分母
// ============================================================

#[test]
fn test_zero_strain_gives_zero_viscosity_and_energy() {
    let mesh = periodic_box(6);
    let u = taylor_green(&mesh, 0.2);
    let mut model = build(&u, properties("simple")).unwrap();

    let zero_grad =
        VolTensorField::uniform("gradU", &mesh, DMat3::ZERO, BoundaryCondition::ZeroGradient);
    model.correct(&u, &zero_grad).unwrap();

    assert!(model.nu_sgs().internal().iter().all(|&v| v == 0.0));
    assert!(model.k().internal().iter().all(|&v| v == 0.0));
    assert!(model.epsilon().internal().iter().all(|&v| v == 0.0));
}

#[test]
fn test_degenerate_denominator_gives_finite_coefficients() {
    let mesh = periodic_box(6);
    let u = taylor_green(&mesh, 0.2);
    let model = build(&u, properties("laplace")).unwrap();

    let d = zero_strain(&mesh);
    let c_d = model.c_d(&u, &d);
    let c_i = model.c_i(&u, &d);
    assert!(c_d.is_finite());
    assert!(c_i.is_finite());
    assert!(c_d.internal().iter().all(|&v| v == 0.0));
    assert!(c_i.internal().iter().all(|&v| v == 0.0));
}

// ============================================================
// 幂等与无缓存
// ============================================================

#[test]
fn test_estimator_is_idempotent() {
    let mesh = periodic_box(6);
    let u = taylor_green(&mesh, 0.3);
    let model = build(&u, properties("simple")).unwrap();
    let d = dev(&symm(&fvc::grad(&u)));

    let first = model.c_d(&u, &d);
    let second = model.c_d(&u, &d);
    assert_eq!(first.internal(), second.internal());

    let first = model.c_i(&u, &d);
    let second = model.c_i(&u, &d);
    assert_eq!(first.internal(), second.internal());
}

#[test]
fn test_correct_depends_only_on_current_inputs() {
    let mesh = periodic_box(6);
    let u1 = taylor_green(&mesh, 0.1);
    let u2 = taylor_green(&mesh, 0.6);
    let mut a = build(&u1, properties("simple")).unwrap();
    let mut b = build(&u1, properties("simple")).unwrap();

    // a 先经历 u2，再回到 u1；b 直接用 u1
    a.correct(&u2, &fvc::grad(&u2)).unwrap();
    a.correct(&u1, &fvc::grad(&u1)).unwrap();
    b.correct(&u1, &fvc::grad(&u1)).unwrap();

    assert_eq!(a.nu_sgs().internal(), b.nu_sgs().internal());
    assert_eq!(a.k().internal(), b.k().internal());
}

// ============================================================
// 恒等滤波器与均匀速度
// ============================================================

#[test]
fn test_identity_filter_gives_zero_coefficients() {
    let mesh = periodic_box(6);
    let u = taylor_green(&mesh, 0.3);
    let mut model = build_with_filter(&u, Box::new(IdentityFilter));
    assert_eq!(model.filter().type_name(), "identity");

    let grad_u = fvc::grad(&u);
    let d = dev(&symm(&grad_u));
    assert!(model.c_d(&u, &d).internal().iter().all(|&v| v == 0.0));
    assert!(model.c_i(&u, &d).internal().iter().all(|&v| v == 0.0));

    model.correct(&u, &grad_u).unwrap();
    assert!(model.nu_sgs().internal().iter().all(|&v| v == 0.0));
    assert!(model.k().internal().iter().all(|&v| v == 0.0));
}

#[test]
fn test_uniform_velocity_end_to_end() {
    let mesh = dyadic_box(4);
    let u = VolVectorField::uniform(
        "U",
        &mesh,
        DVec3::new(1.0, -2.0, 0.5),
        BoundaryCondition::ZeroGradient,
    );
    for filter in ["simple", "laplace"] {
        let mut model = build(&u, properties(filter)).unwrap();
        let grad_u = fvc::grad(&u);
        assert!(grad_u.internal().iter().all(|g| *g == DMat3::ZERO));

        model.correct(&u, &grad_u).unwrap();
        assert!(model.nu_sgs().internal().iter().all(|&v| v == 0.0));
        assert!(model.k().internal().iter().all(|&v| v == 0.0));
        assert!(model.nu_sgs().boundary().iter().all(|&v| v == 0.0));
    }
}

// ============================================================
// k 不截断
// ============================================================

#[test]
fn test_negative_k_is_not_clipped() {
    let mesh = periodic_box(6);
    let u = taylor_green(&mesh, 0.0);
    let mut model = build_with_filter(&u, Box::new(DoublingFilter));
    model.correct(&u, &fvc::grad(&u)).unwrap();

    // 放大滤波器使 KK < 0、mm > 0，k 保持负值
    assert!(model.k().min() < 0.0);
    let nu = VolScalarField::uniform("nu", &mesh, NU, BoundaryCondition::ZeroGradient);
    assert_clip_invariant(&model, &nu);

    // ε 在负 k 上取 0 而不是 NaN
    let epsilon = model.epsilon();
    assert!(epsilon.is_finite());
    assert!(epsilon.min() >= 0.0);
}

// ============================================================
// 导出量
// ============================================================

#[test]
fn test_derived_quantities_are_consistent() {
    let mesh = periodic_box(6);
    let u = taylor_green(&mesh, 0.2);
    let mut model = build(&u, properties("simple")).unwrap();
    model.correct(&u, &fvc::grad(&u)).unwrap();

    let nu_eff = model.nu_eff();
    let b = model.b();
    let dev_beff = model.dev_beff();
    for cell in mesh.cells() {
        let nu_sgs = model.nu_sgs().value(cell);
        assert!((nu_eff.value(cell) - (nu_sgs + NU)).abs() < 1e-15);

        // D 无迹，tr(B) = 2k
        let k = model.k().value(cell);
        assert!((b.value(cell).tr() - 2.0 * k).abs() <= 1e-12 * (1.0 + k.abs()));
        assert!(dev_beff.value(cell).tr().abs() < 1e-12);

        let expected = model.strain_rate().value(cell) * (-2.0 * nu_eff.value(cell));
        assert!((dev_beff.value(cell) - expected).mag() < 1e-14);
    }
    assert_eq!(model.delta().name(), "delta");
}
