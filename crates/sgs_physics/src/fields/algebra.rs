// crates/sgs_physics/src/fields/algebra.rs

//! 场的逐元素代数
//!
//! 每个函数对单元值与边界值逐一作用，返回 `Calculated` 场。

use sgs_foundation::tensor::{self, SymmTensor};

use super::vol_field::{VolField, VolScalarField, VolSymmTensorField, VolTensorField, VolVectorField};
use super::FieldValue;

/// 模平方场 `magSqr(φ)`
pub fn mag_sqr<T: FieldValue>(field: &VolField<T>) -> VolScalarField {
    field.map(format!("magSqr({})", field.name()), |v| v.magnitude_sqr())
}

/// 模场 `mag(φ)`，张量取 `√(A:A)`
pub fn mag<T: FieldValue>(field: &VolField<T>) -> VolScalarField {
    field.map(format!("mag({})", field.name()), |v| v.magnitude_sqr().sqrt())
}

/// 向量自外积 `U⊗U`
pub fn sqr(field: &VolVectorField) -> VolSymmTensorField {
    field.map(format!("sqr({})", field.name()), tensor::sqr)
}

/// 标量平方
pub fn sqr_scalar(field: &VolScalarField) -> VolScalarField {
    field.map(format!("sqr({})", field.name()), |s| s * s)
}

/// 标量开方
pub fn sqrt(field: &VolScalarField) -> VolScalarField {
    field.map(format!("sqrt({})", field.name()), f64::sqrt)
}

/// 标量幂次
pub fn pow(field: &VolScalarField, exponent: f64) -> VolScalarField {
    field.map(format!("pow({},{})", field.name(), exponent), move |s| s.powf(exponent))
}

/// 偏量部分
pub fn dev(field: &VolSymmTensorField) -> VolSymmTensorField {
    field.map(format!("dev({})", field.name()), |t| t.dev())
}

/// 对称部分
pub fn symm(field: &VolTensorField) -> VolSymmTensorField {
    field.map(format!("symm({})", field.name()), |t| tensor::symm(&t))
}

/// 两倍对称部分
pub fn two_symm(field: &VolTensorField) -> VolSymmTensorField {
    field.map(format!("twoSymm({})", field.name()), |t| tensor::two_symm(&t))
}

/// 双点积 `A && B`
pub fn double_dot(a: &VolSymmTensorField, b: &VolSymmTensorField) -> VolScalarField {
    a.zip_map(b, format!("({}&&{})", a.name(), b.name()), |x, y| x.double_dot(&y))
}

/// 各向同性张量场 `s·I`
pub fn isotropic(field: &VolScalarField) -> VolSymmTensorField {
    field.map(format!("({}*I)", field.name()), SymmTensor::isotropic)
}

/// 逐元素最大值
pub fn max(a: &VolScalarField, b: &VolScalarField) -> VolScalarField {
    a.zip_map(b, format!("max({},{})", a.name(), b.name()), f64::max)
}

/// 逐元素除法
pub fn divide(a: &VolScalarField, b: &VolScalarField) -> VolScalarField {
    a.zip_map(b, format!("({}|{})", a.name(), b.name()), |x, y| x / y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::BoundaryCondition;
    use glam::{DMat3, DVec3};
    use sgs_mesh::{BoxMeshGenerator, FvMesh};
    use std::sync::Arc;

    fn mesh() -> Arc<FvMesh> {
        Arc::new(BoxMeshGenerator::new(2, 1, 1).build().unwrap())
    }

    #[test]
    fn test_vector_products() {
        let mesh = mesh();
        let u = VolVectorField::uniform(
            "U",
            &mesh,
            DVec3::new(1.0, 2.0, 2.0),
            BoundaryCondition::ZeroGradient,
        );
        assert_eq!(mag_sqr(&u).value(0), 9.0);
        assert_eq!(mag(&u).value(1), 3.0);
        let uu = sqr(&u);
        assert_eq!(uu.value(0).yz, 4.0);
        assert!(dev(&uu).value(0).tr().abs() < 1e-14);
    }

    #[test]
    fn test_tensor_parts() {
        let mesh = mesh();
        // (∇U)_xy = 2
        let g = DMat3::from_cols(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::ZERO);
        let grad_u = VolTensorField::uniform("gradU", &mesh, g, BoundaryCondition::ZeroGradient);
        assert_eq!(symm(&grad_u).value(0).xy, 1.0);
        assert_eq!(two_symm(&grad_u).value(0).xy, 2.0);
        let d = symm(&grad_u);
        // 非对角分量在双点积中计两次
        assert_eq!(double_dot(&d, &d).value(0), 2.0);
    }

    #[test]
    fn test_scalar_ops() {
        let mesh = mesh();
        let a = VolScalarField::from_internal("a", &mesh, vec![-4.0, 4.0]).unwrap();
        let b = VolScalarField::uniform("b", &mesh, 2.0, BoundaryCondition::ZeroGradient);
        assert_eq!(max(&a, &b).internal(), &[2.0, 4.0]);
        assert_eq!(divide(&a, &b).internal(), &[-2.0, 2.0]);
        assert_eq!(sqr_scalar(&a).value(0), 16.0);
        assert_eq!(sqrt(&b).value(0), 2.0_f64.sqrt());
        assert!((pow(&b, 1.5).value(1) - 2.0_f64.powf(1.5)).abs() < 1e-14);
        assert_eq!(isotropic(&b).value(0).tr(), 6.0);
        assert!(mag_sqr(&a).boundary().iter().all(|&v| v == 16.0));
    }
}
