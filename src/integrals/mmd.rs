//! McMurchie-Davidson evaluation of the one-electron operators over
//! contracted Cartesian Gaussians.
//! Reference:
//!
//! [1] Goings, J. Integrals. https://joshuagoings.com/2017/04/28/integrals/

use nalgebra::Vector3;

use crate::atom::PointCharge;
use crate::basis::{ContractedGaussian, Gaussian};

use super::utils::{coulomb_auxiliary, hermite_expansion};

/// Gaussian-product significance bound for one primitive pair. Pairs below
/// `precision` are skipped; this trades accuracy for cost without changing
/// the output shape.
fn significance(a: Gaussian, b: Gaussian, diff: Vector3<f64>) -> f64 {
    let p = a.exponent + b.exponent;
    let q = a.exponent * b.exponent / p;

    (a.coefficient * b.coefficient).abs()
        * (-q * diff.norm_squared()).exp()
        * (std::f64::consts::PI / p).powi(3).sqrt()
}

pub(crate) fn contracted_overlap(
    a: &ContractedGaussian,
    pos_a: Vector3<f64>,
    b: &ContractedGaussian,
    pos_b: Vector3<f64>,
    precision: f64,
) -> f64 {
    let diff = pos_a - pos_b;

    let mut output = 0.0;
    for (&primitive_a, &primitive_b) in itertools::iproduct!(&a.0, &b.0) {
        if significance(primitive_a, primitive_b, diff) < precision {
            continue;
        }
        output += primitive_a.coefficient
            * primitive_b.coefficient
            * primitive_overlap(primitive_a, primitive_b, diff);
    }
    output
}

pub(crate) fn contracted_kinetic(
    a: &ContractedGaussian,
    pos_a: Vector3<f64>,
    b: &ContractedGaussian,
    pos_b: Vector3<f64>,
    precision: f64,
) -> f64 {
    let diff = pos_a - pos_b;

    let mut output = 0.0;
    for (&primitive_a, &primitive_b) in itertools::iproduct!(&a.0, &b.0) {
        if significance(primitive_a, primitive_b, diff) < precision {
            continue;
        }
        output += primitive_a.coefficient
            * primitive_b.coefficient
            * primitive_kinetic(primitive_a, primitive_b, diff);
    }
    output
}

/// Every point charge contributes to every primitive pair; the charge loop
/// sits inside the pair loop so the significance test runs once per pair.
pub(crate) fn contracted_nuclear(
    a: &ContractedGaussian,
    pos_a: Vector3<f64>,
    b: &ContractedGaussian,
    pos_b: Vector3<f64>,
    charges: &[PointCharge],
    precision: f64,
) -> f64 {
    let diff = pos_a - pos_b;

    let mut output = 0.0;
    for (&primitive_a, &primitive_b) in itertools::iproduct!(&a.0, &b.0) {
        if significance(primitive_a, primitive_b, diff) < precision {
            continue;
        }

        let center = product_center(pos_a, primitive_a.exponent, pos_b, primitive_b.exponent);
        for charge in charges {
            output += primitive_a.coefficient
                * primitive_b.coefficient
                * primitive_nuclear(primitive_a, primitive_b, diff, center, charge);
        }
    }
    output
}

fn primitive_overlap(primitive_a: Gaussian, primitive_b: Gaussian, diff: Vector3<f64>) -> f64 {
    let Gaussian {
        exponent: exp_a,
        angular: (l1, m1, n1),
        ..
    } = primitive_a;

    let Gaussian {
        exponent: exp_b,
        angular: (l2, m2, n2),
        ..
    } = primitive_b;

    hermite_expansion([l1, l2, 0], diff.x, exp_a, exp_b)
        * hermite_expansion([m1, m2, 0], diff.y, exp_a, exp_b)
        * hermite_expansion([n1, n2, 0], diff.z, exp_a, exp_b)
        * (std::f64::consts::PI / (exp_a + exp_b)).powi(3).sqrt()
}

fn primitive_kinetic(primitive_a: Gaussian, primitive_b: Gaussian, diff: Vector3<f64>) -> f64 {
    let Gaussian {
        exponent: b_exp,
        angular: (l, m, n),
        ..
    } = primitive_b;

    let angular_step =
        |i, j, k| primitive_overlap(primitive_a, add_angular(primitive_b, [i, j, k]), diff);

    let term_0 =
        b_exp * (2 * (l + m + n) + 3) as f64 * primitive_overlap(primitive_a, primitive_b, diff);
    let term_1 = -2.0
        * b_exp.powi(2)
        * (angular_step(2, 0, 0) + angular_step(0, 2, 0) + angular_step(0, 0, 2));
    let term_2 = -0.5
        * ((l * (l - 1)) as f64 * angular_step(-2, 0, 0)
            + (m * (m - 1)) as f64 * angular_step(0, -2, 0)
            + (n * (n - 1)) as f64 * angular_step(0, 0, -2));
    term_0 + term_1 + term_2
}

fn primitive_nuclear(
    primitive_a: Gaussian,
    primitive_b: Gaussian,
    // difference of the positions of the two basis functions: a - b
    diff: Vector3<f64>,
    // the product center of the two primitives
    product_center: Vector3<f64>,
    charge: &PointCharge,
) -> f64 {
    let Gaussian {
        exponent: a,
        angular: (l1, m1, n1),
        ..
    } = primitive_a;

    let Gaussian {
        exponent: b,
        angular: (l2, m2, n2),
        ..
    } = primitive_b;

    let p = a + b;
    let pc = product_center - charge.position;

    let mut sum = 0.0;
    for (t, u, v) in itertools::iproduct!(0..=l1 + l2, 0..=m1 + m2, 0..=n1 + n2) {
        let e1 = hermite_expansion([l1, l2, t], diff.x, a, b);
        let e2 = hermite_expansion([m1, m2, u], diff.y, a, b);
        let e3 = hermite_expansion([n1, n2, v], diff.z, a, b);
        sum += e1 * e2 * e3 * coulomb_auxiliary(t, u, v, 0, p, pc);
    }
    (-charge.charge * std::f64::consts::TAU / p) * sum
}

#[inline(always)]
fn add_angular(gaussian: Gaussian, [i, j, k]: [i32; 3]) -> Gaussian {
    let Gaussian {
        angular: (l, m, n), ..
    } = gaussian;

    Gaussian {
        angular: (l + i, m + j, n + k),
        ..gaussian
    }
}

#[inline(always)]
fn product_center(
    a_pos: Vector3<f64>,
    a_exp: f64,
    b_pos: Vector3<f64>,
    b_exp: f64,
) -> Vector3<f64> {
    (a_exp * a_pos + b_exp * b_pos) / (a_exp + b_exp)
}
