//! Recurrences shared by the McMurchie-Davidson integral kernels.
//! Reference:
//!
//! [1] Goings, J. Integrals. https://joshuagoings.com/2017/04/28/integrals/

use nalgebra::Vector3;

/// Hermite expansion coefficient E_t^{ij} for the product of two 1-D
/// Gaussians with exponents `a`, `b` separated by `dist` (center of a minus
/// center of b).
pub(crate) fn hermite_expansion([i, j, t]: [i32; 3], dist: f64, a: f64, b: f64) -> f64 {
    let p = a + b;
    let q = a * b / p;

    if t < 0 || t > i + j || i < 0 || j < 0 {
        0.0
    } else if i == 0 && j == 0 && t == 0 {
        (-q * dist * dist).exp()
    } else if j == 0 {
        hermite_expansion([i - 1, j, t - 1], dist, a, b) / (2.0 * p)
            - hermite_expansion([i - 1, j, t], dist, a, b) * q * dist / a
            + hermite_expansion([i - 1, j, t + 1], dist, a, b) * (t + 1) as f64
    } else {
        hermite_expansion([i, j - 1, t - 1], dist, a, b) / (2.0 * p)
            + hermite_expansion([i, j - 1, t], dist, a, b) * q * dist / b
            + hermite_expansion([i, j - 1, t + 1], dist, a, b) * (t + 1) as f64
    }
}

/// Hermite Coulomb auxiliary integral R_{tuv}^{(n)} for a Gaussian with
/// total exponent `p` whose product center sits at `pc` relative to the
/// charge (product center minus charge position).
pub(crate) fn coulomb_auxiliary(t: i32, u: i32, v: i32, n: i32, p: f64, pc: Vector3<f64>) -> f64 {
    if t == 0 && u == 0 && v == 0 {
        (-2.0 * p).powi(n) * boys(n, p * pc.norm_squared())
    } else if t == 0 && u == 0 {
        let mut value = pc.z * coulomb_auxiliary(t, u, v - 1, n + 1, p, pc);
        if v > 1 {
            value += (v - 1) as f64 * coulomb_auxiliary(t, u, v - 2, n + 1, p, pc);
        }
        value
    } else if t == 0 {
        let mut value = pc.y * coulomb_auxiliary(t, u - 1, v, n + 1, p, pc);
        if u > 1 {
            value += (u - 1) as f64 * coulomb_auxiliary(t, u - 2, v, n + 1, p, pc);
        }
        value
    } else {
        let mut value = pc.x * coulomb_auxiliary(t - 1, u, v, n + 1, p, pc);
        if t > 1 {
            value += (t - 1) as f64 * coulomb_auxiliary(t - 2, u, v, n + 1, p, pc);
        }
        value
    }
}

/// The Boys function F_n(x), evaluated by the convergent series
/// F_n(x) = e^{-x} sum_i (2x)^i (2n-1)!!/(2n+2i+1)!! for moderate `x` and by
/// the asymptotic closed form once the exponential tail is below f64
/// resolution. All series terms are positive, so there is no cancellation.
pub(crate) fn boys(n: i32, x: f64) -> f64 {
    debug_assert!(x >= 0.0);

    if x < 1e-13 {
        return 1.0 / (2 * n + 1) as f64;
    }

    if x > 35.0 {
        return double_factorial(2 * n - 1) / (2.0 * x).powi(n)
            * 0.5
            * (std::f64::consts::PI / x).sqrt();
    }

    let mut term = 1.0 / (2 * n + 1) as f64;
    let mut sum = term;
    let mut i = 1;
    loop {
        term *= 2.0 * x / (2 * n + 2 * i + 1) as f64;
        sum += term;
        if term < sum * 1e-17 {
            break;
        }
        i += 1;
    }
    sum * (-x).exp()
}

/// (2k-1)!! with the usual (-1)!! = 1 convention.
fn double_factorial(mut k: i32) -> f64 {
    let mut product = 1.0;
    while k > 1 {
        product *= k as f64;
        k -= 2;
    }
    product
}
