//! Mathematical utilities

use std::f64::consts::PI;

/// Upper bound on the number of AGM steps. Convergence is quadratic, so a
/// well-formed argument needs fewer than ten.
const MAX_AGM_ITERATIONS: usize = 64;

/// Computes the complete elliptic integrals of first and second kind, `(K(m), E(m))`.
///
/// The argument is the elliptic _parameter_ `m = k^2`, the same convention as
/// `scipy.special.ellipk`/`ellipe`, not the modulus `k`.
/// The integrals are evaluated with the arithmetic-geometric mean, see
/// Carlson, B. C. (1995). "Numerical Computation of Real or Complex Elliptic Integrals". Numerical Algorithms. 10 (1): 13–26.
///
/// # Arguments
///
/// `m`: parameter of the elliptic integrals, `0 <= m <= 1`. For `m >= 1` the
/// limit `(inf, 1)` is returned.
pub fn ellip_ke(m: f64) -> (f64, f64) {
    if m >= 1.0 {
        return (f64::INFINITY, 1.0);
    }

    let tolerance = f64::EPSILON.sqrt();
    let mut a = 1.;
    let mut g = (1. - m).sqrt();
    let mut c = m.sqrt();
    let mut power2_acc = 0.5;
    let mut c_acc = power2_acc * c.powi(2);
    for _ in 0..MAX_AGM_ITERATIONS {
        let a_new = (a + g) / 2.;
        let g_new = (a * g).sqrt();
        let c_new = c.powi(2) / 4. / a_new;
        power2_acc *= 2.;
        c_acc += power2_acc * c_new.powi(2);
        let agm_converged = (a_new - a).abs() <= tolerance * a_new;

        a = a_new;
        g = g_new;
        c = c_new;
        if agm_converged {
            break;
        }
    }
    let ellip_k = PI / 2. / a;
    let ellip_e = ellip_k * (1. - c_acc);
    (ellip_k, ellip_e)
}

/// Rounds `value` to the nearest multiple of `precision`.
pub fn snap(value: f64, precision: f64) -> f64 {
    (value / precision).round() * precision
}
