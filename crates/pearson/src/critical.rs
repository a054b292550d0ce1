//! Critical values of the chi-square distribution at the 0.05 significance
//! level, for 1 to 20 degrees of freedom.

use crate::{Error, Result};

/// Significance level the critical table is tabulated at.
pub const ALPHA: f64 = 0.05;

/// Largest number of degrees of freedom the table covers.
pub const MAX_DOF: usize = 20;

/// Entry at index `k - 1` is the critical value for `k` degrees of freedom.
const CRITICAL_05: [f64; MAX_DOF] = [
    3.8, 6.0, 7.8, 9.5, 11.1, 12.6, 14.1, 15.5, 16.9, 18.3, //
    19.7, 21.0, 22.4, 23.7, 25.0, 26.3, 27.6, 28.9, 30.1, 31.4,
];

/// Critical chi-square value for `dof` degrees of freedom at [`ALPHA`].
pub fn critical_value(dof: usize) -> Result<f64> {
    CRITICAL_05
        .get(dof.wrapping_sub(1))
        .copied()
        .ok_or(Error::UnsupportedDegreesOfFreedom { dof: dof as i64 })
}
