/// Logistic sigmoid `1 / (1 + e^-x)`.
///
/// Branches on the sign of `x` so the exponential never receives a large
/// positive argument.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Heaviside step: `1.0` for `x >= 0`, else `0.0`.
pub fn step(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        0.0
    }
}
