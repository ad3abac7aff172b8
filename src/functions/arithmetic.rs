use crate::registry::Builtin;
use calc_macros::builtin;

pub(super) static BUILTINS: &[&Builtin] = &[
    &ABS,
    &SIGN,
    &COPYSIGN,
    &MAX,
    &MIN,
    &MAX_MAGNITUDE,
    &MIN_MAGNITUDE,
    &FUSED_MULTIPLY_ADD,
    &IEEE_REMAINDER,
];

#[builtin(name = "Abs")]
fn abs(value: f64) -> f64 {
    value.abs()
}

/// -1, 0 or 1. Unlike `f64::signum`, zero maps to zero; NaN stays NaN.
#[builtin(name = "Sign")]
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[builtin(name = "CopySign")]
fn copysign(x: f64, y: f64) -> f64 {
    x.copysign(y)
}

/// NaN-propagating maximum that orders -0 below +0.
#[builtin(name = "Max")]
fn max(val1: f64, val2: f64) -> f64 {
    if val1 != val2 {
        if val1.is_nan() {
            return val1;
        }
        return if val2 < val1 { val1 } else { val2 };
    }
    if val2.is_sign_negative() {
        val1
    } else {
        val2
    }
}

/// NaN-propagating minimum that orders -0 below +0.
#[builtin(name = "Min")]
fn min(val1: f64, val2: f64) -> f64 {
    if val1 != val2 {
        if val1.is_nan() {
            return val1;
        }
        return if val1 < val2 { val1 } else { val2 };
    }
    if val1.is_sign_negative() {
        val1
    } else {
        val2
    }
}

#[builtin(name = "MaxMagnitude")]
fn max_magnitude(x: f64, y: f64) -> f64 {
    let (ax, ay) = (x.abs(), y.abs());
    if ax > ay || ax.is_nan() {
        return x;
    }
    if ax == ay {
        return if x.is_sign_negative() { y } else { x };
    }
    y
}

#[builtin(name = "MinMagnitude")]
fn min_magnitude(x: f64, y: f64) -> f64 {
    let (ax, ay) = (x.abs(), y.abs());
    if ax < ay || ax.is_nan() {
        return x;
    }
    if ax == ay {
        return if x.is_sign_negative() { x } else { y };
    }
    y
}

#[builtin(name = "FusedMultiplyAdd")]
fn fused_multiply_add(x: f64, y: f64, z: f64) -> f64 {
    x.mul_add(y, z)
}

/// Remainder of `x / y` where the quotient is rounded to the nearest integer,
/// ties to even. The result lies in `[-|y|/2, |y|/2]`.
#[builtin(name = "IEEERemainder")]
fn ieee_remainder(x: f64, y: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    if y.is_nan() {
        return y;
    }

    let regular = x % y;
    if regular.is_nan() {
        return f64::NAN;
    }
    if regular == 0.0 && x.is_sign_negative() {
        return -0.0;
    }

    let alternative = regular - y.abs() * sign(x);
    if alternative.abs() == regular.abs() {
        let quotient = x / y;
        let rounded = quotient.round_ties_even();
        return if rounded.abs() > quotient.abs() {
            alternative
        } else {
            regular
        };
    }

    if alternative.abs() < regular.abs() {
        alternative
    } else {
        regular
    }
}
