use crate::registry::Builtin;
use calc_macros::builtin;

pub(super) static BUILTINS: &[&Builtin] = &[
    &EXP,
    &LOG,
    &LOG_BASE,
    &LOG10,
    &LOG2,
    &POW,
    &SQRT,
    &CBRT,
    &ILOGB,
    &RECIPROCAL_ESTIMATE,
    &RECIPROCAL_SQRT_ESTIMATE,
];

#[builtin(name = "Exp")]
fn exp(d: f64) -> f64 {
    d.exp()
}

#[builtin(name = "Log")]
fn log(d: f64) -> f64 {
    d.ln()
}

#[builtin(name = "Log")]
fn log_base(a: f64, new_base: f64) -> f64 {
    if a.is_nan() {
        return a;
    }
    if new_base.is_nan() {
        return new_base;
    }
    if new_base == 1.0 {
        return f64::NAN;
    }
    if a != 1.0 && (new_base == 0.0 || new_base == f64::INFINITY) {
        return f64::NAN;
    }
    a.ln() / new_base.ln()
}

#[builtin(name = "Log10")]
fn log10(d: f64) -> f64 {
    d.log10()
}

#[builtin(name = "Log2")]
fn log2(x: f64) -> f64 {
    x.log2()
}

#[builtin(name = "Pow")]
fn pow(x: f64, y: f64) -> f64 {
    x.powf(y)
}

#[builtin(name = "Sqrt")]
fn sqrt(d: f64) -> f64 {
    d.sqrt()
}

#[builtin(name = "Cbrt")]
fn cbrt(d: f64) -> f64 {
    d.cbrt()
}

/// Unbiased binary exponent of `x`. Integral, widened to f64 by the registry.
#[builtin(name = "ILogB")]
fn ilogb(x: f64) -> i32 {
    if x == 0.0 {
        return i32::MIN;
    }
    if !x.is_finite() {
        return i32::MAX;
    }

    let bits = x.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    if exponent == 0 {
        // subnormal: value is mantissa * 2^-1074
        let mantissa = bits & ((1u64 << 52) - 1);
        -1011 - mantissa.leading_zeros() as i32
    } else {
        exponent - 1023
    }
}

#[builtin(name = "ReciprocalEstimate")]
fn reciprocal_estimate(d: f64) -> f64 {
    1.0 / d
}

#[builtin(name = "ReciprocalSqrtEstimate")]
fn reciprocal_sqrt_estimate(d: f64) -> f64 {
    1.0 / d.sqrt()
}
