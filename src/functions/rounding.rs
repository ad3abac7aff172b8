use crate::registry::Builtin;
use calc_macros::builtin;

pub(super) static BUILTINS: &[&Builtin] = &[
    &FLOOR,
    &CEILING,
    &ROUND,
    &TRUNCATE,
    &BIT_INCREMENT,
    &BIT_DECREMENT,
];

#[builtin(name = "Floor")]
fn floor(d: f64) -> f64 {
    d.floor()
}

#[builtin(name = "Ceiling")]
fn ceiling(a: f64) -> f64 {
    a.ceil()
}

/// Rounds half-way cases to the nearest even integer.
#[builtin(name = "Round")]
fn round(a: f64) -> f64 {
    a.round_ties_even()
}

#[builtin(name = "Truncate")]
fn truncate(d: f64) -> f64 {
    d.trunc()
}

/// Smallest value that compares greater than `x`.
#[builtin(name = "BitIncrement")]
fn bit_increment(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }

    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits + 1 } else { bits - 1 })
}

/// Largest value that compares less than `x`.
#[builtin(name = "BitDecrement")]
fn bit_decrement(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return x;
    }
    if x == 0.0 {
        return -f64::from_bits(1);
    }

    let bits = x.to_bits();
    f64::from_bits(if x > 0.0 { bits - 1 } else { bits + 1 })
}
