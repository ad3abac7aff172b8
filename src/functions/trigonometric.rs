use crate::registry::Builtin;
use calc_macros::builtin;

pub(super) static BUILTINS: &[&Builtin] = &[
    &SIN, &COS, &TAN, &ASIN, &ACOS, &ATAN, &ATAN2, &SINH, &COSH, &TANH, &ASINH, &ACOSH, &ATANH,
];

#[builtin(name = "Sin")]
fn sin(a: f64) -> f64 {
    a.sin()
}

#[builtin(name = "Cos")]
fn cos(d: f64) -> f64 {
    d.cos()
}

#[builtin(name = "Tan")]
fn tan(a: f64) -> f64 {
    a.tan()
}

#[builtin(name = "Asin")]
fn asin(d: f64) -> f64 {
    d.asin()
}

#[builtin(name = "Acos")]
fn acos(d: f64) -> f64 {
    d.acos()
}

#[builtin(name = "Atan")]
fn atan(d: f64) -> f64 {
    d.atan()
}

#[builtin(name = "Atan2")]
fn atan2(y: f64, x: f64) -> f64 {
    y.atan2(x)
}

#[builtin(name = "Sinh")]
fn sinh(value: f64) -> f64 {
    value.sinh()
}

#[builtin(name = "Cosh")]
fn cosh(value: f64) -> f64 {
    value.cosh()
}

#[builtin(name = "Tanh")]
fn tanh(value: f64) -> f64 {
    value.tanh()
}

#[builtin(name = "Asinh")]
fn asinh(d: f64) -> f64 {
    d.asinh()
}

#[builtin(name = "Acosh")]
fn acosh(d: f64) -> f64 {
    d.acosh()
}

#[builtin(name = "Atanh")]
fn atanh(d: f64) -> f64 {
    d.atanh()
}
