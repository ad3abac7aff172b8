//! Host helpers called from generated code for operations Cranelift has no
//! instruction for. They go through the same Rust code as the interpreter.

use crate::ast::Operator;
use crate::registry::Builtin;

pub(super) const POW_SYMBOL: &str = "calc_pow";
pub(super) const REM_SYMBOL: &str = "calc_rem";
pub(super) const CALL_BUILTIN_SYMBOL: &str = "calc_call_builtin";

pub(super) extern "C" fn pow(base: f64, exponent: f64) -> f64 {
    Operator::Power.apply(base, exponent)
}

pub(super) extern "C" fn rem(left: f64, right: f64) -> f64 {
    Operator::Modulo.apply(left, right)
}

/// `args` points at `function.arity()` consecutive `f64` values.
pub(super) extern "C" fn call_builtin(function: *const Builtin, args: *const f64) -> f64 {
    // SAFETY: generated code passes the address of a `&'static Builtin` and
    // a stack slot holding exactly `arity()` values.
    let function = unsafe { &*function };
    let args = unsafe { std::slice::from_raw_parts(args, function.arity()) };
    function.call(args)
}
