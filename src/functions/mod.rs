pub mod arithmetic;
pub mod exponential;
pub mod rounding;
pub mod trigonometric;

use crate::registry::Builtin;

/// Every builtin known to the registry, grouped by family.
pub(crate) fn builtins() -> impl Iterator<Item = &'static Builtin> {
    arithmetic::BUILTINS
        .iter()
        .chain(exponential::BUILTINS)
        .chain(rounding::BUILTINS)
        .chain(trigonometric::BUILTINS)
        .copied()
}
