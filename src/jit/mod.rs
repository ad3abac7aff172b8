//! Native code generation for expression trees through Cranelift.
//!
//! Enabled with the `jit` feature. Arithmetic maps onto native float
//! instructions; `%`, `^` and builtin calls go through host helpers, so the
//! generated code returns exactly what the interpreter returns.

mod compiler;
mod functions;

pub use compiler::{JitCompiler, JitError, JitFunction};
