pub mod ast;
pub mod functions;
#[cfg(feature = "jit")]
pub mod jit;
pub mod printer;
pub mod registry;
pub mod repl;

use ast::{Evaluator, ParseError, Parser};

/// Parses and evaluates `expression` in one step.
pub fn evaluate_expression(expression: &str) -> Result<f64, ParseError> {
    let ast = Parser::parse_expression(expression)?;
    Ok(Evaluator::evaluate(&ast))
}
