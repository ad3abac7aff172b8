use crate::ast::Expression;
use log::trace;

/// Tree-walking interpreter.
pub struct Evaluator;

impl Evaluator {
    /// Reduces a tree to its value.
    ///
    /// A parsed tree cannot fail to evaluate: arithmetic edge cases such as
    /// division by zero or a fractional power of a negative base produce
    /// infinities or NaN, exactly as IEEE-754 prescribes.
    pub fn evaluate(ast: &Expression) -> f64 {
        match ast {
            Expression::Number(value) => *value,
            Expression::NamedConstant { value, .. } => *value,
            Expression::Negate(operand) => -Self::evaluate(operand),
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = Self::evaluate(left);
                let right_value = Self::evaluate(right);
                operator.apply(left_value, right_value)
            }
            Expression::FunctionCall { function, args } => {
                let values: Vec<f64> = args.iter().map(Self::evaluate).collect();
                let result = function.call(&values);
                trace!("{}({:?}) = {}", function.name, values, result);
                result
            }
            Expression::Root(body) => Self::evaluate(body),
        }
    }
}
