use crate::registry::Builtin;
use std::fmt;

mod compiler;
mod error;
mod evaluator;
mod parser;

pub use compiler::*;
pub use error::ParseError;
pub use evaluator::Evaluator;
pub use parser::ExpressionParser as Parser;

/// A parsed arithmetic expression.
///
/// Trees are built once by the parser and only read afterwards. Function
/// calls and named constants are resolved while parsing, so every node of a
/// parsed tree evaluates to an `f64` without further lookups.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    NamedConstant {
        name: &'static str,
        value: f64,
    },
    FunctionCall {
        function: &'static Builtin,
        args: Vec<Expression>,
    },
    BinaryOperation {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },
    Negate(Box<Expression>),
    /// The whole parsed input as a zero-argument computation.
    Root(Box<Expression>),
}

impl Expression {
    /// Interprets the tree. See [`Evaluator::evaluate`].
    pub fn evaluate(&self) -> f64 {
        Evaluator::evaluate(self)
    }

    /// Compiles the tree once into a reusable callable. See [`Compiler::compile`].
    pub fn compile(&self) -> CompiledExpression {
        Compiler::compile(self)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Expression::Number(_) => "Constant",
            Expression::NamedConstant { .. } => "MemberAccess",
            Expression::FunctionCall { .. } => "Call",
            Expression::BinaryOperation { operator, .. } => operator.name(),
            Expression::Negate(_) => "Negate",
            Expression::Root(_) => "Lambda",
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{}", value),
            Expression::NamedConstant { name, .. } => write!(f, "{}", name),
            Expression::FunctionCall { function, args } => {
                write!(f, "{}(", function.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::Negate(operand) => write!(f, "-{}", operand),
            Expression::Root(body) => write!(f, "() => {}", body),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    /// Plain IEEE-754 double arithmetic: no traps, division by zero gives
    /// an infinity or NaN, `%` is the truncated remainder and `^` is `powf`.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Modulo => left % right,
            Operator::Power => left.powf(right),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "Add",
            Operator::Subtract => "Subtract",
            Operator::Multiply => "Multiply",
            Operator::Divide => "Divide",
            Operator::Modulo => "Modulo",
            Operator::Power => "Power",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Modulo => "%",
            Operator::Power => "^",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
