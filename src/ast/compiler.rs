use crate::ast::{Expression, Operator};
use crate::registry::Builtin;
use log::debug;

/// One step of a compiled program, in postfix order.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Push(f64),
    Negate,
    Binary(Operator),
    /// Replaces the top `arity()` values with the function's result.
    Call(&'static Builtin),
}

/// A tree compiled into a flat postfix program.
///
/// Built once with [`Compiler::compile`] and called any number of times
/// without walking the tree again. Results are bit-identical to
/// [`Evaluator::evaluate`](crate::ast::Evaluator::evaluate) because both
/// apply the same `f64` operations in the same order.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    instructions: Box<[Instruction]>,
    stack_size: usize,
}

impl CompiledExpression {
    pub fn call(&self) -> f64 {
        let mut stack = vec![0.0_f64; self.stack_size];
        let mut len = 0_usize;

        for instruction in self.instructions.iter() {
            match instruction {
                Instruction::Push(value) => {
                    stack[len] = *value;
                    len += 1;
                }
                Instruction::Negate => {
                    stack[len - 1] = -stack[len - 1];
                }
                Instruction::Binary(operator) => {
                    len -= 1;
                    stack[len - 1] = operator.apply(stack[len - 1], stack[len]);
                }
                Instruction::Call(function) => {
                    let start = len - function.arity();
                    stack[start] = function.call(&stack[start..len]);
                    len = start + 1;
                }
            }
        }

        stack[0]
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Deepest the value stack gets while running the program.
    pub fn stack_size(&self) -> usize {
        self.stack_size
    }
}

pub struct Compiler {
    instructions: Vec<Instruction>,
    depth: usize,
    max_depth: usize,
}

impl Compiler {
    pub fn compile(ast: &Expression) -> CompiledExpression {
        let mut compiler = Compiler {
            instructions: Vec::new(),
            depth: 0,
            max_depth: 0,
        };
        compiler.compile_node(ast);
        debug!(
            "Compiled {} instructions, stack size {}",
            compiler.instructions.len(),
            compiler.max_depth
        );

        CompiledExpression {
            instructions: compiler.instructions.into_boxed_slice(),
            stack_size: compiler.max_depth.max(1),
        }
    }

    fn compile_node(&mut self, node: &Expression) {
        match node {
            Expression::Number(value) | Expression::NamedConstant { value, .. } => {
                self.emit(Instruction::Push(*value));
                self.push();
            }
            Expression::Negate(operand) => {
                self.compile_node(operand);
                self.emit(Instruction::Negate);
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                self.compile_node(left);
                self.compile_node(right);
                self.emit(Instruction::Binary(*operator));
                self.depth -= 1;
            }
            Expression::FunctionCall { function, args } => {
                for arg in args {
                    self.compile_node(arg);
                }
                self.emit(Instruction::Call(*function));
                // an arity-0 call still leaves its result on the stack
                self.depth -= args.len();
                self.push();
            }
            Expression::Root(body) => self.compile_node(body),
        }
    }

    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn push(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
    }
}
