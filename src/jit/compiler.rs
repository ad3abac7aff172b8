use crate::ast::{Expression, Operator};
use crate::jit::functions::{self, CALL_BUILTIN_SYMBOL, POW_SYMBOL, REM_SYMBOL};
use crate::registry::Builtin;
use cranelift::codegen::ir::FuncRef;
use cranelift::prelude::*;
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{FuncId, Linkage, Module, ModuleError};
use log::{debug, trace};
use std::mem;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JitError {
    #[error("JIT setup failed: {0}")]
    Setup(String),

    #[error("JIT module error: {0}")]
    Module(#[from] ModuleError),
}

/// Compiles one expression tree into native code.
///
/// Each compiler owns a fresh module and is consumed by [`compile`](Self::compile),
/// which hands the module over to the resulting [`JitFunction`].
pub struct JitCompiler {
    module: JITModule,
    pow: FuncId,
    rem: FuncId,
    call_builtin: FuncId,
}

impl JitCompiler {
    pub fn new() -> Result<Self, JitError> {
        let mut flag_builder = settings::builder();
        flag_builder
            .set("use_colocated_libcalls", "false")
            .map_err(|e| JitError::Setup(e.to_string()))?;
        flag_builder
            .set("is_pic", "false")
            .map_err(|e| JitError::Setup(e.to_string()))?;
        let isa = cranelift_native::builder()
            .map_err(|msg| JitError::Setup(msg.to_string()))?
            .finish(settings::Flags::new(flag_builder))
            .map_err(|e| JitError::Setup(e.to_string()))?;

        let mut builder = JITBuilder::with_isa(isa, cranelift_module::default_libcall_names());
        builder.symbol(POW_SYMBOL, functions::pow as *const u8);
        builder.symbol(REM_SYMBOL, functions::rem as *const u8);
        builder.symbol(CALL_BUILTIN_SYMBOL, functions::call_builtin as *const u8);

        let mut module = JITModule::new(builder);
        let pointer_type = module.target_config().pointer_type();

        let pow = declare_import(&mut module, POW_SYMBOL, &[types::F64, types::F64])?;
        let rem = declare_import(&mut module, REM_SYMBOL, &[types::F64, types::F64])?;
        let call_builtin = declare_import(
            &mut module,
            CALL_BUILTIN_SYMBOL,
            &[pointer_type, pointer_type],
        )?;

        Ok(Self {
            module,
            pow,
            rem,
            call_builtin,
        })
    }

    pub fn compile(mut self, ast: &Expression) -> Result<JitFunction, JitError> {
        let mut ctx = self.module.make_context();
        ctx.func.signature.returns.push(AbiParam::new(types::F64));

        let pow = self.module.declare_func_in_func(self.pow, &mut ctx.func);
        let rem = self.module.declare_func_in_func(self.rem, &mut ctx.func);
        let call_builtin = self
            .module
            .declare_func_in_func(self.call_builtin, &mut ctx.func);
        let pointer_type = self.module.target_config().pointer_type();

        let mut func_ctx = FunctionBuilderContext::new();
        let mut builder = FunctionBuilder::new(&mut ctx.func, &mut func_ctx);

        let main_block = builder.create_block();
        builder.switch_to_block(main_block);
        builder.seal_block(main_block);

        let result = {
            let mut codegen = Codegen {
                builder: &mut builder,
                pow,
                rem,
                call_builtin,
                pointer_type,
            };
            codegen.translate(ast)
        };
        builder.ins().return_(&[result]);
        builder.finalize();
        trace!("Generated IR:\n{}", ctx.func.display());

        let func_id = self
            .module
            .declare_anonymous_function(&ctx.func.signature)?;
        self.module.define_function(func_id, &mut ctx)?;
        self.module.clear_context(&mut ctx);
        self.module.finalize_definitions()?;

        let code = self.module.get_finalized_function(func_id);
        debug!("JIT compiled {} at {:?}", ast, code);

        // SAFETY: the function was declared with no parameters and one f64
        // return value in the platform's default calling convention.
        let code = unsafe { mem::transmute::<*const u8, extern "C" fn() -> f64>(code) };
        Ok(JitFunction {
            code,
            module: Some(self.module),
        })
    }
}

fn declare_import(
    module: &mut JITModule,
    name: &str,
    params: &[Type],
) -> Result<FuncId, JitError> {
    let mut signature = module.make_signature();
    signature
        .params
        .extend(params.iter().map(|ty| AbiParam::new(*ty)));
    signature.returns.push(AbiParam::new(types::F64));
    Ok(module.declare_function(name, Linkage::Import, &signature)?)
}

struct Codegen<'a, 'b> {
    builder: &'a mut FunctionBuilder<'b>,
    pow: FuncRef,
    rem: FuncRef,
    call_builtin: FuncRef,
    pointer_type: Type,
}

impl Codegen<'_, '_> {
    fn translate(&mut self, node: &Expression) -> Value {
        match node {
            Expression::Number(value) | Expression::NamedConstant { value, .. } => {
                self.builder.ins().f64const(*value)
            }
            Expression::Negate(operand) => {
                let value = self.translate(operand);
                self.builder.ins().fneg(value)
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let lhs = self.translate(left);
                let rhs = self.translate(right);
                match operator {
                    Operator::Add => self.builder.ins().fadd(lhs, rhs),
                    Operator::Subtract => self.builder.ins().fsub(lhs, rhs),
                    Operator::Multiply => self.builder.ins().fmul(lhs, rhs),
                    Operator::Divide => self.builder.ins().fdiv(lhs, rhs),
                    Operator::Modulo => self.call(self.rem, &[lhs, rhs]),
                    Operator::Power => self.call(self.pow, &[lhs, rhs]),
                }
            }
            Expression::FunctionCall { function, args } => {
                let values: Vec<Value> = args.iter().map(|arg| self.translate(arg)).collect();
                self.call_function(*function, &values)
            }
            Expression::Root(body) => self.translate(body),
        }
    }

    /// Spills the arguments into a stack slot and calls the builtin through
    /// the host trampoline.
    fn call_function(&mut self, function: &'static Builtin, values: &[Value]) -> Value {
        let size = (values.len().max(1) * mem::size_of::<f64>()) as u32;
        let slot = self
            .builder
            .create_sized_stack_slot(StackSlotData::new(StackSlotKind::ExplicitSlot, size, 3));
        for (i, value) in values.iter().enumerate() {
            let offset = (i * mem::size_of::<f64>()) as i32;
            self.builder.ins().stack_store(*value, slot, offset);
        }

        let args_ptr = self.builder.ins().stack_addr(self.pointer_type, slot, 0);
        let function_ptr = self
            .builder
            .ins()
            .iconst(self.pointer_type, function as *const Builtin as i64);
        self.call(self.call_builtin, &[function_ptr, args_ptr])
    }

    fn call(&mut self, func_ref: FuncRef, args: &[Value]) -> Value {
        let call = self.builder.ins().call(func_ref, args);
        self.builder.inst_results(call)[0]
    }
}

/// Native code for one expression, callable any number of times.
pub struct JitFunction {
    code: extern "C" fn() -> f64,
    module: Option<JITModule>,
}

impl JitFunction {
    pub fn call(&self) -> f64 {
        (self.code)()
    }
}

impl Drop for JitFunction {
    fn drop(&mut self) {
        if let Some(module) = self.module.take() {
            debug!("Releasing JIT module");
            // SAFETY: `code` points into this module and is not reachable
            // once `self` is dropped.
            unsafe { module.free_memory() };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Evaluator, Parser};

    fn jit(input: &str) -> JitFunction {
        let ast = Parser::parse_expression(input).unwrap();
        JitCompiler::new().unwrap().compile(&ast).unwrap()
    }

    #[test]
    fn test_jit_arithmetic() {
        assert_eq!(jit("2+3*4").call(), 14.0);
        assert_eq!(jit("10-3-2").call(), 5.0);
        assert_eq!(jit("2^3^2").call(), 512.0);
        assert_eq!(jit("7.5 % -2").call(), 1.5);
        assert_eq!(jit("1/0").call(), f64::INFINITY);
    }

    #[test]
    fn test_jit_negative_zero() {
        let result = jit("-0").call();
        assert_eq!(result, 0.0);
        assert!(result.is_sign_negative());
    }

    #[test]
    fn test_jit_function_calls() {
        assert_eq!(jit("Max(1, Min(5, 3))").call(), 3.0);
        assert_eq!(jit("FusedMultiplyAdd(2, 3, 4)").call(), 10.0);
        assert!((jit("Sin(PI/2)").call() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_jit_matches_interpreter() {
        for input in [
            "Sin(PI/6) * Exp(1.5) - 4 % 3",
            "IEEERemainder(11, 3) * Log(100, 10)",
            "-(2^0.5) + Atan2(1, Tau)",
            "Pow(Abs(-3.25), 1/3) / Sqrt(2)",
        ] {
            let ast = Parser::parse_expression(input).unwrap();
            let compiled = JitCompiler::new().unwrap().compile(&ast).unwrap();
            assert_eq!(
                compiled.call().to_bits(),
                Evaluator::evaluate(&ast).to_bits(),
                "input {}",
                input
            );
        }
    }

    #[test]
    fn test_jit_function_is_reusable() {
        let compiled = jit("Round(2.5) + Tau");
        let first = compiled.call();
        for _ in 0..5 {
            assert_eq!(compiled.call(), first);
        }
    }
}
