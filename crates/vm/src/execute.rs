//! Main execution loop and opcode dispatch for the Methanol VM.

use std::cmp::Ordering;
use std::io::Write;

use crate::error::RuntimeError;
use crate::machine::VM;
use methanol_common::{Instruction, Opcode, Operand, Value};
use tracing::{debug, trace};

impl<'a, W: Write> VM<'a, W> {
    /// Execute the program until the pc runs past the last instruction.
    ///
    /// There is no halt opcode: falling off the end is normal termination.
    pub fn execute(&mut self) -> Result<(), RuntimeError> {
        debug!(
            instructions = self.program.len(),
            labels = self.labels.len(),
            "starting execution"
        );

        let mut steps: u64 = 0;
        while let Some(instr) = self.fetch() {
            trace!(pc = self.pc, depth = self.stack.len(), %instr, "dispatch");
            self.dispatch(instr)?;
            // Applies after every instruction, jumps and RET included: a
            // jump lands on its LABEL line and RET lands on its CALL line.
            self.pc += 1;
            steps += 1;
        }

        self.out.flush().map_err(|e| RuntimeError::Output {
            at: self.pc,
            message: e.to_string(),
        })?;

        debug!(steps, depth = self.stack.len(), "execution finished");
        Ok(())
    }

    fn dispatch(&mut self, instr: &'a Instruction) -> Result<(), RuntimeError> {
        match instr {
            Instruction::Nop | Instruction::Label(_) | Instruction::Def(_) => {}

            Instruction::Invalid { text, error } => {
                return Err(RuntimeError::InvalidInstruction {
                    at: self.pc,
                    text: text.clone(),
                    error: error.clone(),
                })
            }

            // Stack & variables
            Instruction::Push(operand) => self.exec_push(operand)?,
            Instruction::Pop(None) => {
                self.pop()?;
            }
            Instruction::Pop(Some(name)) => {
                let value = self.pop()?;
                self.variables.insert(name.clone(), value);
            }
            Instruction::Dup => self.exec_dup()?,
            Instruction::Print => self.exec_print()?,

            // Arithmetic
            Instruction::Plus => {
                self.exec_binary_arith(Opcode::Plus, i64::checked_add, |a, b| a + b)?
            }
            Instruction::Minus => {
                self.exec_binary_arith(Opcode::Minus, i64::checked_sub, |a, b| a - b)?
            }
            Instruction::Mult => {
                self.exec_binary_arith(Opcode::Mult, i64::checked_mul, |a, b| a * b)?
            }
            Instruction::Div => self.exec_div()?,
            Instruction::Neg => self.exec_neg()?,

            // Comparison
            Instruction::Lt => self.exec_comparison(Opcode::Lt, |o| o == Ordering::Less)?,
            Instruction::Gt => self.exec_comparison(Opcode::Gt, |o| o == Ordering::Greater)?,
            Instruction::Lteq => self.exec_comparison(Opcode::Lteq, |o| o != Ordering::Less)?,
            Instruction::Gteq => {
                self.exec_comparison(Opcode::Gteq, |o| o != Ordering::Greater)?
            }
            Instruction::Eq => self.exec_equality(Opcode::Eq, false)?,
            Instruction::Neq => self.exec_equality(Opcode::Neq, true)?,

            // Logic
            Instruction::And => {
                let (a, b) = self.pop_pair()?;
                self.push(if a.is_truthy() { b } else { a });
            }
            Instruction::Or => {
                let (a, b) = self.pop_pair()?;
                self.push(if a.is_truthy() { a } else { b });
            }
            Instruction::Not => {
                let v = self.pop()?;
                self.push(Value::Boolean(!v.is_truthy()));
            }

            // Conversion
            Instruction::Int2Real => self.exec_int2real()?,
            Instruction::Real2Int => self.exec_real2int()?,

            // Control flow
            Instruction::Jmp(label) => self.pc = self.resolve(label)?,
            Instruction::Jz(label) => {
                if !self.pop()?.is_truthy() {
                    self.pc = self.resolve(label)?;
                }
            }
            Instruction::Jnz(label) => {
                if self.pop()?.is_truthy() {
                    self.pc = self.resolve(label)?;
                }
            }
            Instruction::Call(label) => self.exec_call(label)?,
            Instruction::Ret => {
                self.pc = self
                    .call_stack
                    .pop()
                    .ok_or(RuntimeError::CallStackUnderflow { at: self.pc })?;
            }
        }
        Ok(())
    }

    // ---- Stack & variables ----

    fn exec_push(&mut self, operand: &Operand) -> Result<(), RuntimeError> {
        let value = match operand {
            Operand::Literal(value) => value.clone(),
            Operand::Variable(name) => self.variables.get(name).cloned().ok_or_else(|| {
                RuntimeError::UninitializedVariable {
                    at: self.pc,
                    name: name.clone(),
                }
            })?,
        };
        self.push(value);
        Ok(())
    }

    fn exec_dup(&mut self) -> Result<(), RuntimeError> {
        let top = self
            .stack
            .last()
            .cloned()
            .ok_or(RuntimeError::StackUnderflow { at: self.pc })?;
        self.push(top);
        Ok(())
    }

    fn exec_print(&mut self) -> Result<(), RuntimeError> {
        let value = self.pop()?;
        writeln!(self.out, "{value}").map_err(|e| RuntimeError::Output {
            at: self.pc,
            message: e.to_string(),
        })
    }

    // ---- Arithmetic ----

    /// PLUS, MINUS, MULT: both operands must be the same numeric kind.
    fn exec_binary_arith(
        &mut self,
        opcode: Opcode,
        int_op: fn(i64, i64) -> Option<i64>,
        real_op: fn(f64, f64) -> f64,
    ) -> Result<(), RuntimeError> {
        let (a, b) = self.pop_pair()?;
        let result = match (&a, &b) {
            (Value::Integer(x), Value::Integer(y)) => {
                Value::Integer(int_op(*x, *y).ok_or_else(|| self.overflow(opcode))?)
            }
            (Value::Real(x), Value::Real(y)) => Value::Real(real_op(*x, *y)),
            _ => return Err(self.mismatch(opcode, &[&a, &b])),
        };
        self.push(result);
        Ok(())
    }

    /// Integer operands use floor division; Real operands true division.
    fn exec_div(&mut self) -> Result<(), RuntimeError> {
        let (a, b) = self.pop_pair()?;
        let result = match (&a, &b) {
            (Value::Integer(_), Value::Integer(0)) => {
                return Err(RuntimeError::DivisionByZero { at: self.pc })
            }
            (Value::Integer(x), Value::Integer(y)) => {
                Value::Integer(floor_div(*x, *y).ok_or_else(|| self.overflow(Opcode::Div))?)
            }
            (Value::Real(_), Value::Real(y)) if *y == 0.0 => {
                return Err(RuntimeError::DivisionByZero { at: self.pc })
            }
            (Value::Real(x), Value::Real(y)) => Value::Real(x / y),
            _ => return Err(self.mismatch(Opcode::Div, &[&a, &b])),
        };
        self.push(result);
        Ok(())
    }

    fn exec_neg(&mut self) -> Result<(), RuntimeError> {
        let v = self.pop()?;
        let result = match &v {
            Value::Integer(i) => {
                Value::Integer(i.checked_neg().ok_or_else(|| self.overflow(Opcode::Neg))?)
            }
            Value::Real(r) => Value::Real(-r),
            _ => return Err(self.mismatch(Opcode::Neg, &[&v])),
        };
        self.push(result);
        Ok(())
    }

    // ---- Comparison ----

    /// LT, GT, LTEQ, GTEQ on two Integers, two Reals or two Strings.
    ///
    /// A NaN operand makes every ordering test false.
    fn exec_comparison(
        &mut self,
        opcode: Opcode,
        test: fn(Ordering) -> bool,
    ) -> Result<(), RuntimeError> {
        let (a, b) = self.pop_pair()?;
        let ordering = match (&a, &b) {
            (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
            (Value::Real(x), Value::Real(y)) => x.partial_cmp(y),
            (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
            _ => return Err(self.mismatch(opcode, &[&a, &b])),
        };
        self.push(Value::Boolean(ordering.is_some_and(test)));
        Ok(())
    }

    /// EQ and NEQ on two values of the same kind. Reals compare numerically.
    fn exec_equality(&mut self, opcode: Opcode, negate: bool) -> Result<(), RuntimeError> {
        let (a, b) = self.pop_pair()?;
        let equal = match (&a, &b) {
            (Value::Integer(x), Value::Integer(y)) => x == y,
            (Value::Real(x), Value::Real(y)) => x == y,
            (Value::Boolean(x), Value::Boolean(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            _ => return Err(self.mismatch(opcode, &[&a, &b])),
        };
        self.push(Value::Boolean(equal != negate));
        Ok(())
    }

    // ---- Conversion ----

    fn exec_int2real(&mut self) -> Result<(), RuntimeError> {
        let v = self.pop()?;
        match v {
            Value::Integer(i) => {
                self.push(Value::Real(i as f64));
                Ok(())
            }
            other => Err(self.mismatch(Opcode::Int2Real, &[&other])),
        }
    }

    fn exec_real2int(&mut self) -> Result<(), RuntimeError> {
        // 2^63 is exactly representable; anything at or above it is out of range.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;

        let v = self.pop()?;
        match v {
            Value::Real(r) => {
                let t = r.trunc();
                if !(-LIMIT..LIMIT).contains(&t) {
                    return Err(self.overflow(Opcode::Real2Int));
                }
                self.push(Value::Integer(t as i64));
                Ok(())
            }
            other => Err(self.mismatch(Opcode::Real2Int, &[&other])),
        }
    }

    // ---- Control flow ----

    fn exec_call(&mut self, label: &str) -> Result<(), RuntimeError> {
        let target = self.resolve(label)?;
        if self.call_stack.len() >= self.config.max_call_depth {
            return Err(RuntimeError::CallStackOverflow {
                at: self.pc,
                limit: self.config.max_call_depth,
            });
        }
        self.call_stack.push(self.pc);
        self.pc = target;
        Ok(())
    }

    // ---- Errors ----

    fn overflow(&self, opcode: Opcode) -> RuntimeError {
        RuntimeError::ArithmeticOverflow {
            at: self.pc,
            opcode: opcode.mnemonic(),
        }
    }

    fn mismatch(&self, opcode: Opcode, operands: &[&Value]) -> RuntimeError {
        let kinds: Vec<&str> = operands.iter().map(|v| v.kind().name()).collect();
        RuntimeError::TypeMismatch {
            at: self.pc,
            opcode: opcode.mnemonic(),
            operands: kinds.join(" and "),
        }
    }
}

/// Integer division rounding toward negative infinity.
///
/// Returns `None` on overflow (`i64::MIN / -1`). The divisor must be non-zero.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_div_rounds_down() {
        assert_eq!(floor_div(7, 2), Some(3));
        assert_eq!(floor_div(-7, 2), Some(-4));
        assert_eq!(floor_div(7, -2), Some(-4));
        assert_eq!(floor_div(-7, -2), Some(3));
        assert_eq!(floor_div(6, -3), Some(-2));
    }

    #[test]
    fn floor_div_overflow() {
        assert_eq!(floor_div(i64::MIN, -1), None);
        assert_eq!(floor_div(i64::MIN, 1), Some(i64::MIN));
    }
}
