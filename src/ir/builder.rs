use super::*;
use crate::ast::{BinaryOperator, Definition, Expr};

pub struct InstructionBuilder {
    instructions: Vec<Instruction>,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<Instruction> {
        self.instructions
    }

    fn push(&mut self, opcode: Opcode, operands: Vec<Operand>) {
        self.instructions.push(Instruction::new(opcode, operands));
    }

    pub fn build_function(&mut self, definition: &Definition) {
        let label = if definition.is_main {
            ENTRY_LABEL.to_string()
        } else {
            definition.name.clone()
        };
        self.push(Opcode::FuncStart, vec![Operand::Label(label)]);

        if !definition.is_main {
            self.push(Opcode::Push, vec![Register::FRAME_POINTER.into()]);
            self.push(
                Opcode::Mov,
                vec![
                    Register::STACK_POINTER.into(),
                    Register::FRAME_POINTER.into(),
                ],
            );
        }

        self.build_expression(&definition.body.0);

        if definition.is_main {
            // the value left in the accumulator becomes the exit status
            self.push(
                Opcode::Mov,
                vec![
                    Register::ACCUMULATOR.into(),
                    Register::SYSCALL_ARGUMENT.into(),
                ],
            );
            self.push(
                Opcode::Mov,
                vec![EXIT_SYSCALL.into(), Register::ACCUMULATOR.into()],
            );
            self.push(Opcode::Syscall, vec![]);
        } else {
            self.push(Opcode::Pop, vec![Register::FRAME_POINTER.into()]);
            self.push(Opcode::Ret, vec![]);
        }
    }

    /// Only chains of constant additions are lowered. Any other node emits
    /// nothing of its own, but chains nested in its operands or call
    /// arguments still are.
    fn build_expression(&mut self, expr: &Expr) {
        if let Some(constants) = addition_chain(expr) {
            self.build_addition_chain(&constants);
            return;
        }

        match expr {
            Expr::BinaryOp {
                l_value, r_value, ..
            } => {
                self.build_expression(&l_value.0);
                self.build_expression(&r_value.0);
            }
            Expr::Call { args, .. } => {
                for (arg, _) in args {
                    self.build_expression(arg);
                }
            }
            Expr::Constant(_) | Expr::Variable(_) | Expr::Error => {}
        }
    }

    fn build_addition_chain(&mut self, constants: &[i64]) {
        let Some((first, rest)) = constants.split_first() else {
            return;
        };

        self.push(
            Opcode::Mov,
            vec![(*first).into(), Register::ACCUMULATOR.into()],
        );
        for constant in rest {
            self.push(
                Opcode::Mov,
                vec![(*constant).into(), Register::SCRATCH.into()],
            );
            self.push(
                Opcode::Add,
                vec![Register::SCRATCH.into(), Register::ACCUMULATOR.into()],
            );
        }
    }
}

/// `c0 + c1 + ... + cn` parses as `((c0 + c1) + ...) + cn`; returns the
/// constants in source order when `expr` has exactly that shape.
pub fn addition_chain(expr: &Expr) -> Option<Vec<i64>> {
    match expr {
        Expr::Constant(value) => Some(vec![*value]),
        Expr::BinaryOp {
            operator: BinaryOperator::Add,
            l_value,
            r_value,
        } => {
            let Expr::Constant(last) = r_value.0 else {
                return None;
            };
            let mut constants = addition_chain(&l_value.0)?;
            constants.push(last);
            Some(constants)
        }
        _ => None,
    }
}
