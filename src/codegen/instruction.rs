use crate::error::{CompileError, CompileResult};
use crate::ir::{Instruction, Opcode, Operand, Register};

/// Renders one instruction as a line of GNU `as` AT&T syntax: immediates
/// take `$`, registers take `%`, and the destination comes last.
pub fn render_att(instruction: &Instruction) -> CompileResult<String> {
    let operands = instruction.operands.as_slice();
    let mnemonic = mnemonic(instruction.opcode);

    match instruction.opcode {
        Opcode::FuncStart => match operands {
            [Operand::Label(name)] => Ok(format!("{}:", name)),
            _ => Err(unhandled(instruction, "expected a single label")),
        },

        Opcode::Ret | Opcode::Syscall => {
            if !operands.is_empty() {
                return Err(unhandled(instruction, "expected no operands"));
            }
            Ok(format!("    {}", mnemonic))
        }

        Opcode::Push | Opcode::Pop | Opcode::Div => match operands {
            [Operand::Register(register)] => {
                Ok(format!("    {} {}", mnemonic, register_name(*register)))
            }
            _ => Err(unhandled(instruction, "expected a single register")),
        },

        Opcode::Call => match operands {
            [Operand::Label(name)] => Ok(format!("    {} {}", mnemonic, name)),
            _ => Err(unhandled(instruction, "expected a single label")),
        },

        Opcode::Mov | Opcode::Add | Opcode::Sub | Opcode::Mul => match operands {
            [src, Operand::Register(dst)] => {
                let Some(src) = source(src) else {
                    return Err(unhandled(
                        instruction,
                        "expected a register or immediate source",
                    ));
                };
                Ok(format!("    {} {}, {}", mnemonic, src, register_name(*dst)))
            }
            [_, _] => Err(unhandled(instruction, "expected a register destination")),
            _ => Err(unhandled(
                instruction,
                format!("expected 2 operands, got {}", operands.len()),
            )),
        },
    }
}

fn mnemonic(opcode: Opcode) -> &'static str {
    match opcode {
        Opcode::FuncStart => "",
        Opcode::Ret => "ret",
        Opcode::Mov => "mov",
        Opcode::Add => "add",
        Opcode::Sub => "sub",
        Opcode::Mul => "imul",
        Opcode::Div => "idiv",
        Opcode::Push => "push",
        Opcode::Pop => "pop",
        Opcode::Call => "call",
        Opcode::Syscall => "syscall",
    }
}

pub fn register_name(register: Register) -> &'static str {
    match register {
        Register::Rax => "%rax",
        Register::Rbx => "%rbx",
        Register::Rcx => "%rcx",
        Register::Rdx => "%rdx",
        Register::Rsi => "%rsi",
        Register::Rdi => "%rdi",
        Register::Rbp => "%rbp",
        Register::Rsp => "%rsp",
    }
}

fn source(operand: &Operand) -> Option<String> {
    match operand {
        Operand::Register(register) => Some(register_name(*register).to_string()),
        Operand::Immediate(value) => Some(format!("${}", value)),
        Operand::Label(_) => None,
    }
}

fn unhandled(instruction: &Instruction, reason: impl Into<String>) -> CompileError {
    CompileError::Unhandled {
        instruction: instruction.to_string(),
        reason: reason.into(),
    }
}
