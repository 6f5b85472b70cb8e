use crate::ast::Function;
use crate::error::{CompileError, CompileResult};
use crate::parser::parse_function;

use log::debug;

use std::fmt::{self, Display, Formatter};

pub mod builder;

#[cfg(test)]
pub mod test;

pub use builder::InstructionBuilder;

/// Label the main line's block is emitted under.
pub const ENTRY_LABEL: &str = "_start";

/// `exit` on linux x86-64.
pub const EXIT_SYSCALL: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    FuncStart,
    Ret,
    Mov,
    Add,
    Sub,
    Mul,
    Div,
    Push,
    Pop,
    Call,
    Syscall,
}

/// The fixed pseudo-register set. Names follow x86-64 but nothing here
/// is tied to a target until emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rsi,
    Rdi,
    Rbp,
    Rsp,
}

impl Register {
    /// Holds the running value of an expression and the syscall number.
    pub const ACCUMULATOR: Register = Register::Rax;
    /// Second operand of arithmetic.
    pub const SCRATCH: Register = Register::Rbx;
    /// First syscall argument, the exit status for `exit`.
    pub const SYSCALL_ARGUMENT: Register = Register::Rdi;
    pub const FRAME_POINTER: Register = Register::Rbp;
    pub const STACK_POINTER: Register = Register::Rsp;

    pub const ALL: [Register; 8] = [
        Register::Rax,
        Register::Rbx,
        Register::Rcx,
        Register::Rdx,
        Register::Rsi,
        Register::Rdi,
        Register::Rbp,
        Register::Rsp,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    Immediate(i64),
    Label(String),
}

impl From<Register> for Operand {
    fn from(register: Register) -> Self {
        Operand::Register(register)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Immediate(value)
    }
}

/// One pseudo-assembly instruction. Two-operand instructions list the
/// source first and the destination second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Instruction { opcode, operands }
    }
}

/// Lowers every validated function, in program order, into one flat
/// instruction stream.
pub fn generate(functions: &[Function]) -> CompileResult<Vec<Instruction>> {
    let mut builder = InstructionBuilder::new();

    for function in functions {
        if let Some(err) = function.errors.first() {
            return Err(CompileError::Malformed {
                location: function.location(),
                message: err.to_string(),
            });
        }

        let definition = parse_function(function).map_err(|errors| CompileError::Malformed {
            location: function.location(),
            message: errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        })?;

        builder.build_function(&definition);
    }

    let instructions = builder.finish();
    debug!("generated {} instruction(s)", instructions.len());
    Ok(instructions)
}

// Display implementations

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Opcode::FuncStart => "FUNC_START",
            Opcode::Ret => "RET",
            Opcode::Mov => "MOV",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Call => "CALL",
            Opcode::Syscall => "SYSCALL",
        };
        write!(f, "{}", s)
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Register::Rax => "RAX",
            Register::Rbx => "RBX",
            Register::Rcx => "RCX",
            Register::Rdx => "RDX",
            Register::Rsi => "RSI",
            Register::Rdi => "RDI",
            Register::Rbp => "RBP",
            Register::Rsp => "RSP",
        };
        write!(f, "{}", s)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(register) => write!(f, "{}", register),
            Operand::Immediate(value) => write!(f, "{}", value),
            Operand::Label(name) => write!(f, "{}", name),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}
