use super::*;
use crate::lexer::tokenize_source;
use crate::validation::validate;

use std::path::Path;

fn generate_str(source: &str) -> Vec<Instruction> {
    let mut functions = tokenize_source(Path::new("test.lwl"), source);
    validate(&mut functions).unwrap();
    generate(&functions).unwrap()
}

fn label(name: &str) -> Instruction {
    Instruction::new(Opcode::FuncStart, vec![Operand::Label(name.to_string())])
}

fn mov(src: Register, dst: Register) -> Instruction {
    Instruction::new(Opcode::Mov, vec![src.into(), dst.into()])
}

fn load(value: i64, dst: Register) -> Instruction {
    Instruction::new(Opcode::Mov, vec![value.into(), dst.into()])
}

fn add(src: Register, dst: Register) -> Instruction {
    Instruction::new(Opcode::Add, vec![src.into(), dst.into()])
}

fn exit_epilogue() -> Vec<Instruction> {
    vec![
        mov(Register::ACCUMULATOR, Register::SYSCALL_ARGUMENT),
        load(EXIT_SYSCALL, Register::ACCUMULATOR),
        Instruction::new(Opcode::Syscall, vec![]),
    ]
}

#[test]
fn test_constant_addition_chain() {
    let instructions = generate_str("1+3+1\n");

    let mut expected = vec![
        label(ENTRY_LABEL),
        load(1, Register::Rax),
        load(3, Register::Rbx),
        add(Register::Rbx, Register::Rax),
        load(1, Register::Rbx),
        add(Register::Rbx, Register::Rax),
    ];
    expected.extend(exit_epilogue());

    assert_eq!(instructions, expected);
}

#[test]
fn test_function_prologue_and_epilogue() {
    let instructions = generate_str("f(x)=x\nf(1)\n");

    let mut expected = vec![
        label("f"),
        Instruction::new(Opcode::Push, vec![Register::Rbp.into()]),
        mov(Register::Rsp, Register::Rbp),
        Instruction::new(Opcode::Pop, vec![Register::Rbp.into()]),
        Instruction::new(Opcode::Ret, vec![]),
        label(ENTRY_LABEL),
        load(1, Register::Rax),
    ];
    expected.extend(exit_epilogue());

    assert_eq!(instructions, expected);
}

#[test]
fn test_program_order_is_kept() {
    let instructions = generate_str("7\ng(x)=x\n");

    assert_eq!(instructions[0], label(ENTRY_LABEL));
    assert_eq!(instructions[1], load(7, Register::Rax));
    assert_eq!(instructions[5], label("g"));
    assert_eq!(instructions.len(), 10);
}

#[test]
fn test_chain_inside_call_argument() {
    let instructions = generate_str("f(x)=x\nf(2+40)\n");

    let body: Vec<Instruction> = instructions
        .iter()
        .skip_while(|i| **i != label(ENTRY_LABEL))
        .skip(1)
        .take(3)
        .cloned()
        .collect();

    assert_eq!(
        body,
        vec![
            load(2, Register::Rax),
            load(40, Register::Rbx),
            add(Register::Rbx, Register::Rax),
        ]
    );
}

#[test]
fn test_other_operators_are_not_lowered() {
    let instructions = generate_str("2*3\n");

    assert!(
        instructions
            .iter()
            .all(|i| !matches!(i.opcode, Opcode::Mul | Opcode::Sub | Opcode::Div))
    );
    assert_eq!(instructions[1], load(2, Register::Rax));
    assert_eq!(instructions[2], load(3, Register::Rax));
}

#[test]
fn test_addition_chain_shape() {
    use crate::ast::{BinaryOperator, Expr};

    let chain = Expr::BinaryOp {
        operator: BinaryOperator::Add,
        l_value: Box::new((Expr::Constant(4), 0..1)),
        r_value: Box::new((Expr::Constant(5), 2..3)),
    };
    assert_eq!(builder::addition_chain(&chain), Some(vec![4, 5]));

    let not_chain = Expr::BinaryOp {
        operator: BinaryOperator::Add,
        l_value: Box::new((Expr::Constant(4), 0..1)),
        r_value: Box::new((Expr::Variable("x".to_string()), 2..3)),
    };
    assert_eq!(builder::addition_chain(&not_chain), None);
}

#[test]
fn test_generate_rejects_unvalidated_lines() {
    let functions = tokenize_source(Path::new("test.lwl"), "1+@\n");

    match generate(&functions) {
        Err(CompileError::Malformed { location, message }) => {
            assert_eq!(location, "test.lwl:1");
            assert!(message.contains("unrecognized character"));
        }
        other => panic!("expected a malformed function error, got {:?}", other),
    }
}

#[test]
fn test_instruction_display() {
    assert_eq!(load(1, Register::Rax).to_string(), "MOV 1, RAX");
    assert_eq!(label(ENTRY_LABEL).to_string(), "FUNC_START _start");
    assert_eq!(
        add(Register::SCRATCH, Register::ACCUMULATOR).to_string(),
        "ADD RBX, RAX"
    );
    assert_eq!(Instruction::new(Opcode::Syscall, vec![]).to_string(), "SYSCALL");
}
