use lwl::codegen::{self, EmitOptions, Target, Toolchain};
use lwl::{CompileResult, diagnostics, ir, lexer, validation};

use clap::{Parser, ValueEnum};
use log::{info, warn};
use yansi::Paint;

use std::path::PathBuf;
use std::process;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Link a native executable
    Exe,
    /// Print the assembly text
    Asm,
    /// Print the generated instructions
    Ir,
}

/// Compiles LWL source files into a native executable.
#[derive(Debug, Parser)]
#[command(name = "lwlc", version, about)]
struct Cli {
    /// Source files, compiled in the given order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[arg(short, long, default_value = "a.out")]
    output: PathBuf,

    #[arg(long, default_value = "linux-amd64")]
    target: Target,

    #[arg(long, value_enum, default_value_t = Emit::Exe)]
    emit: Emit,

    #[arg(long, env = "LWL_AS", default_value = "as")]
    assembler: String,

    #[arg(long, env = "LWL_LD", default_value = "ld")]
    linker: String,

    /// Keep <output>.tmp.S and <output>.tmp.o
    #[arg(long)]
    keep_temps: bool,

    /// Show each validation error against its source line
    #[arg(long)]
    explain: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(&cli) {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> CompileResult<()> {
    let mut functions = lexer::tokenize(&cli.files)?;

    if let Err(err) = validation::validate(&mut functions) {
        if cli.explain {
            if let Err(io_err) = diagnostics::report_errors(&functions) {
                warn!("could not render diagnostics: {}", io_err);
            }
        }
        return Err(err);
    }

    let instructions = ir::generate(&functions)?;

    match cli.emit {
        Emit::Ir => {
            for instruction in &instructions {
                println!("{}", instruction);
            }
        }
        Emit::Asm => print!("{}", codegen::render(&instructions, cli.target)?),
        Emit::Exe => {
            let options = EmitOptions {
                output: cli.output.clone(),
                target: cli.target,
                toolchain: Toolchain {
                    assembler: cli.assembler.clone(),
                    linker: cli.linker.clone(),
                },
                keep_intermediates: cli.keep_temps,
            };
            codegen::emit(&instructions, &options)?;
            info!("wrote {}", cli.output.display());
        }
    }

    Ok(())
}
