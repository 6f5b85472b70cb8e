use crate::error::{CompileError, CompileResult};
use crate::ir::{ENTRY_LABEL, Instruction};

use log::{debug, warn};

use std::ffi::{OsStr, OsString};
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

pub mod instruction;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    LinuxAmd64,
}

impl Target {
    pub fn preamble(&self) -> Vec<String> {
        match self {
            Target::LinuxAmd64 => vec![
                ".section .text".to_string(),
                format!(".global {}", ENTRY_LABEL),
            ],
        }
    }

    pub fn render_instruction(&self, instruction: &Instruction) -> CompileResult<String> {
        match self {
            Target::LinuxAmd64 => instruction::render_att(instruction),
        }
    }
}

impl FromStr for Target {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux-amd64" | "linux_amd64" | "x86_64-linux" => Ok(Target::LinuxAmd64),
            other => Err(CompileError::UnknownTarget(other.to_string())),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Target::LinuxAmd64 => write!(f, "linux-amd64"),
        }
    }
}

/// External programs, invoked by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub assembler: String,
    pub linker: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            assembler: "as".to_string(),
            linker: "ld".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub output: PathBuf,
    pub target: Target,
    pub toolchain: Toolchain,
    /// Leave `<output>.tmp.S` and `<output>.tmp.o` behind.
    pub keep_intermediates: bool,
}

impl EmitOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        EmitOptions {
            output: output.into(),
            target: Target::default(),
            toolchain: Toolchain::default(),
            keep_intermediates: false,
        }
    }
}

/// The whole assembly file: the preamble, then one line per instruction.
pub fn render(instructions: &[Instruction], target: Target) -> CompileResult<String> {
    let mut assembly = String::new();

    for line in target.preamble() {
        assembly.push_str(&line);
        assembly.push('\n');
    }
    for instruction in instructions {
        assembly.push_str(&target.render_instruction(instruction)?);
        assembly.push('\n');
    }

    Ok(assembly)
}

/// Renders, assembles and links `instructions` into `options.output`.
pub fn emit(instructions: &[Instruction], options: &EmitOptions) -> CompileResult<()> {
    let assembly = render(instructions, options.target)?;

    let assembly_path = with_suffix(&options.output, ".tmp.S");
    let object_path = with_suffix(&options.output, ".tmp.o");

    fs::write(&assembly_path, assembly).map_err(|source| CompileError::WriteAssembly {
        path: assembly_path.clone(),
        source,
    })?;
    debug!("wrote {}", assembly_path.display());

    run_tool(
        &options.toolchain.assembler,
        &[
            OsStr::new("-o"),
            object_path.as_os_str(),
            assembly_path.as_os_str(),
        ],
    )?;
    run_tool(
        &options.toolchain.linker,
        &[
            OsStr::new("-o"),
            options.output.as_os_str(),
            object_path.as_os_str(),
        ],
    )?;

    if !options.keep_intermediates {
        for path in [&assembly_path, &object_path] {
            if let Err(err) = fs::remove_file(path) {
                warn!("could not remove {}: {}", path.display(), err);
            }
        }
    }

    Ok(())
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn run_tool(tool: &str, args: &[&OsStr]) -> CompileResult<()> {
    debug!("running {} {:?}", tool, args);

    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|source| CompileError::Spawn {
            tool: tool.to_string(),
            source,
        })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(CompileError::Tool {
            tool: tool.to_string(),
            status: output.status,
            output: combined.trim_end().to_string(),
        });
    }

    Ok(())
}
