//! CLI command implementations.

use std::env;
use std::fs;
use std::io::{self, ErrorKind};
use std::process::Command;

use methanol_cli::logging;
use methanol_cli::options::{Flag, Options, COMPILER_ENV, COMPILE_FLAGS, RUN_FLAGS};
use methanol_common::Program;
use methanol_vm::{LabelTable, VmConfig};
use tracing::{info, warn};

/// Execute a .quad file.
pub fn run(args: &[String]) -> Result<(), i32> {
    let opts = parse_options("run", args, RUN_FLAGS)?;
    logging::init(opts.trace);

    let program = load(&opts.input)?;
    execute(&program, &opts.config)
}

/// Compile a source file with the external compiler, then execute the result.
pub fn compile(args: &[String]) -> Result<(), i32> {
    let opts = parse_options("compile", args, COMPILE_FLAGS)?;
    logging::init(opts.trace);

    let source = &opts.input;
    let compiler = opts.compiler_path(env::var(COMPILER_ENV).ok());
    info!(compiler = %compiler, source = %source, "invoking compiler");

    let status = Command::new(&compiler).arg(source).status().map_err(|e| {
        eprintln!("error: cannot start compiler '{compiler}': {e}");
        2
    })?;
    if !status.success() {
        eprintln!("error: compiler failed on '{source}' ({status})");
        return Err(2);
    }

    // The symbol table is a compiler by-product the VM never reads.
    let sym = format!("{source}.sym");
    if !opts.keep_sym {
        match fs::remove_file(&sym) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %sym, error = %e, "cannot remove symbol table"),
        }
    }

    let program = load(&format!("{source}.quad"))?;
    execute(&program, &opts.config)
}

/// Report undecodable lines and unresolved jump targets.
pub fn check(args: &[String]) -> Result<(), i32> {
    let opts = parse_options("check", args, &[])?;
    logging::init(false);

    let input = &opts.input;
    let program = load(input)?;
    let labels = LabelTable::resolve(&program);

    // Unresolved targets are only fatal if the jump is taken, so they warn.
    for (index, instr) in program.instructions.iter().enumerate() {
        if let Some(target) = instr.jump_target() {
            if labels.get(target).is_none() {
                eprintln!("warning: {input}:{}: unknown label '{target}'", index + 1);
            }
        }
    }

    let problems = methanol_quad::diagnostics(&program);
    if !problems.is_empty() {
        for d in &problems {
            eprintln!("error: {input}:{}: {} ('{}')", d.line, d.error, d.text);
        }
        return Err(1);
    }

    let count = program
        .instructions
        .iter()
        .filter(|i| i.opcode().is_some())
        .count();
    println!(
        "OK: {input} ({count} instructions, {} labels)",
        labels.len()
    );
    Ok(())
}

/// Print the resolved label table.
pub fn labels(args: &[String]) -> Result<(), i32> {
    let opts = parse_options("labels", args, &[])?;
    logging::init(false);

    let program = load(&opts.input)?;
    for (name, index) in LabelTable::resolve(&program).sorted() {
        println!("{index}\t{name}");
    }
    Ok(())
}

/// Print the canonical listing of a .quad file.
pub fn list(args: &[String]) -> Result<(), i32> {
    let opts = parse_options("list", args, &[])?;
    logging::init(false);

    let program = load(&opts.input)?;
    print!("{}", methanol_quad::listing(&program));
    Ok(())
}

// --- Helpers ---

/// One-line usage for a command.
pub fn usage(command: &str) -> &'static str {
    match command {
        "run" => "methanol run <file.quad> [--max-call-depth N] [--trace]",
        "compile" => {
            "methanol compile <source> [--compiler PATH] [--keep-sym] [--max-call-depth N] [--trace]"
        }
        "check" => "methanol check <file.quad>",
        "labels" => "methanol labels <file.quad>",
        "list" => "methanol list <file.quad>",
        _ => "methanol <command> [args]",
    }
}

fn parse_options(command: &str, args: &[String], allowed: &[Flag]) -> Result<Options, i32> {
    Options::parse(args, allowed).map_err(|e| {
        eprintln!("error: {e}");
        eprintln!("Usage: {}", usage(command));
        1
    })
}

fn load(path: &str) -> Result<Program, i32> {
    methanol_quad::load_file(path).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Run a program on stdout. Runtime errors follow any output already printed.
fn execute(program: &Program, config: &VmConfig) -> Result<(), i32> {
    let result = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        methanol_vm::run_to(program, config, &mut out)
    };

    result.map_err(|e| {
        println!("Error: {e}");
        3
    })
}
