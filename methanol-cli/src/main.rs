//! Methanol CLI: compile, inspect and execute quad code.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage or input error
//! - 2: Compiler failure
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "compile" => commands::compile(&args[2..]),
        "check" => commands::check(&args[2..]),
        "labels" => commands::labels(&args[2..]),
        "list" => commands::list(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: {}", commands::usage(""));
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <file.quad>       Execute a quad-code program");
    eprintln!("  compile <source>      Compile with the external compiler, then execute");
    eprintln!("  check <file.quad>     Report undecodable lines and unknown labels");
    eprintln!("  labels <file.quad>    Print the resolved label table");
    eprintln!("  list <file.quad>      Print the canonical listing");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --max-call-depth N    Limit pending CALLs (run, compile; default 4096)");
    eprintln!("  --trace               Log every executed instruction to stderr");
    eprintln!("  --compiler PATH       Compiler to invoke (compile; default $METHANOL_COMPILER or ./methanol.exe)");
    eprintln!("  --keep-sym            Keep the compiler's .sym file (compile)");
}
