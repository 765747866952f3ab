use std::fs;
use std::process::ExitCode;

use clap::Parser;

use diag::Diagnostics;

/// Ahead-of-time compiler from a C subset to a WebAssembly module.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input source file
    input: String,
    /// Path of the emitted WASM module
    #[arg(short, long, default_value = "out.wasm")]
    output: String,
    /// Print the syntax tree and exit
    #[arg(long)]
    print_ast: bool,
    /// Print the intermediate representation and exit
    #[arg(long)]
    print_ir: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Any byte sequence is accepted as source text; invalid UTF-8 lexes
    // as error tokens and is diagnosed like any other stray character.
    let raw = match fs::read(&args.input) {
        Ok(raw) => raw,
        Err(err) => {
            println!("error: could not read {}: {}", args.input, err);
            return ExitCode::FAILURE;
        }
    };
    let source = String::from_utf8_lossy(&raw).into_owned();

    let mut diag = Diagnostics::new();

    let program = parser::Parser::new(&source, &mut diag).parse_program();
    if diag.has_fatal() {
        diag.print(&source, &args.input);
        return ExitCode::FAILURE;
    }
    let program = match program {
        Some(program) => program,
        None => {
            println!("error: parse failed");
            return ExitCode::FAILURE;
        }
    };

    if args.print_ast {
        print!("{}", ast::pretty::program_to_string(&program));
        return ExitCode::SUCCESS;
    }

    wasm::analyzer::analyze(&program, &mut diag);
    if diag.has_fatal() {
        diag.print(&source, &args.input);
        return ExitCode::FAILURE;
    }

    let module = wasm::ir::lower(&program, &mut diag);
    if diag.has_fatal() {
        diag.print(&source, &args.input);
        return ExitCode::FAILURE;
    }

    if args.print_ir {
        print!("{}", module);
        return ExitCode::SUCCESS;
    }

    let bytes = wasm::emitter::emit(&module, &mut diag);
    if diag.has_fatal() {
        diag.print(&source, &args.input);
        return ExitCode::FAILURE;
    }

    if let Err(err) = fs::write(&args.output, &bytes) {
        println!("error: could not write {}: {}", args.output, err);
        return ExitCode::FAILURE;
    }
    println!("Compilation successful. Output written to {}", args.output);
    ExitCode::SUCCESS
}
