use std::{env, fs::read_to_string, process::ExitCode};

use neon::{lexer::lexer::tokenize, parser::parser::parse, scanner::scanner::scan};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: neon <file>");
        return ExitCode::FAILURE;
    }

    let source = match read_to_string(&args[1]) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: could not read '{}': {}", args[1], error);
            return ExitCode::FAILURE;
        }
    };

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let (mut statements, parse_errors) = parse(&tokens);
    if !parse_errors.is_empty() {
        for error in &parse_errors {
            eprintln!("{}\n", error);
        }
        return ExitCode::FAILURE;
    }

    let (warnings, fatal) = scan(&mut statements);
    for warning in &warnings {
        eprintln!("{}\n", warning);
    }
    if let Some(error) = fatal {
        eprintln!("{}\n", error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
