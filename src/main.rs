use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser as ClapParser;
use log::{error, info};
use pl0c::{
    ast::printer::dump, lexer::lexer::tokenize, parser::parser::parse, render_error,
    type_checker::type_checker::{type_check, CheckOptions},
};

#[derive(ClapParser)]
#[command(name = "pl0c", about = "Checks PL/0 programs")]
struct Cli {
    /// Source file to check
    file: PathBuf,
    /// Print the token stream
    #[arg(long)]
    tokens: bool,
    /// Print the checked tree with its inferred types
    #[arg(long)]
    ast: bool,
    /// Require `bool` conditions and consistent return types
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", cli.file.display(), err);
            eprintln!("Failed to read {}: {}", cli.file.display(), err);
            return ExitCode::from(2);
        }
    };

    let options = if cli.strict {
        CheckOptions::strict()
    } else {
        CheckOptions::default()
    };

    let start = Instant::now();

    let tokens = match tokenize(&source, Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprint!("{}", render_error(&err, &source));
            return ExitCode::from(1);
        }
    };
    info!("Tokenized in {:?}", start.elapsed());

    if cli.tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let parse_start = Instant::now();
    let ast = match parse(tokens, Rc::new(file_name.clone())) {
        Ok(ast) => ast,
        Err(err) => {
            eprint!("{}", render_error(&err, &source));
            return ExitCode::from(1);
        }
    };
    info!("Parsed in {:?}", parse_start.elapsed());

    let type_check_start = Instant::now();
    let ast = match type_check(ast, options) {
        Ok(ast) => ast,
        Err(err) => {
            eprint!("{}", render_error(&err, &source));
            return ExitCode::from(1);
        }
    };
    info!("Type checked in {:?}", type_check_start.elapsed());

    if cli.ast {
        print!("{}", dump(&ast));
    }

    println!(
        "{}: {} functions checked in {:?}",
        file_name,
        ast.functions.len(),
        start.elapsed()
    );
    ExitCode::SUCCESS
}
