use std::io::{self, Write};
use std::{env, fs};

use anyhow::{anyhow, Context};
use leo::Interpreter;
use leo_source::Source;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match env::args().nth(1) {
        Some(path) => run_file(&path),
        None => repl(),
    }
}

fn run_file(path: &str) -> anyhow::Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path))?;

    let mut interpreter = Interpreter::new();
    interpreter
        .load(&content)
        .map_err(|err| located(&content, err))?;
    for warning in interpreter.warnings() {
        eprintln!("{}", warning);
    }

    if let Some(value) = interpreter.run()? {
        println!("{}", value);
    }
    Ok(())
}

/// Evaluates one expression per line.
fn repl() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let stdin = io::stdin();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break; // EOF
        }
        let mut input = input.trim().to_string();
        if input.is_empty() {
            continue;
        }
        if !input.ends_with(';') {
            input.push(';');
        }

        match leo::eval_expr(&input) {
            Ok(value) => println!("{}", value),
            Err(err) => eprintln!("{}", located(&input, err)),
        }
    }
    Ok(())
}

fn located(content: &str, err: leo::Error) -> anyhow::Error {
    match err.span() {
        Some(span) => {
            let position = Source::new(content).position(span.start);
            anyhow!("{} at {}: {}", err.kind(), position, err)
        }
        None => anyhow!("{}: {}", err.kind(), err),
    }
}
