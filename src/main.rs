use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use clap::Parser;
use vesper::{
    error::Error,
    interpreter::{lexer, parser, value::Value},
    position::{snippet, Position},
    Runtime,
};

/// vesper is an easy to use, dynamically-typed expression language for
/// numeric work.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// A script file to run; without one, a script given with --eval runs,
    /// and with neither a REPL starts.
    path: Option<String>,

    /// A script passed directly on the command line.
    #[arg(short, long, value_name = "SCRIPT")]
    eval: Option<String>,

    /// Refuse imports of modules with ambient authority, such as fs.
    #[arg(long)]
    safe: bool,

    /// Print the token stream instead of running.
    #[arg(long)]
    tokens: bool,

    /// Print the syntax tree instead of running.
    #[arg(long)]
    ast: bool,

    /// Print the value of the last statement.
    #[arg(short, long)]
    print: bool,
}

fn main() {
    let args = Args::parse();

    let source = match (&args.path, &args.eval) {
        (Some(path), _) => match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("failed to read '{path}': {err}");
                std::process::exit(1);
            }
        },
        (None, Some(script)) => script.clone(),
        (None, None) => {
            repl(args.safe);
            return;
        }
    };

    if args.tokens || args.ast {
        dump(&source, args.tokens, args.ast);
        return;
    }

    let runtime = Runtime::new(args.safe, Rc::new(RefCell::new(std::io::stdout())));
    match runtime.eval(&source) {
        Ok(value) => {
            if args.print {
                println!("{value}");
            }
        }
        Err(err) => {
            report(&source, &err);
            std::process::exit(1);
        }
    }
}

/// Prints a diagnostic: the failing source lines, then the titled message
/// with its one-based position.
fn report(source: &str, err: &Error) {
    let span = err.span();
    eprintln!("{}", snippet(source, span));
    if span.is_eof() {
        eprintln!("{}: {err} at end of input", err.title());
    } else {
        let pos = Position::of(source, span.start);
        eprintln!("{}: {err} at {}:{}", err.title(), pos.row + 1, pos.col + 1);
    }
}

/// Dumps the token stream and/or syntax tree for a script.
fn dump(source: &str, tokens: bool, ast: bool) {
    let lexed = match lexer::lex(source) {
        Ok(lexed) => lexed,
        Err(err) => {
            report(source, &Error::from(err));
            std::process::exit(1);
        }
    };
    if tokens {
        for (token, span) in &lexed {
            println!("{span} {token:?}");
        }
    }
    if ast {
        match parser::parse(&lexed) {
            Ok(program) => println!("{program:#?}"),
            Err(err) => {
                report(source, &Error::from(err));
                std::process::exit(1);
            }
        }
    }
}

/// Reads statements from stdin and evaluates them against one shared
/// session, printing each non-empty result.
fn repl(safe: bool) {
    let runtime = Runtime::new(safe, Rc::new(RefCell::new(std::io::stdout())));
    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        if std::io::stdout().flush().is_err() {
            return;
        }
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        match runtime.eval(&line) {
            Ok(value) => {
                if !matches!(value, Value::None) {
                    println!("{value}");
                }
            }
            Err(err) => report(&line, &err),
        }
    }
}
