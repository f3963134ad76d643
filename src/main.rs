use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use toylang::{
    config::Config,
    error::Error,
    interpreter::{
        analyzer::core::SemanticAnalyzer,
        evaluator::{console::Console, core::Interpreter},
    },
    parse,
};

/// toylang is a small dynamically typed scripting language.
///
/// Runs a script file, a snippet given with `--eval`, or an interactive
/// session when neither is given.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to run.
    file: Option<PathBuf>,

    /// Source text to run instead of a file.
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Start the interactive session after running the file or snippet.
    #[arg(long)]
    repl: bool,

    /// Skip the semantic analysis pass.
    #[arg(long)]
    no_analyze: bool,

    /// Maximum level of log records to print.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,

    /// Trace scopes and activation records as they are entered and left.
    #[arg(long)]
    trace_scopes: bool,

    /// Trace every function call.
    #[arg(long)]
    trace_calls: bool,

    /// Maximum number of nested function calls.
    #[arg(long, default_value_t = 1000)]
    max_call_depth: usize,
}

/// A persistent analyzer and interpreter pair.
///
/// Globals declared by one input stay visible to the next, which is what the
/// interactive session relies on.
struct Session {
    analyzer:    SemanticAnalyzer,
    interpreter: Interpreter,
    analyze:     bool,
}

impl Session {
    fn new(config: Config, analyze: bool) -> Self {
        Self { analyzer: SemanticAnalyzer::new(config),
               interpreter: Interpreter::with_console(config, Console::stdio()),
               analyze }
    }

    fn run(&mut self, source: &str) -> Result<(), Error> {
        let program = parse(source)?;
        if self.analyze {
            self.analyzer.analyze(&program)?;
        }
        self.interpreter.interpret(&program)?;
        Ok(())
    }

    /// Reads inputs from standard input until `exit` or end of input.
    ///
    /// A line ending in `\` continues onto the next one. `%info` prints the
    /// call stack.
    fn repl(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() { ">>> " } else { "... " };
            print!("{prompt}");
            io::stdout().flush()?;

            let Some(line) = lines.next().transpose()? else {
                println!();
                return Ok(());
            };

            if let Some(head) = line.strip_suffix('\\') {
                buffer.push_str(head);
                buffer.push('\n');
                continue;
            }
            buffer.push_str(&line);
            let input = std::mem::take(&mut buffer);

            match input.trim() {
                "" => {},
                "exit" => return Ok(()),
                "%info" => print!("{}", self.interpreter.call_stack()),
                source => {
                    if let Err(err) = self.run(source) {
                        eprintln!("{err}");
                    }
                },
            }
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = SimpleLogger::new().with_level(args.log_level).init() {
        eprintln!("failed to install logger: {err}");
    }

    let config = Config { trace_scopes:   args.trace_scopes,
                          trace_calls:    args.trace_calls,
                          max_call_depth: args.max_call_depth, };
    let mut session = Session::new(config, !args.no_analyze);

    let script = match (&args.file, args.eval) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(script) => Some(script),
            Err(err) => {
                eprintln!("failed to read '{}': {err}", path.display());
                return ExitCode::FAILURE;
            },
        },
        (None, eval) => eval,
    };

    if let Some(script) = &script {
        log::debug!("running {} bytes of source", script.len());
        if let Err(err) = session.run(script) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
        if !args.repl {
            return ExitCode::SUCCESS;
        }
    }

    if let Err(err) = session.repl() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
