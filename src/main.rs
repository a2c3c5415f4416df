extern crate clap;

use std::{
    io::{self, BufWriter},
    process::ExitCode,
    time::Instant,
};

use brainfudge::{
    bytecode::listing::listing, lexer::lexer::Lexer, EofPolicy, Error, Optimizations, Program,
    Runtime,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

/// Brainf**k optimizer/interpreter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: String,

    /// What to do with it, runs the program if nothing is given
    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Only run these optimizations
    #[arg(short, long, value_enum)]
    optimizations: Vec<Pass>,

    /// Run every optimization (the default when `-o` isn't given)
    #[arg(short, long)]
    all_optimizations: bool,

    /// Run the program exactly as written
    #[arg(long, conflicts_with_all = ["optimizations", "all_optimizations"])]
    no_optimize: bool,

    /// What `,` stores once input runs out
    #[arg(long, value_enum, default_value_t = EofPolicy::MinusOne)]
    eof: EofPolicy,

    /// Text fed to the program (followed by a newline) before stdin
    #[arg(short, long)]
    input: Option<String>,

    /// Size of the output buffer, 0 writes every byte straight through
    #[arg(short, long, default_value_t = 8 * 1024)]
    buffer_size: usize,

    /// Give up after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,

    /// Don't report progress on stderr
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum Pass {
    /// Drop loops that can never be entered
    CommentBlock,
    /// `[-]` clears the cell
    Reset,
    /// `[>]` scans for a zero cell
    Seek,
    /// `[->++<]` multiplies into other cells
    Multiplication,
    /// `[]` is removed
    EmptyLoop,
    /// `[-]+++` stores a constant
    SetFolding,
}

impl From<Pass> for Optimizations {
    fn from(pass: Pass) -> Self {
        match pass {
            Pass::CommentBlock => Optimizations::COMMENT_BLOCK,
            Pass::Reset => Optimizations::RESET,
            Pass::Seek => Optimizations::SEEK,
            Pass::Multiplication => Optimizations::MULTIPLICATION,
            Pass::EmptyLoop => Optimizations::EMPTY_LOOP,
            Pass::SetFolding => Optimizations::SET_FOLDING,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the lexer
    Tokens,
    /// Output the optimized bytecode
    Bytecode,
    /// Run the program
    Run,
}

/// Progress lines on stderr, stdout belongs to the program
struct Reporter {
    quiet: bool,
}

impl Reporter {
    fn start(&self, what: &str) -> Instant {
        if !self.quiet {
            eprintln!("{} {}", "Starting".blue(), what.blue());
        }
        Instant::now()
    }

    fn finish(&self, what: &str, started: Instant) {
        if !self.quiet {
            eprintln!(
                "{} {} {} {:.2?}",
                "Finished".green(),
                what.green(),
                "in".green(),
                started.elapsed()
            );
        }
    }
}

impl Args {
    fn optimizations(&self) -> Optimizations {
        if self.no_optimize {
            Optimizations::empty()
        } else if self.all_optimizations || self.optimizations.is_empty() {
            Optimizations::all()
        } else {
            self.optimizations
                .iter()
                .fold(Optimizations::empty(), |acc, pass| {
                    acc | Optimizations::from(*pass)
                })
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let reporter = Reporter { quiet: args.quiet };
    let mut commands = args.commands.clone();
    if commands.is_empty() {
        commands.push(Commands::Run);
    }

    let source = std::fs::read(&args.file).map_err(Error::Source)?;

    if commands.contains(&Commands::Tokens) {
        let tokens: String = Lexer::new(&source).map(|t| t.kind.symbol()).collect();
        println!("{}", tokens);
    }

    let optimizations = args.optimizations();
    let now = reporter.start("parsing");
    let mut program = Program::with_optimizations(&source, optimizations)?;
    reporter.finish("parsing", now);
    tracing::info!(
        file = %args.file,
        instructions = program.instructions().len(),
        "ready to run"
    );

    if commands.contains(&Commands::Bytecode) {
        print!("{}", listing(program.instructions()));
    }

    if commands.contains(&Commands::Run) {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut runtime = Runtime::new(
            stdin.lock(),
            BufWriter::with_capacity(args.buffer_size, stdout.lock()),
        )
        .with_eof(args.eof)
        .with_step_limit(args.max_steps);
        if let Some(text) = &args.input {
            runtime = runtime.with_injection(text);
        }

        let now = reporter.start("program");
        program.run(&mut runtime)?;
        reporter.finish("program", now);
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{0:}: {1:}", "Error".red(), e);
            ExitCode::FAILURE
        }
    }
}
