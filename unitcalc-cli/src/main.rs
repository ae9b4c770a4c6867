//! unitcalc REPL
//!
//! Reads one line at a time from stdin and prints the result (or error) for
//! each. Logs go to stderr, filtered by RUST_LOG.

use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use unitcalc::{classify, Command, NumberFormat, OutputMode, Renderer, Request, UnitCalc};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PROMPT: &str = "> ";

/// Evaluate arithmetic and convert units, one line at a time
#[derive(Debug, Parser)]
#[command(name = "unitcalc", version)]
struct Args {
    /// Print each result as a JSON object
    #[arg(long)]
    json: bool,

    /// Digits after the decimal point (default: shortest exact form)
    #[arg(long, value_name = "N")]
    precision: Option<usize>,

    /// Suppress the banner and prompt
    #[arg(short, long)]
    quiet: bool,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn renderer(&self) -> Renderer {
        let format = match self.precision {
            Some(places) => NumberFormat::Decimal(places),
            None => NumberFormat::Shortest,
        };
        let mode = if self.json { OutputMode::Json } else { OutputMode::Text };
        Renderer::new().with_format(format).with_mode(mode)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Drive the read-eval-print loop until EOF or `:quit`.
///
/// Evaluation errors are printed and the loop continues; only I/O errors end
/// it early.
fn run<R: BufRead, W: Write>(
    calc: &UnitCalc,
    renderer: &Renderer,
    mut input: R,
    output: &mut W,
    prompt: bool,
) -> io::Result<()> {
    let mut line = String::new();
    loop {
        if prompt {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }
        let text = line.trim_end_matches(['\n', '\r']);

        let result = match classify(text) {
            Ok(Request::Empty) => continue,
            Ok(Request::Command(Command::Quit)) => break,
            Ok(request) => calc.execute(request),
            Err(e) => Err(e.into()),
        };

        if let Err(e) = &result {
            debug!(code = e.code(), line = text, "evaluation failed");
        }
        writeln!(output, "{}", renderer.render(&result))?;
        output.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let calc = UnitCalc::with_standard_table();
    let renderer = args.renderer();
    let interactive = io::stdin().is_terminal() && !args.quiet;

    info!(version = VERSION, conversions = calc.table().len(), "unitcalc started");
    if interactive {
        println!("unitcalc v{} - type :help for usage, :quit to leave", VERSION);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match run(&calc, &renderer, stdin.lock(), &mut stdout, interactive) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}
