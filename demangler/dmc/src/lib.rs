//! `dm` command-line front end.
//!
//! Decodes symbols given as arguments, or one symbol per line from stdin,
//! and prints each decoded tree. Anything that does not decode is echoed
//! unchanged, so the tool can be run over whole crash logs.

use std::io::{BufRead, Write};
use std::sync::Once;

use dm_parse::{demangle_symbol_bytes, demangle_type_bytes, Options};
use rayon::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing value for `{0}`")]
    MissingValue(&'static str),
    #[error("invalid nesting depth `{0}`")]
    InvalidDepth(String),
    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What each input line is decoded as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// A complete `_T` symbol.
    #[default]
    Symbol,
    /// A bare type mangling.
    Type,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub options: Options,
    /// Symbols from the command line. Empty means read stdin.
    pub symbols: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Decode(Config),
}

/// Parse the arguments that follow the program name.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, CliError> {
    let mut config = Config::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--type" | "-t" => config.mode = Mode::Type,
            "--max-depth" => {
                let value = args.next().ok_or(CliError::MissingValue("--max-depth"))?;
                config.options.max_depth = parse_depth(&value)?;
            }
            _ => {
                if let Some(value) = arg.strip_prefix("--max-depth=") {
                    config.options.max_depth = parse_depth(value)?;
                } else if arg.starts_with('-') {
                    return Err(CliError::UnknownFlag(arg));
                } else {
                    config.symbols.push(arg);
                }
            }
        }
    }

    Ok(Command::Decode(config))
}

fn parse_depth(value: &str) -> Result<u32, CliError> {
    match value.parse::<u32>() {
        Ok(depth) if depth > 0 => Ok(depth),
        _ => Err(CliError::InvalidDepth(value.to_string())),
    }
}

/// Output for one input line: the tree dump, or the line itself plus a
/// newline when it does not decode. Lines need not be valid UTF-8; an
/// undecodable line is echoed byte for byte.
pub fn render(line: &[u8], mode: Mode, options: Options) -> Vec<u8> {
    let tree = match mode {
        Mode::Symbol => demangle_symbol_bytes(line, options),
        Mode::Type => demangle_type_bytes(line, options),
    };
    match tree {
        Some(tree) => tree.to_string().into_bytes(),
        None => {
            let mut echo = Vec::with_capacity(line.len() + 1);
            echo.extend_from_slice(line);
            echo.push(b'\n');
            echo
        }
    }
}

/// Render every line in parallel, keeping input order.
pub fn render_all<L>(lines: &[L], mode: Mode, options: Options) -> Vec<Vec<u8>>
where
    L: AsRef<[u8]> + Sync,
{
    lines
        .par_iter()
        .map(|line| render(line.as_ref(), mode, options))
        .collect()
}

/// Split `input` into lines on `\n`, dropping a trailing `\r`.
fn read_lines(input: impl BufRead) -> Result<Vec<Vec<u8>>, CliError> {
    let mut lines = Vec::new();
    for line in input.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        lines.push(line);
    }
    Ok(lines)
}

/// Decode the configured symbols, or every line of `input` when none were
/// given, writing the results to `output`.
pub fn run(config: &Config, input: impl BufRead, mut output: impl Write) -> Result<(), CliError> {
    let rendered = if config.symbols.is_empty() {
        let lines = read_lines(input)?;
        tracing::debug!(count = lines.len(), "decoding stdin");
        render_all(&lines, config.mode, config.options)
    } else {
        render_all(&config.symbols, config.mode, config.options)
    };

    for chunk in rendered {
        output.write_all(&chunk)?;
    }
    output.flush()?;
    Ok(())
}

pub fn print_usage() {
    println!("Legacy symbol decoder");
    println!();
    println!("Usage: dm [options] [SYMBOL...]");
    println!();
    println!("With no symbols, reads one symbol per line from stdin.");
    println!("Lines that do not decode are printed unchanged.");
    println!();
    println!("Options:");
    println!("  --type, -t          Decode bare type manglings instead of symbols");
    println!("  --max-depth=<n>     Nesting limit (default: {})", dm_parse::MAX_DEPTH);
    println!("  --help, -h          Show this help message");
    println!();
    println!("Environment:");
    println!("  RUST_LOG            Enable decoder logging (e.g. RUST_LOG=dm_parse=trace)");
    println!("  DM_LOG_TREE         Render logs as an indented span tree");
}

static TRACING_INIT: Once = Once::new();

/// Install a log subscriber when `RUST_LOG` is set.
///
/// Safe to call multiple times. Logs go to stderr so they never mix with
/// decoded output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
        if std::env::var_os("DM_LOG_TREE").is_some() {
            registry
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
