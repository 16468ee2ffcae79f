//! Command-line front end for `jassert-core`.
//!
//! Every subcommand reads two JSON operands (files, `-` for stdin, or
//! literal text with `--inline`), runs one assertion, and reports through
//! the exit code: 0 when it holds, 1 when it fails, 2 when the input or
//! invocation is unusable.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use jassert_core::{ArrayDiff, AssertError, DiffOptions, JsonAssert, Node, RenderConfig};
use tracing_subscriber::EnvFilter;

const EXIT_PASS: i32 = 0;
const EXIT_FAIL: i32 = 1;
const EXIT_ERROR: i32 = 2;
const DEFAULT_LOG_DIRECTIVE: &str = "warn";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Human-readable messages and diff hunks.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "jassert", version, about = "Semantic JSON assertions and structural diff")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// How arrays are aligned before comparison (`indexed` or `lcs`).
    #[arg(long = "array-diff", global = true, default_value = "indexed")]
    array_diff: ArrayDiff,

    /// Maximum absolute difference for numbers to be equal.
    #[arg(long = "precision", global = true)]
    precision: Option<f64>,

    /// Render output using ANSI colors.
    #[arg(long = "color", global = true, action = ArgAction::SetTrue)]
    color: bool,

    /// Output format for failures and diffs.
    #[arg(long = "format", global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Treat operands as JSON text instead of file paths.
    #[arg(long = "inline", global = true, action = ArgAction::SetTrue)]
    inline: bool,

    /// Increase log verbosity (`-v` debug, `-vv` trace).
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log line format on stderr.
    #[arg(long = "log-format", global = true, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every difference between EXPECTED and ACTUAL.
    Diff(Operands),
    /// Assert that ACTUAL equals EXPECTED.
    Equal(Operands),
    /// Assert that ACTUAL differs from EXPECTED.
    NotEqual(Operands),
    /// Assert that the ACTUAL array contains the EXPECTED element.
    Contains(Operands),
    /// Assert that the ACTUAL array does not contain the EXPECTED element.
    NotContains(Operands),
    /// Assert that the ACTUAL array contains every EXPECTED element.
    ContainsAll(Operands),
    /// Assert that the ACTUAL array contains some EXPECTED element.
    ContainsAny(Operands),
    /// Assert that the ACTUAL array contains no EXPECTED element.
    ContainsNone(Operands),
    /// Assert that PATH in ACTUAL holds the EXPECTED value.
    Property(PropertyOperands),
    /// Assert that PATH in ACTUAL does not hold the EXPECTED value.
    NoProperty(PropertyOperands),
}

#[derive(Debug, Args)]
struct Operands {
    /// Expected JSON (file path, `-` for stdin, or text with --inline).
    #[arg(value_name = "EXPECTED")]
    expected: String,
    /// Actual JSON (file path, `-` for stdin, or text with --inline).
    #[arg(value_name = "ACTUAL")]
    actual: String,
}

#[derive(Debug, Args)]
struct PropertyOperands {
    /// JSON Pointer to the property, e.g. `/a/0/b`.
    #[arg(long = "path")]
    path: String,
    #[command(flatten)]
    operands: Operands,
}

fn main() {
    let code = match try_main() {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(io::stderr(), "error: {err:#}");
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

fn try_main() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format)?;

    let options = build_options(&cli)?;
    let render_config = RenderConfig::default().with_color(cli.color);
    let mut reader = OperandReader::new(cli.inline);

    let output = match &cli.command {
        Command::Diff(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            run_diff(&expected, &actual, &options, cli.format, render_config)?
        }
        command => {
            let asserter = JsonAssert::new(options);
            let result = run_assertion(&asserter, command, &mut reader)?;
            report(result, cli.format, render_config)?
        }
    };

    print!("{}", output.text);
    io::stdout().flush().ok();
    Ok(output.code)
}

struct Output {
    text: String,
    code: i32,
}

fn init_logging(verbose: u8, format: LogFormat) -> Result<()> {
    let filter = match verbosity_directive(verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to initialize logging: {err}"))
}

/// Explicit `-v` levels override `RUST_LOG`; `None` defers to the environment.
fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

fn build_options(cli: &Cli) -> Result<DiffOptions> {
    let mut options = DiffOptions::default().with_array_diff(cli.array_diff);
    if let Some(precision) = cli.precision {
        options = options.with_precision(precision).map_err(|err| anyhow!(err))?;
    }
    Ok(options)
}

struct OperandReader {
    inline: bool,
    stdin_used: bool,
}

impl OperandReader {
    fn new(inline: bool) -> Self {
        Self { inline, stdin_used: false }
    }

    fn read_pair(&mut self, operands: &Operands) -> Result<(Node, Node)> {
        let expected = self.read(&operands.expected, "expected")?;
        let actual = self.read(&operands.actual, "actual")?;
        Ok((expected, actual))
    }

    fn read(&mut self, operand: &str, role: &str) -> Result<Node> {
        let text = self.read_text(operand, role)?;
        tracing::debug!(role, bytes = text.len(), "read operand");
        Node::from_json_str(&text).with_context(|| format!("failed to parse {role} as JSON"))
    }

    fn read_text(&mut self, operand: &str, role: &str) -> Result<String> {
        if operand == "-" {
            if self.stdin_used {
                bail!("only one operand may be read from stdin");
            }
            self.stdin_used = true;
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .with_context(|| format!("failed to read {role} from stdin"))?;
            return Ok(buffer);
        }
        if self.inline {
            return Ok(operand.to_owned());
        }
        if operand.is_empty() {
            bail!("expected file path for {role}; got empty string");
        }
        fs::read_to_string(operand).with_context(|| format!("failed to read {role} from {operand}"))
    }
}

fn run_diff(
    expected: &Node,
    actual: &Node,
    options: &DiffOptions,
    format: OutputFormat,
    render_config: RenderConfig,
) -> Result<Output> {
    let diff = expected.diff(actual, options);
    let text = match format {
        OutputFormat::Text => diff.render(&render_config),
        OutputFormat::Json => {
            let mut raw = diff.render_raw().context("failed to serialize diff")?;
            raw.push('\n');
            raw
        }
    };
    let code = if diff.is_empty() { EXIT_PASS } else { EXIT_FAIL };
    Ok(Output { text, code })
}

fn run_assertion(
    asserter: &JsonAssert,
    command: &Command,
    reader: &mut OperandReader,
) -> Result<Result<(), AssertError>> {
    let result = match command {
        Command::Diff(_) => bail!("diff is not an assertion"),
        Command::Equal(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            asserter.equal(&expected, &actual)
        }
        Command::NotEqual(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            asserter.not_equal(&expected, &actual)
        }
        Command::Contains(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            asserter.contains(&expected, &actual)
        }
        Command::NotContains(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            asserter.not_contains(&expected, &actual)
        }
        Command::ContainsAll(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            asserter.contains_all(&expected, &actual)
        }
        Command::ContainsAny(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            asserter.contains_any(&expected, &actual)
        }
        Command::ContainsNone(operands) => {
            let (expected, actual) = reader.read_pair(operands)?;
            asserter.contains_none(&expected, &actual)
        }
        Command::Property(property) => {
            let (expected, actual) = reader.read_pair(&property.operands)?;
            asserter.contains_property(&expected, &property.path, &actual)
        }
        Command::NoProperty(property) => {
            let (expected, actual) = reader.read_pair(&property.operands)?;
            asserter.not_contains_property(&expected, &property.path, &actual)
        }
    };
    Ok(result)
}

fn report(
    result: Result<(), AssertError>,
    format: OutputFormat,
    render_config: RenderConfig,
) -> Result<Output> {
    let failure = match result {
        Ok(()) => return Ok(Output { text: String::new(), code: EXIT_PASS }),
        Err(AssertError::Failed(failure)) => failure,
        Err(AssertError::Input(err)) => return Err(anyhow!(err)),
    };
    let text = match format {
        OutputFormat::Text => failure.render(&render_config),
        OutputFormat::Json => {
            let mut json = serde_json::to_string(&failure).context("failed to serialize failure")?;
            json.push('\n');
            json
        }
    };
    Ok(Output { text, code: EXIT_FAIL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments parse")
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = parse(&["jassert", "equal", "a.json", "b.json", "--array-diff", "lcs", "--precision", "0.5"]);
        let options = build_options(&cli).unwrap();
        assert_eq!(options.array_diff(), ArrayDiff::Lcs);
        assert!((options.precision() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_precision_is_rejected() {
        let cli = parse(&["jassert", "--precision=-1", "equal", "a", "b"]);
        assert!(build_options(&cli).is_err());
    }

    #[test]
    fn unknown_array_diff_is_a_usage_error() {
        assert!(Cli::try_parse_from(["jassert", "--array-diff", "set", "equal", "a", "b"]).is_err());
    }

    #[test]
    fn property_requires_path() {
        assert!(Cli::try_parse_from(["jassert", "property", "1", "{}"]).is_err());
        let cli = parse(&["jassert", "property", "--path", "/a", "1", "{}"]);
        match cli.command {
            Command::Property(property) => {
                assert_eq!(property.path, "/a");
                assert_eq!(property.operands.expected, "1");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn inline_operands_are_parsed_as_json() {
        let mut reader = OperandReader::new(true);
        let node = reader.read("{\"a\":[1]}", "expected").unwrap();
        assert_eq!(node, Node::from_json_str("{\"a\":[1]}").unwrap());
        assert!(reader.read("{", "actual").is_err());
    }

    #[test]
    fn verbosity_maps_to_directives() {
        assert_eq!(verbosity_directive(0), None);
        assert_eq!(verbosity_directive(1), Some("debug"));
        assert_eq!(verbosity_directive(3), Some("trace"));
    }

    #[test]
    fn report_maps_outcomes_to_exit_codes() {
        let config = RenderConfig::default();
        let passed = report(Ok(()), OutputFormat::Text, config).unwrap();
        assert_eq!(passed.code, EXIT_PASS);
        assert!(passed.text.is_empty());

        let failed = report(
            JsonAssert::default().equal("{\"a\":1}", "{}"),
            OutputFormat::Json,
            config,
        )
        .unwrap();
        assert_eq!(failed.code, EXIT_FAIL);
        let value: serde_json::Value = serde_json::from_str(&failed.text).unwrap();
        assert_eq!(value["kind"], "missing");
        assert_eq!(value["path"], "/a");

        let input = report(JsonAssert::default().contains("1", "{}"), OutputFormat::Text, config);
        assert!(input.is_err());
    }
}
