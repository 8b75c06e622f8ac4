//! Purpose: `wpsexec` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, decodes execute requests, emits JSON on stdout.
//! Invariants: Commands emit stable stdout formats (JSON for `decode`).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: One `JsonCodec` is built at startup and lent to every command.
#![allow(clippy::result_large_err)]
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod execute_json;

use wpsexec::api::{Error, ErrorKind, JsonCodec, to_exit_code};
use wpsexec::notice::{Notice, notice_json};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let codec = JsonCodec::new();
    let exit_code = match run(&codec) {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&codec, &err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run(codec: &JsonCodec) -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = clap_error_summary(&err);
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(message)
                        .with_hint("Try `wpsexec --help`."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();

    let color_mode = cli.color;

    command_dispatch::dispatch_command(cli.command, codec, color_mode)
        .map_err(add_internal_hint)
        .map_err(|err| (err, color_mode))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "wpsexec",
    version,
    about = "Decode OGC API Processes execute requests",
    long_about = None,
    after_help = r#"EXAMPLES
  $ wpsexec decode request.json
  $ cat request.json | wpsexec decode --pretty
  $ wpsexec decode --strict request.json   # fail on inputs with an unknown value shape

LEARN MORE
  $ wpsexec <command> --help"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Decode an execute request document",
        long_about = r#"Decode an execute request into typed inputs and output definitions.

Reads FILE, or stdin when FILE is omitted or `-`, and prints the decoded
request as JSON. Inputs whose value shape is not recognized are printed as
`null` and reported as notices on stderr (or rejected with --strict)."#,
        after_help = r#"EXAMPLES
  $ wpsexec decode request.json
  $ wpsexec decode - < request.json
  $ wpsexec decode --strict --pretty request.json"#
    )]
    Decode {
        #[arg(help = "Request document (default: stdin)", value_hint = ValueHint::FilePath)]
        file: Option<String>,
        #[arg(long, help = "Fail when an input value has no recognized shape")]
        strict: bool,
        #[arg(long, help = "Pretty-print JSON output")]
        pretty: bool,
    },
    #[command(about = "Print version information")]
    Version,
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ wpsexec completion bash > ~/.local/share/bash-completion/completions/wpsexec
  $ wpsexec completion zsh > ~/.zfunc/_wpsexec"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn read_request_document(file: Option<&str>) -> Result<String, Error> {
    let mut document = String::new();
    match file {
        None | Some("-") => {
            io::stdin().read_to_string(&mut document).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read request from stdin")
                    .with_source(err)
            })?;
        }
        Some(path) => {
            let mut reader = std::fs::File::open(path).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message(format!("failed to open request file {path}"))
                    .with_hint("Check the path, or pipe the request to stdin.")
                    .with_source(err)
            })?;
            reader.read_to_string(&mut document).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message(format!("failed to read request file {path}"))
                    .with_source(err)
            })?;
        }
    }
    Ok(document)
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint("Internal error. Re-run with RUST_LOG=debug and report the output.")
}

fn emit_json(codec: &JsonCodec, value: Value, pretty: bool) {
    let pretty = pretty || io::stdout().is_terminal();
    let encoded = if pretty {
        codec.encode_pretty(&value)
    } else {
        codec.encode(&value)
    };
    let json = encoded.unwrap_or_else(|_| "{\"error\":\"json encode failed\"}".to_string());
    println!("{json}");
}

fn emit_version_output(codec: &JsonCodec) {
    if io::stdout().is_terminal() {
        println!("wpsexec {}", env!("CARGO_PKG_VERSION"));
    } else {
        emit_json(
            codec,
            json!({
                "name": "wpsexec",
                "version": env!("CARGO_PKG_VERSION"),
            }),
            false,
        );
    }
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(codec: &JsonCodec, err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = codec.encode(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn notice_time_now() -> Option<String> {
    use time::format_description::well_known::Rfc3339;
    let duration = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()?;
    ts.format(&Rfc3339).ok()
}

fn emit_notice(codec: &JsonCodec, notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        let label = colorize_label("notice:", color_mode.use_color(is_tty), AnsiColor::Yellow);
        eprintln!("{label} {} (input: {})", notice.message, notice.input);
        return;
    }

    let value = notice_json(notice);
    let json = codec.encode(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Serialization => "serialization failed".to_string(),
        ErrorKind::UriSyntax => "invalid uri".to_string(),
        ErrorKind::Unsupported => "unsupported input".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(input) = err.input() {
        inner.insert("input".to_string(), json!(input));
    }
    if let Some(index) = err.index() {
        inner.insert("index".to_string(), json!(index));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(input) = err.input() {
        lines.push(format!(
            "{} {input}",
            colorize_label("input:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(index) = err.index() {
        lines.push(format!(
            "{} {index}",
            colorize_label("index:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_json_carries_input_context() {
        let err = Error::new(ErrorKind::UriSyntax)
            .with_message("invalid href")
            .with_input("dem")
            .with_index(1)
            .with_source(url::Url::parse("http://[invalid").unwrap_err());
        let value = error_json(&err);
        assert_eq!(value["error"]["kind"], "UriSyntax");
        assert_eq!(value["error"]["message"], "invalid href");
        assert_eq!(value["error"]["input"], "dem");
        assert_eq!(value["error"]["index"], 1);
        assert!(value["error"]["causes"].as_array().is_some_and(|c| !c.is_empty()));
    }

    #[test]
    fn error_text_without_color_has_no_escapes() {
        let err = Error::new(ErrorKind::Unsupported).with_input("x");
        let text = error_text(&err, false);
        assert!(text.starts_with("error: unsupported input"));
        assert!(text.contains("input: x"));
        assert!(!text.contains('\u{1b}'));
    }

}
