use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use zroot::kernel::services::adapters::{
    ensure_settings_file, ensure_settings_file_at, load_settings, load_settings_from,
    SettingsError,
};
use zroot::kernel::services::ports::FsProbe;
use zroot::kernel::CommandError;
use zroot::{RootCommand, RootService};

mod logging;

const USAGE: &str = "\
usage: zroot [--settings FILE] [-v|--verbose] COMMAND [PATH]
       zroot [--settings FILE] [-v|--verbose] --stdin
       zroot [--settings FILE] init-settings

commands:
  root PATH            project root for PATH (a file or directory), or `none`
  interpreter PATH     venv interpreter under the root, or the fallback name
  debug-config FILE    debug adapter launch config (JSON)
  test-config PATH     test runner config (JSON)
  invalidate           clear the root cache
  stats                cache entries, hits and misses

--stdin reads one command per line and keeps the root cache for the whole
session. Cached roots are never refreshed on their own: after creating or
removing a marker (e.g. a new .venv), run `invalidate`.";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    settings: Option<PathBuf>,
    stdin: bool,
    verbose: bool,
    help: bool,
    command: Vec<String>,
}

#[derive(Debug)]
enum CliError {
    UnknownFlag(String),
    MissingValue(&'static str),
    Command(CommandError),
    Settings(SettingsError),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::UnknownFlag(flag) => write!(f, "unknown option: {}", flag),
            CliError::MissingValue(flag) => write!(f, "{} needs a value", flag),
            CliError::Command(err) => write!(f, "{}", err),
            CliError::Settings(err) => write!(f, "{}", err),
            CliError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CliError {}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err)
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CliError::Settings(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl CliError {
    fn is_usage(&self) -> bool {
        matches!(
            self,
            CliError::UnknownFlag(_) | CliError::MissingValue(_) | CliError::Command(_)
        )
    }

    fn exit_code(&self) -> ExitCode {
        if self.is_usage() {
            ExitCode::from(2)
        } else {
            ExitCode::FAILURE
        }
    }
}

fn parse_args<I>(args: I) -> Result<CliArgs, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if !out.command.is_empty() {
            out.command.push(arg);
            continue;
        }
        match arg.as_str() {
            "-h" | "--help" => out.help = true,
            "-v" | "--verbose" => out.verbose = true,
            "--stdin" => out.stdin = true,
            "--settings" => {
                let value = args.next().ok_or(CliError::MissingValue("--settings"))?;
                out.settings = Some(PathBuf::from(value));
            }
            "--" => out.command.extend(args.by_ref()),
            _ => {
                if let Some(value) = arg.strip_prefix("--settings=") {
                    out.settings = Some(PathBuf::from(value));
                } else if arg.starts_with('-') {
                    return Err(CliError::UnknownFlag(arg));
                } else {
                    out.command.push(arg);
                }
            }
        }
    }

    Ok(out)
}

/// Command from CLI words; words after the name form one path.
fn command_from_words(words: &[String]) -> Result<RootCommand, CommandError> {
    let Some((name, rest)) = words.split_first() else {
        return Err(CommandError::Empty);
    };
    let arg = rest.join(" ");
    RootCommand::from_parts(name, (!arg.is_empty()).then_some(arg.as_str()))
}

/// Answer commands read from `input` until EOF or `quit`, one output line per
/// command that has output. Bad commands are reported and skipped.
fn run_session<P, R, W>(service: &mut RootService<P>, input: R, mut out: W) -> io::Result<()>
where
    P: FsProbe,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        match RootCommand::parse(line) {
            Ok(command) => {
                if let Some(text) = service.execute(&command) {
                    writeln!(out, "{}", text)?;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, line, "rejected command");
                writeln!(out, "error: {}", err)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn run(args: CliArgs) -> Result<(), CliError> {
    if args.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if args.command.first().map(String::as_str) == Some("init-settings") {
        let path = match args.settings {
            Some(path) => {
                ensure_settings_file_at(&path)?;
                path
            }
            None => ensure_settings_file()?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) => load_settings_from(path)?,
        None => load_settings().unwrap_or_default(),
    };
    let cwd = std::env::current_dir()?;
    tracing::debug!(cwd = %cwd.display(), markers = ?settings.markers, "starting");
    let mut service = RootService::from_settings(&settings, cwd);

    if args.stdin {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_session(&mut service, stdin.lock(), stdout.lock())?;
        return Ok(());
    }

    let command = command_from_words(&args.command)?;
    if let Some(text) = service.execute(&command) {
        println!("{}", text);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("zroot: {}\n\n{}", err, USAGE);
            return err.exit_code();
        }
    };

    let _logging = logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "zroot failed");
            eprintln!("zroot: {}", err);
            if err.is_usage() {
                eprintln!("\n{}", USAGE);
            }
            err.exit_code()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/cli_args.rs"]
mod tests;
