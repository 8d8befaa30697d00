use crate::cli::Cli;
use crate::error::{DispatchError, DispatchResult, FAILURE_CODE};
use crate::logger;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::process::Command;

pub const USAGE: &str = "Usage: mdconvert <input.md> <output.html>";

/// The pair of paths handed to the conversion script, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: OsString,
    pub output: OsString,
}

impl Invocation {
    /// Take the first two positional arguments. Anything after them is ignored.
    pub fn from_args(args: &[OsString]) -> DispatchResult<Self> {
        match args {
            [input, output, rest @ ..] => {
                if !rest.is_empty() {
                    tracing::warn!("ignoring {} extra argument(s)", rest.len());
                }
                Ok(Self {
                    input: input.clone(),
                    output: output.clone(),
                })
            }
            _ => Err(DispatchError::Usage(USAGE.to_string())),
        }
    }
}

/// How the colocated conversion script gets launched.
#[derive(Debug, Clone)]
pub struct ConversionProgram {
    interpreter: OsString,
    script: PathBuf,
}

impl ConversionProgram {
    /// Resolve `script_name` next to the running executable.
    pub fn colocated(interpreter: &OsStr, script_name: &OsStr) -> DispatchResult<Self> {
        let exe = std::env::current_exe().map_err(DispatchError::Locate)?;
        let dir = exe.parent().ok_or_else(|| {
            DispatchError::Locate(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} has no parent directory", exe.display()),
            ))
        })?;
        Self::in_dir(dir, interpreter, script_name)
    }

    /// Resolve `script_name` inside `dir`. The name must be a bare file name.
    pub fn in_dir(dir: &Path, interpreter: &OsStr, script_name: &OsStr) -> DispatchResult<Self> {
        let name = Path::new(script_name);
        let mut components = name.components();
        let is_file_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_file_name {
            return Err(DispatchError::Usage(format!(
                "--script must be a file name, got {}",
                name.display()
            )));
        }

        let script = dir.join(name);
        tracing::debug!(script = %script.display(), "resolved conversion script");
        if !script.is_file() {
            return Err(DispatchError::ScriptNotFound(script));
        }

        Ok(Self {
            interpreter: interpreter.to_os_string(),
            script,
        })
    }

    pub fn command(&self, invocation: &Invocation) -> Command {
        let mut command = Command::new(&self.interpreter);
        command
            .arg(&self.script)
            .arg(&invocation.input)
            .arg(&invocation.output);
        command
    }

    /// The full command line, space separated, for display.
    pub fn command_line(&self, invocation: &Invocation) -> String {
        [
            self.interpreter.as_os_str(),
            self.script.as_os_str(),
            invocation.input.as_os_str(),
            invocation.output.as_os_str(),
        ]
        .iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Launch the conversion once and wait for it. Progress lines go to `out`.
pub fn dispatch(
    program: &ConversionProgram,
    invocation: &Invocation,
    out: &mut dyn Write,
) -> DispatchResult<()> {
    writeln!(out, "Running: {}", program.command_line(invocation))?;
    out.flush()?;

    let status = program
        .command(invocation)
        .status()
        .map_err(|source| DispatchError::Spawn {
            program: program.interpreter.to_string_lossy().into_owned(),
            source,
        })?;
    tracing::debug!(%status, "conversion program exited");

    if !status.success() {
        return Err(DispatchError::ChildProcess(status));
    }

    writeln!(out, "Conversion completed!")?;
    Ok(())
}

pub fn convert(cli: &Cli) -> DispatchResult<()> {
    let invocation = Invocation::from_args(&cli.paths)?;
    let program = ConversionProgram::colocated(&cli.interpreter, &cli.script)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    dispatch(&program, &invocation, &mut handle)
}

/// Parse `args` (program name first), run the dispatcher and report the
/// outcome. Returns the process exit code.
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().map_or(FAILURE_CODE, |()| 0);
        }
        Err(err) => return report(&invalid_arguments(&err)),
    };
    logger::init(cli.verbose);

    match convert(&cli) {
        Ok(()) => 0,
        Err(err) => report(&err),
    }
}

fn invalid_arguments(err: &clap::Error) -> DispatchError {
    let rendered = err.to_string();
    let reason = rendered
        .lines()
        .next()
        .map(|line| line.trim_start_matches("error: "))
        .unwrap_or_default();
    DispatchError::Usage(format!("{}\n{}", reason, USAGE))
}

fn report(err: &DispatchError) -> i32 {
    if err.is_usage() {
        println!("{}", err);
    } else {
        eprintln!("Error: {}", err);
    }
    err.exit_code()
}
