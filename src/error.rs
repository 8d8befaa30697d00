use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Exit code for every failure that is not a child's own non-zero status.
pub const FAILURE_CODE: i32 = 1;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0}")]
    Usage(String),

    #[error("unable to locate the dispatcher executable: {0}")]
    Locate(#[source] io::Error),

    #[error("conversion script not found: {}", .0.display())]
    ScriptNotFound(PathBuf),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("conversion program failed ({0})")]
    ChildProcess(ExitStatus),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// The code the dispatcher should exit with for this error.
    ///
    /// A child that exited non-zero hands its own code through; a child
    /// killed by a signal has none, so it maps to [`FAILURE_CODE`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ChildProcess(status) => status
                .code()
                .filter(|code| *code != 0)
                .unwrap_or(FAILURE_CODE),
            _ => FAILURE_CODE,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;

    #[test]
    fn child_exit_code_is_propagated() {
        let err = DispatchError::ChildProcess(ExitStatus::from_raw(2 << 8));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn signalled_child_maps_to_failure() {
        // SIGKILL, no exit code
        let err = DispatchError::ChildProcess(ExitStatus::from_raw(9));
        assert_eq!(err.exit_code(), FAILURE_CODE);
    }

    #[test]
    fn usage_and_launch_errors_exit_with_one() {
        assert_eq!(DispatchError::Usage("usage".into()).exit_code(), 1);
        assert_eq!(
            DispatchError::ScriptNotFound(PathBuf::from("/nowhere/convert.js")).exit_code(),
            1
        );
        let spawn = DispatchError::Spawn {
            program: "node".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(spawn.exit_code(), 1);
        assert!(!spawn.is_usage());
    }
}
