use std::{error, fmt, io};

/// Any error that a shim operation can return.
#[derive(Debug)]
pub enum GpioError {
  /// The external tool could not be started at all.
  Spawn {
    /// Name of the tool that was invoked.
    tool: String,

    /// Underlying error from the operating system.
    source: io::Error,
  },

  /// The external tool ran but did not exit successfully.
  Command {
    /// Name of the tool that was invoked.
    tool: String,

    /// Arguments the tool was invoked with.
    args: Vec<String>,

    /// Exit code, or `None` if the process was terminated by a signal.
    code: Option<i32>,

    /// Whatever the tool wrote to stderr, trimmed.
    stderr: String,
  },

  /// Configuration was readable but invalid.
  Config(String),

  /// Configuration file could not be read.
  Io(io::Error),

  /// Configuration file was not valid JSON for `ShimConfig`.
  Json(serde_json::Error),
}

impl GpioError {
  /// Wraps an OS-level spawn failure of `tool`.
  pub fn spawn(tool: impl ToString, source: io::Error) -> Self {
    GpioError::Spawn {
      tool: tool.to_string(),
      source,
    }
  }
}

impl fmt::Display for GpioError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Spawn { tool, source } => {
        write!(f, "failed to execute {tool}: {source}")
      }
      Self::Command {
        tool,
        args,
        code,
        stderr,
      } => {
        write!(f, "command `{tool} {}` failed", args.join(" "))?;

        match code {
          Some(code) => write!(f, " with exit code {code}")?,
          None => write!(f, " after being terminated by a signal")?,
        }

        if !stderr.is_empty() {
          write!(f, ": {stderr}")?;
        }

        Ok(())
      }
      Self::Config(message) => write!(f, "invalid configuration: {message}"),
      Self::Io(error) => write!(f, "failed to read configuration: {error}"),
      Self::Json(error) => write!(f, "failed to parse configuration: {error}"),
    }
  }
}

impl error::Error for GpioError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Self::Spawn { source, .. } => Some(source),
      Self::Io(error) => Some(error),
      Self::Json(error) => Some(error),
      Self::Command { .. } | Self::Config(_) => None,
    }
  }
}

impl From<io::Error> for GpioError {
  fn from(error: io::Error) -> Self {
    GpioError::Io(error)
  }
}

impl From<serde_json::Error> for GpioError {
  fn from(error: serde_json::Error) -> Self {
    GpioError::Json(error)
  }
}

/// A `Result` type containing a `GpioError` as its `Err` variant.
pub type GpioResult<T> = Result<T, GpioError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn command_error_carries_stderr() {
    let error = GpioError::Command {
      tool: "gpioset".to_owned(),
      args: vec!["gpiochip0".to_owned(), "4=1".to_owned()],
      code: Some(1),
      stderr: "gpioset: error setting the GPIO line values".to_owned(),
    };

    assert_eq!(
      error.to_string(),
      "command `gpioset gpiochip0 4=1` failed with exit code 1: \
       gpioset: error setting the GPIO line values"
    );
  }

  #[test]
  fn signal_termination_is_described() {
    let error = GpioError::Command {
      tool: "gpioget".to_owned(),
      args: vec!["gpiochip0".to_owned(), "4".to_owned()],
      code: None,
      stderr: String::new(),
    };

    assert_eq!(
      error.to_string(),
      "command `gpioget gpiochip0 4` failed after being terminated by a signal"
    );
  }

  #[test]
  fn spawn_error_exposes_source() {
    let error = GpioError::spawn(
      "gpiofind",
      io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
    );

    assert!(error::Error::source(&error).is_some());
    assert!(error.to_string().starts_with("failed to execute gpiofind"));
  }
}
