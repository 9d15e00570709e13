use std::{io, process::Command};

/// Captured outcome of running one external tool to completion.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Execution {
  /// Exit code, or `None` if the process was killed by a signal.
  pub code: Option<i32>,

  /// Everything the tool wrote to stdout.
  pub stdout: Vec<u8>,

  /// Everything the tool wrote to stderr.
  pub stderr: Vec<u8>,
}

impl Execution {
  /// Execution which exited with code 0 and printed `stdout`.
  pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
    Execution {
      code: Some(0),
      stdout: stdout.into(),
      stderr: Vec::new(),
    }
  }

  /// Execution which exited with `code` and printed `stderr`.
  pub fn failed(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
    Execution {
      code: Some(code),
      stdout: Vec::new(),
      stderr: stderr.into(),
    }
  }

  /// True only for a clean exit with code 0.
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  /// Stderr as trimmed, lossily decoded text.
  pub fn stderr_text(&self) -> String {
    String::from_utf8_lossy(&self.stderr).trim().to_owned()
  }
}

/// Runs an external tool and waits for it to exit.
///
/// This is the only place the shim touches process spawning, so tests can
/// substitute their own implementation.
pub trait Executor {
  /// Runs `tool` with `args`, blocking until it exits.
  ///
  /// An `Err` means the process could not be started. A process that starts
  /// and then fails is still `Ok`, with a non-zero code in the `Execution`.
  fn execute(&self, tool: &str, args: &[String]) -> io::Result<Execution>;
}

impl<E: Executor + ?Sized> Executor for &E {
  fn execute(&self, tool: &str, args: &[String]) -> io::Result<Execution> {
    (**self).execute(tool, args)
  }
}

/// Executor that spawns real processes through `std::process::Command`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
  fn execute(&self, tool: &str, args: &[String]) -> io::Result<Execution> {
    let output = Command::new(tool).args(args).output()?;

    Ok(Execution {
      code: output.status.code(),
      stdout: output.stdout,
      stderr: output.stderr,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_zero_is_success() {
    assert!(Execution::ok("1\n").success());
    assert!(!Execution::failed(1, "").success());
    assert!(!Execution::default().success());
  }

  #[test]
  fn missing_tool_is_a_spawn_error() {
    let result = SystemExecutor
      .execute("gpio-shim-tool-that-does-not-exist", &["0".to_owned()]);

    assert!(result.is_err());
  }
}
