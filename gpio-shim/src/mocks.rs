//! In-memory stand-in for the GPIO command line tools.

use crate::{
  config::ShimConfig,
  exec::{Execution, Executor},
};
use std::{
  collections::HashMap,
  io,
  sync::{Arc, Mutex},
};

/// One recorded call to the executor.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
  /// Tool name as passed to the executor.
  pub tool: String,

  /// Arguments as passed to the executor.
  pub args: Vec<String>,
}

#[derive(Default)]
struct FakeState {
  lines: HashMap<u32, char>,
  edges: HashMap<u32, String>,
  failures: HashMap<String, (i32, String)>,
  invocations: Vec<Invocation>,
}

/// Executor which emulates the lookup, get and set tools against a table of
/// line values instead of spawning processes.
///
/// Clones share state, so a test can hand one clone to a `Shim` and inspect
/// the other.
#[derive(Clone)]
pub struct FakeExecutor {
  lookup_tool: String,
  get_tool: String,
  set_tool: String,
  state: Arc<Mutex<FakeState>>,
}

impl Default for FakeExecutor {
  fn default() -> Self {
    FakeExecutor::for_config(&ShimConfig::default())
  }
}

impl FakeExecutor {
  /// Emulates the tools named in `config`.
  pub fn for_config(config: &ShimConfig) -> Self {
    FakeExecutor {
      lookup_tool: config.lookup_tool.clone(),
      get_tool: config.get_tool.clone(),
      set_tool: config.set_tool.clone(),
      state: Arc::new(Mutex::new(FakeState::default())),
    }
  }

  /// Makes every later call to `tool` exit with `code` and print `stderr`.
  pub fn fail(&self, tool: &str, code: i32, stderr: &str) {
    self
      .state
      .lock()
      .unwrap()
      .failures
      .insert(tool.to_owned(), (code, stderr.to_owned()));
  }

  /// Undoes `fail` for `tool`.
  pub fn recover(&self, tool: &str) {
    self.state.lock().unwrap().failures.remove(tool);
  }

  /// Every call made so far, oldest first.
  pub fn invocations(&self) -> Vec<Invocation> {
    self.state.lock().unwrap().invocations.clone()
  }

  /// The most recent call, if any.
  pub fn last_invocation(&self) -> Option<Invocation> {
    self.state.lock().unwrap().invocations.last().cloned()
  }

  /// Digit last driven onto `line`, if it was ever driven.
  pub fn line(&self, line: u32) -> Option<char> {
    self.state.lock().unwrap().lines.get(&line).copied()
  }

  /// Edge token last passed for `line`, if any.
  pub fn edge(&self, line: u32) -> Option<String> {
    self.state.lock().unwrap().edges.get(&line).cloned()
  }
}

impl Executor for FakeExecutor {
  fn execute(&self, tool: &str, args: &[String]) -> io::Result<Execution> {
    let mut state = self.state.lock().unwrap();

    state.invocations.push(Invocation {
      tool: tool.to_owned(),
      args: args.to_vec(),
    });

    if let Some((code, stderr)) = state.failures.get(tool) {
      return Ok(Execution::failed(*code, stderr.as_bytes()));
    }

    if tool == self.lookup_tool {
      return Ok(Execution::ok(Vec::new()));
    }

    // every other tool takes the chip first
    let Some(operands) = args.get(1..).filter(|rest| !rest.is_empty()) else {
      return Ok(Execution::failed(
        1,
        format!("{tool}: at least one GPIO line offset must be specified"),
      ));
    };

    if tool == self.set_tool {
      for argument in operands {
        match parse_assignment(argument) {
          Some((line, value @ ("0" | "1"))) => {
            state.lines.insert(line, if value == "1" { '1' } else { '0' });
          }
          _ => {
            return Ok(Execution::failed(
              1,
              format!("{tool}: invalid offset<->value mapping: {argument}"),
            ));
          }
        }
      }

      Ok(Execution::ok(Vec::new()))
    } else if tool == self.get_tool {
      let mut stdout = String::new();

      for argument in operands {
        if let Some((line, edge)) = parse_assignment(argument) {
          state.edges.insert(line, edge.to_owned());
          continue;
        }

        let Ok(line) = argument.parse::<u32>() else {
          return Ok(Execution::failed(
            1,
            format!("{tool}: invalid GPIO offset: {argument}"),
          ));
        };

        if !stdout.is_empty() {
          stdout.push(' ');
        }

        stdout.push(state.lines.get(&line).copied().unwrap_or('0'));
      }

      stdout.push('\n');
      Ok(Execution::ok(stdout))
    } else {
      Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("{tool}: command not found"),
      ))
    }
  }
}

fn parse_assignment(argument: &str) -> Option<(u32, &str)> {
  let (line, value) = argument.split_once('=')?;
  Some((line.parse().ok()?, value))
}
