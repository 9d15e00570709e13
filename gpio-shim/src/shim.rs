use crate::{
  config::{LookupStyle, ShimConfig},
  error::{GpioError, GpioResult},
  exec::{Execution, Executor, SystemExecutor},
  pin::{Direction, Edge, Pin, PinValue},
};
use jeflog::{fail, pass, task, warn};
use std::{fmt, thread};

/// Drives GPIO lines by running the libgpiod command line tools.
///
/// Every operation spawns exactly one process and blocks until it exits. The
/// shim keeps no state besides its configuration, so it can be shared freely
/// between threads when its executor allows it.
#[derive(Clone, Debug)]
pub struct Shim<E = SystemExecutor> {
  config: ShimConfig,
  executor: E,
}

impl Shim<SystemExecutor> {
  /// Creates a shim that spawns real processes.
  pub fn new(config: ShimConfig) -> Self {
    Shim::with_executor(config, SystemExecutor)
  }
}

impl Default for Shim<SystemExecutor> {
  fn default() -> Self {
    Shim::new(ShimConfig::default())
  }
}

impl<E: Executor> Shim<E> {
  /// Creates a shim that runs its commands through `executor`.
  pub fn with_executor(config: ShimConfig, executor: E) -> Self {
    Shim { config, executor }
  }

  /// The configuration this shim was created with.
  pub fn config(&self) -> &ShimConfig {
    &self.config
  }

  /// The executor commands are run through.
  pub fn executor(&self) -> &E {
    &self.executor
  }

  /// Looks the pin up with the lookup tool and, if that succeeds, waits the
  /// configured settle delay before returning.
  pub fn locate(&self, pin: Pin) -> GpioResult<()> {
    let args = match self.config.lookup_style {
      LookupStyle::Number => vec![pin.to_string()],
      LookupStyle::Qualified => vec![self.config.chip.clone(), pin.to_string()],
    };

    self.run(&self.config.lookup_tool, args)?;
    thread::sleep(self.config.settle_delay());
    Ok(())
  }

  /// Fire-and-forget form of [`Shim::locate`]. A failed lookup is logged and
  /// otherwise ignored.
  pub fn export(&self, pin: Pin) {
    task!("Locating GPIO \x1b[1m{pin}\x1b[0m on {}.", self.config.chip);

    match self.locate(pin) {
      Ok(()) => {
        pass!("Located GPIO \x1b[1m{pin}\x1b[0m.");
      }
      Err(error) => {
        fail!("Failed to find GPIO \x1b[1m{pin}\x1b[0m: {error}");
      }
    }
  }

  /// Sets the direction of a line.
  ///
  /// Outputs are driven to `initial` with the set tool. Inputs are claimed by
  /// reading them once with the get tool; `initial` is ignored and the value
  /// read is discarded.
  pub fn configure_direction(
    &self,
    pin: Pin,
    direction: Direction,
    initial: PinValue,
  ) -> GpioResult<()> {
    match direction {
      Direction::Output => self.write(pin, initial),
      Direction::Input => {
        self.run(&self.config.get_tool, self.line_args(pin.to_string()))?;
        Ok(())
      }
    }
  }

  /// Passes `<pin>=<edge>` to the *get* tool.
  ///
  /// The get tool does not accept an edge assignment, so on real hardware
  /// this usually fails. The invocation is kept exactly as it has always been
  /// issued until it is decided what edge configuration should actually run.
  pub fn configure_edge_trigger(&self, pin: Pin, edge: Edge) -> GpioResult<()> {
    self.run(
      &self.config.get_tool,
      self.line_args(assignment(pin, edge.token())),
    )?;

    Ok(())
  }

  /// Returns `pin` unchanged. The tools open and release the line on every
  /// call, so there is nothing to hold.
  pub fn open(&self, pin: Pin, _write: bool) -> Pin {
    pin
  }

  /// Reads the current level of a line.
  pub fn read(&self, pin: Pin) -> GpioResult<PinValue> {
    let execution =
      self.run(&self.config.get_tool, self.line_args(pin.to_string()))?;

    Ok(PinValue::from_output(&execution.stdout))
  }

  /// Drives a line to `value`.
  pub fn write(&self, pin: Pin, value: PinValue) -> GpioResult<()> {
    self.run(
      &self.config.set_tool,
      self.line_args(assignment(pin, value.digit())),
    )?;

    Ok(())
  }

  /// Reads a line and drives it to the opposite level, returning the level
  /// that was written.
  pub fn toggle(&self, pin: Pin) -> GpioResult<PinValue> {
    let value = self.read(pin)?.inverted();
    self.write(pin, value)?;
    Ok(value)
  }

  fn line_args(&self, operand: String) -> Vec<String> {
    vec![self.config.chip.clone(), operand]
  }

  fn run(&self, tool: &str, args: Vec<String>) -> GpioResult<Execution> {
    let execution = self
      .executor
      .execute(tool, &args)
      .map_err(|error| GpioError::spawn(tool, error))?;

    if !execution.success() {
      let stderr = execution.stderr_text();
      warn!(
        "Command \x1b[1m{tool} {}\x1b[0m failed: {stderr}",
        args.join(" ")
      );

      return Err(GpioError::Command {
        tool: tool.to_owned(),
        args,
        code: execution.code,
        stderr,
      });
    }

    Ok(execution)
  }
}

fn assignment(pin: Pin, value: impl fmt::Display) -> String {
  format!("{pin}={value}")
}
