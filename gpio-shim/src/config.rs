use crate::error::{GpioError, GpioResult};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

/// How the pin-lookup tool is given the pin.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStyle {
  /// Only the pin number, e.g. `gpiofind 17`.
  #[default]
  Number,

  /// The chip followed by the pin number, e.g. `gpiofind gpiochip0 17`.
  Qualified,
}

/// Names of the chip and tools the shim drives, plus timing.
///
/// Every field has a default, so a JSON document only needs to name what it
/// overrides. `{}` is a valid configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ShimConfig {
  /// GPIO controller the pins belong to.
  pub chip: String,

  /// Tool used to look up a pin.
  pub lookup_tool: String,

  /// Tool used to read a line.
  pub get_tool: String,

  /// Tool used to drive a line.
  pub set_tool: String,

  /// Pause after a successful lookup, in milliseconds.
  pub settle_delay_ms: u64,

  /// Argument shape for the lookup tool.
  pub lookup_style: LookupStyle,
}

impl Default for ShimConfig {
  fn default() -> Self {
    ShimConfig {
      chip: "gpiochip0".to_owned(),
      lookup_tool: "gpiofind".to_owned(),
      get_tool: "gpioget".to_owned(),
      set_tool: "gpioset".to_owned(),
      settle_delay_ms: 100,
      lookup_style: LookupStyle::Number,
    }
  }
}

impl ShimConfig {
  /// Parses and validates a configuration from a JSON string.
  pub fn from_json(json: &str) -> GpioResult<Self> {
    let config: ShimConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads, parses and validates a JSON configuration file.
  pub fn load(path: impl AsRef<Path>) -> GpioResult<Self> {
    let contents = fs::read_to_string(path)?;
    Self::from_json(&contents)
  }

  /// Rejects empty chip or tool names, which would otherwise only show up as
  /// confusing spawn errors much later.
  pub fn validate(&self) -> GpioResult<()> {
    let fields = [
      ("chip", &self.chip),
      ("lookup_tool", &self.lookup_tool),
      ("get_tool", &self.get_tool),
      ("set_tool", &self.set_tool),
    ];

    for (name, value) in fields {
      if value.trim().is_empty() {
        return Err(GpioError::Config(format!("'{name}' must not be empty")));
      }
    }

    Ok(())
  }

  /// `settle_delay_ms` as a `Duration`.
  pub fn settle_delay(&self) -> Duration {
    Duration::from_millis(self.settle_delay_ms)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_is_all_defaults() -> anyhow::Result<()> {
    let config = ShimConfig::from_json("{}")?;

    assert_eq!(config, ShimConfig::default());
    assert_eq!(config.settle_delay(), Duration::from_millis(100));
    Ok(())
  }

  #[test]
  fn partial_override() -> anyhow::Result<()> {
    let config = ShimConfig::from_json(
      r#"{ "chip": "gpiochip2", "lookup_style": "qualified", "settle_delay_ms": 0 }"#,
    )?;

    assert_eq!(config.chip, "gpiochip2");
    assert_eq!(config.lookup_style, LookupStyle::Qualified);
    assert_eq!(config.settle_delay(), Duration::ZERO);
    assert_eq!(config.set_tool, "gpioset");
    Ok(())
  }

  #[test]
  fn empty_tool_is_rejected() {
    let result = ShimConfig::from_json(r#"{ "get_tool": " " }"#);
    assert!(matches!(result, Err(GpioError::Config(_))));
  }

  #[test]
  fn malformed_json_is_rejected() {
    let result = ShimConfig::from_json(r#"{ "chip": 0 }"#);
    assert!(matches!(result, Err(GpioError::Json(_))));
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let result = ShimConfig::load("/nonexistent/gpio-shim.json");
    assert!(matches!(result, Err(GpioError::Io(_))));
  }
}
