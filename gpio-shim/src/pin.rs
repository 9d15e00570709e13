use std::fmt;

/// A single GPIO line on the configured chip, identified by its offset.
///
/// Pins carry no other state. They are cheap to copy and the shim never holds
/// on to them between calls.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pin {
  number: u32,
}

impl Pin {
  /// Creates a pin referring to line `number` of the chip.
  pub fn new(number: u32) -> Self {
    Pin { number }
  }

  /// The line offset of this pin.
  pub fn number(&self) -> u32 {
    self.number
  }
}

impl From<u32> for Pin {
  fn from(number: u32) -> Self {
    Pin::new(number)
  }
}

impl fmt::Display for Pin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.number)
  }
}

/// Whether a line is driven by us or sampled by us.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
  /// The line is read.
  Input,

  /// The line is driven.
  Output,
}

/// Edge detection setting for a line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Edge {
  /// No edge detection.
  #[default]
  None,

  /// Low to high transitions.
  Rising,

  /// High to low transitions.
  Falling,

  /// Transitions in either direction.
  Both,
}

impl Edge {
  /// The token passed to the command line tools for this edge.
  pub fn token(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Rising => "rising",
      Self::Falling => "falling",
      Self::Both => "both",
    }
  }
}

impl fmt::Display for Edge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.token())
  }
}

/// Logic level of a line.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PinValue {
  /// Logic 0.
  #[default]
  Low = 0,

  /// Logic 1.
  High = 1,
}

impl PinValue {
  /// Interprets raw tool output. Only a leading ASCII `'1'` counts as high;
  /// anything else, including no output at all, is low.
  pub fn from_output(output: &[u8]) -> Self {
    match output.first() {
      Some(b'1') => PinValue::High,
      _ => PinValue::Low,
    }
  }

  /// The opposite level.
  pub fn inverted(self) -> Self {
    match self {
      PinValue::Low => PinValue::High,
      PinValue::High => PinValue::Low,
    }
  }

  /// The digit used in `<pin>=<digit>` arguments.
  pub fn digit(self) -> char {
    match self {
      PinValue::Low => '0',
      PinValue::High => '1',
    }
  }
}

impl From<bool> for PinValue {
  fn from(high: bool) -> Self {
    if high {
      PinValue::High
    } else {
      PinValue::Low
    }
  }
}

impl From<PinValue> for u8 {
  fn from(value: PinValue) -> Self {
    value as u8
  }
}

impl fmt::Display for PinValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.digit())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn edge_tokens() {
    assert_eq!(Edge::None.token(), "none");
    assert_eq!(Edge::Rising.token(), "rising");
    assert_eq!(Edge::Falling.token(), "falling");
    assert_eq!(Edge::Both.token(), "both");
  }

  #[test]
  fn only_leading_one_reads_high() {
    assert_eq!(PinValue::from_output(b"1\n"), PinValue::High);
    assert_eq!(PinValue::from_output(b"0\n"), PinValue::Low);
    assert_eq!(PinValue::from_output(b""), PinValue::Low);
    assert_eq!(PinValue::from_output(b" 1"), PinValue::Low);
    assert_eq!(PinValue::from_output(b"active"), PinValue::Low);
  }

  #[test]
  fn numeric_forms() {
    assert_eq!(u8::from(PinValue::High), 1);
    assert_eq!(u8::from(PinValue::Low), 0);
    assert_eq!(PinValue::from(true).inverted(), PinValue::Low);
    assert_eq!(Pin::from(17).to_string(), "17");
  }
}
