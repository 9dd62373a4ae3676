//! Motion command model shared by the codec and the planner

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameter symbols a motion command may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamKey {
    X,
    Y,
    Z,
    /// Arc centre X
    I,
    /// Arc centre Y
    J,
    /// Feed rate (mm/s)
    F,
    /// Laser power
    S,
}

impl ParamKey {
    /// Position axes tracked modally by the planner
    pub const AXES: [ParamKey; 3] = [ParamKey::X, ParamKey::Y, ParamKey::Z];

    /// Map a word letter to a parameter symbol. Unknown letters yield `None`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(ParamKey::X),
            'Y' => Some(ParamKey::Y),
            'Z' => Some(ParamKey::Z),
            'I' => Some(ParamKey::I),
            'J' => Some(ParamKey::J),
            'F' => Some(ParamKey::F),
            'S' => Some(ParamKey::S),
            _ => None,
        }
    }

    /// Whether the symbol is a position coordinate rather than a modal rate
    pub fn is_coordinate(self) -> bool {
        !matches!(self, ParamKey::F | ParamKey::S)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            ParamKey::X => 'X',
            ParamKey::Y => 'Y',
            ParamKey::Z => 'Z',
            ParamKey::I => 'I',
            ParamKey::J => 'J',
            ParamKey::F => 'F',
            ParamKey::S => 'S',
        };
        write!(f, "{}", c)
    }
}

/// Command opcode
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// G01 linear interpolation
    MoveLinear,
    /// G00 rapid positioning
    MoveLinearRapid,
    /// G02 clockwise arc
    MoveArcCW,
    /// G03 counter-clockwise arc
    MoveArcCCW,
    /// M3 laser on
    LaserOn,
    /// M5 laser off
    LaserOff,
    /// Any other G or M word, kept for modal axis tracking
    Other(String),
}

impl Opcode {
    /// Parse a G/M word such as `G1`, `G01`, `M3` or `m05`
    pub fn from_word(word: &str) -> Option<Self> {
        let mut chars = word.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let number = chars.as_str();
        if letter != 'G' && letter != 'M' {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        let opcode = match (letter, value) {
            ('G', v) if v == 0.0 => Opcode::MoveLinearRapid,
            ('G', v) if v == 1.0 => Opcode::MoveLinear,
            ('G', v) if v == 2.0 => Opcode::MoveArcCW,
            ('G', v) if v == 3.0 => Opcode::MoveArcCCW,
            ('M', v) if v == 3.0 => Opcode::LaserOn,
            ('M', v) if v == 5.0 => Opcode::LaserOff,
            _ => Opcode::Other(format!("{}{}", letter, number)),
        };
        Some(opcode)
    }

    /// G00 or G01
    pub fn is_linear(&self) -> bool {
        matches!(self, Opcode::MoveLinear | Opcode::MoveLinearRapid)
    }

    /// G02 or G03
    pub fn is_arc(&self) -> bool {
        matches!(self, Opcode::MoveArcCW | Opcode::MoveArcCCW)
    }

    /// Any motion opcode
    pub fn is_motion(&self) -> bool {
        self.is_linear() || self.is_arc()
    }

    /// M3 or M5
    pub fn is_laser(&self) -> bool {
        matches!(self, Opcode::LaserOn | Opcode::LaserOff)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::MoveLinear => write!(f, "G01"),
            Opcode::MoveLinearRapid => write!(f, "G00"),
            Opcode::MoveArcCW => write!(f, "G02"),
            Opcode::MoveArcCCW => write!(f, "G03"),
            Opcode::LaserOn => write!(f, "M3"),
            Opcode::LaserOff => write!(f, "M5"),
            Opcode::Other(code) => write!(f, "{}", code),
        }
    }
}

/// A decoded motion command
///
/// Parameters omitted from `params` are modal: the planner substitutes the
/// last value seen for that axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub opcode: Opcode,
    pub params: BTreeMap<ParamKey, f64>,
    /// 1-based source line, 0 when built in code
    pub line_number: usize,
}

impl Command {
    /// Create a command without parameters
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            params: BTreeMap::new(),
            line_number: 0,
        }
    }

    /// Builder-style parameter setter
    pub fn with_param(mut self, key: ParamKey, value: f64) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Builder-style source line setter
    pub fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    /// Linear move to (x, y)
    pub fn linear(x: f64, y: f64) -> Self {
        Self::new(Opcode::MoveLinear)
            .with_param(ParamKey::X, x)
            .with_param(ParamKey::Y, y)
    }

    /// Get a parameter value
    pub fn param(&self, key: ParamKey) -> Option<f64> {
        self.params.get(&key).copied()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for (key, value) in &self.params {
            write!(f, " {}{}", key, value)?;
        }
        Ok(())
    }
}
