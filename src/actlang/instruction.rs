use core::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use super::token::{Category, MotorToken, Token, Vocabulary};

pub const POWER_RANGE: RangeInclusive<u32> = 0..=100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Motor(MotorToken),
    TrackedTreadsDirection,
    CabinDirection,
    Bucket,
    Boom,
    Arm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Numeric(RangeInclusive<u32>),
    Named(Vocabulary),
}

impl Target {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let parameter = name.strip_prefix("motor.").unwrap_or(&name);
        match parameter {
            "power" => return Some(Self::Motor(MotorToken::Power)),
            "direction" => return Some(Self::Motor(MotorToken::Direction)),
            "state" => return Some(Self::Motor(MotorToken::State)),
            "nul" => return Some(Self::Motor(MotorToken::Nul)),
            _ => {}
        }
        match Category::from_name(&name)? {
            Category::Motor => None,
            Category::TrackedTreadsDirection => Some(Self::TrackedTreadsDirection),
            Category::CabinDirection => Some(Self::CabinDirection),
            Category::Bucket => Some(Self::Bucket),
            Category::Boom => Some(Self::Boom),
            Category::Arm => Some(Self::Arm),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Motor(_) => Category::Motor,
            Self::TrackedTreadsDirection => Category::TrackedTreadsDirection,
            Self::CabinDirection => Category::CabinDirection,
            Self::Bucket => Category::Bucket,
            Self::Boom => Category::Boom,
            Self::Arm => Category::Arm,
        }
    }

    /// `None` only for `Motor(Nul)`, which is never a valid target.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Motor(MotorToken::Nul) => None,
            Self::Motor(MotorToken::Power) => Some(ValueKind::Numeric(POWER_RANGE)),
            Self::Motor(MotorToken::Direction) => Some(ValueKind::Named(Vocabulary::Rotation)),
            Self::Motor(MotorToken::State) => Some(ValueKind::Named(Vocabulary::Level)),
            other => Some(ValueKind::Named(other.category().into())),
        }
    }

    pub fn opcode(&self) -> u8 {
        match self {
            Self::Motor(MotorToken::Nul) => 0x00,
            Self::Motor(MotorToken::Power) => 0x01,
            Self::Motor(MotorToken::Direction) => 0x02,
            Self::Motor(MotorToken::State) => 0x03,
            Self::TrackedTreadsDirection => 0x04,
            Self::CabinDirection => 0x05,
            Self::Bucket => 0x06,
            Self::Boom => 0x07,
            Self::Arm => 0x08,
        }
    }

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x01 => Some(Self::Motor(MotorToken::Power)),
            0x02 => Some(Self::Motor(MotorToken::Direction)),
            0x03 => Some(Self::Motor(MotorToken::State)),
            0x04 => Some(Self::TrackedTreadsDirection),
            0x05 => Some(Self::CabinDirection),
            0x06 => Some(Self::Bucket),
            0x07 => Some(Self::Boom),
            0x08 => Some(Self::Arm),
            _ => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Motor(parameter) => write!(f, "motor.{}", parameter),
            other => write!(f, "{}", other.category()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Integer(u32),
    Variant(Token),
}

impl Value {
    /// The 32 bit operand stored in a record.
    pub fn operand(&self) -> u32 {
        match self {
            Self::Integer(n) => *n,
            Self::Variant(token) => token.index(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Variant(token) => write!(f, "{}", token.name()),
        }
    }
}

/// One validated command. Built only by the encoder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    target: Target,
    value: Value,
    raw: String,
}

impl Instruction {
    pub(super) fn new(target: Target, value: Value, raw: String) -> Self {
        Self { target, value, raw }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.target, self.value)
    }
}
