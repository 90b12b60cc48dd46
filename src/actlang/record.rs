use core::fmt;

use serde::Serialize;

use super::error::DecodeErr;
use super::instruction::{Instruction, Target, Value, ValueKind};

/// `[opcode: u8][operand: u32 big-endian]`
pub const RECORD_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub opcode: u8,
    pub operand: u32,
}

impl Record {
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0] = self.opcode;
        bytes[1..].copy_from_slice(&self.operand.to_be_bytes());
        bytes
    }

    pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Self {
        Self {
            opcode: bytes[0],
            operand: u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]),
        }
    }

    /// Rebuilds the typed command this record was written from.
    pub fn command(&self) -> Result<(Target, Value), DecodeErr> {
        let target = Target::from_opcode(self.opcode)
            .ok_or(DecodeErr::UnknownOpcode { opcode: self.opcode })?;
        let invalid = DecodeErr::InvalidOperand { opcode: self.opcode, operand: self.operand };

        let value = match target.kind() {
            Some(ValueKind::Numeric(range)) if range.contains(&self.operand) => Value::Integer(self.operand),
            Some(ValueKind::Named(vocabulary)) => match vocabulary.token_at(self.operand) {
                Some(token) if !token.is_nul() => Value::Variant(token),
                _ => return Err(invalid),
            },
            _ => return Err(invalid),
        };
        Ok((target, value))
    }
}

impl From<&Instruction> for Record {
    fn from(value: &Instruction) -> Self {
        Self {
            opcode: value.target().opcode(),
            operand: value.value().operand(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02x} {:08x}", self.opcode, self.operand)
    }
}

/// Splits a binary store into records. Trailing bytes that do not make up a
/// whole record are an error.
pub fn read_records(bytes: &[u8]) -> Result<Vec<Record>, DecodeErr> {
    let chunks = bytes.chunks_exact(RECORD_SIZE);
    let remainder = chunks.remainder();
    if !remainder.is_empty() {
        return Err(DecodeErr::TruncatedRecord {
            offset: bytes.len() - remainder.len(),
            remaining: remainder.len(),
        });
    }

    Ok(chunks
        .map(|chunk| {
            let mut record = [0u8; RECORD_SIZE];
            record.copy_from_slice(chunk);
            Record::decode(&record)
        })
        .collect())
}

/// Reads a binary store all the way to typed commands.
pub fn read_commands(bytes: &[u8]) -> Result<Vec<(Target, Value)>, DecodeErr> {
    read_records(bytes)?
        .iter()
        .enumerate()
        .map(|(i, record)| {
            record.command().map_err(|e| DecodeErr::AtOffset {
                offset: i * RECORD_SIZE,
                cause: Box::new(e),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actlang::encoder::encode;
    use crate::actlang::token::{MotorToken, Rotation, Token};

    /// Every valid `target:value` line: all power levels and every non-NUL
    /// name of every named target.
    fn all_valid_lines() -> Vec<String> {
        let mut lines = vec![];
        for opcode in 0x01..=0x08u8 {
            let target = Target::from_opcode(opcode).expect("opcode in table");
            match target.kind() {
                Some(ValueKind::Numeric(range)) => {
                    lines.extend(range.map(|n| format!("{}:{}", target, n)));
                }
                Some(ValueKind::Named(vocabulary)) => {
                    let mut index = 1;
                    while let Some(token) = vocabulary.token_at(index) {
                        lines.push(format!("{}:{}", target, token.name()));
                        index += 1;
                    }
                }
                None => unreachable!("opcode table holds no NUL target"),
            }
        }
        lines
    }

    #[test]
    fn record_layout() {
        let inst = encode("power:50").expect("valid line");
        assert_eq!(Record::from(&inst).encode(), [0x01, 0x00, 0x00, 0x00, 0x32]);

        let inst = encode("direction:counterclockwise").expect("valid line");
        assert_eq!(Record::from(&inst).encode(), [0x02, 0x00, 0x00, 0x00, 0x02]);
    }

    #[test]
    fn decode_reproduces_command() {
        let lines = all_valid_lines();
        // 101 power levels, 2 + 2 rotation/level names, 4 + 2 + 2 + 2 + 2 actuator names
        assert_eq!(lines.len(), 117);
        for line in &lines {
            let inst = encode(line).expect("valid line");
            let record = Record::decode(&Record::from(&inst).encode());
            assert_eq!(record.command(), Ok((inst.target(), inst.value())), "{}", line);
        }
    }

    #[test]
    fn read_stream() {
        let bytes = [0x02, 0, 0, 0, 1, 0x07, 0, 0, 0, 2];
        let commands = read_commands(&bytes).expect("two valid records");
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], (Target::Motor(MotorToken::Direction), Value::Variant(Token::Rotation(Rotation::Clockwise))));
        assert_eq!(commands[1].0, Target::Boom);
    }

    #[test]
    fn truncated_stream() {
        assert_eq!(
            read_records(&[0x01, 0, 0, 0, 5, 0x02, 0]),
            Err(DecodeErr::TruncatedRecord { offset: 5, remaining: 2 })
        );
        assert_eq!(read_records(&[]), Ok(vec![]));
    }

    #[test]
    fn invalid_records() {
        assert_eq!(
            read_commands(&[0x01, 0, 0, 0, 5, 0x09, 0, 0, 0, 1]),
            Err(DecodeErr::AtOffset { offset: 5, cause: Box::new(DecodeErr::UnknownOpcode { opcode: 0x09 }) })
        );
        assert_eq!(
            Record { opcode: 0x09, operand: 1 }.command(),
            Err(DecodeErr::UnknownOpcode { opcode: 0x09 })
        );
        assert_eq!(
            read_commands(&[0x07, 0, 0, 0, 0]),
            Err(DecodeErr::AtOffset { offset: 0, cause: Box::new(DecodeErr::InvalidOperand { opcode: 0x07, operand: 0 }) })
        );
        assert_eq!(
            Record { opcode: 0x01, operand: 101 }.command(),
            Err(DecodeErr::InvalidOperand { opcode: 0x01, operand: 101 })
        );
        assert_eq!(
            Record { opcode: 0x07, operand: 0 }.command(),
            Err(DecodeErr::InvalidOperand { opcode: 0x07, operand: 0 })
        );
    }
}
