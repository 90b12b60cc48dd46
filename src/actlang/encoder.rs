use tracing::debug;

use super::error::{EncodeErr, Result};
use super::instruction::{Instruction, Target, Value, ValueKind};

/// Splits a line into its target and value halves. Exactly one colon and
/// two non-empty sides are required.
fn split_line(line: &str) -> Result<(&str, &str)> {
    let malformed = |reason| EncodeErr::MalformedLine { line: line.to_string(), reason };

    let mut parts = line.split(':');
    let (target, value) = match (parts.next(), parts.next(), parts.next()) {
        (Some(target), Some(value), None) => (target.trim(), value.trim()),
        (_, _, Some(_)) => return Err(malformed("more than one ':'")),
        _ => return Err(malformed("missing ':'")),
    };

    if target.is_empty() {
        return Err(malformed("empty target"));
    }
    if value.is_empty() {
        return Err(malformed("empty value"));
    }
    Ok((target, value))
}

fn encode_numeric(target: Target, value: &str, range: std::ops::RangeInclusive<u32>) -> Result<Value> {
    let invalid = |reason: String| EncodeErr::InvalidValue {
        target: target.to_string(),
        value: value.to_string(),
        reason,
    };
    let n = value
        .parse::<i64>()
        .map_err(|_| invalid("expected an integer".to_string()))?;

    match u32::try_from(n) {
        Ok(n) if range.contains(&n) => Ok(Value::Integer(n)),
        _ => Err(invalid(format!("out of range [{}, {}]", range.start(), range.end()))),
    }
}

/// Encodes one `"<target>:<value>"` line.
pub fn encode(line: &str) -> Result<Instruction> {
    let raw = line.trim();
    let (target_name, value_name) = split_line(raw)?;

    let target = Target::from_name(target_name).ok_or_else(|| EncodeErr::UnknownToken {
        category: None,
        name: target_name.to_string(),
    })?;

    let value = match target.kind() {
        Some(ValueKind::Numeric(range)) => encode_numeric(target, value_name, range)?,
        Some(ValueKind::Named(vocabulary)) => {
            let token = vocabulary.resolve(value_name).ok_or_else(|| EncodeErr::UnknownToken {
                category: Some(target.category()),
                name: value_name.to_string(),
            })?;
            if token.is_nul() {
                return Err(EncodeErr::InvalidValue {
                    target: target.to_string(),
                    value: value_name.to_string(),
                    reason: "NUL is not an encodable value".to_string(),
                });
            }
            Value::Variant(token)
        }
        None => {
            return Err(EncodeErr::InvalidValue {
                target: target.to_string(),
                value: value_name.to_string(),
                reason: "NUL is not an encodable target".to_string(),
            })
        }
    };

    debug!("{:<12} - {} -> {}:{}", "ENCODE", raw, target, value);
    Ok(Instruction::new(target, value, raw.to_string()))
}
