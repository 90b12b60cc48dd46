use core::fmt;

use serde::Serialize;

use super::error::{EncodeErr, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Motor,
    TrackedTreadsDirection,
    CabinDirection,
    Bucket,
    Boom,
    Arm,
}

impl Category {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "motor" => Some(Self::Motor),
            "tracked_treads_direction" | "treads" => Some(Self::TrackedTreadsDirection),
            "cabin_direction" | "cabin" => Some(Self::CabinDirection),
            "bucket" => Some(Self::Bucket),
            "boom" => Some(Self::Boom),
            "arm" => Some(Self::Arm),
            _ => None,
        }
    }
}

/* Every vocabulary reserves discriminant 0 for Nul, so a token's index is
 * never 0 for something that may be encoded. */

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MotorToken {
    Nul,
    Power,
    Direction,
    State,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TreadsToken {
    Nul,
    Forward,
    Back,
    Left,
    Right,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CabinToken {
    Nul,
    Left,
    Right,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BucketToken {
    Nul,
    Forward,
    Back,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BoomToken {
    Nul,
    Up,
    Down,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ArmToken {
    Nul,
    Up,
    Down,
}

/// Values accepted by `motor.direction`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    Nul,
    Clockwise,
    #[strum(serialize = "counterclockwise")]
    CounterClockwise,
}

/// Values accepted by `motor.state`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::FromRepr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Nul,
    Low,
    High,
}

/// One resolved (category, variant) pair.
///
/// Motor carries three vocabularies: the parameter being addressed
/// (`Motor`) and the values the direction and state parameters take
/// (`Rotation`, `Level`). All three belong to [`Category::Motor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Motor(MotorToken),
    Rotation(Rotation),
    Level(Level),
    TrackedTreadsDirection(TreadsToken),
    CabinDirection(CabinToken),
    Bucket(BucketToken),
    Boom(BoomToken),
    Arm(ArmToken),
}

/// Names a vocabulary inside the token model. Used to rebuild a token from
/// its index when decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    Motor,
    Rotation,
    Level,
    TrackedTreadsDirection,
    CabinDirection,
    Bucket,
    Boom,
    Arm,
}

impl Vocabulary {
    pub fn category(&self) -> Category {
        match self {
            Self::Motor | Self::Rotation | Self::Level => Category::Motor,
            Self::TrackedTreadsDirection => Category::TrackedTreadsDirection,
            Self::CabinDirection => Category::CabinDirection,
            Self::Bucket => Category::Bucket,
            Self::Boom => Category::Boom,
            Self::Arm => Category::Arm,
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Token> {
        let name = name.trim().to_ascii_lowercase();
        let name = name.as_str();
        if name == "nul" {
            return Some(self.nul());
        }
        match self {
            Self::Motor => match name {
                "power" => Some(Token::Motor(MotorToken::Power)),
                "direction" => Some(Token::Motor(MotorToken::Direction)),
                "state" => Some(Token::Motor(MotorToken::State)),
                _ => None,
            },
            Self::Rotation => match name {
                "clockwise" | "cw" => Some(Token::Rotation(Rotation::Clockwise)),
                "counterclockwise" | "counter_clockwise" | "ccw" => {
                    Some(Token::Rotation(Rotation::CounterClockwise))
                }
                _ => None,
            },
            Self::Level => match name {
                "low" => Some(Token::Level(Level::Low)),
                "high" => Some(Token::Level(Level::High)),
                _ => None,
            },
            Self::TrackedTreadsDirection => match name {
                "forward" => Some(Token::TrackedTreadsDirection(TreadsToken::Forward)),
                "back" => Some(Token::TrackedTreadsDirection(TreadsToken::Back)),
                "left" => Some(Token::TrackedTreadsDirection(TreadsToken::Left)),
                "right" => Some(Token::TrackedTreadsDirection(TreadsToken::Right)),
                _ => None,
            },
            Self::CabinDirection => match name {
                "left" => Some(Token::CabinDirection(CabinToken::Left)),
                "right" => Some(Token::CabinDirection(CabinToken::Right)),
                _ => None,
            },
            Self::Bucket => match name {
                "forward" => Some(Token::Bucket(BucketToken::Forward)),
                "back" => Some(Token::Bucket(BucketToken::Back)),
                _ => None,
            },
            Self::Boom => match name {
                "up" => Some(Token::Boom(BoomToken::Up)),
                "down" => Some(Token::Boom(BoomToken::Down)),
                _ => None,
            },
            Self::Arm => match name {
                "up" => Some(Token::Arm(ArmToken::Up)),
                "down" => Some(Token::Arm(ArmToken::Down)),
                _ => None,
            },
        }
    }

    pub fn token_at(&self, index: u32) -> Option<Token> {
        let index = u8::try_from(index).ok()?;
        match self {
            Self::Motor => MotorToken::from_repr(index).map(Token::Motor),
            Self::Rotation => Rotation::from_repr(index).map(Token::Rotation),
            Self::Level => Level::from_repr(index).map(Token::Level),
            Self::TrackedTreadsDirection => TreadsToken::from_repr(index).map(Token::TrackedTreadsDirection),
            Self::CabinDirection => CabinToken::from_repr(index).map(Token::CabinDirection),
            Self::Bucket => BucketToken::from_repr(index).map(Token::Bucket),
            Self::Boom => BoomToken::from_repr(index).map(Token::Boom),
            Self::Arm => ArmToken::from_repr(index).map(Token::Arm),
        }
    }

    fn nul(&self) -> Token {
        match self {
            Self::Motor => Token::Motor(MotorToken::Nul),
            Self::Rotation => Token::Rotation(Rotation::Nul),
            Self::Level => Token::Level(Level::Nul),
            Self::TrackedTreadsDirection => Token::TrackedTreadsDirection(TreadsToken::Nul),
            Self::CabinDirection => Token::CabinDirection(CabinToken::Nul),
            Self::Bucket => Token::Bucket(BucketToken::Nul),
            Self::Boom => Token::Boom(BoomToken::Nul),
            Self::Arm => Token::Arm(ArmToken::Nul),
        }
    }
}

impl From<Category> for Vocabulary {
    fn from(value: Category) -> Self {
        match value {
            Category::Motor => Self::Motor,
            Category::TrackedTreadsDirection => Self::TrackedTreadsDirection,
            Category::CabinDirection => Self::CabinDirection,
            Category::Bucket => Self::Bucket,
            Category::Boom => Self::Boom,
            Category::Arm => Self::Arm,
        }
    }
}

impl Token {
    pub fn vocabulary(&self) -> Vocabulary {
        match self {
            Self::Motor(_) => Vocabulary::Motor,
            Self::Rotation(_) => Vocabulary::Rotation,
            Self::Level(_) => Vocabulary::Level,
            Self::TrackedTreadsDirection(_) => Vocabulary::TrackedTreadsDirection,
            Self::CabinDirection(_) => Vocabulary::CabinDirection,
            Self::Bucket(_) => Vocabulary::Bucket,
            Self::Boom(_) => Vocabulary::Boom,
            Self::Arm(_) => Vocabulary::Arm,
        }
    }

    pub fn category(&self) -> Category {
        self.vocabulary().category()
    }

    pub fn index(&self) -> u32 {
        let index = match self {
            Self::Motor(t) => *t as u8,
            Self::Rotation(t) => *t as u8,
            Self::Level(t) => *t as u8,
            Self::TrackedTreadsDirection(t) => *t as u8,
            Self::CabinDirection(t) => *t as u8,
            Self::Bucket(t) => *t as u8,
            Self::Boom(t) => *t as u8,
            Self::Arm(t) => *t as u8,
        };
        index as u32
    }

    pub fn is_nul(&self) -> bool {
        self.index() == 0
    }

    pub fn name(&self) -> String {
        match self {
            Self::Motor(t) => t.to_string(),
            Self::Rotation(t) => t.to_string(),
            Self::Level(t) => t.to_string(),
            Self::TrackedTreadsDirection(t) => t.to_string(),
            Self::CabinDirection(t) => t.to_string(),
            Self::Bucket(t) => t.to_string(),
            Self::Boom(t) => t.to_string(),
            Self::Arm(t) => t.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.category(), self.name())
    }
}

/// Resolves a category name and a variant name to a token.
pub fn lookup(category: &str, variant: &str) -> Result<Token> {
    let resolved = Category::from_name(category)
        .ok_or_else(|| EncodeErr::UnknownToken {
            category: None,
            name: category.trim().to_string(),
        })?;
    Vocabulary::from(resolved)
        .resolve(variant)
        .ok_or_else(|| EncodeErr::UnknownToken {
            category: Some(resolved),
            name: variant.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actlang::error::EncodeErr;

    #[test]
    fn lookup_known_tokens() {
        assert_eq!(lookup("motor", "power"), Ok(Token::Motor(MotorToken::Power)));
        assert_eq!(lookup("treads", "Left"), Ok(Token::TrackedTreadsDirection(TreadsToken::Left)));
        assert_eq!(lookup("tracked_treads_direction", "back"), Ok(Token::TrackedTreadsDirection(TreadsToken::Back)));
        assert_eq!(lookup(" CABIN ", " right "), Ok(Token::CabinDirection(CabinToken::Right)));
        assert_eq!(lookup("bucket", "forward"), Ok(Token::Bucket(BucketToken::Forward)));
        assert_eq!(lookup("boom", "down"), Ok(Token::Boom(BoomToken::Down)));
        assert_eq!(lookup("arm", "up"), Ok(Token::Arm(ArmToken::Up)));
    }

    #[test]
    fn lookup_nul_resolves_to_sentinel() {
        let token = lookup("boom", "nul").expect("nul is part of every vocabulary");
        assert_eq!(token, Token::Boom(BoomToken::Nul));
        assert!(token.is_nul());
        assert_eq!(token.index(), 0);
    }

    #[test]
    fn lookup_unknown_names() {
        assert_eq!(
            lookup("shovel", "up"),
            Err(EncodeErr::UnknownToken { category: None, name: "shovel".to_string() })
        );
        assert_eq!(
            lookup("cabin", "forward"),
            Err(EncodeErr::UnknownToken { category: Some(Category::CabinDirection), name: "forward".to_string() })
        );
    }

    #[test]
    fn index_round_trip() {
        let tokens = [
            Token::Motor(MotorToken::State),
            Token::Rotation(Rotation::CounterClockwise),
            Token::Level(Level::High),
            Token::TrackedTreadsDirection(TreadsToken::Right),
            Token::CabinDirection(CabinToken::Left),
            Token::Bucket(BucketToken::Back),
            Token::Boom(BoomToken::Up),
            Token::Arm(ArmToken::Down),
        ];
        for token in tokens {
            assert_eq!(token.vocabulary().token_at(token.index()), Some(token));
        }
        assert_eq!(Vocabulary::CabinDirection.token_at(3), None);
        assert_eq!(Vocabulary::Boom.token_at(256), None);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(Token::Rotation(Rotation::CounterClockwise).name(), "counterclockwise");
        assert_eq!(Token::TrackedTreadsDirection(TreadsToken::Forward).to_string(), "tracked_treads_direction::forward");
        assert_eq!(Token::Level(Level::Low).category(), Category::Motor);
    }
}
