use std::fmt;
use std::str::FromStr;

use glam::Vec2;

use crate::gravity::{GravityDirection, UnknownGravity};

/// One line of the peer session stream, without its trailing newline.
///
/// ```text
/// STATE <x> <y> <GRAVITY> <orb_mask>
/// LEVEL <index>
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PeerMessage {
    State {
        x: f32,
        y: f32,
        gravity: GravityDirection,
        orb_mask: u64,
    },
    Level {
        index: i32,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MessageError {
    #[error("empty line")]
    Empty,
    #[error("unknown message kind `{0}`")]
    UnknownKind(String),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("invalid value for `{field}`: `{value}`")]
    InvalidValue { field: &'static str, value: String },
    #[error(transparent)]
    Gravity(#[from] UnknownGravity),
    #[error("unexpected trailing data `{0}`")]
    TrailingData(String),
}

impl fmt::Display for PeerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerMessage::State {
                x,
                y,
                gravity,
                orb_mask,
            } => write!(f, "STATE {} {} {} {}", x, y, gravity, orb_mask),
            PeerMessage::Level { index } => write!(f, "LEVEL {}", index),
        }
    }
}

impl FromStr for PeerMessage {
    type Err = MessageError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();
        let kind = fields.next().ok_or(MessageError::Empty)?;

        let message = match kind {
            "STATE" => PeerMessage::State {
                x: parse_coordinate(fields.next(), "x")?,
                y: parse_coordinate(fields.next(), "y")?,
                gravity: fields.next().ok_or(MessageError::MissingField("gravity"))?.parse()?,
                orb_mask: parse_field(fields.next(), "orb_mask")?,
            },
            "LEVEL" => PeerMessage::Level {
                index: parse_field(fields.next(), "index")?,
            },
            other => return Err(MessageError::UnknownKind(other.to_string())),
        };

        if let Some(extra) = fields.next() {
            return Err(MessageError::TrailingData(extra.to_string()));
        }

        Ok(message)
    }
}

fn parse_field<T: FromStr>(token: Option<&str>, field: &'static str) -> Result<T, MessageError> {
    let token = token.ok_or(MessageError::MissingField(field))?;
    token.parse().map_err(|_| MessageError::InvalidValue {
        field,
        value: token.to_string(),
    })
}

fn parse_coordinate(token: Option<&str>, field: &'static str) -> Result<f32, MessageError> {
    let value: f32 = parse_field(token, field)?;
    if !value.is_finite() {
        return Err(MessageError::InvalidValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Most recent peer sample. Every field is optional because a `LEVEL` line
/// carries only the level index.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RemoteState {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub gravity: Option<GravityDirection>,
    pub orb_mask: Option<u64>,
    pub level_index: Option<i32>,
}

impl RemoteState {
    pub fn is_empty(&self) -> bool {
        *self == RemoteState::default()
    }

    pub fn position(&self) -> Option<Vec2> {
        Some(Vec2::new(self.x?, self.y?))
    }

}

impl From<PeerMessage> for RemoteState {
    fn from(message: PeerMessage) -> Self {
        match message {
            PeerMessage::State {
                x,
                y,
                gravity,
                orb_mask,
            } => RemoteState {
                x: Some(x),
                y: Some(y),
                gravity: Some(gravity),
                orb_mask: Some(orb_mask),
                level_index: None,
            },
            PeerMessage::Level { index } => RemoteState {
                level_index: Some(index),
                ..RemoteState::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_line_format() {
        let message = PeerMessage::State {
            x: 12.5,
            y: -3.0,
            gravity: GravityDirection::Left,
            orb_mask: 0b101,
        };
        assert_eq!(message.to_string(), "STATE 12.5 -3 LEFT 5");
        assert_eq!("STATE 12.5 -3 LEFT 5".parse::<PeerMessage>(), Ok(message));
    }

    #[test]
    fn level_line_format() {
        assert_eq!(PeerMessage::Level { index: 2 }.to_string(), "LEVEL 2");
        assert_eq!("LEVEL 2\r".parse::<PeerMessage>(), Ok(PeerMessage::Level { index: 2 }));
    }

    #[test]
    fn full_mask_survives() {
        let line = PeerMessage::State {
            x: 0.0,
            y: 0.0,
            gravity: GravityDirection::Down,
            orb_mask: u64::MAX,
        }
        .to_string();
        match line.parse::<PeerMessage>() {
            Ok(PeerMessage::State { orb_mask, .. }) => assert_eq!(orb_mask, u64::MAX),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!("".parse::<PeerMessage>(), Err(MessageError::Empty));
        assert!(matches!("HELLO 1".parse::<PeerMessage>(), Err(MessageError::UnknownKind(_))));
        assert_eq!(
            "STATE 1 2 DOWN".parse::<PeerMessage>(),
            Err(MessageError::MissingField("orb_mask"))
        );
        assert!(matches!(
            "STATE 1 2 SIDEWAYS 0".parse::<PeerMessage>(),
            Err(MessageError::Gravity(_))
        ));
        assert!(matches!(
            "STATE x 2 DOWN 0".parse::<PeerMessage>(),
            Err(MessageError::InvalidValue { field: "x", .. })
        ));
        assert!(matches!(
            "STATE NaN 2 DOWN 0".parse::<PeerMessage>(),
            Err(MessageError::InvalidValue { field: "x", .. })
        ));
        assert!(matches!(
            "STATE 1 2 DOWN -1".parse::<PeerMessage>(),
            Err(MessageError::InvalidValue { field: "orb_mask", .. })
        ));
        assert!(matches!(
            "LEVEL 1 2".parse::<PeerMessage>(),
            Err(MessageError::TrailingData(_))
        ));
    }

    #[test]
    fn level_sample_carries_only_the_index() {
        let state = RemoteState::from(PeerMessage::State {
            x: 1.0,
            y: 2.0,
            gravity: GravityDirection::Up,
            orb_mask: 1,
        });
        assert_eq!(state.position(), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(state.level_index, None);

        let level = RemoteState::from(PeerMessage::Level { index: 3 });
        assert_eq!(level.level_index, Some(3));
        assert_eq!(level.position(), None);
        assert_eq!(level.orb_mask, None);
        assert!(!level.is_empty());
        assert!(RemoteState::default().is_empty());
    }
}
