//! Composite entity identifier parsing.
//!
//! # Responsibility
//! - Turn textual `shard.realm.num` (or bare `num`) ids into `EntityKey`.
//! - Render keys back to their canonical textual form.
//!
//! # Invariants
//! - Exactly one or exactly three dot-separated segments are accepted.
//! - A bare number always means shard `0`, realm `0`.
//! - Parsing is pure and never touches storage.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const ID_DELIMITER: char = '.';

/// Three-part key addressing one entity row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityKey {
    pub shard: u64,
    pub realm: u64,
    pub num: u64,
}

impl EntityKey {
    pub fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self { shard, realm, num }
    }

    /// Key in the default shard and realm.
    pub fn from_num(num: u64) -> Self {
        Self::new(0, 0, num)
    }
}

/// Identifier parsing failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityIdError {
    /// Wrong number of dot-separated segments (or empty input).
    InvalidFormat(String),
    /// Segment that is not a non-negative decimal integer.
    InvalidComponent { id: String, segment: String },
}

impl Display for EntityIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(id) => write!(
                f,
                "invalid entity id format `{id}`; expected `num` or `shard.realm.num`"
            ),
            Self::InvalidComponent { id, segment } => {
                write!(f, "invalid segment `{segment}` in entity id `{id}`")
            }
        }
    }
}

impl Error for EntityIdError {}

/// Parses a dotted entity id into its three-part key.
///
/// # Errors
/// - `InvalidFormat` when `id` has 0, 2 or 4+ segments, or is empty.
/// - `InvalidComponent` when a segment is not a non-negative integer.
pub fn parse_entity_id(id: &str) -> Result<EntityKey, EntityIdError> {
    if id.is_empty() {
        return Err(EntityIdError::InvalidFormat(id.to_string()));
    }

    let segments: Vec<&str> = id.split(ID_DELIMITER).collect();
    match segments.as_slice() {
        [num] => Ok(EntityKey::from_num(parse_segment(id, num)?)),
        [shard, realm, num] => Ok(EntityKey::new(
            parse_segment(id, shard)?,
            parse_segment(id, realm)?,
            parse_segment(id, num)?,
        )),
        _ => Err(EntityIdError::InvalidFormat(id.to_string())),
    }
}

fn parse_segment(id: &str, segment: &str) -> Result<u64, EntityIdError> {
    // `u64::from_str` accepts a leading `+`; ids never carry a sign.
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EntityIdError::InvalidComponent {
            id: id.to_string(),
            segment: segment.to_string(),
        });
    }

    segment
        .parse::<u64>()
        .map_err(|_| EntityIdError::InvalidComponent {
            id: id.to_string(),
            segment: segment.to_string(),
        })
}

impl Display for EntityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.shard == 0 && self.realm == 0 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
        }
    }
}

impl FromStr for EntityKey {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_entity_id(s)
    }
}

impl TryFrom<String> for EntityKey {
    type Error = EntityIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_entity_id(&value)
    }
}

impl From<EntityKey> for String {
    fn from(value: EntityKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_entity_id, EntityIdError, EntityKey};

    #[test]
    fn bare_number_defaults_shard_and_realm() {
        assert_eq!(parse_entity_id("1234").unwrap(), EntityKey::new(0, 0, 1234));
    }

    #[test]
    fn three_segments_are_positional() {
        assert_eq!(parse_entity_id("0.0.5678").unwrap(), EntityKey::new(0, 0, 5678));
        assert_eq!(parse_entity_id("1.2.3").unwrap(), EntityKey::new(1, 2, 3));
    }

    #[test]
    fn wrong_segment_counts_are_rejected() {
        for id in ["", "1.2", "1.2.3.4", "."] {
            let err = parse_entity_id(id).unwrap_err();
            assert!(
                matches!(err, EntityIdError::InvalidFormat(_)),
                "unexpected error for `{id}`: {err}"
            );
        }
    }

    #[test]
    fn non_numeric_segments_are_rejected() {
        let err = parse_entity_id("0.x.5").unwrap_err();
        assert_eq!(
            err,
            EntityIdError::InvalidComponent {
                id: "0.x.5".to_string(),
                segment: "x".to_string(),
            }
        );

        assert!(parse_entity_id("-1").is_err());
        assert!(parse_entity_id("+7").is_err());
        assert!(parse_entity_id("0..7").is_err());
    }

    #[test]
    fn display_uses_short_form_only_for_default_shard_and_realm() {
        assert_eq!(parse_entity_id("0.0.42").unwrap().to_string(), "42");
        assert_eq!(parse_entity_id("1.2.3").unwrap().to_string(), "1.2.3");
        assert_eq!(EntityKey::new(0, 5, 9).to_string(), "0.5.9");
    }
}
