//! Value types shared by the REST client and the webhook layer.
//!
//! Every field is optional: forge payloads omit fields freely depending on
//! the endpoint or event that produced them, and an omitted field must stay
//! distinguishable from a zero value.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Any actor on the forge: author, commenter, assignee, member.
///
/// Depending on the event source either `login` or `username` may be set;
/// [`User::display_login`] applies the login-preferred fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl User {
    /// The structured login field if set, otherwise the username field.
    pub fn display_login(&self) -> Option<&str> {
        self.login.as_deref().or(self.username.as_deref())
    }
}

/// A label attached to an issue or pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<i64>,
}

/// A point in time with the forge's wire encoding: RFC 3339 for a set
/// value, the empty string for the zero value.
///
/// The zero value is a real wire state, not an absent field; containers
/// use `Option<Timestamp>` for absence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp(Option<DateTime<FixedOffset>>);

impl Timestamp {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Timestamp(Some(datetime))
    }

    /// The zero timestamp, encoded as `""` on the wire.
    pub fn zero() -> Self {
        Timestamp(None)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => Ok(()),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RFC 3339 timestamp or the empty string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Timestamp, E> {
                if value.is_empty() {
                    return Ok(Timestamp::zero());
                }
                DateTime::parse_from_rfc3339(value)
                    .map(Timestamp::new)
                    .map_err(|err| E::custom(format!("invalid timestamp {value:?}: {err}")))
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_login_prefers_login() {
        let user = User {
            login: Some("alice".to_string()),
            username: Some("alice-mirror".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_login(), Some("alice"));
    }

    #[test]
    fn display_login_falls_back_to_username() {
        let user = User {
            username: Some("bob".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_login(), Some("bob"));

        assert_eq!(User::default().display_login(), None);
    }

    #[test]
    fn timestamp_zero_round_trips_as_empty_string() {
        let encoded = serde_json::to_string(&Timestamp::zero()).unwrap();
        assert_eq!(encoded, r#""""#);

        let decoded: Timestamp = serde_json::from_str(&encoded).unwrap();
        assert!(decoded.is_zero());
    }

    #[test]
    fn timestamp_round_trips_rfc3339_exactly() {
        let raw = r#""2024-10-26T10:28:03+08:00""#;
        let decoded: Timestamp = serde_json::from_str(raw).unwrap();
        assert!(!decoded.is_zero());
        assert_eq!(decoded.to_string(), "2024-10-26T10:28:03+08:00");

        let encoded = serde_json::to_string(&decoded).unwrap();
        assert_eq!(encoded, raw);
    }

    #[test]
    fn timestamp_rejects_garbage() {
        let result: Result<Timestamp, _> = serde_json::from_str(r#""yesterday""#);
        assert!(result.is_err());
    }

    #[test]
    fn timestamp_absent_field_stays_distinct_from_zero() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default)]
            at: Option<Timestamp>,
        }

        let absent: Holder = serde_json::from_str("{}").unwrap();
        assert!(absent.at.is_none());

        let zero: Holder = serde_json::from_str(r#"{"at":""}"#).unwrap();
        assert_eq!(zero.at, Some(Timestamp::zero()));
    }
}
