//! # Database Models
//!
//! This module defines the data structures that map to database tables,
//! plus the object identifier used as the primary key of every record.
//!
//! ## Object identifiers
//! Records are keyed by a 12-byte identifier rendered as 24 lowercase hex characters:
//! - 4 bytes: seconds since the Unix epoch, big-endian
//! - 5 bytes: random value chosen once per process
//! - 3 bytes: counter, big-endian, starting at a random value
//!
//! Identifiers therefore sort in creation order, which is the order listings use.

use crate::error::AppError;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::types::Json;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

/// A schema-free movie document
pub type Document = Map<String, Value>;

/// Keys that address the record itself and never belong in a stored document
pub const RESERVED_KEYS: [&str; 2] = ["id", "_id"];

/// 12-byte object identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

fn process_unique() -> &'static [u8; 5] {
    static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
    PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().gen())
}

fn counter() -> &'static AtomicU32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    COUNTER.get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..0x00ff_ffff)))
}

impl ObjectId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        // Counter wraps at 24 bits
        let count = counter().fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Parse a 24-character hex identifier (either case)
    ///
    /// Anything else is an `InvalidIdentifier` error. This never touches the store.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        if !Self::is_valid(input) {
            return Err(AppError::InvalidIdentifier(input.to_string()));
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(input, &mut bytes)
            .map_err(|_| AppError::InvalidIdentifier(input.to_string()))?;
        Ok(Self(bytes))
    }

    /// Whether `input` matches `^[0-9a-fA-F]{24}$`
    pub fn is_valid(input: &str) -> bool {
        input.len() == 24 && input.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Lowercase hex rendering, the form stored in the database
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Creation time encoded in the identifier (seconds since epoch)
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A stored movie
///
/// `id` is the 24-hex identifier; `document` holds every other field exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Movie {
    pub id: String,
    pub document: Json<Document>,
}

impl Movie {
    /// The movie's title, if the document has a string `title`
    pub fn title(&self) -> Option<&str> {
        self.document.get("title").and_then(Value::as_str)
    }
}

/// Strip keys that would shadow the record identifier
pub fn sanitize_fields(mut fields: Document) -> Document {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
    fields
}

/// User account information
///
/// `password_hash` is a bcrypt hash and is skipped when serializing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// 24-hex object identifier
    pub id: String,

    /// Unique username, used for login
    pub username: String,

    /// bcrypt hash with embedded salt and cost
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created (RFC3339 timestamp)
    pub created_at: String,
}

impl User {
    /// Create a new user with a generated ID and the current timestamp
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            username,
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
        assert!(ObjectId::is_valid(&a.to_hex()));
        assert_eq!(a.to_hex().len(), 24);
        // Same process, same second or later: creation order is preserved
        assert!(a.timestamp() <= b.timestamp());
    }

    #[test]
    fn test_parse_accepts_either_case() {
        let id = ObjectId::parse("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
        assert_eq!(id, "507f1f77bcf86cd799439011".parse::<ObjectId>().unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "507f1f77bcf86cd79943901",
            "507f1f77bcf86cd7994390111",
            "507f1f77bcf86cd79943901g",
            " 507f1f77bcf86cd799439011",
            "507f1f77-cf86-d799-4390-1",
            "ééééééééééé",
        ] {
            assert!(
                matches!(ObjectId::parse(bad), Err(AppError::InvalidIdentifier(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_sanitize_fields_drops_reserved_keys() {
        let fields = json!({"id": "x", "_id": "y", "title": "Alien"});
        let Value::Object(map) = fields else { unreachable!() };
        let clean = sanitize_fields(map);
        assert_eq!(Value::Object(clean), json!({"title": "Alien"}));
    }

    #[test]
    fn test_user_serialization_hides_hash() {
        let user = User::new("alice".into(), "$2b$10$hash".into());
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "alice");
    }
}
