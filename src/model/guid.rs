//! Guid identity for nodes and labels.
//!
//! Every node and every label in the graph is addressed by a 16-byte guid.
//! The canonical text form is 32 lowercase hex characters without hyphens,
//! which is also how guids appear in the persisted document.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::Error;

/// Opaque 16-byte node/label identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid(pub [u8; 16]);

impl Guid {
    /// Mints a fresh random guid (UUIDv4 bytes).
    pub fn random() -> Guid {
        Guid(*uuid::Uuid::new_v4().as_bytes())
    }

    /// Derives a deterministic guid from a name (UUIDv8 via SHA-256).
    ///
    /// ```text
    /// hash = SHA-256(name)[0:16]
    /// hash[6] = (hash[6] & 0x0F) | 0x80   version 8
    /// hash[8] = (hash[8] & 0x3F) | 0x80   RFC 4122 variant
    /// ```
    pub fn derive(name: &str) -> Guid {
        let hash = Sha256::digest(name.as_bytes());
        let mut id = [0u8; 16];
        id.copy_from_slice(&hash[..16]);
        id[6] = (id[6] & 0x0F) | 0x80;
        id[8] = (id[8] & 0x3F) | 0x80;
        Guid(id)
    }

    /// Parses a well-known guid from a 32-char hex literal at compile time.
    /// Malformed literals fail the build.
    pub const fn from_static(hex: &str) -> Guid {
        const fn nibble(c: u8) -> u8 {
            match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit in guid literal"),
            }
        }
        let bytes = hex.as_bytes();
        assert!(bytes.len() == 32, "guid literals are 32 hex chars");
        let mut out = [0u8; 16];
        let mut i = 0;
        while i < 16 {
            out[i] = (nibble(bytes[2 * i]) << 4) | nibble(bytes[2 * i + 1]);
            i += 1;
        }
        Guid(out)
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Accepts both the canonical 32-hex form and the hyphenated RFC 4122 form.
impl FromStr for Guid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut out = [0u8; 16];
        let mut nibbles = 0usize;
        for c in s.chars() {
            if c == '-' {
                continue;
            }
            let d = c
                .to_digit(16)
                .ok_or_else(|| Error::InvalidGuid(s.to_owned()))?;
            if nibbles == 32 {
                return Err(Error::InvalidGuid(s.to_owned()));
            }
            out[nibbles / 2] = (out[nibbles / 2] << 4) | d as u8;
            nibbles += 1;
        }
        if nibbles != 32 {
            return Err(Error::InvalidGuid(s.to_owned()));
        }
        Ok(Guid(out))
    }
}

// Guids serialize as their hex string so they can key JSON maps.

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GuidVisitor;

        impl Visitor<'_> for GuidVisitor {
            type Value = Guid;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 32-character hex guid")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Guid, E> {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(GuidVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_roundtrip() {
        let guid = Guid::derive("walk-cycle");
        let text = guid.to_string();
        assert_eq!(text.len(), 32);
        assert_eq!(text.parse::<Guid>().unwrap(), guid);
    }

    #[test]
    fn test_parse_with_hyphens() {
        let plain: Guid = "550e8400e29b41d4a716446655440000".parse().unwrap();
        let hyphenated: Guid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(plain, hyphenated);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<Guid>().is_err());
        assert!("550e8400".parse::<Guid>().is_err());
        assert!("zz0e8400e29b41d4a716446655440000".parse::<Guid>().is_err());
        assert!("550e8400e29b41d4a71644665544000000".parse::<Guid>().is_err());
    }

    #[test]
    fn test_derive_version_and_variant() {
        let guid = Guid::derive("idle->walk");
        assert_eq!(guid.0[6] & 0xF0, 0x80);
        assert_eq!(guid.0[8] & 0xC0, 0x80);
    }

    #[test]
    fn test_derive_deterministic() {
        assert_eq!(Guid::derive("blink"), Guid::derive("blink"));
        assert_ne!(Guid::derive("blink"), Guid::derive("wink"));
    }

    #[test]
    fn test_random_is_unique() {
        assert_ne!(Guid::random(), Guid::random());
    }

    #[test]
    fn test_from_static_matches_parse() {
        const CTOR: Guid = Guid::from_static("aba6ac79fd3d409da860a77c90942852");
        let parsed: Guid = "aba6ac79fd3d409da860a77c90942852".parse().unwrap();
        assert_eq!(CTOR, parsed);
    }

    #[test]
    fn test_serde_string_form() {
        let guid = Guid::derive("resource");
        let json = serde_json::to_string(&guid).unwrap();
        assert_eq!(json, format!("\"{guid}\""));
        let back: Guid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, guid);
    }
}
