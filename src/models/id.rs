//! Identificadores asignados por el almacén
//!
//! Los ids son cadenas hexadecimales de 24 caracteres (timestamp de 4 bytes
//! + 8 bytes aleatorios), el mismo formato que clasifica el resolver de
//! referencias.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

lazy_static::lazy_static! {
    static ref OBJECT_ID_RE: regex::Regex =
        regex::Regex::new(r"^[0-9a-fA-F]{24}$").expect("invalid object id regex");
}

/// Verificar si un string tiene forma de identificador del almacén
pub fn is_object_id(value: &str) -> bool {
    OBJECT_ID_RE.is_match(value)
}

/// Identificador de entidad de 24 caracteres hexadecimales
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generar un nuevo identificador (4 bytes de timestamp + 8 aleatorios)
    pub fn new() -> Self {
        let mut bytes = [0u8; 12];
        let ts = chrono::Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&ts.to_be_bytes());
        rand::thread_rng().fill(&mut bytes[4..]);

        let mut hex = String::with_capacity(24);
        for byte in bytes {
            let _ = write!(hex, "{:02x}", byte);
        }
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reconstruir desde un valor ya persistido por el almacén
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_object_id(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("Invalid ID format: '{}'", s))
        }
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

// Deserialización con validación de formato: un id mal formado en un path o
// body se rechaza antes de llegar al almacén
impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_object_ids() {
        let id = EntityId::new();
        assert_eq!(id.as_str().len(), 24);
        assert!(is_object_id(id.as_str()));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(EntityId::new(), EntityId::new());
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!("John Smith".parse::<EntityId>().is_err());
        assert!("abc123".parse::<EntityId>().is_err());
        // 23 y 25 caracteres
        assert!("aaaaaaaaaaaaaaaaaaaaaaa".parse::<EntityId>().is_err());
        assert!("aaaaaaaaaaaaaaaaaaaaaaaaa".parse::<EntityId>().is_err());
        assert!("aaaaaaaaaaaaaaaaaaaaaaaa".parse::<EntityId>().is_ok());
    }

    #[test]
    fn test_object_id_accepts_mixed_case_hex() {
        assert!(is_object_id("AAAAbbbbCCCC111122223333"));
        assert!(!is_object_id("zzzzzzzzzzzzzzzzzzzzzzzz"));
    }
}
