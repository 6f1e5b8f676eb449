//! Referencias polimórficas identificador-o-etiqueta
//!
//! Los campos driver/route de Bus y route/bus de Schedule aceptan un id del
//! almacén o un texto libre de display. La clasificación vive en
//! `services::reference_resolver`; aquí solo la representación.

use serde::{Serialize, Serializer};

use crate::models::id::EntityId;

/// Valor asignado a un campo polimórfico: referencia validable o etiqueta opaca
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Identificador del almacén (forma hexadecimal de 24 caracteres)
    Reference(EntityId),
    /// Texto libre, aceptado sin verificación de existencia
    Label(String),
}

impl Assignment {
    /// Reconstruir la variante desde el valor crudo persistido
    pub fn from_stored(raw: String) -> Self {
        match raw.parse::<EntityId>() {
            Ok(id) => Assignment::Reference(id),
            Err(_) => Assignment::Label(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Assignment::Reference(id) => id.as_str(),
            Assignment::Label(text) => text,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Assignment::Reference(_))
    }
}

// En el wire ambas variantes son un string plano
impl Serialize for Assignment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clasificar un valor crudo según el patrón de identificador
pub fn classify(raw: &str) -> Assignment {
    Assignment::from_stored(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_strings_classify_as_references() {
        let assignment = classify("507f1f77bcf86cd799439011");
        assert!(assignment.is_reference());
        assert_eq!(assignment.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_free_text_classifies_as_label() {
        let assignment = classify("John Smith");
        assert!(!assignment.is_reference());
        assert_eq!(assignment.as_str(), "John Smith");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let reference = classify("507f1f77bcf86cd799439011");
        let label = classify("Route 42 Express");
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            serde_json::json!("507f1f77bcf86cd799439011")
        );
        assert_eq!(
            serde_json::to_value(&label).unwrap(),
            serde_json::json!("Route 42 Express")
        );
    }
}
