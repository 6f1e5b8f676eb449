//! DTOs de la API
//!
//! Requests y responses por entidad, más la semántica de parcheo de tres
//! vías que comparten los payloads de actualización.

pub mod auth_dto;
pub mod contact_dto;
pub mod dashboard_dto;
pub mod fleet_dto;
pub mod route_dto;
pub mod schedule_dto;
pub mod staff_dto;

use serde::{Deserialize, Deserializer};

/// Campo de un payload de actualización con semántica de tres vías:
/// ausente (Unset), null explícito (Clear) o valor presente (Set).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldPatch<T> {
    /// Campo ausente del payload: se deja intacto
    #[default]
    Unset,
    /// null explícito: se limpia el campo
    Clear,
    /// Valor explícito
    Set(T),
}

// Con #[serde(default)] en el campo, la ausencia produce Unset; un null
// explícito produce Clear y un valor produce Set
impl<'de, T> Deserialize<'de> for FieldPatch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => FieldPatch::Clear,
            Some(value) => FieldPatch::Set(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default)]
        driver: FieldPatch<String>,
    }

    #[test]
    fn test_absent_field_is_unset() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.driver, FieldPatch::Unset);
    }

    #[test]
    fn test_null_field_is_clear() {
        let patch: Patch = serde_json::from_str(r#"{"driver": null}"#).unwrap();
        assert_eq!(patch.driver, FieldPatch::Clear);
    }

    #[test]
    fn test_value_field_is_set() {
        let patch: Patch = serde_json::from_str(r#"{"driver": "John Smith"}"#).unwrap();
        assert_eq!(patch.driver, FieldPatch::Set("John Smith".to_string()));
    }
}
