//! Pizza record

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Primary key of a pizza, assigned by the store
pub type PizzaId = i64;

/// A pizza as stored and as exchanged over HTTP.
///
/// `id` is ignored on input: creation assigns it and updates never touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    #[serde(default)]
    #[schema(example = 1)]
    pub id: PizzaId,
    #[schema(example = "Margherita")]
    pub name: Option<String>,
    #[schema(example = "Classic")]
    pub description: Option<String>,
}

impl Pizza {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }

    /// Copy the mutable fields of `patch` onto `self`, keeping `id`
    pub fn apply(&mut self, patch: &Pizza) {
        self.name = patch.name.clone();
        self.description = patch.description.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let pizza = Pizza {
            id: 1,
            ..Pizza::new("Margherita", "Classic")
        };
        let json = serde_json::to_string(&pizza).unwrap();
        assert_eq!(json, r#"{"id":1,"name":"Margherita","description":"Classic"}"#);
    }

    #[test]
    fn test_missing_fields_deserialize_as_absent() {
        let pizza: Pizza = serde_json::from_str(r#"{"name":"Marinara"}"#).unwrap();
        assert_eq!(pizza.id, 0);
        assert_eq!(pizza.name.as_deref(), Some("Marinara"));
        assert_eq!(pizza.description, None);
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut pizza = Pizza {
            id: 7,
            ..Pizza::new("Margherita", "Classic")
        };
        let patch = Pizza {
            id: 99,
            ..Pizza::new("Diavola", "Spicy")
        };

        pizza.apply(&patch);

        assert_eq!(pizza.id, 7);
        assert_eq!(pizza.name.as_deref(), Some("Diavola"));
        assert_eq!(pizza.description.as_deref(), Some("Spicy"));
    }
}
