//! Resolución de referencias identificador-o-etiqueta
//!
//! Un valor con forma de id de 24 hex es candidato a identificador y debe
//! existir en la colección correspondiente; cualquier otro texto se acepta
//! sin comprobación como etiqueta de display. El vacío explícito significa
//! limpiar el campo.

use sqlx::PgPool;
use std::sync::Arc;

use crate::models::id::is_object_id;
use crate::models::reference::{classify, Assignment};
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::{BusStore, RouteStore, UserStore};
use crate::utils::errors::{AppError, AppResult};

/// Resultado de resolver el valor crudo de un campo polimórfico
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAssignment {
    /// Valor vacío: el llamante quiere limpiar el campo
    Cleared,
    /// Referencia validada o etiqueta aceptada
    Assigned(Assignment),
}

pub struct ReferenceResolver {
    users: Arc<dyn UserStore>,
    routes: Arc<dyn RouteStore>,
    buses: Arc<dyn BusStore>,
}

impl ReferenceResolver {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            routes: Arc::new(RouteRepository::new(pool.clone())),
            buses: Arc::new(BusRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        routes: Arc<dyn RouteStore>,
        buses: Arc<dyn BusStore>,
    ) -> Self {
        Self { users, routes, buses }
    }

    /// Resolver el valor de un campo de conductor contra la colección de
    /// usuarios
    pub async fn resolve_driver(&self, raw: &str) -> AppResult<ResolvedAssignment> {
        if raw.is_empty() {
            return Ok(ResolvedAssignment::Cleared);
        }

        if is_object_id(raw) && self.users.find_by_id(raw).await?.is_none() {
            return Err(AppError::InvalidReference {
                field: "driver",
                value: raw.to_string(),
            });
        }

        Ok(ResolvedAssignment::Assigned(classify(raw)))
    }

    /// Resolver el valor de un campo de ruta contra la colección de rutas
    pub async fn resolve_route(&self, raw: &str) -> AppResult<ResolvedAssignment> {
        if raw.is_empty() {
            return Ok(ResolvedAssignment::Cleared);
        }

        if is_object_id(raw) && self.routes.find_by_id(raw).await?.is_none() {
            return Err(AppError::InvalidReference {
                field: "route",
                value: raw.to_string(),
            });
        }

        Ok(ResolvedAssignment::Assigned(classify(raw)))
    }

    /// Resolver el valor de un campo de bus contra la colección de buses
    pub async fn resolve_bus(&self, raw: &str) -> AppResult<ResolvedAssignment> {
        if raw.is_empty() {
            return Ok(ResolvedAssignment::Cleared);
        }

        if is_object_id(raw) && self.buses.find_by_id(raw).await?.is_none() {
            return Err(AppError::InvalidReference {
                field: "bus",
                value: raw.to_string(),
            });
        }

        Ok(ResolvedAssignment::Assigned(classify(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::id::EntityId;
    use crate::models::user::User;
    use crate::repositories::memory::MemoryStore;

    fn resolver_with(store: Arc<MemoryStore>) -> ReferenceResolver {
        ReferenceResolver::with_stores(store.clone(), store.clone(), store)
    }

    async fn seed_user(store: &MemoryStore) -> EntityId {
        let user = User {
            id: EntityId::new(),
            username: "jsmith".to_string(),
            password_hash: "hash".to_string(),
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "jsmith@transit.gov".to_string(),
            role: "staff".to_string(),
            created_at: chrono::Utc::now(),
        };
        UserStore::insert(store, &user).await.unwrap();
        user.id
    }

    #[tokio::test]
    async fn test_empty_value_clears() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(store);

        let resolved = resolver.resolve_driver("").await.unwrap();
        assert_eq!(resolved, ResolvedAssignment::Cleared);
    }

    #[tokio::test]
    async fn test_known_id_resolves_as_reference() {
        let store = Arc::new(MemoryStore::new());
        let id = seed_user(&store).await;
        let resolver = resolver_with(store);

        let resolved = resolver.resolve_driver(id.as_str()).await.unwrap();
        match resolved {
            ResolvedAssignment::Assigned(assignment) => {
                assert!(assignment.is_reference());
                assert_eq!(assignment.as_str(), id.as_str());
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_id_is_invalid_reference() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(store);

        let err = resolver
            .resolve_driver("cccccccccccccccccccccccc")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidReference { field: "driver", .. }
        ));
    }

    #[tokio::test]
    async fn test_free_text_is_accepted_without_lookup() {
        // Un texto que no parece id se acepta aunque no exista nada con ese
        // nombre
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(store);

        let resolved = resolver.resolve_driver("John Smith").await.unwrap();
        match resolved {
            ResolvedAssignment::Assigned(assignment) => {
                assert!(!assignment.is_reference());
                assert_eq!(assignment.as_str(), "John Smith");
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_route_resolution_checks_route_collection() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(store);

        let err = resolver
            .resolve_route("dddddddddddddddddddddddd")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidReference { field: "route", .. }
        ));

        let label = resolver.resolve_route("Downtown Express").await.unwrap();
        assert!(matches!(label, ResolvedAssignment::Assigned(Assignment::Label(_))));
    }
}
