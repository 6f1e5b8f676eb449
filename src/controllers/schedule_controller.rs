//! Gestión de salidas programadas
//!
//! route y bus son referencias polimórficas obligatorias; la llegada debe ser
//! posterior a la salida antes de persistir, en alta y en actualización.

use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::schedule_dto::{
    AddDelayRequest, CreateScheduleRequest, ScheduleFilters, UpdateScheduleRequest,
};
use crate::dto::FieldPatch;
use crate::models::id::{is_object_id, EntityId};
use crate::models::schedule::{
    DelayRecord, PassengerCounts, Schedule, SCHEDULE_STATUSES, SCHEDULE_STATUS_SCHEDULED,
};
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::repositories::{ScheduleQuery, ScheduleStore};
use crate::services::reference_resolver::{ReferenceResolver, ResolvedAssignment};
use crate::utils::errors::{invalid_field, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_enum, validate_non_negative};

pub struct ScheduleController {
    schedules: Arc<dyn ScheduleStore>,
    resolver: ReferenceResolver,
}

/// Página por defecto del listado de salidas
const DEFAULT_SCHEDULE_LIMIT: i64 = 20;

impl ScheduleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            schedules: Arc::new(ScheduleRepository::new(pool.clone())),
            resolver: ReferenceResolver::new(pool),
        }
    }

    #[cfg(test)]
    pub fn with_store(schedules: Arc<dyn ScheduleStore>, resolver: ReferenceResolver) -> Self {
        Self { schedules, resolver }
    }

    pub async fn create(&self, request: CreateScheduleRequest) -> AppResult<Schedule> {
        request.validate()?;

        let route = match self.resolver.resolve_route(&request.route).await? {
            ResolvedAssignment::Cleared => {
                return Err(validation_error("route", "Route is required"))
            }
            ResolvedAssignment::Assigned(assignment) => assignment,
        };
        let bus = match self.resolver.resolve_bus(&request.bus).await? {
            ResolvedAssignment::Cleared => return Err(validation_error("bus", "Bus is required")),
            ResolvedAssignment::Assigned(assignment) => assignment,
        };

        let driver = driver_reference(request.driver)?;

        check_times(request.departure_time, request.arrival_time)?;
        check_passengers(&request.passengers)?;

        let status = request
            .status
            .unwrap_or_else(|| SCHEDULE_STATUS_SCHEDULED.to_string());
        validate_enum(&status, SCHEDULE_STATUSES).map_err(|e| invalid_field("status", e))?;

        if let Some(fuel) = request.fuel_consumption {
            validate_non_negative(fuel).map_err(|e| invalid_field("fuelConsumption", e))?;
        }

        let now = chrono::Utc::now();
        let schedule = Schedule {
            id: EntityId::new(),
            route,
            bus,
            driver,
            departure_time: request.departure_time,
            arrival_time: request.arrival_time,
            actual_departure_time: None,
            actual_arrival_time: None,
            status,
            passengers: request.passengers,
            delays: Vec::new(),
            notes: request.notes,
            fuel_consumption: request.fuel_consumption,
            created_at: now,
            updated_at: now,
        };

        self.schedules.insert(&schedule).await?;
        Ok(schedule)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Schedule> {
        self.schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule not found".to_string()))
    }

    pub async fn list(&self, filters: ScheduleFilters) -> AppResult<(Vec<Schedule>, i64, i64, i64)> {
        let page = filters.page.unwrap_or(1).max(1);
        let limit = filters.limit.unwrap_or(DEFAULT_SCHEDULE_LIMIT).max(1);

        let query = ScheduleQuery {
            route: filters.route,
            bus: filters.bus,
            status: filters.status,
            skip: Some((page - 1) * limit),
            limit: Some(limit),
        };

        let schedules = self.schedules.list(&query).await?;
        let total = self
            .schedules
            .count(&ScheduleQuery {
                skip: None,
                limit: None,
                ..query
            })
            .await?;
        let pages = (total + limit - 1) / limit;

        Ok((schedules, total, page, pages))
    }

    pub async fn update(&self, id: &str, request: UpdateScheduleRequest) -> AppResult<Schedule> {
        request.validate()?;

        let mut schedule = self
            .schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule not found".to_string()))?;

        match request.route {
            FieldPatch::Unset => {}
            FieldPatch::Clear => return Err(validation_error("route", "Route is required")),
            FieldPatch::Set(raw) => match self.resolver.resolve_route(&raw).await? {
                ResolvedAssignment::Cleared => {
                    return Err(validation_error("route", "Route is required"))
                }
                ResolvedAssignment::Assigned(assignment) => schedule.route = assignment,
            },
        }
        match request.bus {
            FieldPatch::Unset => {}
            FieldPatch::Clear => return Err(validation_error("bus", "Bus is required")),
            FieldPatch::Set(raw) => match self.resolver.resolve_bus(&raw).await? {
                ResolvedAssignment::Cleared => {
                    return Err(validation_error("bus", "Bus is required"))
                }
                ResolvedAssignment::Assigned(assignment) => schedule.bus = assignment,
            },
        }
        match request.driver {
            FieldPatch::Unset => {}
            FieldPatch::Clear => schedule.driver = None,
            FieldPatch::Set(raw) => schedule.driver = driver_reference(Some(raw))?,
        }

        if let Some(departure_time) = request.departure_time {
            schedule.departure_time = departure_time;
        }
        if let Some(arrival_time) = request.arrival_time {
            schedule.arrival_time = arrival_time;
        }
        // El invariante se comprueba sobre el par final, venga de donde venga
        check_times(schedule.departure_time, schedule.arrival_time)?;

        if let Some(actual_departure_time) = request.actual_departure_time {
            schedule.actual_departure_time = Some(actual_departure_time);
        }
        if let Some(actual_arrival_time) = request.actual_arrival_time {
            schedule.actual_arrival_time = Some(actual_arrival_time);
        }
        if let Some(status) = request.status {
            validate_enum(&status, SCHEDULE_STATUSES).map_err(|e| invalid_field("status", e))?;
            schedule.status = status;
        }
        if let Some(passengers) = request.passengers {
            check_passengers(&passengers)?;
            schedule.passengers = passengers;
        }
        if let Some(notes) = request.notes {
            schedule.notes = Some(notes);
        }
        if let Some(fuel) = request.fuel_consumption {
            validate_non_negative(fuel).map_err(|e| invalid_field("fuelConsumption", e))?;
            schedule.fuel_consumption = Some(fuel);
        }

        schedule.updated_at = chrono::Utc::now();
        self.schedules.update(&schedule).await?;
        Ok(schedule)
    }

    /// Registrar un retraso; la secuencia conserva el orden de inserción
    pub async fn add_delay(&self, id: &str, request: AddDelayRequest) -> AppResult<Schedule> {
        request.validate()?;
        validate_non_negative(request.duration).map_err(|e| invalid_field("duration", e))?;

        let mut schedule = self
            .schedules
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule not found".to_string()))?;

        schedule.delays.push(DelayRecord {
            reason: request.reason,
            duration: request.duration,
            timestamp: chrono::Utc::now(),
        });
        schedule.updated_at = chrono::Utc::now();

        self.schedules.update(&schedule).await?;
        Ok(schedule)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.schedules.delete(id).await? {
            return Err(AppError::NotFound("Schedule not found".to_string()));
        }
        Ok(())
    }
}

fn check_times(
    departure: chrono::DateTime<chrono::Utc>,
    arrival: chrono::DateTime<chrono::Utc>,
) -> AppResult<()> {
    if arrival <= departure {
        return Err(validation_error(
            "arrivalTime",
            "Arrival time must be after departure time",
        ));
    }
    Ok(())
}

fn check_passengers(passengers: &PassengerCounts) -> AppResult<()> {
    validate_non_negative(passengers.current).map_err(|e| invalid_field("passengers", e))?;
    validate_non_negative(passengers.boarded).map_err(|e| invalid_field("passengers", e))?;
    validate_non_negative(passengers.alighted).map_err(|e| invalid_field("passengers", e))?;
    Ok(())
}

// El conductor de una salida es una referencia débil: forma de id requerida,
// sin comprobación de existencia
fn driver_reference(value: Option<String>) -> AppResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) if is_object_id(&value) => Ok(Some(value)),
        Some(_) => Err(validation_error("driver", "Invalid ID format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;

    fn controller_with(store: Arc<MemoryStore>) -> ScheduleController {
        let resolver =
            ReferenceResolver::with_stores(store.clone(), store.clone(), store.clone());
        ScheduleController::with_store(store, resolver)
    }

    fn create_request() -> CreateScheduleRequest {
        let departure = chrono::Utc::now() + chrono::Duration::hours(1);
        CreateScheduleRequest {
            route: "Downtown Loop".to_string(),
            bus: "BUS-001".to_string(),
            driver: None,
            departure_time: departure,
            arrival_time: departure + chrono::Duration::minutes(45),
            status: None,
            passengers: PassengerCounts::default(),
            notes: None,
            fuel_consumption: None,
        }
    }

    #[tokio::test]
    async fn test_create_with_labels_succeeds() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);

        let schedule = controller.create(create_request()).await.unwrap();
        assert_eq!(schedule.status, "scheduled");
        assert_eq!(schedule.route.as_str(), "Downtown Loop");
        assert!(!schedule.bus.is_reference());
    }

    #[tokio::test]
    async fn test_arrival_before_departure_is_rejected_on_create() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);

        let mut request = create_request();
        request.arrival_time = request.departure_time - chrono::Duration::minutes(10);
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Igualdad exacta tampoco es válida
        let mut request = create_request();
        request.arrival_time = request.departure_time;
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_arrival_before_departure_is_rejected_on_update() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);
        let schedule = controller.create(create_request()).await.unwrap();

        let err = controller
            .update(
                schedule.id.as_str(),
                UpdateScheduleRequest {
                    arrival_time: Some(schedule.departure_time - chrono::Duration::minutes(5)),
                    ..UpdateScheduleRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_bus_id_is_invalid_reference() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);

        let mut request = create_request();
        request.bus = "cccccccccccccccccccccccc".to_string();
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { field: "bus", .. }));
    }

    #[tokio::test]
    async fn test_clearing_required_route_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);
        let schedule = controller.create(create_request()).await.unwrap();

        let err = controller
            .update(
                schedule.id.as_str(),
                UpdateScheduleRequest {
                    route: FieldPatch::Clear,
                    ..UpdateScheduleRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_driver_must_look_like_an_id() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);

        let mut request = create_request();
        request.driver = Some("John Smith".to_string());
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Forma de id sin registro existente: referencia débil aceptada
        let mut request = create_request();
        request.driver = Some("507f1f77bcf86cd799439011".to_string());
        let schedule = controller.create(request).await.unwrap();
        assert_eq!(schedule.driver.as_deref(), Some("507f1f77bcf86cd799439011"));
    }

    #[tokio::test]
    async fn test_delays_append_in_order() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);
        let schedule = controller.create(create_request()).await.unwrap();

        controller
            .add_delay(
                schedule.id.as_str(),
                AddDelayRequest {
                    reason: "Traffic congestion".to_string(),
                    duration: 10,
                },
            )
            .await
            .unwrap();
        let updated = controller
            .add_delay(
                schedule.id.as_str(),
                AddDelayRequest {
                    reason: "Signal failure".to_string(),
                    duration: 5,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.delays.len(), 2);
        assert_eq!(updated.delays[0].reason, "Traffic congestion");
        assert_eq!(updated.delays[1].reason, "Signal failure");
    }

    #[tokio::test]
    async fn test_negative_delay_duration_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);
        let schedule = controller.create(create_request()).await.unwrap();

        let err = controller
            .add_delay(
                schedule.id.as_str(),
                AddDelayRequest {
                    reason: "Impossible".to_string(),
                    duration: -1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_negative_passenger_counts_are_rejected() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);
        let schedule = controller.create(create_request()).await.unwrap();

        let err = controller
            .update(
                schedule.id.as_str(),
                UpdateScheduleRequest {
                    passengers: Some(PassengerCounts {
                        current: -1,
                        boarded: 0,
                        alighted: 0,
                    }),
                    ..UpdateScheduleRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_passenger_counters_are_independent() {
        let store = Arc::new(MemoryStore::new());
        let controller = controller_with(store);
        let schedule = controller.create(create_request()).await.unwrap();

        // boarded < alighted es aceptable: no hay consistencia cruzada
        let updated = controller
            .update(
                schedule.id.as_str(),
                UpdateScheduleRequest {
                    passengers: Some(PassengerCounts {
                        current: 12,
                        boarded: 3,
                        alighted: 30,
                    }),
                    ..UpdateScheduleRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.passengers.boarded, 3);
        assert_eq!(updated.passengers.alighted, 30);
    }
}
