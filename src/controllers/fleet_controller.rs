//! Gestión de flota
//!
//! Reglas que este controlador hace cumplir:
//! - busNumber único, insensible a mayúsculas (se almacena en mayúsculas),
//!   tanto en el alta como al renumerar
//! - driver y route pasan por el resolver de referencias; en updates llevan
//!   semántica de tres vías (ausente / vacío = limpiar / valor = resolver)
//! - el borrado es duro y no cascada a schedules ni rutas

use chrono::Datelike;
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::fleet_dto::{BusFilters, CreateBusRequest, FleetStatsResponse, UpdateBusRequest};
use crate::dto::FieldPatch;
use crate::models::bus::{
    Bus, BUS_STATUSES, BUS_STATUS_ACTIVE, BUS_STATUS_MAINTENANCE, BUS_STATUS_OUT_OF_SERVICE,
    BUS_TYPES, BUS_TYPE_STANDARD, DEFAULT_MAINTENANCE_INTERVAL_DAYS, FUEL_TYPES, FUEL_TYPE_DIESEL,
};
use crate::models::id::EntityId;
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::{BusQuery, BusStore};
use crate::services::reference_resolver::{ReferenceResolver, ResolvedAssignment};
use crate::utils::errors::{invalid_field, AppError, AppResult};
use crate::utils::validation::{validate_enum, validate_non_negative, validate_range};

pub struct FleetController {
    buses: Arc<dyn BusStore>,
    resolver: ReferenceResolver,
}

/// Página por defecto del listado de flota
const DEFAULT_FLEET_LIMIT: i64 = 10;

impl FleetController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            buses: Arc::new(BusRepository::new(pool.clone())),
            resolver: ReferenceResolver::new(pool),
        }
    }

    #[cfg(test)]
    pub fn with_store(buses: Arc<dyn BusStore>, resolver: ReferenceResolver) -> Self {
        Self { buses, resolver }
    }

    /// Alta de bus. El número se almacena en mayúsculas y debe ser único;
    /// nextMaintenance por defecto es ahora + 90 días.
    pub async fn create(&self, request: CreateBusRequest) -> AppResult<Bus> {
        request.validate()?;

        let bus_number = request.bus_number.trim().to_uppercase();
        if bus_number.is_empty() {
            return Err(AppError::BadRequest("Bus number is required".to_string()));
        }

        let bus_type = request
            .bus_type
            .unwrap_or_else(|| BUS_TYPE_STANDARD.to_string());
        validate_enum(&bus_type, BUS_TYPES).map_err(|e| invalid_field("type", e))?;

        let fuel_type = request
            .fuel_type
            .unwrap_or_else(|| FUEL_TYPE_DIESEL.to_string());
        validate_enum(&fuel_type, FUEL_TYPES).map_err(|e| invalid_field("fuelType", e))?;

        if let Some(year) = request.year {
            let max_year = chrono::Utc::now().year() + 1;
            validate_range(year, 1980, max_year).map_err(|e| invalid_field("year", e))?;
        }

        let mileage = request.mileage.unwrap_or(0.0);
        validate_non_negative(mileage).map_err(|e| invalid_field("mileage", e))?;

        if self
            .buses
            .find_by_number(&bus_number, None)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateBusNumber(bus_number));
        }

        let driver = match request.driver {
            None => None,
            Some(raw) => match self.resolver.resolve_driver(&raw).await? {
                ResolvedAssignment::Cleared => None,
                ResolvedAssignment::Assigned(assignment) => Some(assignment),
            },
        };
        let route = match request.route {
            None => None,
            Some(raw) => match self.resolver.resolve_route(&raw).await? {
                ResolvedAssignment::Cleared => None,
                ResolvedAssignment::Assigned(assignment) => Some(assignment),
            },
        };

        let now = chrono::Utc::now();
        let bus = Bus {
            id: EntityId::new(),
            bus_number,
            capacity: request.capacity,
            bus_type,
            status: BUS_STATUS_ACTIVE.to_string(),
            driver,
            route,
            model: request.model,
            year: request.year,
            license_plate: request.license_plate.map(|p| p.trim().to_uppercase()),
            fuel_type,
            last_maintenance: None,
            next_maintenance: request.next_maintenance.or_else(|| {
                Some(now + chrono::Duration::days(DEFAULT_MAINTENANCE_INTERVAL_DAYS))
            }),
            mileage,
            features: request.features.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.buses.insert(&bus).await?;
        Ok(bus)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Bus> {
        self.buses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))
    }

    pub async fn list(&self, filters: BusFilters) -> AppResult<(Vec<Bus>, i64, i64, i64)> {
        let page = filters.page.unwrap_or(1).max(1);
        let limit = filters.limit.unwrap_or(DEFAULT_FLEET_LIMIT).max(1);

        let query = BusQuery {
            status: filters.status,
            route: filters.route,
            skip: Some((page - 1) * limit),
            limit: Some(limit),
        };

        let buses = self.buses.list(&query).await?;
        let total = self
            .buses
            .count(&BusQuery {
                skip: None,
                limit: None,
                ..query
            })
            .await?;
        let pages = (total + limit - 1) / limit;

        Ok((buses, total, page, pages))
    }

    /// Actualización de bus con semántica de tres vías en driver y route:
    /// campo ausente = sin tocar, vacío/null = limpiar, valor = resolver.
    pub async fn update(&self, id: &str, request: UpdateBusRequest) -> AppResult<Bus> {
        request.validate()?;

        let mut bus = self
            .buses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))?;

        if let Some(bus_number) = request.bus_number {
            let bus_number = bus_number.trim().to_uppercase();
            if self
                .buses
                .find_by_number(&bus_number, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::DuplicateBusNumber(bus_number));
            }
            bus.bus_number = bus_number;
        }

        if let Some(capacity) = request.capacity {
            bus.capacity = capacity;
        }
        if let Some(bus_type) = request.bus_type {
            validate_enum(&bus_type, BUS_TYPES).map_err(|e| invalid_field("type", e))?;
            bus.bus_type = bus_type;
        }
        if let Some(status) = request.status {
            validate_enum(&status, BUS_STATUSES).map_err(|e| invalid_field("status", e))?;
            bus.status = status;
        }
        if let Some(fuel_type) = request.fuel_type {
            validate_enum(&fuel_type, FUEL_TYPES).map_err(|e| invalid_field("fuelType", e))?;
            bus.fuel_type = fuel_type;
        }
        if let Some(year) = request.year {
            let max_year = chrono::Utc::now().year() + 1;
            validate_range(year, 1980, max_year).map_err(|e| invalid_field("year", e))?;
            bus.year = Some(year);
        }
        if let Some(mileage) = request.mileage {
            validate_non_negative(mileage).map_err(|e| invalid_field("mileage", e))?;
            bus.mileage = mileage;
        }
        if let Some(model) = request.model {
            bus.model = Some(model);
        }
        if let Some(license_plate) = request.license_plate {
            bus.license_plate = Some(license_plate.trim().to_uppercase());
        }
        if let Some(features) = request.features {
            bus.features = features;
        }
        if let Some(last_maintenance) = request.last_maintenance {
            bus.last_maintenance = Some(last_maintenance);
        }
        if let Some(next_maintenance) = request.next_maintenance {
            bus.next_maintenance = Some(next_maintenance);
        }

        match request.driver {
            FieldPatch::Unset => {}
            FieldPatch::Clear => bus.driver = None,
            FieldPatch::Set(raw) => match self.resolver.resolve_driver(&raw).await? {
                ResolvedAssignment::Cleared => bus.driver = None,
                ResolvedAssignment::Assigned(assignment) => bus.driver = Some(assignment),
            },
        }
        match request.route {
            FieldPatch::Unset => {}
            FieldPatch::Clear => bus.route = None,
            FieldPatch::Set(raw) => match self.resolver.resolve_route(&raw).await? {
                ResolvedAssignment::Cleared => bus.route = None,
                ResolvedAssignment::Assigned(assignment) => bus.route = Some(assignment),
            },
        }

        bus.updated_at = chrono::Utc::now();
        self.buses.update(&bus).await?;
        Ok(bus)
    }

    /// Borrado duro; las referencias colgantes desde schedules se permiten
    pub async fn delete(&self, id: &str) -> AppResult<Bus> {
        self.buses
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Bus not found".to_string()))
    }

    /// Estadísticas de flota; la tasa de utilización es activos/total
    /// redondeada al entero más cercano
    pub async fn fleet_stats(&self) -> AppResult<FleetStatsResponse> {
        let total_buses = self.buses.count_all().await?;
        let active_buses = self.buses.count_by_status(BUS_STATUS_ACTIVE).await?;
        let maintenance_buses = self.buses.count_by_status(BUS_STATUS_MAINTENANCE).await?;
        let out_of_service_buses = self
            .buses
            .count_by_status(BUS_STATUS_OUT_OF_SERVICE)
            .await?;

        let (total_capacity, average_mileage, total_mileage) = self.buses.fleet_totals().await?;

        let utilization_rate = if total_buses > 0 {
            ((active_buses as f64 / total_buses as f64) * 100.0).round() as i64
        } else {
            0
        };

        Ok(FleetStatsResponse {
            total_buses,
            active_buses,
            maintenance_buses,
            out_of_service_buses,
            total_capacity,
            average_mileage: average_mileage.round() as i64,
            total_mileage,
            utilization_rate,
            bus_by_type: self.buses.group_count_by_type().await?,
        })
    }
}
