//! Gestión de rutas
//!
//! routeNumber único en mayúsculas; las paradas conservan el orden que
//! suministra el llamante.

use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use crate::dto::route_dto::{CreateRouteRequest, RouteFilters, UpdateRouteRequest};
use crate::models::id::EntityId;
use crate::models::route::{
    OperatingHours, Route, RouteStop, MIN_ROUTE_DISTANCE_KM, ROUTE_STATUSES, ROUTE_STATUS_ACTIVE,
};
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::{RouteQuery, RouteStore};
use crate::utils::errors::{invalid_field, validation_error, AppError, AppResult};
use crate::utils::validation::{
    validate_coordinates, validate_enum, validate_not_empty, validate_operating_time,
};

pub struct RouteController {
    routes: Arc<dyn RouteStore>,
}

impl RouteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            routes: Arc::new(RouteRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn with_store(routes: Arc<dyn RouteStore>) -> Self {
        Self { routes }
    }

    pub async fn create(&self, request: CreateRouteRequest) -> AppResult<Route> {
        request.validate()?;

        let route_number = request.route_number.trim().to_uppercase();
        validate_not_empty(&route_number).map_err(|e| invalid_field("routeNumber", e))?;
        validate_not_empty(&request.name).map_err(|e| invalid_field("name", e))?;
        check_route_fields(
            request.distance,
            request.estimated_duration,
            request.frequency,
            request.fare,
        )?;
        check_operating_hours(&request.operating_hours)?;
        check_stops(&request.stops)?;

        let status = request
            .status
            .unwrap_or_else(|| ROUTE_STATUS_ACTIVE.to_string());
        validate_enum(&status, ROUTE_STATUSES).map_err(|e| invalid_field("status", e))?;

        if self
            .routes
            .find_by_number(&route_number, None)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateRouteNumber(route_number));
        }

        let now = chrono::Utc::now();
        let route = Route {
            id: EntityId::new(),
            route_number,
            name: request.name,
            start_location: request.start_location,
            end_location: request.end_location,
            stops: request.stops,
            distance: request.distance,
            estimated_duration: request.estimated_duration,
            operating_hours: request.operating_hours,
            frequency: request.frequency,
            fare: request.fare,
            status,
            created_at: now,
            updated_at: now,
        };

        self.routes.insert(&route).await?;
        Ok(route)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Route> {
        self.routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))
    }

    pub async fn list(&self, filters: RouteFilters) -> AppResult<Vec<Route>> {
        let query = RouteQuery {
            status: filters.status,
        };
        self.routes.list(&query).await
    }

    pub async fn update(&self, id: &str, request: UpdateRouteRequest) -> AppResult<Route> {
        request.validate()?;

        let mut route = self
            .routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        if let Some(route_number) = request.route_number {
            let route_number = route_number.trim().to_uppercase();
            if self
                .routes
                .find_by_number(&route_number, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::DuplicateRouteNumber(route_number));
            }
            route.route_number = route_number;
        }

        if let Some(name) = request.name {
            route.name = name;
        }
        if let Some(start_location) = request.start_location {
            route.start_location = start_location;
        }
        if let Some(end_location) = request.end_location {
            route.end_location = end_location;
        }
        if let Some(stops) = request.stops {
            check_stops(&stops)?;
            // El orden de las paradas es el del llamante, no se reindexa
            route.stops = stops;
        }
        if let Some(distance) = request.distance {
            route.distance = distance;
        }
        if let Some(estimated_duration) = request.estimated_duration {
            route.estimated_duration = estimated_duration;
        }
        if let Some(operating_hours) = request.operating_hours {
            check_operating_hours(&operating_hours)?;
            route.operating_hours = operating_hours;
        }
        if let Some(frequency) = request.frequency {
            route.frequency = frequency;
        }
        if let Some(fare) = request.fare {
            route.fare = fare;
        }
        if let Some(status) = request.status {
            validate_enum(&status, ROUTE_STATUSES).map_err(|e| invalid_field("status", e))?;
            route.status = status;
        }

        check_route_fields(
            route.distance,
            route.estimated_duration,
            route.frequency,
            route.fare,
        )?;

        route.updated_at = chrono::Utc::now();
        self.routes.update(&route).await?;
        Ok(route)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.routes.delete(id).await? {
            return Err(AppError::NotFound("Route not found".to_string()));
        }
        Ok(())
    }
}

fn check_route_fields(distance: f64, duration: i32, frequency: i32, fare: f64) -> AppResult<()> {
    if distance < MIN_ROUTE_DISTANCE_KM {
        return Err(validation_error("distance", "Distance must be at least 0.1 km"));
    }
    if duration < 1 {
        return Err(validation_error(
            "estimatedDuration",
            "Duration must be at least 1 minute",
        ));
    }
    if frequency < 5 {
        return Err(validation_error(
            "frequency",
            "Frequency must be at least 5 minutes",
        ));
    }
    if fare < 0.0 {
        return Err(validation_error("fare", "Fare cannot be negative"));
    }
    Ok(())
}

fn check_operating_hours(hours: &OperatingHours) -> AppResult<()> {
    validate_operating_time(&hours.start).map_err(|e| invalid_field("operatingHours", e))?;
    validate_operating_time(&hours.end).map_err(|e| invalid_field("operatingHours", e))?;
    Ok(())
}

fn check_stops(stops: &[RouteStop]) -> AppResult<()> {
    for stop in stops {
        if stop.name.trim().is_empty() {
            return Err(validation_error("stops", "Stop name is required"));
        }
        validate_coordinates(stop.coordinates.latitude, stop.coordinates.longitude)
            .map_err(|e| invalid_field("stops", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::Coordinates;
    use crate::repositories::memory::MemoryStore;

    fn controller() -> RouteController {
        RouteController::with_store(Arc::new(MemoryStore::new()))
    }

    fn create_request(route_number: &str) -> CreateRouteRequest {
        CreateRouteRequest {
            route_number: route_number.to_string(),
            name: "Downtown Loop".to_string(),
            start_location: "Central Station".to_string(),
            end_location: "Harbor Terminal".to_string(),
            stops: vec![
                RouteStop {
                    name: "City Hall".to_string(),
                    coordinates: Coordinates {
                        latitude: 40.713,
                        longitude: -74.006,
                    },
                    estimated_time: 5,
                    order: 2,
                },
                RouteStop {
                    name: "Market Square".to_string(),
                    coordinates: Coordinates {
                        latitude: 40.718,
                        longitude: -74.001,
                    },
                    estimated_time: 12,
                    order: 1,
                },
            ],
            distance: 8.4,
            estimated_duration: 35,
            operating_hours: OperatingHours {
                start: "05:30".to_string(),
                end: "23:00".to_string(),
            },
            frequency: 15,
            fare: 2.5,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_route_number_uppercased_and_unique() {
        let controller = controller();
        let route = controller.create(create_request("r-12")).await.unwrap();
        assert_eq!(route.route_number, "R-12");
        assert_eq!(route.status, "active");

        let err = controller.create(create_request("R-12")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateRouteNumber(_)));
    }

    #[tokio::test]
    async fn test_stop_order_is_caller_supplied() {
        let controller = controller();
        let route = controller.create(create_request("R-12")).await.unwrap();

        // El orden 2,1 del llamante se conserva tal cual
        assert_eq!(route.stops[0].order, 2);
        assert_eq!(route.stops[1].order, 1);
    }

    #[tokio::test]
    async fn test_distance_below_minimum_is_rejected() {
        let controller = controller();
        let mut request = create_request("R-12");
        request.distance = 0.05;
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_frequency_below_five_minutes_is_rejected() {
        let controller = controller();
        let mut request = create_request("R-12");
        request.frequency = 3;
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_operating_hours_are_rejected() {
        let controller = controller();
        let mut request = create_request("R-12");
        request.operating_hours.end = "25:00".to_string();
        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_renumber_excludes_self() {
        let controller = controller();
        let route = controller.create(create_request("R-12")).await.unwrap();
        controller.create(create_request("R-13")).await.unwrap();

        controller
            .update(
                route.id.as_str(),
                UpdateRouteRequest {
                    route_number: Some("r-12".to_string()),
                    ..UpdateRouteRequest::default()
                },
            )
            .await
            .unwrap();

        let err = controller
            .update(
                route.id.as_str(),
                UpdateRouteRequest {
                    route_number: Some("R-13".to_string()),
                    ..UpdateRouteRequest::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateRouteNumber(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_route_is_not_found() {
        let controller = controller();
        let err = controller
            .delete("cccccccccccccccccccccccc")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
