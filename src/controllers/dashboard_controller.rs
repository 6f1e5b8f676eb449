//! Agregador del dashboard
//!
//! Solo lectura, sin camino de escritura. Política fail-open: cualquier fallo
//! del almacén degrada a la estructura rellena de ceros en lugar de propagar
//! el error; el fallo subyacente sí se registra.

use sqlx::PgPool;
use std::sync::Arc;

use crate::dto::dashboard_dto::{
    DashboardOverview, DashboardStats, FleetStatusSummary, PerformanceMetrics, RevenueSummary,
    WeeklyTrends,
};
use crate::models::bus::{BUS_STATUS_ACTIVE, BUS_STATUS_MAINTENANCE, BUS_STATUS_OUT_OF_SERVICE};
use crate::repositories::bus_repository::BusRepository;
use crate::repositories::contact_repository::ContactRepository;
use crate::repositories::route_repository::RouteRepository;
use crate::repositories::schedule_repository::ScheduleRepository;
use crate::repositories::{BusStore, ContactStore, RouteStore, ScheduleStore};
use crate::utils::errors::AppResult;

pub struct DashboardController {
    buses: Arc<dyn BusStore>,
    routes: Arc<dyn RouteStore>,
    schedules: Arc<dyn ScheduleStore>,
    contacts: Arc<dyn ContactStore>,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            buses: Arc::new(BusRepository::new(pool.clone())),
            routes: Arc::new(RouteRepository::new(pool.clone())),
            schedules: Arc::new(ScheduleRepository::new(pool.clone())),
            contacts: Arc::new(ContactRepository::new(pool)),
        }
    }

    #[cfg(test)]
    pub fn with_stores(
        buses: Arc<dyn BusStore>,
        routes: Arc<dyn RouteStore>,
        schedules: Arc<dyn ScheduleStore>,
        contacts: Arc<dyn ContactStore>,
    ) -> Self {
        Self {
            buses,
            routes,
            schedules,
            contacts,
        }
    }

    /// Estadísticas completas del dashboard. Nunca devuelve error: ante un
    /// fallo del almacén responde la estructura por defecto.
    pub async fn stats(&self) -> DashboardStats {
        match self.compute_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!("Dashboard stats degraded to defaults: {}", e);
                DashboardStats::default()
            }
        }
    }

    async fn compute_stats(&self) -> AppResult<DashboardStats> {
        let total_buses = self.buses.count_all().await?;
        let active_buses = self.buses.count_by_status(BUS_STATUS_ACTIVE).await?;
        let maintenance_buses = self.buses.count_by_status(BUS_STATUS_MAINTENANCE).await?;
        let out_of_service_buses = self
            .buses
            .count_by_status(BUS_STATUS_OUT_OF_SERVICE)
            .await?;

        let total_routes = self.routes.count_all().await?;
        // Conteos de salidas y contactos: alimentan métricas aún sin tablero
        // propio, igual que en el resto del panel
        let _total_schedules = self.schedules.count_all().await?;
        let _total_contacts = self.contacts.count_all().await?;

        let efficiency = if total_buses > 0 {
            ((active_buses as f64 / total_buses as f64) * 100.0).round() as i64
        } else {
            0
        };

        Ok(DashboardStats {
            overview: DashboardOverview {
                total_fleet: total_buses,
                active_vehicles: active_buses,
                total_routes,
                daily_passengers: 0,
                revenue: RevenueSummary::default(),
                efficiency,
            },
            fleet_status: FleetStatusSummary {
                active: active_buses,
                maintenance: maintenance_buses,
                out_of_service: out_of_service_buses,
                idle: (total_buses - active_buses - maintenance_buses - out_of_service_buses)
                    .max(0),
            },
            recent_alerts: Vec::new(),
            performance_metrics: PerformanceMetrics::default(),
            route_performance: Vec::new(),
            weekly_trends: WeeklyTrends::default(),
        })
    }
}
