//! Estructura del dashboard
//!
//! Todas las métricas tienen un valor cero explícito por defecto: ante
//! ausencia de datos o fallo del almacén el agregador devuelve esta misma
//! estructura rellena de ceros, nunca un error.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub today: f64,
    pub this_month: f64,
    pub currency: String,
}

impl Default for RevenueSummary {
    fn default() -> Self {
        Self {
            today: 0.0,
            this_month: 0.0,
            currency: "INR".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub total_fleet: i64,
    pub active_vehicles: i64,
    pub total_routes: i64,
    pub daily_passengers: i64,
    pub revenue: RevenueSummary,
    pub efficiency: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatusSummary {
    pub active: i64,
    pub maintenance: i64,
    pub out_of_service: i64,
    pub idle: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCosts {
    pub this_month: f64,
    pub last_month: f64,
    pub trend: String,
}

impl Default for MaintenanceCosts {
    fn default() -> Self {
        Self {
            this_month: 0.0,
            last_month: 0.0,
            trend: "stable".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub on_time_performance: i64,
    pub customer_satisfaction: i64,
    pub fuel_efficiency: i64,
    pub average_speed: i64,
    pub maintenance_costs: MaintenanceCosts,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyTrends {
    pub passengers: [i64; 7],
    pub revenue: [f64; 7],
    pub efficiency: [i64; 7],
    pub labels: [&'static str; 7],
}

impl Default for WeeklyTrends {
    fn default() -> Self {
        Self {
            passengers: [0; 7],
            revenue: [0.0; 7],
            efficiency: [0; 7],
            labels: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: DashboardOverview,
    pub fleet_status: FleetStatusSummary,
    pub recent_alerts: Vec<serde_json::Value>,
    pub performance_metrics: PerformanceMetrics,
    pub route_performance: Vec<serde_json::Value>,
    pub weekly_trends: WeeklyTrends,
}

#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<serde_json::Value>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct RoutePerformanceResponse {
    pub routes: Vec<serde_json::Value>,
    pub total: i64,
}
