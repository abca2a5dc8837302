use serde::Serialize;

// Estadísticas de un parking concreto.
// `total_spots` aquí es el número de plazas realmente creadas,
// no la capacidad declarada del parking.
#[derive(Debug, Serialize, PartialEq)]
pub struct ParkingStatsResponse {
    pub total_spots: i64,
    pub occupied_spots: i64,
    pub available_spots: i64,
    pub reserved_spots: i64,
    pub occupancy_rate: f64,
    pub availability_rate: f64,
}

// Estadísticas globales del dashboard
#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardStatsResponse {
    pub total_parkings: i64,
    pub total_spots: i64,
    pub occupied_spots: i64,
    pub available_spots: i64,
    pub occupancy_rate: f64,
    pub total_vehicles: i64,
    pub active_subscriptions: i64,
}
