//! Backend de gestión de parkings
//!
//! API REST (axum + sqlx/PostgreSQL) con arquitectura
//! Router → Controller → Repository → Base de datos.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
