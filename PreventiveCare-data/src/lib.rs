// PreventiveCare Data
// This crate stores patient profile documents behind a keyed repository

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
