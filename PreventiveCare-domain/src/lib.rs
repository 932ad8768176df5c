// PreventiveCare Domain
// This crate contains the screening rules and business logic for the preventive care service

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Testing utilities - available to this crate's tests and with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
