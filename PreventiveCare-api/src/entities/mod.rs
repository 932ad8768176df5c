// Public entities for the PreventiveCare API
// This module contains data structures that are shared across the application boundary

// Screening reports returned by the evaluation endpoints
pub mod screening;

// Common entities for error handling
pub mod common;
