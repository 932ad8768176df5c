// Domain entities and value objects
pub mod profile;
pub mod screening;
pub mod conversions;

// Re-export common types for easier imports
pub use profile::{
    AlcoholFrequency, LastTest, PreventiveCareProfile, SexAtBirth, SmokingStatus, StoredProfile,
};
pub use screening::{GroupedScreenings, ScreeningItem, ScreeningKind, ScreeningStatus, StatusCounts};
