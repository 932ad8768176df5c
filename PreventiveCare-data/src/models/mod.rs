// Storage models
pub mod profile;

pub use profile::ProfileRecord;
