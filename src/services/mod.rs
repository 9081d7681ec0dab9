//! Business logic services

pub mod fixtures;
pub mod refs;
pub mod reset;
pub mod runner;
pub mod seed;
pub mod verify;

pub use fixtures::{inventory_fixture, Fixture};
pub use runner::SeedOptions;
pub use seed::{SeedPhase, SeedReport, SeedService};
pub use verify::VerificationReport;
