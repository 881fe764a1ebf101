//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the document store and external systems.

pub mod export;
pub mod fitness;
pub mod locks;
pub mod wellness;

pub use export::ExportService;
pub use fitness::{DayWindow, FitnessProvider, GoogleFitClient};
pub use locks::UserLocks;
pub use wellness::{MealLogged, WellnessService, WellnessUpdate};
