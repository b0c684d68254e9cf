pub mod catalog;
pub mod curriculum;
pub mod state;

pub use catalog::{Category, SubCategory};
pub use curriculum::{AdditionalResource, Curriculum, DailyTask, ResourceType, TaskFlag, WeekRecord};
pub use state::{ProgressState, StateError};
