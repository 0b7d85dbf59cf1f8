pub mod adherence;
pub mod appointment;
pub mod calendar_event;
pub mod enums;
pub mod medication;
pub mod patient;
pub mod symptom;

pub use adherence::*;
pub use appointment::*;
pub use calendar_event::*;
pub use medication::*;
pub use patient::*;
pub use symptom::*;
