pub mod datetime;
pub mod geo;
pub mod time_slots;
pub mod viewport;
