pub mod foods;
pub mod goals;
pub mod model;
pub mod ports;
pub mod workouts;
