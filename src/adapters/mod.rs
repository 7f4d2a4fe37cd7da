pub mod nutrition;
pub mod weather;

pub use nutrition::OpenFoodFactsClient;
pub use weather::OpenWeatherClient;
