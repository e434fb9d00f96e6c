//! The `telegram` module holds the value that travels between the devices:
//! one weather snapshot made of a condition code, the day's temperature range
//! and the unit those temperatures are expressed in.

pub mod unit;
pub mod weather;

pub use unit::WeatherUnit;
pub use weather::Telegram;
