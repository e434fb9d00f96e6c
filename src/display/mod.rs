//! The `display` module holds the weather state the watch face draws from.
//! Drawing itself happens elsewhere; this is the part that decides what there
//! is to draw.

pub mod panel;

pub use panel::WeatherPanel;
