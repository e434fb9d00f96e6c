//! The `sender` module is the handheld side of the sync: it turns today's
//! forecast into a telegram and pushes it to the wearable when it differs
//! from the one pushed last.

pub mod updater;

pub use updater::{SendOutcome, WearUpdater};
