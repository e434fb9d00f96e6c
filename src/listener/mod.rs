//! The `listener` module is the wearable side of the sync: it receives change
//! batches from the transport, keeps the weather items, stores them and
//! tells the display.

pub mod identity;
pub mod service;

pub use identity::{CallingIdentity, ElevatedScope, IdentityToken, ProcessIdentity};
pub use service::{BatchReport, TransportListener};
