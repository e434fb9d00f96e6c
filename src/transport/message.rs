use serde::{Deserialize, Serialize};

use crate::codec::DataMap;

/// A payload published under a logical path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataItem {
    pub path: String,
    pub data: DataMap,
}

impl DataItem {
    pub fn new(path: &str, data: DataMap) -> Self {
        Self {
            path: path.to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataEventKind {
    Changed,
    Deleted,
}

/// One entry of a change batch delivered to the receiving device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEvent {
    pub kind: DataEventKind,
    pub item: DataItem,
}

impl DataEvent {
    pub fn changed(item: DataItem) -> Self {
        Self {
            kind: DataEventKind::Changed,
            item,
        }
    }

    pub fn deleted(item: DataItem) -> Self {
        Self {
            kind: DataEventKind::Deleted,
            item,
        }
    }
}

/// Frames exchanged over the WebSocket link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyncFrame {
    #[serde(rename = "data_changed")]
    DataChanged { events: Vec<DataEvent> },
}
