// src/notifications/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct NotificationTypesQuery {
    /// Optional read-state filter: "true" counts only read notifications,
    /// "false" only unread; absent counts everything.
    pub read: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct NotificationTypeCounts {
    pub type_counts: BTreeMap<String, i64>,
    pub total: i64,
}
