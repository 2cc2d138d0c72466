use serde::{Deserialize, Serialize};

use super::enums::ContactCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub category: ContactCategory,
}

/// The armed SOS countdown. Exists only while a countdown is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencySession {
    pub active: bool,
    pub seconds_remaining: u32,
    pub location: String,
}
