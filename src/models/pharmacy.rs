use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pharmacy {
    pub id: String,
    pub name: String,
    pub address: String,
    pub distance: String,
    pub rating: f32,
    pub open_until: String,
    pub phone: String,
    pub has_delivery: bool,
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub medicine_type: String,
    pub price: String,
    pub in_stock: bool,
    pub description: String,
}
