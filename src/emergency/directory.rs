//! Static reference data shown on the SOS screen.

use crate::models::{ContactCategory, EmergencyContact};

pub fn contacts() -> Vec<EmergencyContact> {
    [
        ("1", "Emergency Services", "112", ContactCategory::Primary),
        ("2", "Ridge Hospital", "+233 30 2684000", ContactCategory::Hospital),
        ("3", "Dr. Kwame Mensah", "+233 20 123 4567", ContactCategory::Doctor),
        ("4", "Emergency Contact", "+233 24 987 6543", ContactCategory::Family),
    ]
    .into_iter()
    .map(|(id, name, number, category)| EmergencyContact {
        id: id.into(),
        name: name.into(),
        phone_number: number.into(),
        category,
    })
    .collect()
}

pub fn find_contact(id: &str) -> Option<EmergencyContact> {
    contacts().into_iter().find(|c| c.id == id)
}

/// Symptoms that warrant calling immediately.
pub const DANGER_SIGNS: &[&str] = &[
    "Severe bleeding",
    "Severe headache with blurred vision",
    "High fever (over 38°C)",
    "Persistent vomiting",
    "Severe abdominal pain",
    "Difficulty breathing",
    "Swelling of face/hands",
    "No fetal movement for 12+ hours",
];
