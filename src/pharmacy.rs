//! Pharmacy locator: nearby pharmacies, medicine search, cart.

use serde::{Deserialize, Serialize};

use crate::models::{Medicine, Pharmacy};

/// Items already in the cart when the screen first opens.
pub const INITIAL_CART_COUNT: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum PharmacyError {
    #[error("Medicine not found: {0}")]
    MedicineNotFound(String),
    #[error("{0} is out of stock")]
    OutOfStock(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PharmacyTab {
    #[default]
    Nearby,
    Search,
}

pub fn nearby_pharmacies() -> Vec<Pharmacy> {
    [
        ("1", "HealthPlus Pharmacy", "Osu, Oxford Street, Accra", "0.8 km", 4.8_f32, "10:00 PM",
         "+233 20 123 4567", true, "25 mins"),
        ("2", "MedCare Pharmacy", "East Legon, Accra", "1.2 km", 4.6, "9:00 PM",
         "+233 24 987 6543", true, "35 mins"),
        ("3", "Wellness Pharmacy", "Tema, Community 1", "2.1 km", 4.5, "8:00 PM",
         "+233 26 555 7890", false, "N/A"),
    ]
    .into_iter()
    .map(
        |(id, name, address, distance, rating, open_until, phone, has_delivery, eta)| Pharmacy {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            distance: distance.into(),
            rating,
            open_until: open_until.into(),
            phone: phone.into(),
            has_delivery,
            estimated_time: eta.into(),
        },
    )
    .collect()
}

pub fn common_medicines() -> Vec<Medicine> {
    [
        ("1", "Prenatal Vitamins", "GH₵ 45.00", true, "Essential vitamins for pregnancy"),
        ("2", "Folic Acid", "GH₵ 18.50", true, "Prevents neural tube defects"),
        ("3", "Iron Tablets", "GH₵ 22.00", false, "Prevents anemia during pregnancy"),
        ("4", "Calcium Supplement", "GH₵ 35.00", true, "Supports bone health"),
    ]
    .into_iter()
    .map(|(id, name, price, in_stock, description)| Medicine {
        id: id.into(),
        name: name.into(),
        medicine_type: "Supplement".into(),
        price: price.into(),
        in_stock,
        description: description.into(),
    })
    .collect()
}

/// Case-insensitive substring search over name, type and description.
/// A blank query returns everything.
pub fn search_medicines(query: &str) -> Vec<Medicine> {
    let needle = query.trim().to_lowercase();
    common_medicines()
        .into_iter()
        .filter(|m| {
            needle.is_empty()
                || m.name.to_lowercase().contains(&needle)
                || m.medicine_type.to_lowercase().contains(&needle)
                || m.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Content of the selected tab.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum PharmacyScreen {
    Nearby { pharmacies: Vec<Pharmacy> },
    Search { query: String, medicines: Vec<Medicine> },
}

pub fn screen(tab: PharmacyTab, query: &str) -> PharmacyScreen {
    match tab {
        PharmacyTab::Nearby => PharmacyScreen::Nearby {
            pharmacies: nearby_pharmacies(),
        },
        PharmacyTab::Search => PharmacyScreen::Search {
            query: query.trim().to_string(),
            medicines: search_medicines(query),
        },
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub count: u32,
}

impl Cart {
    pub fn new() -> Self {
        Self {
            count: INITIAL_CART_COUNT,
        }
    }

    /// Add one unit of a medicine. Only in-stock medicines can be added.
    pub fn add(&mut self, medicine_id: &str) -> Result<u32, PharmacyError> {
        let medicine = common_medicines()
            .into_iter()
            .find(|m| m.id == medicine_id)
            .ok_or_else(|| PharmacyError::MedicineNotFound(medicine_id.to_string()))?;
        if !medicine.in_stock {
            return Err(PharmacyError::OutOfStock(medicine.name));
        }
        self.count += 1;
        tracing::debug!(medicine = %medicine.name, count = self.count, "Added to cart");
        Ok(self.count)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
