//! Normalized service record rendered as a result card.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::ServiceCategory;

/// Namespace for deterministic service identifiers.
const SERVICE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6c0e_4f1a_9b7d_4e52_8a3c_1d2e_5f60_7a81);

/// A nearby service. Built fresh from each discovery response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Derived from name + address, so the same place keeps its id across
    /// searches. Repeats within one response get an ordinal suffix.
    pub id: Uuid,
    pub name: String,
    pub category: ServiceCategory,
    pub address: String,
    pub distance_km: Option<f64>,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub open_now: Option<bool>,
    pub maps_url: Option<String>,
}

impl Service {
    pub fn derive_id(name: &str, address: &str) -> Uuid {
        let key = format!("{}\u{1f}{}", name.trim(), address.trim());
        Uuid::new_v5(&SERVICE_ID_NAMESPACE, key.as_bytes())
    }

    /// Id for the `ordinal`-th repeat of the same name and address within
    /// one response. The first occurrence keeps the plain derived id.
    pub fn derive_repeat_id(base: Uuid, ordinal: usize) -> Uuid {
        Uuid::new_v5(&base, ordinal.to_string().as_bytes())
    }
}
