//! Shipping contact and address.

use serde::{Deserialize, Serialize};

/// Where and to whom an order ships.
///
/// `email` is the only field guaranteed non-empty; the rest default to empty
/// strings when the storefront leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub zip_code: String,
    /// Country.
    pub country: String,
}

impl ShippingInfo {
    /// `"First Last"`, trimmed when either part is missing.
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Case-insensitive substring match over email and name fields.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        [&self.email, &self.first_name, &self.last_name]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}
