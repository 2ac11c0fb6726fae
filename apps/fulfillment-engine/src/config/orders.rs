//! Order handling configuration.

use serde::{Deserialize, Serialize};

use crate::domain::order_fulfillment::{
    AssemblyPolicy, PaymentStatus, TotalsPolicy, TransitionPolicyKind,
};

/// Order assembly, lifecycle and listing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Default page size for the admin listing.
    #[serde(default = "default_admin_page_limit")]
    pub admin_page_limit: u32,
    /// Default page size for a user's own listing.
    #[serde(default = "default_user_page_limit")]
    pub user_page_limit: u32,
    /// Upper bound on any requested page size.
    #[serde(default = "default_max_page_limit")]
    pub max_page_limit: u32,
    /// How client-supplied totals are checked.
    #[serde(default)]
    pub totals_policy: TotalsPolicy,
    /// Which status transitions staff may apply.
    #[serde(default)]
    pub transition_policy: TransitionPolicyKind,
    /// Country used when shipping info omits one.
    #[serde(default = "default_country")]
    pub default_country: String,
    /// Payment status used when the client omits one.
    #[serde(default)]
    pub default_payment_status: PaymentStatus,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            admin_page_limit: default_admin_page_limit(),
            user_page_limit: default_user_page_limit(),
            max_page_limit: default_max_page_limit(),
            totals_policy: TotalsPolicy::default(),
            transition_policy: TransitionPolicyKind::default(),
            default_country: default_country(),
            default_payment_status: PaymentStatus::default(),
        }
    }
}

impl OrdersConfig {
    /// Assembly policy derived from these settings.
    #[must_use]
    pub fn assembly_policy(&self) -> AssemblyPolicy {
        AssemblyPolicy {
            totals_policy: self.totals_policy,
            default_country: self.default_country.clone(),
            default_payment_status: self.default_payment_status,
        }
    }
}

const fn default_admin_page_limit() -> u32 {
    50
}

const fn default_user_page_limit() -> u32 {
    10
}

const fn default_max_page_limit() -> u32 {
    200
}

fn default_country() -> String {
    "United States".to_string()
}
