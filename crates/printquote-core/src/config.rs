use crate::analysis::EstimateConfig;
use crate::pricing::CartPricing;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub max_upload_bytes: u64,
    pub cart: CartPricing,
    pub estimate: EstimateConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cart: CartPricing::default(),
            estimate: EstimateConfig::default(),
        }
    }
}
