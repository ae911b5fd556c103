//! Static price catalog
//!
//! The engine consumes per-model token prices read-only. The catalog ships
//! with an embedded TOML price table and can be replaced wholesale by a
//! user-supplied file; it is never mutated after loading.

use crate::error::PlannerError;
use crate::workload::CacheTtl;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Embedded default price table
const BUILTIN_PRICE_TABLE: &str = include_str!("../data/model_prices.toml");

/// Capability flags for a model's pricing features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub supports_caching: bool,
    #[serde(default)]
    pub supports_1h_cache: bool,
    #[serde(default)]
    pub supports_batch: bool,
}

/// Model pricing information
///
/// All prices are currency units per 1,000 tokens. Optional prices are
/// features the provider does not offer for this model; the formulas treat
/// them as zero-cost contributions rather than errors.
#[derive(Debug, Clone, Serialize)]
pub struct ModelPrice {
    pub model_name: String,
    pub provider: String,
    pub input_price: f64,
    pub output_price: f64,
    pub cache_write_price_5m: Option<f64>,
    pub cache_write_price_1h: Option<f64>,
    pub cache_read_price: Option<f64>,
    pub batch_input_price: Option<f64>,
    pub batch_output_price: Option<f64>,
    pub currency: String,
    pub effective_date: String,
    pub capabilities: Capabilities,
}

impl ModelPrice {
    /// Cache write price for the requested TTL
    ///
    /// Falls back to the 5-minute price when the 1-hour tier is requested but
    /// unsupported, and to zero when the model does not support caching at all.
    pub fn cache_write_price(&self, ttl: CacheTtl) -> f64 {
        if !self.capabilities.supports_caching {
            return 0.0;
        }
        match ttl {
            CacheTtl::FiveMinutes => self.cache_write_price_5m.unwrap_or(0.0),
            CacheTtl::OneHour => {
                if self.capabilities.supports_1h_cache {
                    self.cache_write_price_1h
                        .or(self.cache_write_price_5m)
                        .unwrap_or(0.0)
                } else {
                    self.cache_write_price_5m.unwrap_or(0.0)
                }
            }
        }
    }

    /// Cache read price, zero when caching is unsupported
    pub fn effective_cache_read_price(&self) -> f64 {
        if !self.capabilities.supports_caching {
            return 0.0;
        }
        self.cache_read_price.unwrap_or(0.0)
    }

    /// Batch input price, falling back to the standard input price
    pub fn effective_batch_input_price(&self) -> f64 {
        self.batch_input_price.unwrap_or(self.input_price)
    }

    /// Batch output price, falling back to the standard output price
    pub fn effective_batch_output_price(&self) -> f64 {
        self.batch_output_price.unwrap_or(self.output_price)
    }

    /// Identity of this catalog entry for memoization purposes
    pub fn identity(&self) -> (String, String) {
        (self.model_name.clone(), self.effective_date.clone())
    }
}

/// Per-model entry as it appears in a price table file
#[derive(Debug, Deserialize)]
struct ModelPriceData {
    provider: String,
    input_price: f64,
    output_price: f64,
    #[serde(default)]
    cache_write_price_5m: Option<f64>,
    #[serde(default)]
    cache_write_price_1h: Option<f64>,
    #[serde(default)]
    cache_read_price: Option<f64>,
    #[serde(default)]
    batch_input_price: Option<f64>,
    #[serde(default)]
    batch_output_price: Option<f64>,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    effective_date: Option<String>,
    #[serde(default)]
    capabilities: Capabilities,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Price table file structure
#[derive(Debug, Deserialize)]
struct PriceTableFile {
    models: BTreeMap<String, ModelPriceData>,
}

/// Read-only catalog of model prices
#[derive(Debug, Clone)]
pub struct Catalog {
    models: BTreeMap<String, ModelPrice>,
}

impl Catalog {
    /// Load the embedded default price table
    pub fn builtin() -> Result<Self, PlannerError> {
        Self::from_toml_str(BUILTIN_PRICE_TABLE)
    }

    /// Load a price table from a TOML file
    pub fn load(path: &Path) -> Result<Self, PlannerError> {
        info!("Loading price table from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a price table from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, PlannerError> {
        let file: PriceTableFile = toml::from_str(content)?;

        let fallback_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let mut models = BTreeMap::new();

        for (model_name, data) in file.models {
            let price = ModelPrice {
                model_name: model_name.clone(),
                provider: data.provider,
                input_price: data.input_price,
                output_price: data.output_price,
                cache_write_price_5m: data.cache_write_price_5m,
                cache_write_price_1h: data.cache_write_price_1h,
                cache_read_price: data.cache_read_price,
                batch_input_price: data.batch_input_price,
                batch_output_price: data.batch_output_price,
                currency: data.currency,
                effective_date: data.effective_date.unwrap_or_else(|| fallback_date.clone()),
                capabilities: data.capabilities,
            };
            models.insert(model_name, price);
        }

        debug!("Parsed {} model prices", models.len());
        Ok(Self { models })
    }

    /// Get pricing for a specific model
    pub fn get(&self, model: &str) -> Option<&ModelPrice> {
        self.models.get(model)
    }

    /// Get pricing for a specific model, erroring when absent
    pub fn require(&self, model: &str) -> Result<&ModelPrice, PlannerError> {
        self.models
            .get(model)
            .ok_or_else(|| PlannerError::ModelNotFound(model.to_string()))
    }

    /// Iterate all models, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = &ModelPrice> {
        self.models.values()
    }

    /// Number of models in the catalog
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
