use crate::core::error::LedgerResult;
use crate::core::ledger::{LedgerStore, ProductSeed};
use crate::core::model::{ProductId, Quantity};
use crate::core::valuation::{DEFAULT_THRESHOLD, ValuationEngine};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProductConfig {
    pub name: String,
    pub unit_cost: Decimal,
    #[serde(default)]
    pub supply: Vec<Quantity>,
    #[serde(default)]
    pub demand: Vec<Quantity>,
}

fn default_threshold() -> Decimal {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
    /// Number of weeks; defaults to the longest supply/demand list.
    #[serde(default)]
    pub periods: Option<usize>,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "stockledger", "stockledger")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn period_count(&self) -> usize {
        self.periods.unwrap_or_else(|| {
            self.products
                .iter()
                .map(|p| p.supply.len().max(p.demand.len()))
                .max()
                .unwrap_or(0)
        })
    }

    /// Builds the ledger and valuation engine described by this config.
    pub fn build(&self) -> Result<(LedgerStore, ValuationEngine)> {
        let seeds = self
            .products
            .iter()
            .map(|p| -> LedgerResult<ProductSeed> {
                Ok(ProductSeed {
                    id: ProductId::new(p.name.clone())?,
                    unit_cost: p.unit_cost,
                    supply: p.supply.clone(),
                    demand: p.demand.clone(),
                })
            })
            .collect::<LedgerResult<Vec<_>>>()
            .context("Invalid product in config")?;

        let store = LedgerStore::from_seed(self.period_count(), seeds)
            .context("Failed to seed ledger from config")?;
        let valuation =
            ValuationEngine::new(self.threshold).context("Invalid threshold in config")?;
        Ok((store, valuation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Period;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
threshold: 150
products:
  - name: "Lobster"
    unit_cost: 5
    supply: [25, 5, 7]
    demand: [10, 8, 8]
  - name: "Salmon"
    unit_cost: 2.5
    supply: [30, 50]
    demand: [10, 45]
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.threshold, Decimal::from(150));
        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].name, "Lobster");
        assert_eq!(config.products[0].unit_cost, Decimal::from(5));
        assert_eq!(config.products[1].unit_cost, Decimal::new(25, 1));
        assert_eq!(config.products[1].supply, vec![30, 50]);
        assert_eq!(config.period_count(), 3);

        let (store, valuation) = config.build().unwrap();
        assert_eq!(store.period_count(), 3);
        assert_eq!(valuation.threshold(), Decimal::from(150));
        let salmon = ProductId::new("Salmon").unwrap();
        assert_eq!(store.inventory(&salmon, Period(1)).unwrap(), 25);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("products: []").unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.period_count(), 0);

        let config: AppConfig = serde_yaml::from_str("periods: 4").unwrap();
        assert_eq!(config.period_count(), 4);
        let (store, _) = config.build().unwrap();
        assert!(store.list_products().is_empty());
    }

    #[test]
    fn test_config_rejects_bad_seed() {
        let yaml_str = r#"
periods: 1
products:
  - name: "Lobster"
    unit_cost: 5
    supply: [1, 2]
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert!(config.build().is_err());

        let config: AppConfig = serde_yaml::from_str("threshold: -5").unwrap();
        let err = config.build().unwrap_err();
        assert!(err.to_string().contains("Invalid threshold"));
    }
}
