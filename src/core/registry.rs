//! Product identities and their unit costs.
use crate::core::error::{LedgerError, LedgerResult};
use crate::core::model::{ProductId, ensure_non_negative};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Ordered set of products with a unit cost each.
///
/// Products keep their registration order, which is the order they are
/// listed and rendered in.
#[derive(Debug, Clone, Default)]
pub struct ProductRegistry {
    order: Vec<ProductId>,
    costs: HashMap<ProductId, Decimal>,
}

impl ProductRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.costs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn list_products(&self) -> Vec<ProductId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, Decimal)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.costs.get(id).map(|cost| (id, *cost)))
    }

    pub fn unit_cost(&self, id: &ProductId) -> LedgerResult<Decimal> {
        self.costs
            .get(id)
            .copied()
            .ok_or_else(|| unknown_product(id))
    }

    /// Validates a registration without applying it.
    pub fn check_register(&self, id: &ProductId, cost: Decimal) -> LedgerResult<()> {
        if self.contains(id) {
            return Err(LedgerError::duplicate(format!(
                "product '{id}' already exists"
            )));
        }
        ensure_non_negative(cost)?;
        Ok(())
    }

    pub fn register(&mut self, id: ProductId, cost: Decimal) -> LedgerResult<()> {
        self.check_register(&id, cost)?;
        self.order.push(id.clone());
        self.costs.insert(id, cost);
        Ok(())
    }

    /// Removes a product, returning its last unit cost.
    pub fn unregister(&mut self, id: &ProductId) -> LedgerResult<Decimal> {
        let cost = self.costs.remove(id).ok_or_else(|| unknown_product(id))?;
        self.order.retain(|p| p != id);
        Ok(cost)
    }

    pub fn set_unit_cost(&mut self, id: &ProductId, cost: Decimal) -> LedgerResult<()> {
        let cost = ensure_non_negative(cost)?;
        let slot = self.costs.get_mut(id).ok_or_else(|| unknown_product(id))?;
        *slot = cost;
        Ok(())
    }
}

pub(crate) fn unknown_product(id: &ProductId) -> LedgerError {
    LedgerError::not_found(format!("product '{id}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[test]
    fn test_register_keeps_insertion_order() {
        let mut registry = ProductRegistry::new();
        registry.register(id("Shrimp"), Decimal::from(3)).unwrap();
        registry.register(id("Lobster"), Decimal::from(5)).unwrap();

        assert_eq!(registry.list_products(), vec![id("Shrimp"), id("Lobster")]);
        assert_eq!(registry.unit_cost(&id("Lobster")).unwrap(), Decimal::from(5));
    }

    #[test]
    fn test_register_rejects_duplicates_and_negative_costs() {
        let mut registry = ProductRegistry::new();
        registry.register(id("Lobster"), Decimal::from(5)).unwrap();

        assert!(matches!(
            registry.register(id("Lobster"), Decimal::ONE),
            Err(LedgerError::Duplicate(_))
        ));
        assert!(matches!(
            registry.register(id("Crab"), Decimal::NEGATIVE_ONE),
            Err(LedgerError::Validation(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_and_cost_updates() {
        let mut registry = ProductRegistry::new();
        registry.register(id("Lobster"), Decimal::from(5)).unwrap();
        registry.set_unit_cost(&id("Lobster"), Decimal::new(75, 1)).unwrap();
        assert_eq!(
            registry.unit_cost(&id("Lobster")).unwrap(),
            Decimal::new(75, 1)
        );

        assert_eq!(
            registry.unregister(&id("Lobster")).unwrap(),
            Decimal::new(75, 1)
        );
        assert!(registry.is_empty());
        assert!(matches!(
            registry.unregister(&id("Lobster")),
            Err(LedgerError::NotFound(_))
        ));
        assert!(matches!(
            registry.set_unit_cost(&id("Lobster"), Decimal::ONE),
            Err(LedgerError::NotFound(_))
        ));
    }
}
