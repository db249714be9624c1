use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

/// Point-in-time snapshot of a product as returned by the catalog.
///
/// `price` is in the store currency's major unit (e.g. `10.00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    id: ProductId,
    name: String,
    price: Decimal,
    available_quantity: u32,
}

impl CatalogProduct {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        available_quantity: u32,
    ) -> DomainResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if price.is_sign_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(Self {
            id,
            name,
            price,
            available_quantity,
        })
    }

    /// Rebuild a snapshot read back from storage, without the checks in
    /// [`CatalogProduct::new`].
    pub fn from_parts(id: ProductId, name: String, price: Decimal, available_quantity: u32) -> Self {
        Self {
            id,
            name,
            price,
            available_quantity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn available_quantity(&self) -> u32 {
        self.available_quantity
    }

    /// Whether `quantity` units can be taken from the observed stock.
    pub fn can_fulfil(&self, quantity: u32) -> bool {
        quantity <= self.available_quantity
    }

    /// Snapshot with `quantity` units removed (saturating at zero).
    pub fn decremented(&self, quantity: u32) -> Self {
        Self {
            available_quantity: self.available_quantity.saturating_sub(quantity),
            ..self.clone()
        }
    }
}

impl Entity for CatalogProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Instruction to remove `quantity` units of `product_id` from stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDecrement {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = CatalogProduct::new(pid("P1"), "Widget", Decimal::new(-1, 0), 3).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("price") => {}
            other => panic!("Expected Validation error for price, got {other:?}"),
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = CatalogProduct::new(pid("P1"), "", Decimal::new(10, 0), 3).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn zero_price_is_allowed() {
        let p = CatalogProduct::new(pid("P1"), "Freebie", Decimal::ZERO, 3).unwrap();
        assert_eq!(p.price(), Decimal::ZERO);
    }

    #[test]
    fn stored_snapshot_skips_name_check() {
        let p = CatalogProduct::from_parts(pid("P1"), String::new(), Decimal::new(250, 2), 4);
        assert_eq!(p.name(), "");
        assert_eq!(p.price(), Decimal::new(250, 2));
        assert!(p.can_fulfil(4));
    }

    #[test]
    fn can_fulfil_is_inclusive_of_available_quantity() {
        let p = CatalogProduct::new(pid("P1"), "Widget", Decimal::new(1000, 2), 5).unwrap();
        assert!(p.can_fulfil(5));
        assert!(!p.can_fulfil(6));
    }

    #[test]
    fn decremented_saturates_at_zero() {
        let p = CatalogProduct::new(pid("P1"), "Widget", Decimal::new(1000, 2), 2).unwrap();
        assert_eq!(p.decremented(1).available_quantity(), 1);
        assert_eq!(p.decremented(7).available_quantity(), 0);
        assert_eq!(p.decremented(1).price(), p.price());
    }

    #[test]
    fn price_round_trips_through_json_exactly() {
        let p = CatalogProduct::new(pid("P1"), "Widget", Decimal::new(1999, 2), 2).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: CatalogProduct = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price(), Decimal::new(1999, 2));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: a quantity is fulfillable exactly when decrementing by it loses nothing.
            #[test]
            fn can_fulfil_matches_decrement_arithmetic(available in 0u32..10_000, requested in 0u32..10_000) {
                let p = CatalogProduct::new(pid("P1"), "Widget", Decimal::ONE, available).unwrap();
                let left = p.decremented(requested).available_quantity();
                prop_assert_eq!(p.can_fulfil(requested), left + requested == available);
            }
        }
    }
}
