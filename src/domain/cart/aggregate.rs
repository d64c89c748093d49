use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::commands::CartCommand;
use super::errors::CartError;
use super::events::*;
use super::value_objects::{checked_line_total, distinct_suppliers, CartItem, CartProduct, CartVariant, OrderedLine};
use crate::domain::ids::{BusinessId, VariantId};
use crate::state::Aggregate;

// ============================================================================
// Cart Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartAggregate {
    items: Vec<CartItem>,
}

impl CartAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Units across all lines
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn find(&self, variant_id: &VariantId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.variant_id == variant_id)
    }

    pub fn total_price(&self) -> Decimal {
        // Adds and quantity changes that would overflow are rejected
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.checked_line_total()?))
            .unwrap_or(Decimal::MAX)
    }

    /// Distinct supplier businesses, in order of first appearance
    pub fn supplier_ids(&self) -> Vec<BusinessId> {
        distinct_suppliers(&self.items)
    }

    /// Every line as a variant and quantity, for removal once ordered
    pub fn ordered_lines(&self) -> Vec<OrderedLine> {
        self.items.iter().map(CartItem::ordered).collect()
    }

    /// The supplier every line shares, if there is exactly one
    pub fn single_supplier(&self) -> Option<&BusinessId> {
        let first = &self.items.first()?.supplier_business_id;
        self.items
            .iter()
            .all(|item| &item.supplier_business_id == first)
            .then_some(first)
    }

    pub fn add_item(
        &mut self,
        product: CartProduct,
        variant: CartVariant,
        quantity: u32,
    ) -> Result<Vec<CartEvent>, CartError> {
        self.execute(&CartCommand::AddItem {
            product,
            variant,
            quantity,
        })
    }

    pub fn update_quantity(
        &mut self,
        variant_id: &VariantId,
        delta: i64,
    ) -> Result<Vec<CartEvent>, CartError> {
        self.execute(&CartCommand::UpdateQuantity {
            variant_id: variant_id.clone(),
            delta,
        })
    }

    pub fn remove_item(&mut self, variant_id: &VariantId) -> Vec<CartEvent> {
        let command = CartCommand::RemoveItem {
            variant_id: variant_id.clone(),
        };
        // Removal never fails validation
        self.execute(&command).unwrap_or_default()
    }

    pub fn remove_ordered(&mut self, lines: Vec<OrderedLine>) -> Vec<CartEvent> {
        self.execute(&CartCommand::RemoveOrdered { lines })
            .unwrap_or_default()
    }

    pub fn clear(&mut self) -> Vec<CartEvent> {
        self.execute(&CartCommand::Clear).unwrap_or_default()
    }

    /// Cart total with the line for `variant_id` priced at `price` x `quantity`
    fn total_with_line(&self, variant_id: &VariantId, price: Decimal, quantity: u32) -> Result<Decimal, CartError> {
        let line = checked_line_total(price, quantity).ok_or(CartError::TotalOverflow)?;
        self.items
            .iter()
            .filter(|item| &item.variant_id != variant_id)
            .try_fold(line, |total, item| total.checked_add(item.checked_line_total()?))
            .ok_or(CartError::TotalOverflow)
    }

    fn quantity_after(old: u32, delta: i64) -> Option<u32> {
        let new = i64::from(old).saturating_add(delta);
        if new <= 0 {
            None
        } else {
            Some(u32::try_from(new).unwrap_or(u32::MAX).max(1))
        }
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for CartAggregate {
    type Event = CartEvent;
    type Command = CartCommand;
    type Error = CartError;

    fn apply_event(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
            }
            CartEvent::QuantityChanged(e) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.variant_id == e.variant_id) {
                    item.quantity = e.new_quantity;
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.items.retain(|item| item.variant_id != e.variant_id);
            }
            CartEvent::Cleared(_) => {
                self.items.clear();
            }
        }
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem {
                product,
                variant,
                quantity,
            } => {
                if *quantity == 0 {
                    return Err(CartError::InvalidQuantity(*quantity));
                }
                if variant.price.is_sign_negative() && !variant.price.is_zero() {
                    return Err(CartError::NegativePrice(variant.price));
                }

                if let Some(existing) = self.find(&variant.id) {
                    let new_quantity = existing.quantity.saturating_add(*quantity);
                    self.total_with_line(&variant.id, existing.price, new_quantity)?;

                    return Ok(vec![CartEvent::QuantityChanged(CartQuantityChanged {
                        variant_id: variant.id.clone(),
                        old_quantity: existing.quantity,
                        new_quantity,
                    })]);
                }
                self.total_with_line(&variant.id, variant.price, *quantity)?;

                Ok(vec![CartEvent::ItemAdded(CartItemAdded {
                    item: CartItem {
                        product_id: product.product_id.clone(),
                        product_name: product.name.clone(),
                        variant_id: variant.id.clone(),
                        variant_name: variant.name.clone(),
                        business_id: product.business_id.clone(),
                        supplier_business_id: product.supplier_business_id.clone(),
                        supplier_name: product.supplier_name.clone(),
                        quantity: *quantity,
                        price: variant.price,
                        image_url: product.image_url.clone(),
                    },
                })])
            }

            CartCommand::UpdateQuantity { variant_id, delta } => {
                let existing = self
                    .find(variant_id)
                    .ok_or_else(|| CartError::ItemNotFound(variant_id.clone()))?;

                match Self::quantity_after(existing.quantity, *delta) {
                    None => Ok(vec![CartEvent::ItemRemoved(CartItemRemoved {
                        variant_id: variant_id.clone(),
                    })]),
                    Some(new_quantity) if new_quantity == existing.quantity => Ok(vec![]),
                    Some(new_quantity) => {
                        self.total_with_line(variant_id, existing.price, new_quantity)?;

                        Ok(vec![CartEvent::QuantityChanged(CartQuantityChanged {
                            variant_id: variant_id.clone(),
                            old_quantity: existing.quantity,
                            new_quantity,
                        })])
                    }
                }
            }

            CartCommand::RemoveItem { variant_id } => {
                if self.find(variant_id).is_none() {
                    return Ok(vec![]); // Nothing to remove
                }

                Ok(vec![CartEvent::ItemRemoved(CartItemRemoved {
                    variant_id: variant_id.clone(),
                })])
            }

            CartCommand::RemoveOrdered { lines } => Ok(lines
                .iter()
                .filter_map(|ordered| {
                    let current = self.find(&ordered.variant_id)?;
                    let remaining = current.quantity.saturating_sub(ordered.quantity);

                    Some(if remaining == 0 {
                        CartEvent::ItemRemoved(CartItemRemoved {
                            variant_id: ordered.variant_id.clone(),
                        })
                    } else {
                        CartEvent::QuantityChanged(CartQuantityChanged {
                            variant_id: ordered.variant_id.clone(),
                            old_quantity: current.quantity,
                            new_quantity: remaining,
                        })
                    })
                })
                .collect()),

            CartCommand::Clear => {
                if self.items.is_empty() {
                    return Ok(vec![]);
                }

                Ok(vec![CartEvent::Cleared(CartCleared {
                    line_count: self.items.len(),
                })])
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
