//! Relational record shapes and their mapping to domain aggregates.
//!
//! Records mirror table rows one-to-one and are shared by every backend, so
//! the in-memory store and SQLite agree on what "persisted" means. Money
//! columns hold integer cents.

use domain::{Address, Customer, Entity, Money, Order, OrderItem, Product};
use serde::{Deserialize, Serialize};

use crate::{RepositoryError, Result};

/// Row of the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub customer_id: String,
    pub total: i64,
}

/// Row of the `order_items` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
}

/// Row of the `customers` table. Address columns are all set or all null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<i64>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: i64,
}

/// Row of the `products` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: i64,
}

impl OrderRecord {
    /// Splits an order into its parent row and ordered child rows.
    pub fn from_order(order: &Order) -> (Self, Vec<OrderItemRecord>) {
        let record = Self {
            id: order.id().to_string(),
            customer_id: order.customer_id().to_string(),
            total: order.total().cents(),
        };
        let items = order
            .items()
            .iter()
            .map(|item| OrderItemRecord::from_item(order, item))
            .collect();
        (record, items)
    }

    /// Rebuilds the aggregate from its parent row and child rows.
    ///
    /// The stored total is informational; the aggregate recomputes it.
    pub fn into_order(self, items: Vec<OrderItemRecord>) -> Result<Order> {
        let items = items
            .into_iter()
            .map(OrderItemRecord::into_item)
            .collect::<Result<Vec<_>>>()?;
        let order = Order::new(self.id, self.customer_id, items)?;

        if order.total().cents() != self.total {
            tracing::warn!(
                order_id = %order.id(),
                stored = self.total,
                computed = order.total().cents(),
                "stored order total differs from item sum"
            );
        }

        Ok(order)
    }
}

impl OrderItemRecord {
    fn from_item(order: &Order, item: &OrderItem) -> Self {
        Self {
            id: item.id().to_string(),
            order_id: order.id().to_string(),
            product_id: item.product_id().to_string(),
            name: item.name().to_string(),
            price: item.price().cents(),
            quantity: i64::from(item.quantity()),
        }
    }

    fn into_item(self) -> Result<OrderItem> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::InvalidRecord(format!(
                "order item {} has quantity {} out of range",
                self.id, self.quantity
            ))
        })?;
        Ok(OrderItem::new(
            self.id,
            self.name,
            Money::from_cents(self.price),
            self.product_id,
            quantity,
        )?)
    }
}

impl CustomerRecord {
    pub fn from_customer(customer: &Customer) -> Result<Self> {
        let reward_points = i64::try_from(customer.reward_points()).map_err(|_| {
            RepositoryError::InvalidRecord(format!(
                "customer {} reward points exceed storage range",
                customer.id()
            ))
        })?;
        let address = customer.address();

        Ok(Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            street: address.map(|a| a.street().to_string()),
            number: address.map(|a| i64::from(a.number())),
            zipcode: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: customer.is_active(),
            reward_points,
        })
    }

    pub fn into_customer(self) -> Result<Customer> {
        let address = self.address()?;
        let reward_points = u64::try_from(self.reward_points).map_err(|_| {
            RepositoryError::InvalidRecord(format!(
                "customer {} has negative reward points",
                self.id
            ))
        })?;

        let mut customer = Customer::new(self.id, self.name)?;
        if let Some(address) = address {
            customer.change_address(address);
        }
        if self.active {
            customer.activate()?;
        }
        customer.add_reward_points(reward_points);
        Ok(customer)
    }

    fn address(&self) -> Result<Option<Address>> {
        match (&self.street, self.number, &self.zipcode, &self.city) {
            (None, None, None, None) => Ok(None),
            (Some(street), Some(number), Some(zip), Some(city)) => {
                let number = u32::try_from(number).map_err(|_| {
                    RepositoryError::InvalidRecord(format!(
                        "customer {} has street number {number} out of range",
                        self.id
                    ))
                })?;
                Ok(Some(Address::new(street.as_str(), number, zip.as_str(), city.as_str())?))
            }
            _ => Err(RepositoryError::InvalidRecord(format!(
                "customer {} has a partial address",
                self.id
            ))),
        }
    }
}

impl ProductRecord {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price().cents(),
        }
    }

    pub fn into_product(self) -> Result<Product> {
        Ok(Product::new(
            self.id,
            self.name,
            Money::from_cents(self.price),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            "123",
            "23",
            vec![
                OrderItem::new("1", "Product 1", Money::from_units(10), "123", 2).unwrap(),
                OrderItem::new("2", "Product 2", Money::from_cents(550), "456", 1).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn order_maps_to_parent_and_children() {
        let (record, items) = OrderRecord::from_order(&order());

        assert_eq!(
            record,
            OrderRecord {
                id: "123".into(),
                customer_id: "23".into(),
                total: 2550,
            }
        );
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            OrderItemRecord {
                id: "1".into(),
                order_id: "123".into(),
                product_id: "123".into(),
                name: "Product 1".into(),
                price: 1000,
                quantity: 2,
            }
        );
        assert_eq!(items[1].order_id, "123");
    }

    #[test]
    fn order_records_rebuild_equal_aggregate() {
        let original = order();
        let (record, items) = OrderRecord::from_order(&original);
        assert_eq!(record.into_order(items).unwrap(), original);
    }

    #[test]
    fn order_without_item_rows_is_invalid() {
        let (record, _) = OrderRecord::from_order(&order());
        assert!(matches!(
            record.into_order(vec![]),
            Err(RepositoryError::Validation(domain::ValidationError::ItemsRequired))
        ));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let (record, mut items) = OrderRecord::from_order(&order());
        items[0].quantity = -1;
        assert!(matches!(
            record.into_order(items),
            Err(RepositoryError::InvalidRecord(_))
        ));
    }

    #[test]
    fn customer_without_address_has_null_columns() {
        let customer = Customer::new("1", "Customer 1").unwrap();
        let record = CustomerRecord::from_customer(&customer).unwrap();
        assert_eq!(record.street, None);
        assert_eq!(record.number, None);
        assert!(!record.active);
        assert_eq!(record.into_customer().unwrap(), customer);
    }

    #[test]
    fn active_customer_with_points_rebuilds() {
        let mut customer = Customer::new("1", "Customer 1").unwrap();
        customer.change_address(Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap());
        customer.activate().unwrap();
        customer.add_reward_points(42);

        let record = CustomerRecord::from_customer(&customer).unwrap();
        assert_eq!(record.street.as_deref(), Some("Street 1"));
        assert_eq!(record.reward_points, 42);
        assert_eq!(record.into_customer().unwrap(), customer);
    }

    #[test]
    fn partial_address_is_rejected() {
        let record = CustomerRecord {
            id: "1".into(),
            name: "Customer 1".into(),
            street: Some("Street 1".into()),
            number: None,
            zipcode: None,
            city: None,
            active: false,
            reward_points: 0,
        };
        assert!(matches!(
            record.into_customer(),
            Err(RepositoryError::InvalidRecord(_))
        ));
    }

    #[test]
    fn active_without_address_is_rejected() {
        let record = CustomerRecord {
            id: "1".into(),
            name: "Customer 1".into(),
            street: None,
            number: None,
            zipcode: None,
            city: None,
            active: true,
            reward_points: 0,
        };
        assert!(matches!(
            record.into_customer(),
            Err(RepositoryError::Precondition(_))
        ));
    }

    #[test]
    fn product_round_trips_through_record() {
        let product = Product::new("123", "Product 1", Money::from_units(10)).unwrap();
        let record = ProductRecord::from_product(&product);
        assert_eq!(record.price, 1000);
        assert_eq!(record.into_product().unwrap(), product);
    }
}
