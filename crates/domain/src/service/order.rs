//! Order placement and order totals.

use common::OrderId;

use crate::customer::Customer;
use crate::entity::Entity;
use crate::error::ValidationError;
use crate::order::{Order, OrderItem};
use crate::value_objects::Money;

/// Percentage of an order's total credited to the customer as reward points.
pub const REWARD_POINTS_PERCENTAGE: i64 = 10;

/// Service for placing orders and aggregating their totals.
pub struct OrderService;

impl OrderService {
    /// Places a new order for `customer` and credits reward points.
    ///
    /// The customer receives [`REWARD_POINTS_PERCENTAGE`] percent of the
    /// order total, in whole currency units (truncated). The order gets a
    /// freshly generated id. If the items are invalid the customer is not
    /// touched.
    #[tracing::instrument(skip(customer, items), fields(customer_id = %customer.id(), item_count = items.len()))]
    pub fn place_order(
        customer: &mut Customer,
        items: Vec<OrderItem>,
    ) -> Result<Order, ValidationError> {
        let order = Order::new(OrderId::generate(), customer.id().clone(), items)?;
        let total = order.total();

        let points = reward_points_for(total);
        customer.add_reward_points(points);

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.id(), %total, points, "order placed");

        Ok(order)
    }

    /// Sums the totals of all given orders. Returns zero for no orders.
    pub fn total<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Money {
        orders.into_iter().map(Order::total).sum()
    }
}

fn reward_points_for(total: Money) -> u64 {
    let units = total.percentage(REWARD_POINTS_PERCENTAGE).units();
    u64::try_from(units).unwrap_or(0)
}
