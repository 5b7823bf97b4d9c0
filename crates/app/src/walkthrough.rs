//! End-to-end sales scenario against the configured database.

use domain::{
    Address, Customer, CustomerId, Entity, Money, OrderId, OrderItem, OrderItemId, OrderService,
    Product, ProductId, ProductService,
};
use repository::Repository;
use serde::Serialize;

use crate::{Result, SalesContext};

/// Percentage applied to every product once the order is stored.
pub const PRICE_INCREASE_PERCENTAGE: i64 = 10;

/// What the walk-through produced, printed by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    pub order_customer_id: CustomerId,
    pub order_total: Money,
    pub reward_points: u64,
    pub orders_stored: usize,
    pub revenue: Money,
    pub product_prices: Vec<Money>,
}

/// Registers a customer and two products, places and persists an order,
/// hands the order to a second customer, then reprices the catalogue.
///
/// All ids are generated, so repeated runs against a file database do not
/// collide.
#[tracing::instrument(skip(ctx))]
pub async fn run(ctx: &SalesContext) -> Result<Summary> {
    let mut customer = Customer::new(CustomerId::generate(), "Customer 1")?;
    customer.change_address(Address::new("Street 1", 1, "Zipcode 1", "City 1")?);
    customer.activate()?;
    ctx.customers.create(&customer).await?;
    tracing::info!(customer_id = %customer.id(), "customer registered");

    let mut products = vec![
        Product::new(ProductId::generate(), "Product 1", Money::from_units(10))?,
        Product::new(ProductId::generate(), "Product 2", Money::from_units(20))?,
    ];
    for product in &products {
        ctx.products.create(product).await?;
    }

    let items = vec![
        OrderItem::from_product(OrderItemId::generate(), &products[0], 2)?,
        OrderItem::from_product(OrderItemId::generate(), &products[1], 1)?,
    ];
    let mut order = OrderService::place_order(&mut customer, items)?;
    ctx.orders.create(&order).await?;
    ctx.customers.update(&customer).await?;

    let mut other = Customer::new(CustomerId::generate(), "Customer 2")?;
    other.change_address(Address::new("Street 2", 2, "Zipcode 2", "City 2")?);
    ctx.customers.create(&other).await?;

    order.change_customer(other.id().clone())?;
    ctx.orders.update(&order).await?;
    tracing::info!(order_id = %order.id(), customer_id = %other.id(), "order reassigned");

    let stored = ctx.orders.find(order.id()).await?;
    let all = ctx.orders.find_all().await?;
    let revenue = OrderService::total(&all);

    ProductService::increase_price(&mut products, PRICE_INCREASE_PERCENTAGE)?;
    for product in &products {
        ctx.products.update(product).await?;
    }

    let reward_points = ctx.customers.find(customer.id()).await?.reward_points();

    Ok(Summary {
        customer_id: customer.id().clone(),
        order_id: stored.id().clone(),
        order_customer_id: stored.customer_id().clone(),
        order_total: stored.total(),
        reward_points,
        orders_stored: all.len(),
        revenue,
        product_prices: products.iter().map(Product::price).collect(),
    })
}
