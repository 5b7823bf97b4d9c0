//! Bulk price adjustment.

use crate::error::ValidationError;
use crate::product::Product;

/// Service for catalog-wide product operations.
pub struct ProductService;

impl ProductService {
    /// Raises every product's price by `percentage` percent, in place.
    ///
    /// The new price is `price + price * percentage / 100`, truncated to
    /// whole cents. Negative percentages lower prices.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPercentage`] for percentages below
    /// -100 and [`ValidationError::AmountOverflow`] if any new price does not
    /// fit. Both checks run before any product is modified.
    #[tracing::instrument(skip(products), fields(product_count = products.len()))]
    pub fn increase_price(
        products: &mut [Product],
        percentage: i64,
    ) -> Result<(), ValidationError> {
        if percentage < -100 {
            return Err(ValidationError::InvalidPercentage { percentage });
        }

        let new_prices = products
            .iter()
            .map(|product| {
                let price = product.price();
                price
                    .checked_percentage(percentage)
                    .and_then(|delta| price.checked_add(delta))
                    .ok_or(ValidationError::AmountOverflow)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (product, price) in products.iter_mut().zip(new_prices) {
            product.change_price(price)?;
        }

        tracing::debug!(percentage, "product prices adjusted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Money;

    #[test]
    fn doubles_all_prices() {
        let mut products = vec![
            Product::new("product1", "Product 1", Money::from_units(10)).unwrap(),
            Product::new("product3", "Product 3", Money::from_units(30)).unwrap(),
        ];

        ProductService::increase_price(&mut products, 100).unwrap();

        assert_eq!(products[0].price(), Money::from_units(20));
        assert_eq!(products[1].price(), Money::from_units(60));
    }

    #[test]
    fn truncates_to_whole_cents() {
        let mut products = vec![Product::new("p1", "Product 1", Money::from_cents(999)).unwrap()];
        ProductService::increase_price(&mut products, 10).unwrap();
        assert_eq!(products[0].price().cents(), 1098);
    }

    #[test]
    fn negative_percentage_lowers_prices() {
        let mut products = vec![Product::new("p1", "Product 1", Money::from_units(10)).unwrap()];
        ProductService::increase_price(&mut products, -100).unwrap();
        assert_eq!(products[0].price(), Money::zero());
    }

    #[test]
    fn rejects_percentage_below_minus_hundred_without_mutating() {
        let mut products = vec![Product::new("p1", "Product 1", Money::from_units(10)).unwrap()];
        assert_eq!(
            ProductService::increase_price(&mut products, -101),
            Err(ValidationError::InvalidPercentage { percentage: -101 })
        );
        assert_eq!(products[0].price(), Money::from_units(10));
    }

    #[test]
    fn overflowing_price_fails_without_mutating() {
        let mut products = vec![
            Product::new("p1", "Product 1", Money::from_units(10)).unwrap(),
            Product::new("p2", "Product 2", Money::from_cents(i64::MAX / 2)).unwrap(),
        ];

        assert_eq!(
            ProductService::increase_price(&mut products, 150),
            Err(ValidationError::AmountOverflow)
        );
        assert_eq!(products[0].price(), Money::from_units(10));
        assert_eq!(products[1].price(), Money::from_cents(i64::MAX / 2));
    }

    #[test]
    fn huge_percentage_is_rejected() {
        let mut products = vec![Product::new("p1", "Product 1", Money::from_units(10)).unwrap()];
        assert_eq!(
            ProductService::increase_price(&mut products, i64::MAX),
            Err(ValidationError::AmountOverflow)
        );
        assert_eq!(products[0].price(), Money::from_units(10));
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        ProductService::increase_price(&mut [], 50).unwrap();
    }
}
