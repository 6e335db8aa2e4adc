//! Revenue totals and rankings.
//!
//! Every figure here comes from the same rule: an item's revenue is its
//! quantity times the catalog price, and items whose book id isn't in the
//! catalog count for nothing.

use std::collections::HashMap;

use crate::{catalog::Catalog, money::Money, sale::Sale};

/// Returns the total revenue of `sales`, priced against `catalog`.
///
/// # Examples
///
/// ```
/// # use std::{collections::BTreeMap, str::FromStr};
/// # use booksales::{compute_revenue, Catalog, Money, Sale};
/// let catalog: Catalog = [("B1", Money::from_str("10.0").unwrap())].into_iter().collect();
/// let sale = Sale {
///     date: "2017-12-22".into(),
///     customer_email: "a@x.com".into(),
///     payment_method: "card".into(),
///     item_count: 3,
///     items: BTreeMap::from([("B1".into(), 2), ("UNKNOWN".into(), 1)]),
/// };
/// assert_eq!(compute_revenue([&sale], &catalog).to_string(), "20.0");
/// ```
pub fn compute_revenue<'a>(sales: impl IntoIterator<Item = &'a Sale>, catalog: &Catalog) -> Money {
    sales
        .into_iter()
        .flat_map(|sale| &sale.items)
        .filter_map(|(id, &qty)| catalog.price(id).map(|price| price * qty))
        .sum()
}

/// Returns the ids of every catalogued book that appears in `sales`,
/// ordered by revenue, highest first.
///
/// Books with equal revenue are ordered by id.
#[must_use]
pub fn rank_books_by_revenue(sales: &[Sale], catalog: &Catalog) -> Vec<String> {
    let mut revenue: HashMap<&str, Money> = HashMap::new();
    for sale in sales {
        for (id, &qty) in &sale.items {
            if let Some(price) = catalog.price(id) {
                *revenue.entry(id.as_str()).or_default() += price * qty;
            }
        }
    }
    ranked(revenue)
}

/// Returns every customer email in `sales`, ordered by total spend, highest
/// first.
///
/// Customers with equal spend are ordered by email.
#[must_use]
pub fn rank_customers_by_revenue(sales: &[Sale], catalog: &Catalog) -> Vec<String> {
    let mut by_customer: HashMap<&str, Vec<&Sale>> = HashMap::new();
    for sale in sales {
        by_customer
            .entry(sale.customer_email.as_str())
            .or_default()
            .push(sale);
    }
    let revenue = by_customer
        .into_iter()
        .map(|(email, sales)| (email, compute_revenue(sales, catalog)))
        .collect();
    ranked(revenue)
}

fn ranked(revenue: HashMap<&str, Money>) -> Vec<String> {
    let mut entries: Vec<_> = revenue.into_iter().collect();
    entries.sort_by(|(key_a, rev_a), (key_b, rev_b)| rev_b.cmp(rev_a).then(key_a.cmp(key_b)));
    entries.into_iter().map(|(key, _)| key.to_string()).collect()
}
