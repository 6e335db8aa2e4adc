use log::warn;

use std::{collections::HashMap, io::Read, str::FromStr};

use crate::{error::Result, money::Money, records};

/// Maps book ids to prices.
///
/// Built once from the book catalog and read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalog {
    prices: HashMap<String, Money>,
}

impl Catalog {
    /// Builds a catalog from parsed book rows.
    ///
    /// A price that doesn't parse as a decimal is logged and recorded as zero,
    /// so one bad row doesn't abort the run. If an id appears more than once,
    /// the last row wins.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = records::BookRow>) -> Self {
        let mut prices = HashMap::new();
        for row in rows {
            let price = Money::from_str(&row.price).unwrap_or_else(|e| {
                warn!(
                    "price {:?} for book {} is not a valid amount ({e}), using 0.0",
                    row.price, row.id
                );
                Money::ZERO
            });
            prices.insert(row.id, price);
        }
        Self { prices }
    }

    /// Reads a catalog from delimited text with a header line.
    ///
    /// # Errors
    ///
    /// Returns any error from [`records::book_rows`].
    pub fn read(rdr: impl Read, delimiter: u8) -> Result<Self> {
        Ok(Self::from_rows(records::book_rows(rdr, delimiter)?))
    }

    /// Returns the price of `id`, if the book is in the catalog.
    #[must_use]
    pub fn price(&self, id: &str) -> Option<Money> {
        self.prices.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.prices.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Money)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (S, Money)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(id, price)| (id.into(), price)).collect(),
        }
    }
}
