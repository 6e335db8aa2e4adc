use std::{collections::BTreeMap, io::Read, str::FromStr};

use crate::{
    error::{Error, Result},
    records::{self, SaleRow, ITEM_SEPARATOR},
};

/// One transaction from the sales ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    /// Kept as written; only ever compared for equality.
    pub date: String,
    pub customer_email: String,
    pub payment_method: String,
    pub item_count: u32,
    /// Quantity purchased per book id.
    pub items: BTreeMap<String, u32>,
}

/// A single `bookId;quantity` item field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    pub book_id: String,
    pub quantity: u32,
}

impl FromStr for ItemEntry {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split(ITEM_SEPARATOR);
        let book_id = parts.next().unwrap_or_default();
        let Some(quantity) = parts.next() else {
            return Err(format!("item field {s:?} is missing '{ITEM_SEPARATOR}'"));
        };
        let quantity = quantity
            .parse::<u32>()
            .map_err(|e| format!("item field {s:?} has a bad quantity: {e}"))?;
        Ok(Self {
            book_id: book_id.to_string(),
            quantity,
        })
    }
}

impl Sale {
    /// Builds a sale from a ledger row.
    ///
    /// Item fields are consumed in order until their quantities add up to
    /// the declared item count; any fields after that point are ignored. A
    /// book id that appears twice keeps the later quantity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientItems`] if the item fields run out before
    /// the declared count is reached, and [`Error::MalformedSale`] if the item
    /// count or an item field doesn't parse.
    pub fn from_row(row: SaleRow) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedSale {
            line: row.line,
            reason,
        };
        let item_count = row.item_count.parse::<u32>().map_err(|e| {
            malformed(format!("item count {:?} is not a valid count: {e}", row.item_count))
        })?;

        let mut items = BTreeMap::new();
        let mut remaining = i64::from(item_count);
        let mut consumed = 0u64;
        let mut fields = row.item_fields.iter();
        while remaining > 0 {
            let Some(field) = fields.next() else {
                return Err(Error::InsufficientItems {
                    line: row.line,
                    declared: item_count,
                    found: consumed,
                });
            };
            let entry: ItemEntry = field.parse().map_err(malformed)?;
            remaining -= i64::from(entry.quantity);
            consumed += u64::from(entry.quantity);
            items.insert(entry.book_id, entry.quantity);
        }

        Ok(Self {
            date: row.date,
            customer_email: row.customer_email,
            payment_method: row.payment_method,
            item_count,
            items,
        })
    }
}

/// Reads every sale from a ledger with a header line.
///
/// # Errors
///
/// Returns the first error from [`records::sale_rows`] or [`Sale::from_row`].
/// A malformed sale row is fatal.
pub fn read_sales(rdr: impl Read, delimiter: u8) -> Result<Vec<Sale>> {
    records::sale_rows(rdr, delimiter)?
        .into_iter()
        .map(Sale::from_row)
        .collect()
}
