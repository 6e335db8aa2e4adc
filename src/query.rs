use crate::sale::Sale;

/// Returns the sales made on `date`.
///
/// Dates are matched as plain strings; `2017-12-22` and `2017-12-22T00:00`
/// are different dates.
#[must_use]
pub fn filter_sales_by_date<'a>(sales: &'a [Sale], date: &str) -> Vec<&'a Sale> {
    sales.iter().filter(|sale| sale.date == date).collect()
}

/// The first entries of a ranking, as returned by [`top_n`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopN<'a, T> {
    pub entries: &'a [T],
    pub requested: usize,
}

impl<T> TopN<'_, T> {
    /// Returns the number of entries actually available, if fewer than
    /// requested.
    #[must_use]
    pub fn shortfall(&self) -> Option<usize> {
        (self.requested > self.entries.len()).then_some(self.entries.len())
    }
}

/// Returns the first `n` entries of `ranked`.
///
/// Asking for more entries than exist is not an error: all of them are
/// returned, and [`TopN::shortfall`] reports how many there were.
///
/// # Examples
///
/// ```
/// # use booksales::top_n;
/// let ranked = ["B1", "B2"];
/// assert_eq!(top_n(&ranked, 1).entries, ["B1"]);
/// let top = top_n(&ranked, 5);
/// assert_eq!(top.entries, ["B1", "B2"]);
/// assert_eq!(top.shortfall(), Some(2));
/// ```
#[must_use]
pub fn top_n<T>(ranked: &[T], n: usize) -> TopN<'_, T> {
    TopN {
        entries: &ranked[..n.min(ranked.len())],
        requested: n,
    }
}
