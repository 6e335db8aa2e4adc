use anyhow::{Context, Result};
use log::{debug, info};

use std::{
    fmt::Display,
    fs,
    io::Read,
    path::Path,
};

use crate::{
    aggregate::{compute_revenue, rank_books_by_revenue, rank_customers_by_revenue},
    catalog::Catalog,
    money::Money,
    query::{filter_sales_by_date, top_n},
    sale::{read_sales, Sale},
};

/// Holds a book catalog and a sales ledger, and answers queries on them.
///
/// To load a `Report` from files, use [`Report::from_paths`]. To load it from
/// any other source, use [`Report::read`].
///
/// Each query returns a value whose [`Display`] implementation is the
/// tab-separated output line for that query.
#[derive(Debug, Default)]
pub struct Report {
    catalog: Catalog,
    sales: Vec<Sale>,
}

impl Report {
    #[must_use]
    pub fn new(catalog: Catalog, sales: Vec<Sale>) -> Self {
        Self { catalog, sales }
    }

    /// Reads the book catalog and sales ledger at the given paths.
    ///
    /// Each file is read whole before parsing.
    ///
    /// # Errors
    ///
    /// Returns errors if:
    /// * Either file cannot be read
    /// * A book row has fewer than four fields
    /// * A sale row is malformed, including one whose item fields don't add
    ///   up to its declared item count
    pub fn from_paths(
        catalog: impl AsRef<Path>,
        sales: impl AsRef<Path>,
        delimiter: u8,
    ) -> Result<Self> {
        let (catalog_path, sales_path) = (catalog.as_ref(), sales.as_ref());
        let catalog_data = fs::read(catalog_path)
            .with_context(|| format!("reading {}", catalog_path.display()))?;
        let sales_data =
            fs::read(sales_path).with_context(|| format!("reading {}", sales_path.display()))?;
        let catalog = Catalog::read(catalog_data.as_slice(), delimiter)
            .with_context(|| format!("parsing {}", catalog_path.display()))?;
        let sales = read_sales(sales_data.as_slice(), delimiter)
            .with_context(|| format!("parsing {}", sales_path.display()))?;
        debug!("loaded {} books and {} sales", catalog.len(), sales.len());
        Ok(Self::new(catalog, sales))
    }

    /// Reads a report from a catalog and a ledger in delimited text form.
    ///
    /// # Errors
    ///
    /// Returns the same parse errors as [`Report::from_paths`].
    pub fn read(catalog: impl Read, sales: impl Read, delimiter: u8) -> Result<Self> {
        Ok(Self::new(
            Catalog::read(catalog, delimiter)?,
            read_sales(sales, delimiter)?,
        ))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Returns the `n` books with the highest revenue.
    #[must_use]
    pub fn top_selling_books(&self, n: usize) -> Ranking {
        let ranked = rank_books_by_revenue(&self.sales, &self.catalog);
        Ranking::new(RankingKind::Books, &ranked, n)
    }

    /// Returns the `n` customers who spent the most.
    #[must_use]
    pub fn top_customers(&self, n: usize) -> Ranking {
        let ranked = rank_customers_by_revenue(&self.sales, &self.catalog);
        Ranking::new(RankingKind::Customers, &ranked, n)
    }

    /// Returns the total revenue of sales made on `date`.
    #[must_use]
    pub fn sales_on_date(&self, date: &str) -> DateTotal {
        let sales = filter_sales_by_date(&self.sales, date);
        DateTotal {
            date: date.to_string(),
            total: compute_revenue(sales, &self.catalog),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingKind {
    Books,
    Customers,
}

impl RankingKind {
    fn label(self) -> &'static str {
        match self {
            Self::Books => "top_selling_books",
            Self::Customers => "top_customers",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Customers => "customers",
        }
    }
}

/// The answer to a top-N query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    pub kind: RankingKind,
    pub entries: Vec<String>,
    /// How many entries were available, when fewer than requested.
    pub shortfall: Option<usize>,
}

impl Ranking {
    fn new(kind: RankingKind, ranked: &[String], n: usize) -> Self {
        let top = top_n(ranked, n);
        let shortfall = top.shortfall();
        if let Some(available) = shortfall {
            info!(
                "asked for {n} {}, only {available} available",
                kind.noun()
            );
        }
        Self {
            kind,
            entries: top.entries.to_vec(),
            shortfall,
        }
    }
}

impl Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.label())?;
        for entry in &self.entries {
            write!(f, "\t{entry}")?;
        }
        if let Some(available) = self.shortfall {
            write!(
                f,
                "\nNot enough {} to print, max range is till\t{available}",
                self.kind.noun()
            )?;
        }
        Ok(())
    }
}

/// The answer to a sales-on-date query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTotal {
    pub date: String,
    pub total: Money,
}

impl Display for DateTotal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sales_on_date\t{}\t{}", self.date, self.total)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn report() -> Report {
        Report::from_paths("testdata/books.csv", "testdata/sales.csv", b',').unwrap()
    }

    #[test]
    fn from_paths_fn_correctly_loads_test_data() {
        let report = report();
        assert_eq!(report.catalog().len(), 5);
        assert_eq!(report.sales().len(), 5);
        assert_eq!(
            compute_revenue(report.sales(), report.catalog()),
            Money::from_str("160.55").unwrap()
        );
    }

    #[test]
    fn from_paths_fn_returns_error_naming_missing_file() {
        let err = Report::from_paths("testdata/bogus.csv", "testdata/sales.csv", b',').unwrap_err();
        assert!(err.to_string().contains("testdata/bogus.csv"));
    }

    #[test]
    fn from_paths_fn_returns_error_for_short_sale_row() {
        let err =
            Report::from_paths("testdata/books.csv", "testdata/sales.short.csv", b',').unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("insufficient item fields"), "{msg}");
    }

    #[test]
    fn top_selling_books_fn_ranks_books_by_revenue() {
        let ranking = report().top_selling_books(3);
        assert_eq!(ranking.entries, vec!["2", "4", "1"]);
        assert_eq!(ranking.shortfall, None);
        assert_eq!(ranking.to_string(), "top_selling_books\t2\t4\t1");
    }

    #[test]
    fn top_selling_books_fn_reports_shortfall() {
        let ranking = report().top_selling_books(10);
        assert_eq!(ranking.entries, vec!["2", "4", "1", "3", "5"]);
        assert_eq!(ranking.shortfall, Some(5));
        assert_eq!(
            ranking.to_string(),
            "top_selling_books\t2\t4\t1\t3\t5\nNot enough books to print, max range is till\t5"
        );
    }

    #[test]
    fn top_customers_fn_ranks_customers_by_spend() {
        let ranking = report().top_customers(2);
        assert_eq!(ranking.entries, vec!["john@example.com", "jane@example.com"]);
        assert_eq!(
            ranking.to_string(),
            "top_customers\tjohn@example.com\tjane@example.com"
        );
    }

    #[test]
    fn top_customers_fn_reports_shortfall() {
        let ranking = report().top_customers(4);
        assert_eq!(ranking.shortfall, Some(3));
        assert!(ranking
            .to_string()
            .ends_with("Not enough customers to print, max range is till\t3"));
    }

    #[test]
    fn sales_on_date_fn_totals_sales_for_date() {
        let report = report();
        assert_eq!(
            report.sales_on_date("2017-12-22").to_string(),
            "sales_on_date\t2017-12-22\t100.0"
        );
        assert_eq!(
            report.sales_on_date("2017-12-23").total,
            Money::from_str("30.55").unwrap()
        );
        assert_eq!(report.sales_on_date("1999-01-01").total, Money::ZERO);
    }

    #[test]
    fn read_fn_treats_blank_first_line_as_header() {
        let catalog = "\nB1,T,A,10.0\nB2,T,A,5.0\n";
        let sales = "date,email,method,count,items\n2017-12-22,a@x.com,card,1,B1;1\n";
        let report = Report::read(catalog.as_bytes(), sales.as_bytes(), b',').unwrap();
        assert_eq!(report.catalog().len(), 2);
        assert!(report.catalog().contains("B1"));
    }

    #[test]
    fn read_fn_answers_worked_example() {
        let catalog = "id,title,author,price\nB1,T,A,10.0\nB2,T,A,5.0\n";
        let sales = "date,email,method,count,items\n\
                     2017-12-22,a@x.com,card,2,B1;2\n\
                     2017-12-22,b@x.com,card,3,B2;3\n";
        let report = Report::read(catalog.as_bytes(), sales.as_bytes(), b',').unwrap();
        assert_eq!(
            report.sales_on_date("2017-12-22").total,
            Money::from_str("35").unwrap()
        );
        assert_eq!(report.top_selling_books(2).entries, vec!["B1", "B2"]);
    }
}
