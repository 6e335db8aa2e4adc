use anyhow::{ensure, Result};
use clap::Parser;
use env_logger::Env;

use std::path::PathBuf;

use booksales::{Report, DEFAULT_DELIMITER};

#[derive(Parser)]
#[command(version, about)]
/// Ranks books and customers by revenue, and totals sales by date, from a
/// book catalog and a sales ledger in CSV form.
struct Args {
    /// Book catalog: `id,title,author,price` rows after a header line
    catalog: PathBuf,

    /// Sales ledger: `date,email,payment,item_count,book;qty,...` rows after a header line
    sales: PathBuf,

    /// Print the N books with the highest revenue (skipped if no value is given)
    #[arg(long = "top_selling_books", value_name = "N", num_args = 0..=1, require_equals = true)]
    top_selling_books: Option<Option<usize>>,

    /// Print the N customers who spent the most (skipped if no value is given)
    #[arg(long = "top_customers", value_name = "N", num_args = 0..=1, require_equals = true)]
    top_customers: Option<Option<usize>>,

    /// Print the total revenue of sales on DATE (skipped if no value is given)
    #[arg(long = "sales_on_date", value_name = "DATE", num_args = 0..=1, require_equals = true)]
    sales_on_date: Option<Option<String>>,

    /// Field separator used by both files
    #[arg(long, default_value_t = DEFAULT_DELIMITER as char)]
    delimiter: char,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    ensure!(
        args.delimiter.is_ascii(),
        "delimiter must be a single ASCII character, not {:?}",
        args.delimiter
    );
    let report = Report::from_paths(&args.catalog, &args.sales, args.delimiter as u8)?;
    if let Some(Some(n)) = args.top_selling_books {
        println!("{}", report.top_selling_books(n));
    }
    if let Some(Some(n)) = args.top_customers {
        println!("{}", report.top_customers(n));
    }
    if let Some(Some(date)) = args.sales_on_date {
        println!("{}", report.sales_on_date(&date));
    }
    Ok(())
}
