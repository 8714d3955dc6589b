//! Price data access port trait.

use crate::domain::error::DcaError;
use crate::domain::price::PricePoint;
use chrono::NaiveDate;

pub trait PriceDataPort {
    /// Daily closes for `symbol`, sorted ascending with one point per date.
    ///
    /// `None` bounds leave that side of the window open.
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PricePoint>, DcaError>;

    fn list_symbols(&self) -> Result<Vec<String>, DcaError>;
}
