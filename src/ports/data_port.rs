//! Price data port trait.
//!
//! The data source owns loading and cleaning; whatever it returns is a
//! validated, date-sorted [`PriceTable`] the engines consume read-only.

use crate::domain::error::MomtraderError;
use crate::domain::prices::PriceTable;

pub trait PriceDataPort {
    fn fetch_prices(&self) -> Result<PriceTable, MomtraderError>;
}
