//! Report rendering port trait.

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::DcaError;
use crate::domain::signal::{DipBuySignal, Ma250Signal};

/// Port for rendering results to any writer.
pub trait ReportPort {
    fn write_result(&self, out: &mut dyn Write, result: &BacktestResult) -> Result<(), DcaError>;

    /// Default implementation: one block per result, nothing side by side.
    fn write_comparison(
        &self,
        out: &mut dyn Write,
        results: &[BacktestResult],
    ) -> Result<(), DcaError> {
        for result in results {
            self.write_result(out, result)?;
        }
        Ok(())
    }

    fn write_ma250_signal(&self, out: &mut dyn Write, signal: &Ma250Signal) -> Result<(), DcaError>;

    fn write_dip_buy_signal(
        &self,
        out: &mut dyn Write,
        signal: &DipBuySignal,
    ) -> Result<(), DcaError>;
}
