//! Plain-text report adapter implementing ReportPort.
//!
//! Writes per-run result blocks, a side-by-side yearly comparison when several
//! runs are shown, and the two live signals.

use std::collections::BTreeSet;
use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::DcaError;
use crate::domain::signal::{DipBuySignal, Ma250Signal};
use crate::ports::report_port::ReportPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl TextReport {
    pub fn new() -> Self {
        Self
    }
}

/// `N/A` for an absent rate, otherwise a percentage with two decimals.
pub fn format_pct(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "N/A".to_string(),
    }
}

/// Two-decimal amount with comma thousands separators.
pub fn format_money(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

impl ReportPort for TextReport {
    fn write_result(&self, out: &mut dyn Write, result: &BacktestResult) -> Result<(), DcaError> {
        writeln!(out, "== Backtest ==")?;
        writeln!(out, "symbol: {}", result.symbol)?;
        writeln!(out, "strategy: {}", result.strategy_key)?;
        writeln!(out, "period: {} -> {}", result.start, result.end)?;
        writeln!(out, "total_invested: {}", format_money(result.total_invested))?;
        writeln!(out, "final_value:    {}", format_money(result.final_value))?;
        writeln!(out, "multiple:       {:.2}x", result.multiple())?;
        writeln!(out, "shares:         {:.6}", result.shares)?;
        writeln!(
            out,
            "trailing_{}y_xirr: {}",
            result.trailing_years,
            format_pct(result.trailing_xirr)
        )?;
        writeln!(out, "full_period_xirr: {}", format_pct(result.full_period_xirr))?;
        if !result.yearly_xirr.is_empty() {
            writeln!(out, "yearly_xirr:")?;
            for (year, rate) in &result.yearly_xirr {
                writeln!(out, "  {}: {}", year, format_pct(*rate))?;
            }
        }
        Ok(())
    }

    fn write_comparison(
        &self,
        out: &mut dyn Write,
        results: &[BacktestResult],
    ) -> Result<(), DcaError> {
        for result in results {
            self.write_result(out, result)?;
            writeln!(out)?;
        }
        if results.len() < 2 {
            return Ok(());
        }

        let label_width = results
            .iter()
            .map(|r| r.strategy_key.as_str().len())
            .max()
            .unwrap_or(0)
            .max(10);

        writeln!(out, "== Comparison ==")?;
        write!(out, "{:<8}", "year")?;
        for r in results {
            write!(out, " {:>width$}", r.strategy_key.as_str(), width = label_width)?;
        }
        writeln!(out)?;

        let years: BTreeSet<i32> = results
            .iter()
            .flat_map(|r| r.yearly_xirr.keys().copied())
            .collect();
        for year in years {
            write!(out, "{:<8}", year)?;
            for r in results {
                let cell = format_pct(r.yearly_xirr.get(&year).copied().flatten());
                write!(out, " {:>width$}", cell, width = label_width)?;
            }
            writeln!(out)?;
        }

        write!(out, "{:<8}", "total")?;
        for r in results {
            let cell = format!("{:.1}%", r.total_return() * 100.0);
            write!(out, " {:>width$}", cell, width = label_width)?;
        }
        writeln!(out)?;

        write!(out, "{:<8}", "trailing")?;
        for r in results {
            write!(out, " {:>width$}", format_pct(r.trailing_xirr), width = label_width)?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn write_ma250_signal(&self, out: &mut dyn Write, signal: &Ma250Signal) -> Result<(), DcaError> {
        writeln!(
            out,
            "== {} signal: {}x, invest {} ==",
            signal.symbol,
            signal.decision.ratio,
            format_money(signal.amount())
        )?;
        writeln!(out, "date:      {}", signal.date)?;
        writeln!(out, "price:     {}", format_money(signal.price))?;
        writeln!(out, "ma250:     {}", format_money(signal.ma250))?;
        writeln!(out, "high_250:  {}", format_money(signal.high))?;
        writeln!(out, "drawdown:  {:.2}%", signal.drawdown * 100.0)?;
        writeln!(out, "action:    {}", signal.decision.label)?;
        writeln!(
            out,
            "amount:    {} ({}x of {})",
            format_money(signal.amount()),
            signal.decision.ratio,
            format_money(signal.base_amount)
        )?;
        Ok(())
    }

    fn write_dip_buy_signal(
        &self,
        out: &mut dyn Write,
        signal: &DipBuySignal,
    ) -> Result<(), DcaError> {
        let [a, b] = &signal.assets;
        writeln!(out, "== ETF DCA + dip buy ==")?;
        writeln!(out, "date:        {}", signal.date)?;
        writeln!(
            out,
            "invest day:  {} ({})",
            signal.invest_day,
            if signal.should_invest {
                "base contribution due today"
            } else {
                "no base contribution today"
            }
        )?;
        for asset in [a, b] {
            writeln!(
                out,
                "{}: price {} | 6m high {} | drawdown {:.2}%",
                asset.symbol,
                format_money(asset.price),
                format_money(asset.high),
                asset.drawdown * 100.0
            )?;
        }
        writeln!(out, "worst drawdown: {:.2}%", signal.worst_drawdown * 100.0)?;
        match signal.index {
            Some(v) => writeln!(out, "vix:         {:.2}", v)?,
            None => writeln!(out, "vix:         N/A")?,
        }
        writeln!(out, "tier:        {} | {}", signal.tier.kind, signal.tier.note)?;
        writeln!(
            out,
            "base ({}):  {} {}; {} {}",
            format_money(signal.monthly_total),
            a.symbol,
            format_money(signal.base_allocations.0),
            b.symbol,
            format_money(signal.base_allocations.1)
        )?;
        writeln!(
            out,
            "extra ({}): {} {}; {} {}",
            format_money(signal.extra_total),
            a.symbol,
            format_money(signal.extra_allocations.0),
            b.symbol,
            format_money(signal.extra_allocations.1)
        )?;
        Ok(())
    }
}
