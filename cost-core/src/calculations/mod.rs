//! Cost-sheet calculations.
//!
//! A [`CalculationSheet`] accumulates rows that price a quantity of a catalog
//! item and aggregates them into per-category and grand totals.

pub mod sheet;

pub use sheet::{CalculationRow, CalculationSheet, SheetError, SheetTotals};
