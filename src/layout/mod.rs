//! Row reconstruction for tabular documents.
//!
//! This module provides the cross-page row grouping engine:
//! - bucketing fragments into rows by rounded accumulated-y or by a
//!   running gap-threshold cluster anchor
//! - one continuous vertical coordinate space spanning all pages
//! - left-to-right ordering of items within each row

pub mod rows;

// Re-export main types
pub use rows::{group_rows, Fragment, PageFragments, Row, RowGroupingStrategy};
