//! Cross-page row grouping.
//!
//! Folds a sequence of pages, each an ordered list of normalized fragments,
//! into a single ordered sequence of rows. Pages are stacked into one
//! continuous vertical coordinate space (page 2 begins where page 1's
//! height ends), so a table that straddles a page break still groups into
//! consecutive rows.
//!
//! The fold is deterministic, synchronous, and reentrant: all state lives
//! in a [`GroupingState`] local to a single invocation.

use std::collections::BTreeMap;

use crate::utils::safe_float_cmp;

/// One positioned text run, normalized to top-left-origin page coordinates.
///
/// Produced by an adapter (PDF text layer or OCR conversion) and consumed
/// read-only by the engine; grouping only reinterprets `y`, never rewrites
/// the fragment's geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// The text run (may be whitespace or empty)
    pub text: String,
    /// Horizontal position, page-local
    pub x: f64,
    /// Vertical position, page-local, y increasing downward
    pub y: f64,
    /// Width on device
    pub width: f64,
    /// Height on device
    pub height: f64,
    /// 1-based page number of the original document
    pub page: u32,
    /// Resolved human font name. `None` when the source has no font
    /// information (OCR) or the style table had no entry (PDF).
    pub font_name: Option<String>,
    /// Raw PDF text matrix `[a b c d e f]`, when the source provides one
    pub transform: Option<[f64; 6]>,
    /// OCR word confidence in `[0, 1]`, when the source provides one
    pub confidence: Option<f64>,
}

/// One page's worth of fragments, ready for grouping.
#[derive(Debug, Clone)]
pub struct PageFragments {
    /// 1-based page number, unique per document
    pub page_number: u32,
    /// Page height in the same unit as fragment coordinates
    pub page_height: f64,
    /// Fragments on this page
    pub fragments: Vec<Fragment>,
}

/// How fragments are bucketed into rows.
///
/// Exactly one strategy is active per invocation; the caller supplies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowGroupingStrategy {
    /// Bucket by accumulated-y rounded to `precision` decimal digits
    /// (ties-to-even).
    ///
    /// Rounding draws arbitrary breakpoints, so two fragments on the same
    /// visual line can straddle a boundary. Works well for many documents
    /// regardless.
    FractionalEpsilon {
        /// Number of decimal digits kept in the row key
        precision: u32,
    },
    /// Bucket by a running cluster anchor that advances on vertical jumps.
    GapThreshold {
        /// Start a new row when the gap between consecutive accumulated-y
        /// values exceeds this distance.
        minimum_gap: f64,
        /// Start a new row when cumulative drift since the current cluster
        /// began exceeds this ceiling, even if every individual gap was
        /// small.
        maximum_break_threshold: f64,
    },
}

impl Default for RowGroupingStrategy {
    fn default() -> Self {
        RowGroupingStrategy::FractionalEpsilon { precision: 1 }
    }
}

impl RowGroupingStrategy {
    /// Decimal scale used to promote row keys to integers.
    fn key_scale(&self) -> f64 {
        match self {
            RowGroupingStrategy::FractionalEpsilon { precision } => 10f64.powi(*precision as i32),
            // the cluster anchor is keyed at a fixed 5 decimal places
            RowGroupingStrategy::GapThreshold { .. } => 1e5,
        }
    }
}

/// One reconstructed row: a grouping key and its fragments ordered
/// left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The row's grouping key promoted back to a number
    pub y: f64,
    /// Fragments in this row, sorted ascending by `x`
    pub items: Vec<Fragment>,
}

impl Row {
    /// The row's text content in reading order.
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }
}

/// Accumulators threaded through the grouping fold.
///
/// Explicit state rather than outer-scope variables keeps the engine
/// reentrant and lets each step be exercised in isolation.
#[derive(Debug, Clone, Default)]
struct GroupingState {
    /// Sum of the heights of all fully processed pages
    y_accumulator: f64,
    /// Current row-cluster anchor (gap-threshold strategy only)
    grouping_start_y: Option<f64>,
    /// Previous fragment's accumulated y, for gap detection
    last_y: Option<f64>,
}

impl GroupingState {
    /// Advance the state for one fragment; returns the integer row key and
    /// the fragment's accumulated y.
    fn step(&mut self, local_y: f64, strategy: &RowGroupingStrategy) -> (i64, f64) {
        let absolute_y = self.y_accumulator + local_y;

        let anchor = *self.grouping_start_y.get_or_insert(absolute_y);

        let key_source = match strategy {
            RowGroupingStrategy::FractionalEpsilon { .. } => absolute_y,
            RowGroupingStrategy::GapThreshold {
                minimum_gap,
                maximum_break_threshold,
            } => {
                // both checks are independent; either can open a new cluster
                let mut anchor = anchor;
                if absolute_y - anchor > *maximum_break_threshold {
                    anchor = absolute_y;
                }
                if let Some(last_y) = self.last_y {
                    if absolute_y - last_y > *minimum_gap {
                        anchor = absolute_y;
                    }
                }
                self.grouping_start_y = Some(anchor);
                anchor
            },
        };

        self.last_y = Some(absolute_y);

        let key = (key_source * strategy.key_scale()).round_ties_even() as i64;
        (key, absolute_y)
    }

    /// Close out a page: subsequent fragments are addressed in a space
    /// stacked directly beneath it.
    fn finish_page(&mut self, page_height: f64) {
        self.y_accumulator += page_height;
    }
}

/// Group every fragment across all pages into ordered rows.
///
/// Pages are processed in ascending page-number order and fragments in
/// ascending-y order within each page (both enforced here rather than
/// assumed of the caller). Every input fragment lands in exactly one row;
/// rows are emitted ascending by `y` with items ascending by `x`.
///
/// Each fragment's `y` is rewritten to its accumulated value so that rows
/// from different pages share one coordinate space.
pub fn group_rows(mut pages: Vec<PageFragments>, strategy: RowGroupingStrategy) -> Vec<Row> {
    let mut state = GroupingState::default();
    let mut buckets: BTreeMap<i64, Vec<Fragment>> = BTreeMap::new();

    pages.sort_by_key(|page| page.page_number);

    for mut page in pages {
        page.fragments
            .sort_by(|a, b| safe_float_cmp(a.y, b.y));

        for mut fragment in page.fragments {
            let (key, absolute_y) = state.step(fragment.y, &strategy);
            fragment.y = absolute_y;
            buckets.entry(key).or_default().push(fragment);
        }

        state.finish_page(page.page_height);
    }

    let scale = strategy.key_scale();
    buckets
        .into_iter()
        .map(|(key, mut items)| {
            items.sort_by(|a, b| safe_float_cmp(a.x, b.x));
            Row {
                y: key as f64 / scale,
                items,
            }
        })
        .collect()
}
