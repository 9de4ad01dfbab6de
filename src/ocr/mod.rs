//! Cloud OCR batch handling: wire model, angle consensus, and coordinate
//! unification into the intermediate page format.

pub mod intermediate;
pub mod vision;

// Re-export main types
pub use intermediate::{
    intermediate_pages_from_batch, rows_from_intermediate_pages, IntermediatePage,
    IntermediateWord, PageAngleConsensus,
};
pub use vision::BatchResponse;
