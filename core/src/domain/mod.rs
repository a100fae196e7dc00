pub mod common;
pub mod product_analysis;
