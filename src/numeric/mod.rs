// ============================================================================
// Numeric Module
// Fixed-point arithmetic for prices and integer quantities
// ============================================================================
//
// This module provides:
// - Price: two-digit fixed-point decimal backed by i64 hundredths
// - Quantity: whole asset units
// - NumericError: Error types for price construction and arithmetic
//
// Design principles:
// - No floating-point operations anywhere near price comparison
// - All fallible arithmetic returns Result (no panics)

mod errors;
mod price;

pub use errors::{NumericError, NumericResult};
pub use price::{Price, Quantity};
