//! Rule-based extraction of event fields from OCR text.
//!
//! # Responsibility
//! - Turn raw recognized text into a `CandidateRecord`.
//! - Degrade every unmatched field to `FieldValue::Missing`.
//!
//! # Invariants
//! - Extraction never fails and never reads ambient state.
//! - Each field rule runs independently over the full text.

pub mod field_extractor;
