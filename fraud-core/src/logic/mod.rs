//! Logic Module - Fraud scoring engines
//!
//! ## Architecture
//! - `features/` - Shared feature contract (encoding, layout, vector builder)
//! - `dataset/` - Labeled CSV acquisition and preprocessing
//! - `model/` - Random forest, classifier seam, artifact persistence
//! - `training/` - Split, fit, evaluate
//! - `scoring/` - Request validation, balance rule, model or heuristic verdict

pub mod features;
pub mod dataset;
pub mod model;
pub mod training;
pub mod scoring;
