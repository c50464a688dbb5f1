//! # fake-data
//!
//! Synthetic value generation for Swagger Probe.
//! Turns a JSON Schema fragment plus a field name into a plausible value,
//! using an ordered table of field-name rules before falling back to the
//! declared schema type.

pub mod national_id;
pub mod rules;
mod error;
mod synthesizer;
mod vocab;

pub use error::{SynthesisError, SynthesisResult};
pub use rules::{default_rules, NameRule};
pub use synthesizer::{FakeValueSynthesizer, DEFAULT_MAX_DEPTH};
pub use vocab::{car_plate, department, email, full_name, phone, product, word};
