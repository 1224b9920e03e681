//! Turns a raw form submission into the feature vector a trained model expects.
//!
//! Encoding happens in two steps: [`encode`] one-hot encodes the categorical
//! fields, then [`align`] pads, drops and reorders those columns so they line
//! up with the model's feature schema.

pub mod aligner;
pub mod one_hot;

pub use aligner::{align, align_or_passthrough, AlignmentError};
pub use one_hot::encode;
