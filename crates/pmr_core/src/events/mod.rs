//! Event normalization: raw feed records → typed [`EventTable`].

pub mod normalizer;
pub mod qualifiers;
pub mod table;

pub use normalizer::{normalize, normalize_records};
pub use qualifiers::{QualifierValue, Qualifiers};
pub use table::{EventStatistics, EventTable, PassFilter};
