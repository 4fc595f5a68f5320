//! Batch boundary: CSV in, one outcome per request out.

pub mod batch;
pub mod csv;
