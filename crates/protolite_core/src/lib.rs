//! Public library API for converting schema-typed messages to and from PB-Lite arrays.

/// PB-Lite serialization engine, schema view, and dynamic message runtime.
pub mod pblite;
