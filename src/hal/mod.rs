// src/hal/mod.rs
//! Capability layer: transport and sink traits plus in-memory doubles

pub mod loopback;
pub mod traits;

pub use loopback::{CollectingSink, LoopbackTransport, TransportCall};
pub use traits::{NullSink, SampleSink, Transport};
