//! Protocol core for a consumer EMG armband
//!
//! Transport-agnostic implementation of the armband's control protocol:
//! command encoding, notification decoding, classifier indications, the
//! session mode model, and reconstruction of the 200 Hz raw EMG stream
//! from its four cyclic notification sources.
//!
//! The crate never touches a radio. Integrations implement
//! [`hal::Transport`] over their BLE stack of choice and feed incoming
//! notification payloads through [`protocol::Dispatcher`]; raw EMG frames
//! then go to a [`stream::StreamWorker`] for gap-compensated sequencing.
//!
//! ## Layering
//!
//! - [`protocol`] — wire formats: commands out, notifications in
//! - [`session`] — mode state machine and its transport side effects
//! - [`stream`] — single-writer 200 Hz stream reconstruction and windowing
//! - [`hal`] — the transport and sink seams integrations implement
//! - [`error`] — the crate-wide error taxonomy

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod hal;
pub mod protocol;
pub mod session;
pub mod stream;

pub use error::{ProtocolError, ProtocolResult};
pub use hal::{SampleSink, Transport};
pub use protocol::{
    ClassifierEvent, CommandFrame, Dispatcher, Event, Pose, RawEmgFrame, SourceId,
};
pub use session::{
    ClassifierMode, EmgMode, ImuMode, ModeConfiguration, Session, SessionController,
};
pub use stream::{
    ReconstructedSample, Reconstructor, ReconstructorConfig, StreamWorker,
};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
