//! The caption pipeline, stage by stage: discovery, decode, metadata
//! extraction, date resolution, orientation normalization, footer
//! rendering, batch orchestration.

pub mod batch;
pub mod date;
pub mod discovery;
pub mod footer;
pub mod metadata;
pub mod orientation;
pub mod processor;
pub mod tags;

pub use batch::BatchDriver;
pub use date::DateResolver;
pub use discovery::FileDiscovery;
pub use footer::{FooterLayout, FooterRenderer};
pub use metadata::{MetadataExtractor, PhotoMetadata};
pub use orientation::normalize_orientation;
pub use processor::{ImageProcessor, ProcessOutcome};
pub use tags::TagId;
