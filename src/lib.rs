// Winnower: topic discovery and corpus curation for scraped news archives.
//
// This is the library root. Each module corresponds to a major subsystem
// of the topic-modeling pipeline.

pub mod config;
pub mod curate;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod status;
pub mod store;
pub mod text;
pub mod topics;
