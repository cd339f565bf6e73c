//! Hot Dog or Not
//!
//! Takes an uploaded image, asks a hosted vision model whether it is a hot
//! dog, persists the structured verdict with the image, and serves history
//! and shareable previews over HTTP.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod schema;
pub mod share;
pub mod store;

pub use error::{HotDogError, Result};
pub use model::{Analysis, AnalysisPage, AnalysisResponse, ListAnalysesResponse, NewAnalysis};
pub use pipeline::AnalysisPipeline;
pub use schema::{HotDogCategory, HotDogVerdict};
pub use share::SharePreview;
