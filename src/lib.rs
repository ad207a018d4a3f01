pub mod buffer;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod fragments;
pub mod holes;
pub mod morphology;
pub mod pipeline;
pub mod simplify;
pub mod utils;
pub mod validate;


pub use config::AoiConfig;
pub use error::{AoiError, Result, Stage};
pub use fragments::Fragments;
pub use pipeline::{lines_to_aoi, Aoi, AoiBuilder, AoiReport};
