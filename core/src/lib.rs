//! Recipe models, the in-memory recipe cache, and the orchestration that
//! decides between cache and the remote recipe API.

pub mod cache;
pub mod error;
pub mod feed;
pub mod models;
pub mod samples;
pub mod service;
pub mod spoonacular;
