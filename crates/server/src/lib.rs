//! Recommendation service: configuration, orchestration and request errors.
//!
//! ## Example Usage
//! ```ignore
//! use server::{Config, RecommendationService};
//! use similarity::MeanPolicy;
//!
//! let config = Config::from_env()?;
//! let mut service = RecommendationService::from_config(catalog, &config, MeanPolicy::AllColumns)?;
//!
//! let choices = service.search("toy story");
//! let recs = service.recommend(choices[0].movie_id, 5).await?;
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::{Config, ConfigError, DEFAULT_FALLBACK_POSTER_URL};
pub use error::{Result, ServiceError};
pub use service::{MovieCard, RecommendationService, Recommendations};
