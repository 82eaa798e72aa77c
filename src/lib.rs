pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

pub use config::{BriefConfig, Config};
pub use error::{AppError, ExtractError};
pub use services::brief::BriefExtractor;

// Application state
pub struct AppState {
    pub config: Config,
    pub extractor: BriefExtractor,
}

impl AppState {
    /// Fails when a catalog pattern does not compile.
    pub fn new(config: Config) -> Result<Self, ExtractError> {
        let extractor = BriefExtractor::new(&config.brief)?;
        Ok(Self { config, extractor })
    }
}
