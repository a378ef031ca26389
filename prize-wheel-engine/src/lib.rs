//! Prize Wheel Engine
//!
//! Platform-agnostic spin logic for a weighted prize wheel: winner selection,
//! forward-only rotation planning and the editable option list.
//! This crate provides the mechanics without UI or platform-specific dependencies.

pub mod config;
pub mod constants;
pub mod display;
pub mod engine;
pub mod geometry;
pub mod numbers;
pub mod options;
pub mod rotation;
pub mod selector;

use rand::RngCore;
use thiserror::Error;

// Re-export commonly used types
pub use config::{WheelConfig, WheelConfigError};
pub use display::{SpinTransition, WheelView, total_warning, winner_headline};
pub use engine::{SpinEngine, SpinRefusal, SpinState, SpinTicket};
pub use geometry::{Point, SliceGeometry, slice_color, wheel_geometry};
pub use options::{
    OptionField, OptionStore, OptionStoreError, OptionUpdate, PrizeOption, TotalValidity,
    parse_probability,
};
pub use rotation::{RotationError, RotationPlan, plan_rotation, slice_angle, slice_under_pointer};
pub use selector::{
    Selection, SelectionTrace, WeightedCandidate, select_for_draw, select_weighted,
};

/// Trait for abstracting where a wheel's setup comes from.
/// Platform-specific implementations should provide this
pub trait ConfigSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load wheel tuning.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config(&self) -> Result<WheelConfig, Self::Error>;

    /// Load the initial option list.
    ///
    /// # Errors
    ///
    /// Returns an error if the options cannot be loaded.
    fn load_options(&self) -> Result<Vec<PrizeOption>, Self::Error>;
}

/// Failure while assembling an engine from a [`ConfigSource`].
#[derive(Debug, Error)]
pub enum EngineLoadError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("wheel source failed: {0}")]
    Source(#[source] E),
    #[error(transparent)]
    Config(#[from] WheelConfigError),
    #[error(transparent)]
    Options(#[from] OptionStoreError),
}

impl<R: RngCore> SpinEngine<R> {
    /// Create an engine from a platform source and random stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails, the config is invalid, or the
    /// option list breaks the store's structural limits.
    pub fn from_source<S: ConfigSource>(
        source: &S,
        rng: R,
    ) -> Result<Self, EngineLoadError<S::Error>> {
        let config = source.load_config().map_err(EngineLoadError::Source)?;
        config.validate()?;
        let options = source.load_options().map_err(EngineLoadError::Source)?;
        let store = OptionStore::new(options, config)?;
        Ok(Self::new(store, rng))
    }
}
