//! Spin engine: owns the option store, the accumulated rotation and the
//! pending winner between a spin trigger and its settle callback.
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::WheelConfig;
use crate::constants::{LOG_SPIN_REFUSED, LOG_SPIN_SETTLED, LOG_SPIN_STARTED};
use crate::options::{OptionStore, OptionUpdate, PrizeOption};
use crate::rotation::{RotationError, RotationPlan, plan_rotation};
use crate::selector::{SelectionTrace, select_weighted};

/// Why a spin trigger was ignored. Hosts treat every variant as a silent no-op.
#[derive(Debug, Error, PartialEq)]
pub enum SpinRefusal {
    #[error("a spin is already in flight")]
    AlreadySpinning,
    #[error("total probability is zero")]
    ZeroTotal,
    #[error("total probability {total:.1} is outside the valid window")]
    InvalidTotal { total: f64 },
    #[error(transparent)]
    Planning(#[from] RotationError),
}

/// Observable spin state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    pub is_spinning: bool,
    /// Accumulated rotation; only ever increases.
    pub rotation_degrees: f64,
    pub winner: Option<PrizeOption>,
}

impl Default for SpinState {
    fn default() -> Self {
        Self {
            is_spinning: false,
            rotation_degrees: 0.0,
            winner: None,
        }
    }
}

/// Returned by [`SpinEngine::spin`]; the host animates to `plan.to` and calls
/// [`SpinEngine::finish_spin`] once after `settle_after`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinTicket {
    pub index: usize,
    /// Option as it was when the spin started.
    pub winner: PrizeOption,
    pub plan: RotationPlan,
    pub trace: SelectionTrace,
    pub settle_after: Duration,
}

#[derive(Debug)]
pub struct SpinEngine<R = ChaCha20Rng> {
    store: OptionStore,
    state: SpinState,
    pending: Option<PrizeOption>,
    rng: R,
    spins: u64,
}

impl SpinEngine<ChaCha20Rng> {
    /// Engine over `store` with a deterministic stream for `seed`.
    #[must_use]
    pub fn with_seed(store: OptionStore, seed: u64) -> Self {
        Self::new(store, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Engine over `store` seeded from OS entropy.
    #[must_use]
    pub fn from_entropy(store: OptionStore) -> Self {
        Self::new(store, ChaCha20Rng::from_entropy())
    }
}

impl<R: RngCore> SpinEngine<R> {
    #[must_use]
    pub fn new(store: OptionStore, rng: R) -> Self {
        Self {
            store,
            state: SpinState::default(),
            pending: None,
            rng,
            spins: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &OptionStore {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &WheelConfig {
        self.store.config()
    }

    #[must_use]
    pub const fn state(&self) -> &SpinState {
        &self.state
    }

    #[must_use]
    pub const fn rotation_degrees(&self) -> f64 {
        self.state.rotation_degrees
    }

    #[must_use]
    pub const fn is_spinning(&self) -> bool {
        self.state.is_spinning
    }

    #[must_use]
    pub const fn winner(&self) -> Option<&PrizeOption> {
        self.state.winner.as_ref()
    }

    /// Number of spins started over the engine's lifetime.
    #[must_use]
    pub const fn spins(&self) -> u64 {
        self.spins
    }

    /// Whether the spin trigger should be enabled.
    #[must_use]
    pub fn can_spin(&self) -> bool {
        !self.state.is_spinning && self.store.is_valid_total()
    }

    pub fn add_option(&mut self) -> Option<u32> {
        self.store.add_option()
    }

    pub fn remove_option(&mut self, id: u32) -> bool {
        self.store.remove_option(id)
    }

    pub fn update_option(&mut self, id: u32, update: OptionUpdate) -> bool {
        self.store.update_option(id, update)
    }

    pub fn even_distribute(&mut self) {
        self.store.even_distribute();
    }

    /// Pick a winner, advance the accumulated rotation and enter the spinning
    /// state.
    ///
    /// # Errors
    ///
    /// Returns a [`SpinRefusal`] and leaves every piece of state untouched when
    /// a spin is in flight or the probability total forbids spinning.
    pub fn spin(&mut self) -> Result<SpinTicket, SpinRefusal> {
        let ticket = self.prepare_spin().inspect_err(|refusal| {
            log::debug!("{LOG_SPIN_REFUSED}: {refusal}");
        })?;

        self.state.is_spinning = true;
        self.state.winner = None;
        self.state.rotation_degrees = ticket.plan.to;
        self.pending = Some(ticket.winner.clone());
        self.spins = self.spins.saturating_add(1);

        log::info!(
            "{LOG_SPIN_STARTED}: spin={} winner_id={} index={} rotation={:.1}",
            self.spins,
            ticket.winner.id,
            ticket.index,
            ticket.plan.to
        );
        Ok(ticket)
    }

    fn prepare_spin(&mut self) -> Result<SpinTicket, SpinRefusal> {
        if self.state.is_spinning {
            return Err(SpinRefusal::AlreadySpinning);
        }
        let total = self.store.total_probability();
        if total <= 0.0 {
            return Err(SpinRefusal::ZeroTotal);
        }
        if !self.store.is_valid_total() {
            return Err(SpinRefusal::InvalidTotal { total });
        }

        let options = self.store.options();
        let selection = select_weighted(options, &mut self.rng).ok_or(SpinRefusal::ZeroTotal)?;
        let plan = plan_rotation(
            self.state.rotation_degrees,
            selection.index,
            options.len(),
            self.store.config().extra_spin_degrees,
        )?;

        Ok(SpinTicket {
            index: selection.index,
            winner: options[selection.index].clone(),
            plan,
            trace: selection.trace,
            settle_after: self.store.config().spin_duration(),
        })
    }

    /// Settle the in-flight spin: leave the spinning state and publish the
    /// winner. Returns `None` when nothing is pending.
    pub fn finish_spin(&mut self) -> Option<&PrizeOption> {
        let winner = self.pending.take()?;
        log::info!(
            "{LOG_SPIN_SETTLED}: spin={} winner_id={} text={:?}",
            self.spins,
            winner.id,
            winner.text
        );
        self.state.is_spinning = false;
        self.state.winner = Some(winner);
        self.state.winner.as_ref()
    }

    /// Spin, wait out the animation, then settle.
    ///
    /// Dropping the returned future after the spin started leaves the winner
    /// pending; a later [`SpinEngine::finish_spin`] still commits it.
    ///
    /// # Errors
    ///
    /// Returns the [`SpinRefusal`] from [`SpinEngine::spin`].
    #[cfg(feature = "async")]
    pub async fn spin_and_settle(&mut self) -> Result<PrizeOption, SpinRefusal> {
        let ticket = self.spin()?;
        tokio::time::sleep(ticket.settle_after).await;
        Ok(self.finish_spin().cloned().unwrap_or(ticket.winner))
    }
}

impl Default for SpinEngine<ChaCha20Rng> {
    fn default() -> Self {
        Self::from_entropy(OptionStore::default())
    }
}
