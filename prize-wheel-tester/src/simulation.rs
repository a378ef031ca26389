use colored::Colorize;
use prize_wheel_engine::{OptionStore, SpinEngine, SpinRefusal, slice_under_pointer};
use rand::RngCore;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Observed vs configured odds for one option.
#[derive(Debug, Clone, Serialize)]
pub struct OptionTally {
    pub id: u32,
    pub text: String,
    pub weight: f64,
    pub expected_rate: f64,
    pub wins: u64,
    pub observed_rate: f64,
}

impl OptionTally {
    #[must_use]
    pub fn drift(&self) -> f64 {
        (self.observed_rate - self.expected_rate).abs()
    }
}

/// Outcome of a seeded batch of spins.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub spins_requested: u64,
    pub spins_completed: u64,
    pub tolerance: f64,
    pub final_rotation: f64,
    pub tallies: Vec<OptionTally>,
    pub refusal: Option<String>,
    pub failures: Vec<String>,
    pub passed: bool,
    pub duration: Duration,
}

/// Drive `engine` through `spins` spin/settle cycles and check invariants.
pub fn run_simulation<R: RngCore>(
    engine: &mut SpinEngine<R>,
    seed: u64,
    spins: u64,
    tolerance: f64,
    verbose: bool,
) -> SimulationReport {
    let start = Instant::now();
    let slices = engine.store().len();
    let mut wins = vec![0u64; slices];
    let mut failures = Vec::new();
    let mut refusal = None;
    let mut completed = 0u64;
    let mut last_rotation = engine.rotation_degrees();

    for spin in 1..=spins {
        let ticket = match engine.spin() {
            Ok(ticket) => ticket,
            Err(err) => {
                log::warn!("spin {spin} refused: {err}");
                if !matches!(err, SpinRefusal::AlreadySpinning) {
                    refusal = Some(err.to_string());
                }
                break;
            }
        };

        if ticket.plan.to <= last_rotation {
            failures.push(format!(
                "spin {spin}: rotation went backwards ({last_rotation:.3} -> {:.3})",
                ticket.plan.to
            ));
        }
        if slice_under_pointer(ticket.plan.to, slices) != Some(ticket.index) {
            failures.push(format!(
                "spin {spin}: pointer does not rest on slice {}",
                ticket.index
            ));
        }
        if ticket.winner.weight() <= 0.0 {
            failures.push(format!(
                "spin {spin}: zero-weight option {} won",
                ticket.winner.id
            ));
        }
        last_rotation = ticket.plan.to;

        if let Some(winner) = engine.finish_spin() {
            if verbose {
                println!(
                    "  {} {:>6} {} -> {} ({:.1}°)",
                    "spin".dimmed(),
                    spin,
                    winner.id.to_string().cyan(),
                    winner.text.bold(),
                    ticket.plan.to
                );
            }
            wins[ticket.index] += 1;
            completed += 1;
        }
    }

    let tallies = build_tallies(engine.store(), &wins, completed);
    if refusal.is_none() && completed > 0 {
        for tally in &tallies {
            if tally.drift() > tolerance {
                failures.push(format!(
                    "option {} '{}' drifted: expected {:.4}, observed {:.4}",
                    tally.id, tally.text, tally.expected_rate, tally.observed_rate
                ));
            }
        }
    } else if refusal.is_some() {
        failures.push(String::from("spin trigger refused; no odds to compare"));
    }

    SimulationReport {
        seed,
        spins_requested: spins,
        spins_completed: completed,
        tolerance,
        final_rotation: engine.rotation_degrees(),
        tallies,
        refusal,
        passed: failures.is_empty(),
        failures,
        duration: start.elapsed(),
    }
}

fn build_tallies(store: &OptionStore, wins: &[u64], completed: u64) -> Vec<OptionTally> {
    let total = store.total_probability();
    let completed = u32::try_from(completed).map_or(f64::from(u32::MAX), f64::from);
    store
        .iter()
        .zip(wins.iter())
        .map(|(option, count)| {
            let weight = option.weight();
            let expected_rate = if total > 0.0 { weight / total } else { 0.0 };
            let observed_rate = if completed > 0.0 {
                u32::try_from(*count).map_or(f64::from(u32::MAX), f64::from) / completed
            } else {
                0.0
            };
            OptionTally {
                id: option.id,
                text: option.text.clone(),
                weight,
                expected_rate,
                wins: *count,
                observed_rate,
            }
        })
        .collect()
}
