use prize_wheel_engine::{OptionStore, PrizeOption, WheelConfig, select_weighted};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SAMPLE_SIZE: usize = 20_000;
const TOLERANCE: f64 = 0.02;

fn options(weights: &[f64]) -> Vec<PrizeOption> {
    weights
        .iter()
        .zip(1u32..)
        .map(|(weight, id)| PrizeOption::new(id, format!("Prize {id}"), *weight))
        .collect()
}

fn tally(opts: &[PrizeOption], seed: u64) -> Vec<usize> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut counts = vec![0usize; opts.len()];
    for _ in 0..SAMPLE_SIZE {
        let picked = select_weighted(opts, &mut rng).expect("positive total");
        counts[picked.index] += 1;
    }
    counts
}

fn rate(count: usize) -> f64 {
    f64::from(u32::try_from(count).expect("count fits"))
        / f64::from(u32::try_from(SAMPLE_SIZE).expect("sample size fits"))
}

#[test]
fn uniform_weights_select_each_slice_equally() {
    for slices in 2..=8 {
        let mut store = OptionStore::new(options(&vec![1.0; slices]), WheelConfig::default())
            .expect("valid store");
        store.even_distribute();
        let counts = tally(store.options(), 0xACED + slices as u64);
        let expected = 1.0 / f64::from(u32::try_from(slices).expect("fits"));
        for (index, count) in counts.iter().enumerate() {
            let observed = rate(*count);
            assert!(
                (observed - expected).abs() <= TOLERANCE,
                "slice {index}/{slices} drifted: observed {observed:.4}"
            );
        }
    }
}

#[test]
fn skewed_weights_track_configured_odds() {
    let opts = options(&[85.0, 10.0, 5.0, 0.0, 0.0]);
    let counts = tally(&opts, 0x0DD5);
    assert!((rate(counts[0]) - 0.85).abs() <= TOLERANCE);
    assert!((rate(counts[1]) - 0.10).abs() <= TOLERANCE);
    assert!((rate(counts[2]) - 0.05).abs() <= TOLERANCE);
    assert_eq!(counts[3], 0, "zero-weight option was selected");
    assert_eq!(counts[4], 0, "zero-weight option was selected");
}

#[test]
fn interleaved_zero_weights_are_unreachable() {
    let opts = options(&[0.0, 50.0, 0.0, 50.0, 0.0, 0.0]);
    let counts = tally(&opts, 0xBEEF);
    assert_eq!(counts[0] + counts[2] + counts[4] + counts[5], 0);
    assert!((rate(counts[1]) - 0.5).abs() <= TOLERANCE);
}
