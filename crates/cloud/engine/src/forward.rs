//! Forward cloud generator: `(Ex, En, He)` → cloud drops.
//!
//! Each drop is produced independently:
//!
//! ```text
//!   En' ~ N(En, He²)          entropy realization
//!   x   ~ N(Ex, En'²)         drop value
//!   μ   = exp(-(x-Ex)² / 2En²) membership, nominal En
//! ```
//!
//! The membership curve uses the nominal `En`, not `En'`. `En'` only drives
//! the dispersion of the value.

use cloudeval_types::{CloudDrop, CloudError, CloudModel, CloudResult};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::random::{chunk_seed, NormalSource, SeededNormalSource};

/// Drops generated per parallel work unit.
pub const PARALLEL_CHUNK_SIZE: usize = 4096;

/// Generate `count` drops from `model`, drawing from `source`.
///
/// `count == 0` yields an empty vector. A model with `En == 0` is rejected
/// because the membership formula divides by it.
pub fn generate<S: NormalSource + ?Sized>(
    model: &CloudModel,
    count: usize,
    source: &mut S,
) -> CloudResult<Vec<CloudDrop>> {
    ensure_generatable(model)?;

    let drops: Vec<CloudDrop> = (0..count).map(|_| draw(model, source)).collect();

    debug!(count, model = %model, "generated cloud drops");
    Ok(drops)
}

/// Generate `count` drops on the rayon pool.
///
/// Work is split into chunks of [`PARALLEL_CHUNK_SIZE`]; chunk `i` draws
/// from its own source seeded with a value derived from `(seed, i)`. The
/// output depends only on `seed`, not on the number of threads.
pub fn generate_parallel(
    model: &CloudModel,
    count: usize,
    seed: u64,
) -> CloudResult<Vec<CloudDrop>> {
    ensure_generatable(model)?;

    let chunks = count.div_ceil(PARALLEL_CHUNK_SIZE);
    let drops: Vec<CloudDrop> = (0..chunks)
        .into_par_iter()
        .flat_map_iter(|chunk| {
            let start = chunk * PARALLEL_CHUNK_SIZE;
            let len = PARALLEL_CHUNK_SIZE.min(count - start);
            let mut source = SeededNormalSource::seeded(chunk_seed(seed, chunk as u64));
            (0..len)
                .map(|_| draw(model, &mut source))
                .collect::<Vec<_>>()
        })
        .collect();

    debug!(count, chunks, model = %model, "generated cloud drops in parallel");
    Ok(drops)
}

/// Membership degree of `x` under the model's expectation curve.
pub fn membership(model: &CloudModel, x: f64) -> CloudResult<f64> {
    ensure_generatable(model)?;
    Ok(membership_unchecked(model, x))
}

/// Sample the expectation curve `exp(-(x-Ex)² / 2En²)` at `points` evenly
/// spaced positions over `[lo, hi]`, endpoints included.
pub fn expectation_curve(
    model: &CloudModel,
    lo: f64,
    hi: f64,
    points: usize,
) -> CloudResult<Vec<(f64, f64)>> {
    ensure_generatable(model)?;
    if points < 2 {
        return Err(CloudError::invalid(
            "points",
            format!("need at least 2 curve points, got {}", points),
        ));
    }
    if !(lo.is_finite() && hi.is_finite()) || lo >= hi {
        return Err(CloudError::invalid(
            "range",
            format!("expected finite lo < hi, got [{}, {}]", lo, hi),
        ));
    }

    let step = (hi - lo) / (points - 1) as f64;
    Ok((0..points)
        .map(|i| {
            let x = if i == points - 1 { hi } else { lo + step * i as f64 };
            (x, membership_unchecked(model, x))
        })
        .collect())
}

fn ensure_generatable(model: &CloudModel) -> CloudResult<()> {
    if model.en() <= 0.0 {
        return Err(CloudError::invalid(
            "En",
            format!("entropy must be > 0 for forward generation, got {}", model.en()),
        ));
    }
    Ok(())
}

fn draw<S: NormalSource + ?Sized>(model: &CloudModel, source: &mut S) -> CloudDrop {
    let en_prime = source.sample_normal(model.en(), model.he());
    let value = source.sample_normal(model.ex(), en_prime.abs());
    let membership = membership_unchecked(model, value);
    trace!(en_prime, value, membership, "drop");
    CloudDrop { value, membership }
}

fn membership_unchecked(model: &CloudModel, x: f64) -> f64 {
    let z = (x - model.ex()) / model.en();
    (-0.5 * z * z).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedNormalSource;
    use proptest::prelude::*;

    fn model(ex: f64, en: f64, he: f64) -> CloudModel {
        CloudModel::new(ex, en, he).unwrap()
    }

    #[test]
    fn returns_exactly_count_drops() {
        let mut src = SeededNormalSource::seeded(1);
        let drops = generate(&model(50.0, 10.0, 1.0), 1234, &mut src).unwrap();
        assert_eq!(drops.len(), 1234);
    }

    #[test]
    fn zero_count_is_empty_not_error() {
        let mut src = SeededNormalSource::seeded(1);
        let drops = generate(&model(50.0, 10.0, 1.0), 0, &mut src).unwrap();
        assert!(drops.is_empty());
    }

    #[test]
    fn zero_entropy_rejected() {
        let mut src = SeededNormalSource::seeded(1);
        let err = generate(&model(50.0, 0.0, 0.0), 10, &mut src).unwrap_err();
        assert!(matches!(err, CloudError::InvalidParameter { ref parameter, .. } if parameter == "En"));
    }

    #[test]
    fn scripted_drop_values_are_exact() {
        // En' = 10 + 1*1 = 11, x = 50 + 11*1 = 61, μ = exp(-0.5 * 1.1²)
        let mut src = ScriptedNormalSource::new(vec![1.0]);
        let drops = generate(&model(50.0, 10.0, 1.0), 1, &mut src).unwrap();
        assert_eq!(drops[0].value, 61.0);
        assert!((drops[0].membership - (-0.5f64 * 1.21).exp()).abs() < 1e-12);
        assert_eq!(src.draws(), 2);
    }

    #[test]
    fn membership_uses_nominal_entropy() {
        // En' = 10 + 5*(-3) = -5, |En'| = 5, x = 50 + 5*(-3) = 35
        let mut src = ScriptedNormalSource::new(vec![-3.0]);
        let drops = generate(&model(50.0, 10.0, 5.0), 1, &mut src).unwrap();
        assert_eq!(drops[0].value, 35.0);
        let expected = (-0.5f64 * 1.5 * 1.5).exp();
        assert!((drops[0].membership - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_hyper_entropy_is_allowed() {
        let mut src = SeededNormalSource::seeded(5);
        let drops = generate(&model(0.0, 1.0, 0.0), 100, &mut src).unwrap();
        assert_eq!(drops.len(), 100);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let m = model(62.5, 4.17, 0.5);
        let a = generate(&m, 200, &mut SeededNormalSource::seeded(9)).unwrap();
        let b = generate(&m, 200, &mut SeededNormalSource::seeded(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_generation_count_and_determinism() {
        let m = model(50.0, 10.0, 1.0);
        let count = PARALLEL_CHUNK_SIZE * 3 + 17;
        let a = generate_parallel(&m, count, 77).unwrap();
        let b = generate_parallel(&m, count, 77).unwrap();
        assert_eq!(a.len(), count);
        assert_eq!(a, b);
        assert!(generate_parallel(&m, 0, 77).unwrap().is_empty());
    }

    #[test]
    fn parallel_generation_rejects_zero_entropy() {
        assert!(generate_parallel(&model(1.0, 0.0, 0.0), 10, 1).is_err());
    }

    #[test]
    fn membership_peaks_at_expectation() {
        let m = model(50.0, 10.0, 0.0);
        assert_eq!(membership(&m, 50.0).unwrap(), 1.0);
        let at_one_en = membership(&m, 60.0).unwrap();
        assert!((at_one_en - (-0.5f64).exp()).abs() < 1e-12);
        assert!(membership(&model(50.0, 0.0, 0.0), 50.0).is_err());
    }

    #[test]
    fn expectation_curve_spans_range() {
        let m = model(50.0, 10.0, 0.0);
        let curve = expectation_curve(&m, 0.0, 100.0, 201).unwrap();
        assert_eq!(curve.len(), 201);
        assert_eq!(curve[0].0, 0.0);
        assert_eq!(curve[200].0, 100.0);
        assert_eq!(curve[100], (50.0, 1.0));
    }

    #[test]
    fn expectation_curve_rejects_bad_input() {
        let m = model(50.0, 10.0, 0.0);
        assert!(expectation_curve(&m, 0.0, 100.0, 1).is_err());
        assert!(expectation_curve(&m, 10.0, 10.0, 5).is_err());
        assert!(expectation_curve(&m, f64::NAN, 10.0, 5).is_err());
    }

    proptest! {
        #[test]
        fn drops_have_bounded_membership(
            ex in -100.0f64..100.0,
            en in 0.01f64..50.0,
            he in 0.0f64..10.0,
            count in 0usize..300,
            seed in any::<u64>(),
        ) {
            let m = model(ex, en, he);
            let drops = generate(&m, count, &mut SeededNormalSource::seeded(seed)).unwrap();
            prop_assert_eq!(drops.len(), count);
            for d in &drops {
                prop_assert!(d.value.is_finite());
                prop_assert!((0.0..=1.0).contains(&d.membership));
            }
        }
    }
}
