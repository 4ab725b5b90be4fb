//! Synthetic exponential array, written in fixed-size batches.

use anyhow::Result;
use rand::Rng;
use rand_distr::{Distribution, Exp1};

use crate::{
    cli::create_progress_bar,
    config::{Config, Size},
    download::ensure_dir,
    storage::{hdf5_store, ArrayWriter, Store},
};

/// Name of the dataset inside the container.
pub const ARRAY_NAME: &str = "x";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Total length of the array and the number of values generated at a time.
pub struct ArrayPlan {
    pub total: usize,
    pub batch: usize,
}

impl ArrayPlan {
    pub fn for_size(size: Size) -> Self {
        match size {
            Size::Small => ArrayPlan {
                total: 100_000,
                batch: 1_000,
            },
            Size::Full => ArrayPlan {
                total: 1_000_000_000,
                batch: 1_000_000,
            },
        }
    }

    /// `(offset, len)` of each batch; the last one may be short.
    pub fn batches(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.total)
            .step_by(self.batch.max(1))
            .map(move |offset| (offset, self.batch.min(self.total - offset)))
    }

    pub fn batch_count(&self) -> usize {
        self.total.div_ceil(self.batch.max(1))
    }
}

/// Ensures `random.hdf5` exists. Returns false when it already did.
pub fn materialize_array(config: &Config, size: Size) -> Result<bool> {
    let store = hdf5_store()?;

    materialize_array_with(config, size, store.as_ref())
}

/// Same as [`materialize_array`], writing through `store`.
pub fn materialize_array_with(config: &Config, size: Size, store: &dyn Store) -> Result<bool> {
    let path = config.array_file();
    if path.exists() {
        return Ok(false);
    }

    println!("Create random data for array exercise");
    ensure_dir(config.data_dir())?;

    let plan = ArrayPlan::for_size(size);
    let mut writer = store.create_array(&path, ARRAY_NAME, plan.total)?;
    fill_exponential(writer.as_mut(), &plan, &mut rand::thread_rng())?;

    Ok(true)
}

/// Writes `plan.total` samples of `Exp(1)`, holding one batch in memory at a time.
pub fn fill_exponential<R: Rng>(writer: &mut dyn ArrayWriter, plan: &ArrayPlan, rng: &mut R) -> Result<()> {
    let pb = create_progress_bar(plan.batch_count() as u64, "Writing random batches".to_string());
    let mut buffer: Vec<f32> = Vec::with_capacity(plan.batch);

    for (offset, len) in plan.batches() {
        buffer.clear();
        buffer.extend((0..len).map(|_| -> f32 { Exp1.sample(rng) }));
        writer.write_at(offset, &buffer)?;
        pb.inc(1);
    }

    pb.finish_with_message("Random array written");

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::storage::testing::MemoryStore;
    use rand::{rngs::StdRng, SeedableRng};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn should_pick_plan_from_size() {
        assert_eq!(ArrayPlan::for_size(Size::Small), ArrayPlan { total: 100_000, batch: 1_000 });
        assert_eq!(
            ArrayPlan::for_size(Size::Full),
            ArrayPlan { total: 1_000_000_000, batch: 1_000_000 }
        );
        assert_eq!(ArrayPlan::for_size(Size::Full).batch_count(), 1_000);
    }

    #[test]
    fn should_cover_total_with_short_last_batch() {
        let plan = ArrayPlan { total: 10, batch: 4 };

        assert_eq!(plan.batches().collect::<Vec<_>>(), vec![(0, 4), (4, 4), (8, 2)]);
        assert_eq!(plan.batch_count(), 3);
    }

    #[test]
    fn should_bound_writes_to_batch_size() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().join("data"));
        let store = MemoryStore::new((1, 1));

        assert!(materialize_array_with(&config, Size::Small, &store).unwrap());

        let log = store.array.borrow();
        let plan = ArrayPlan::for_size(Size::Small);
        assert_eq!(log.len, plan.total);
        assert_eq!(log.batches.len(), plan.batch_count());
        assert!(log.batches.iter().all(|&(_, len)| len == plan.batch));
        assert_eq!(log.batches.iter().map(|&(_, len)| len).sum::<usize>(), plan.total);
        assert!(log.min_value.unwrap() >= 0.0);
    }

    #[test]
    fn should_write_batches_in_order() {
        let plan = ArrayPlan { total: 7, batch: 3 };
        let store = MemoryStore::new((1, 1));
        let temp_dir = TempDir::new().unwrap();
        let mut writer = store
            .create_array(&temp_dir.path().join("random.hdf5"), ARRAY_NAME, plan.total)
            .unwrap();

        fill_exponential(writer.as_mut(), &plan, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(store.array.borrow().batches, vec![(0, 3), (3, 3), (6, 1)]);
    }

    #[test]
    fn should_skip_when_array_exists() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path());
        fs::write(config.array_file(), b"partial").unwrap();
        let store = MemoryStore::new((1, 1));

        for size in [Size::Small, Size::Full] {
            assert!(!materialize_array_with(&config, size, &store).unwrap());
        }

        assert!(store.array.borrow().batches.is_empty());
        assert_eq!(fs::read(config.array_file()).unwrap(), b"partial");
    }

    #[test]
    fn should_be_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path());
        let store = MemoryStore::new((1, 1));

        assert!(materialize_array_with(&config, Size::Small, &store).unwrap());
        let written = store.array.borrow().batches.len();
        assert!(!materialize_array_with(&config, Size::Small, &store).unwrap());

        assert_eq!(store.array.borrow().batches.len(), written);
    }

    #[cfg(not(feature = "hdf5"))]
    #[test]
    fn should_fail_fast_without_hdf5() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(temp_dir.path().join("data"));

        assert!(materialize_array(&config, Size::Small).is_err());
        assert!(!config.data_dir().exists());
    }
}
