use crate::domain::model::{Pair, Record};
use crate::utils::error::Result;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of the random order a chunk is paired in.
pub trait ChunkShuffler: Send {
    fn shuffle_chunk(&mut self, chunk: &mut [Record]);

    /// An independent shuffler for another worker, derived from this one so
    /// that a seeded run stays reproducible.
    fn for_worker(&mut self) -> Self
    where
        Self: Sized;
}

impl<R> ChunkShuffler for R
where
    R: Rng + SeedableRng + Send,
{
    fn shuffle_chunk(&mut self, chunk: &mut [Record]) {
        chunk.shuffle(self);
    }

    fn for_worker(&mut self) -> Self {
        R::seed_from_u64(self.random())
    }
}

/// Shuffles `chunk` in place, then pairs it as a single cycle.
pub fn pair_chunk<S>(chunk: &mut [Record], shuffler: &mut S) -> Result<Vec<Pair>>
where
    S: ChunkShuffler + ?Sized,
{
    shuffler.shuffle_chunk(chunk);
    cycle_pairs(chunk)
}

/// Pairs each record with its successor, wrapping the last back to the first.
///
/// Every name ends up exactly once as dwarf and once as giant. A lone record
/// is paired with itself.
pub fn cycle_pairs(chunk: &[Record]) -> Result<Vec<Pair>> {
    let names = chunk
        .iter()
        .map(Record::name)
        .collect::<Result<Vec<_>>>()?;

    let n = names.len();
    Ok((0..n)
        .map(|i| Pair::new(&*names[i], &*names[(i + 1) % n]))
        .collect())
}
