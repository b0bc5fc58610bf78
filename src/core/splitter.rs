use crate::utils::error::{PairingError, Result};

/// Splits `data` into `chunks_number` contiguous chunks whose sizes differ by
/// at most one.
///
/// Chunk `i` covers `[floor(i * len / n), floor((i + 1) * len / n))`. When
/// there are at least as many chunks as elements, every element gets its own
/// chunk.
pub fn split<T>(data: Vec<T>, chunks_number: usize) -> Result<Vec<Vec<T>>> {
    if chunks_number == 0 {
        return Err(PairingError::InvalidArgument {
            name: "chunks_number".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if data.is_empty() {
        return Ok(Vec::new());
    }

    let len = data.len();
    if chunks_number >= len {
        return Ok(data.into_iter().map(|item| vec![item]).collect());
    }

    let mut chunks = Vec::with_capacity(chunks_number);
    let mut items = data.into_iter();
    for i in 0..chunks_number {
        let start = i * len / chunks_number;
        let end = (i + 1) * len / chunks_number;
        chunks.push(items.by_ref().take(end - start).collect());
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes<T>(chunks: &[Vec<T>]) -> Vec<usize> {
        chunks.iter().map(Vec::len).collect()
    }

    #[test]
    fn test_zero_chunks_is_invalid() {
        let err = split(vec![1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, PairingError::InvalidArgument { .. }));

        assert!(split(Vec::<i32>::new(), 0).is_err());
    }

    #[test]
    fn test_empty_data_gives_no_chunks() {
        assert!(split(Vec::<i32>::new(), 4).unwrap().is_empty());
    }

    #[test]
    fn test_more_chunks_than_items_gives_singletons() {
        let chunks = split(vec!['a', 'b', 'c'], 8).unwrap();
        assert_eq!(chunks, vec![vec!['a'], vec!['b'], vec!['c']]);

        let exact = split(vec!['a', 'b'], 2).unwrap();
        assert_eq!(exact, vec![vec!['a'], vec!['b']]);
    }

    #[test]
    fn test_uneven_split_follows_running_floor() {
        // target size 10/3: cuts at 0, 3, 6, 10
        let chunks = split((0..10).collect::<Vec<_>>(), 3).unwrap();
        assert_eq!(sizes(&chunks), vec![3, 3, 4]);
        assert_eq!(chunks[2], vec![6, 7, 8, 9]);
    }

    #[test]
    fn test_single_chunk_is_whole_input() {
        let chunks = split(vec![1, 2, 3, 4], 1).unwrap();
        assert_eq!(chunks, vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn test_reconstruction_and_balance() {
        for len in 1..40usize {
            for n in 1..12usize {
                let data: Vec<usize> = (0..len).collect();
                let chunks = split(data.clone(), n).unwrap();

                assert_eq!(chunks.len(), n.min(len), "len={len} n={n}");
                assert_eq!(chunks.concat(), data, "len={len} n={n}");

                let min = chunks.iter().map(Vec::len).min().unwrap();
                let max = chunks.iter().map(Vec::len).max().unwrap();
                assert!(max - min <= 1, "len={len} n={n} sizes={:?}", sizes(&chunks));
            }
        }
    }
}
