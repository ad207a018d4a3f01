#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps `f` over `collection`, keeping input order in the output.
///
/// Runs on rayon when the `parallel` feature is on and the collection is
/// large enough to be worth it. Order is preserved either way, so callers
/// get identical results with or without the feature.
#[inline]
pub fn map_ordered<T, U, F>(collection: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
    {
        // Heuristic: Don't spin up Rayon for small batches
        if collection.len() > 16 {
            return collection.par_iter().map(f).collect();
        }
        collection.iter().map(f).collect()
    }
    #[cfg(any(not(feature = "parallel"), target_arch = "wasm32"))]
    {
        collection.iter().map(f).collect()
    }
}
