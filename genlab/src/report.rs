//! Event payloads for [`Property::label`](crate::Property::label).

use crate::bucket::to_range;
use crate::index::ukey;
use crate::{GenlabError, Result};
use std::hash::Hash;

/// Bucket width used for duplicate-key counts.
pub const DUPES_WIDTH: i64 = 5;

/// `"dupes: lo-hi"` for the number of repeated keys in `pairs`.
pub fn dupes_event<K, V>(pairs: &[(K, V)]) -> Result<String>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    let duplicates = ukey(pairs).duplicates();
    let bucket = to_range(DUPES_WIDTH, count(duplicates)?)?;
    Ok(bucket.label("dupes"))
}

/// `"{prefix}: lo-hi"` for a length or size measurement.
pub fn length_event(prefix: &str, width: i64, len: usize) -> Result<String> {
    Ok(to_range(width, count(len)?)?.label(prefix))
}

fn count(n: usize) -> Result<i64> {
    i64::try_from(n).map_err(|_| GenlabError::InvalidArgument {
        message: format!("count {n} does not fit in i64"),
    })
}
