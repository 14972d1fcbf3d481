use std::ops::RangeInclusive;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::Rng;

pub const DEFAULT_PREFIX: &str = "tempfile_";
pub const DEFAULT_SUFFIX: &str = ".txt";
pub const DEFAULT_RAND: RangeInclusive<u32> = 1000..=9999;

/// `<prefix><time>_<random><suffix>`
///
/// Not unique on its own; the caller opens with `create_new` and retries.
pub fn unique_name<R: Rng>(
    prefix: &str,
    suffix: &str,
    time: u128,
    range: &RangeInclusive<u32>,
    rng: &mut R,
) -> String {
    format!(
        "{}{}_{}{}",
        prefix,
        time,
        rng.gen_range(range.clone()),
        suffix
    )
}

/// Nanoseconds since the Unix epoch.
pub fn time_sample() -> u128 {
    // a clock before 1970 is not worth failing over; the random part still varies
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}
