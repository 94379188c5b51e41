//! Hybrid introspective sort.
//!
//! Ranges shorter than [`INSERTION_SORT_THRESHOLD`] are insertion sorted,
//! longer ones are partitioned around a median-of-three pivot until the depth
//! budget runs out, at which point the remaining range is heapsorted.

use std::ops::RangeInclusive;

use tracing::trace;

use crate::error::SortError;

/// Ranges with `right - left` below this are handed to [`insertion_sort`].
pub const INSERTION_SORT_THRESHOLD: usize = 20;

const DEFAULT_DEPTH_FACTOR: f64 = 2.0;

/// Counters collected over a single sort call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Depth budget the sort started with
    pub depth_budget: usize,
    /// Deepest recursion level that reached a leaf or a partition
    pub max_depth: usize,
    pub partitions: usize,
    pub insertion_sorts: usize,
    pub heapsorts: usize,
}

/// Introsort with a configurable depth factor.
///
/// The depth budget is `floor(depth_factor * log2(len))`. The default factor
/// is 2.
#[derive(Clone, Copy, Debug)]
pub struct Introsort {
    depth_factor: f64,
}

impl Default for Introsort {
    fn default() -> Self {
        Self::new()
    }
}

impl Introsort {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            depth_factor: DEFAULT_DEPTH_FACTOR,
        }
    }

    /// Sets the multiplier applied to `log2(len)` when computing the depth budget
    ///
    /// A factor of zero sends every range above the insertion sort threshold
    /// straight to heapsort.
    #[must_use]
    pub const fn depth_factor(mut self, depth_factor: f64) -> Self {
        self.depth_factor = depth_factor;
        self
    }

    pub fn sort<T: PartialOrd + Clone>(&self, arr: &mut [T]) {
        self.sort_with_stats(arr);
    }

    pub fn sort_with_stats<T: PartialOrd + Clone>(&self, arr: &mut [T]) -> SortStats {
        let mut stats = SortStats {
            depth_budget: depth_limit_with_factor(arr.len(), self.depth_factor),
            ..SortStats::default()
        };

        introsort_recursive(arr, stats.depth_budget, 0, &mut stats);

        stats
    }
}

/// Sorts the whole slice.
pub fn introsort<T: PartialOrd + Clone>(arr: &mut [T]) {
    Introsort::new().sort(arr);
}

/// Sorts the inclusive range `[left, right]` of `arr` in place.
///
/// Negative bounds and `left >= right` are treated as an empty range.
/// Elements outside the range are left untouched.
///
/// # Panics
///
/// Panics if `right` is past the end of `arr`. See [`try_sort`] for a
/// checked variant.
pub fn sort<T: PartialOrd + Clone>(arr: &mut [T], left: isize, right: isize) {
    if let Some(range) = valid_range(left, right) {
        introsort(&mut arr[range]);
    }
}

/// Like [`sort`], but reports an out of bounds `right` instead of panicking.
///
/// # Errors
///
/// Returns [`SortError::RangeOutOfBounds`] if the range is non-empty and
/// `right >= arr.len()`. The slice is not modified in that case.
pub fn try_sort<T: PartialOrd + Clone>(
    arr: &mut [T],
    left: isize,
    right: isize,
) -> Result<(), SortError> {
    let Some(range) = valid_range(left, right) else {
        return Ok(());
    };

    if *range.end() >= arr.len() {
        return Err(SortError::RangeOutOfBounds {
            right: *range.end(),
            len: arr.len(),
        });
    }

    introsort(&mut arr[range]);

    Ok(())
}

fn valid_range(left: isize, right: isize) -> Option<RangeInclusive<usize>> {
    let (Ok(left), Ok(right)) = (usize::try_from(left), usize::try_from(right)) else {
        return None;
    };

    (left < right).then_some(left..=right)
}

/// Depth budget for a range of `len` elements: `floor(2 * log2(len))`
#[must_use]
pub fn depth_limit(len: usize) -> usize {
    depth_limit_with_factor(len, DEFAULT_DEPTH_FACTOR)
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn depth_limit_with_factor(len: usize, depth_factor: f64) -> usize {
    if len < 2 {
        return 0;
    }

    // saturating cast, negative factors end up at 0
    (depth_factor * (len as f64).log2()).floor() as usize
}

fn introsort_recursive<T: PartialOrd + Clone>(
    arr: &mut [T],
    depth_budget: usize,
    level: usize,
    stats: &mut SortStats,
) {
    let n = arr.len();

    if n <= 1 {
        return;
    }

    stats.max_depth = stats.max_depth.max(level);

    if n - 1 < INSERTION_SORT_THRESHOLD {
        stats.insertion_sorts += 1;
        insertion_sort(arr);
        return;
    }

    if depth_budget == 0 {
        trace!(len = n, level, "depth budget exhausted, falling back to heapsort");
        stats.heapsorts += 1;
        heapsort(arr);
        return;
    }

    let split = partition(arr);
    stats.partitions += 1;

    let (lower, upper) = arr.split_at_mut(split + 1);
    introsort_recursive(lower, depth_budget - 1, level + 1, stats);
    introsort_recursive(upper, depth_budget - 1, level + 1, stats);
}

/// Returns the median of three values, resolving ties with `<=`.
pub fn median_of_three<'a, T: PartialOrd>(a: &'a T, b: &'a T, c: &'a T) -> &'a T {
    if a <= b {
        if b <= c {
            // a <= b <= c
            b
        } else if a <= c {
            // a <= c < b
            c
        } else {
            // c < a <= b
            a
        }
    } else if a <= c {
        // b < a <= c
        a
    } else if b <= c {
        // b <= c < a
        c
    } else {
        // c < b < a
        b
    }
}

/// Hoare partition around the median of the first, middle and last elements.
///
/// Returns the split point: every element of `arr[..=split]` is `<=` the
/// pivot and every element of `arr[split + 1..]` is `>=` it. For slices of
/// two or more elements `split < arr.len() - 1`, so both sides are non-empty.
pub fn partition<T: PartialOrd + Clone>(arr: &mut [T]) -> usize {
    let Some(last) = arr.len().checked_sub(1) else {
        return 0;
    };

    let pivot = median_of_three(&arr[0], &arr[last / 2], &arr[last]).clone();

    let mut left = 0;
    let mut right = last;
    loop {
        // the pivot value itself (or an element swapped past the cursor) stops both scans
        while arr[left] < pivot {
            left += 1;
        }
        while arr[right] > pivot {
            right -= 1;
        }

        if left >= right {
            return right;
        }

        arr.swap(left, right);
        left += 1;
        right -= 1;
    }
}

pub fn insertion_sort<T: PartialOrd>(arr: &mut [T]) {
    for i in 1..arr.len() {
        let mut j = i;
        while j > 0 && arr[i] < arr[j - 1] {
            j -= 1;
        }

        if j != i {
            // shift arr[j..i] right by one and drop arr[i] into the gap
            arr[j..=i].rotate_right(1);
        }
    }
}

/// In-place heapsort; the heap lives directly in `arr`.
pub fn heapsort<T: PartialOrd>(arr: &mut [T]) {
    let n = arr.len();
    for i in (0..n / 2).rev() {
        heapify(arr, i);
    }
    for end in (1..n).rev() {
        arr.swap(0, end);
        heapify(&mut arr[..end], 0);
    }
}

fn heapify<T: PartialOrd>(heap: &mut [T], mut i: usize) {
    let n = heap.len();
    loop {
        let left = 2 * i + 1;
        let right = 2 * i + 2;
        let mut largest = i;

        if left < n && heap[largest] < heap[left] {
            largest = left;
        }
        if right < n && heap[largest] < heap[right] {
            largest = right;
        }

        if largest == i {
            break;
        }

        heap.swap(i, largest);
        i = largest;
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn random_vec(rng: &mut ChaCha8Rng, len: usize, max: i32) -> Vec<i32> {
        (0..len).map(|_| rng.gen_range(0..max)).collect()
    }

    fn sorted_copy(arr: &[i32]) -> Vec<i32> {
        let mut copy = arr.to_vec();
        copy.sort_unstable();
        copy
    }

    #[test]
    fn test_sort_floats() {
        let mut arr = vec![7.79, 3.05, 9.73, 2.87, 1.42];
        sort(&mut arr, 0, 4);
        assert_eq!(arr, vec![1.42, 2.87, 3.05, 7.79, 9.73]);
    }

    #[test]
    fn test_sort_constant() {
        let mut arr = vec![7; 10];
        sort(&mut arr, 0, 9);
        assert_eq!(arr, vec![7; 10]);

        let mut arr = vec![7.7; 100];
        sort(&mut arr, 0, 99);
        assert_eq!(arr, vec![7.7; 100]);
    }

    #[test]
    fn test_sort_empty_and_invalid_ranges() {
        let mut empty: Vec<i32> = Vec::new();
        sort(&mut empty, 0, -1);
        assert!(empty.is_empty());

        let mut arr = vec![3, 2, 1];
        sort(&mut arr, -1, 2);
        sort(&mut arr, 0, -2);
        sort(&mut arr, 2, 0);
        sort(&mut arr, 1, 1);
        assert_eq!(arr, vec![3, 2, 1]);

        let mut single = vec![42];
        sort(&mut single, 0, 0);
        assert_eq!(single, vec![42]);
    }

    #[test]
    fn test_sort_sub_range_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(128);
        let original = random_vec(&mut rng, 200, 1000);

        let mut arr = original.clone();
        sort(&mut arr, 30, 149);

        assert_eq!(arr[..30], original[..30]);
        assert_eq!(arr[150..], original[150..]);
        assert_eq!(arr[30..150], sorted_copy(&original[30..150])[..]);
    }

    #[test]
    fn test_sort_around_threshold() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for len in [2, 3, 19, 20, 21, 22, 40] {
            let arr = random_vec(&mut rng, len, 10);
            let mut sorted = arr.clone();
            introsort(&mut sorted);
            assert_eq!(sorted, sorted_copy(&arr), "len {len}");

            let mut decreasing: Vec<i32> = (0..len as i32).rev().collect();
            introsort(&mut decreasing);
            assert_eq!(decreasing, (0..len as i32).collect::<Vec<_>>(), "len {len}");
        }
    }

    #[test]
    fn test_sort_random_matches_std() {
        let mut rng = ChaCha8Rng::seed_from_u64(128);
        for len in [50, 100, 257, 1000, 4096] {
            for max in [2, 16, 1_000_000] {
                let arr = random_vec(&mut rng, len, max);
                let mut sorted = arr.clone();
                let last = isize::try_from(len).unwrap() - 1;
                sort(&mut sorted, 0, last);
                assert_eq!(sorted, sorted_copy(&arr), "len {len}, max {max}");
            }
        }
    }

    #[test]
    fn test_sort_random_floats() {
        let mut rng = ChaCha8Rng::seed_from_u64(128);
        let arr: Vec<f64> = (0..80).map(|_| rng.gen()).collect();

        let mut sorted = arr.clone();
        introsort(&mut sorted);

        let mut expected = arr;
        expected.sort_by(f64::total_cmp);
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut arr = random_vec(&mut rng, 500, 100);
        introsort(&mut arr);
        let once = arr.clone();
        introsort(&mut arr);
        assert_eq!(arr, once);
    }

    #[test]
    fn test_try_sort_out_of_bounds() {
        let mut arr = vec![3, 1, 2];
        assert_eq!(
            try_sort(&mut arr, 0, 3),
            Err(SortError::RangeOutOfBounds { right: 3, len: 3 })
        );
        assert_eq!(arr, vec![3, 1, 2]);

        assert_eq!(try_sort(&mut arr, 0, 2), Ok(()));
        assert_eq!(arr, vec![1, 2, 3]);

        // empty ranges are never out of bounds
        assert_eq!(try_sort(&mut arr, 5, -1), Ok(()));
    }

    #[test]
    #[should_panic]
    fn test_sort_panics_past_end() {
        let mut arr = vec![3, 1, 2];
        sort(&mut arr, 0, 10);
    }

    #[test]
    fn test_adversarial_inputs_stay_within_budget() {
        let len = 1 << 16;
        let ascending: Vec<i32> = (0..len).collect();
        let descending: Vec<i32> = (0..len).rev().collect();
        let constant = vec![5; 1 << 16];

        for input in [ascending, descending, constant] {
            let mut arr = input.clone();
            let stats = Introsort::new().sort_with_stats(&mut arr);

            assert_eq!(stats.depth_budget, 32);
            assert!(stats.max_depth <= stats.depth_budget);
            assert_eq!(arr, sorted_copy(&input));
        }
    }

    #[test]
    fn test_exhausted_budget_falls_back_to_heapsort() {
        let mut arr: Vec<i32> = (0..100).rev().collect();
        let stats = Introsort::new().depth_factor(0.0).sort_with_stats(&mut arr);

        assert_eq!(stats.depth_budget, 0);
        assert_eq!(stats.heapsorts, 1);
        assert_eq!(stats.partitions, 0);
        assert_eq!(arr, (0..100).collect::<Vec<_>>());

        // 8 levels of partitioning can't bring 2^16 elements down to insertion sort size
        let mut arr: Vec<i32> = (0..1 << 16).rev().collect();
        let stats = Introsort::new().depth_factor(0.5).sort_with_stats(&mut arr);

        assert_eq!(stats.depth_budget, 8);
        assert!(stats.heapsorts > 0);
        assert!(stats.max_depth <= 8);
        assert_eq!(arr, (0..1 << 16).collect::<Vec<_>>());
    }

    #[test]
    fn test_insertion_sort_threshold() {
        let mut arr: Vec<i32> = (0..21).rev().collect();
        let stats = Introsort::new().sort_with_stats(&mut arr);
        assert_eq!(stats.partitions, 1);
        assert_eq!(stats.heapsorts, 0);
        assert!(stats.insertion_sorts >= 1);
        assert_eq!(arr, (0..21).collect::<Vec<_>>());

        let mut arr: Vec<i32> = (0..20).rev().collect();
        let stats = Introsort::new().sort_with_stats(&mut arr);
        assert_eq!(stats.insertion_sorts, 1);
        assert_eq!(stats.partitions, 0);
        assert_eq!(arr, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_depth_limit() {
        assert_eq!(depth_limit(0), 0);
        assert_eq!(depth_limit(1), 0);
        assert_eq!(depth_limit(2), 2);
        // floor(2 * log2(3)) = floor(3.17)
        assert_eq!(depth_limit(3), 3);
        assert_eq!(depth_limit(1 << 16), 32);
        assert_eq!(depth_limit_with_factor(1 << 16, -1.0), 0);
    }

    #[test]
    fn test_median_of_three() {
        for (a, b, c) in [
            (1, 2, 3),
            (1, 3, 2),
            (2, 1, 3),
            (2, 3, 1),
            (3, 1, 2),
            (3, 2, 1),
        ] {
            assert_eq!(*median_of_three(&a, &b, &c), 2, "({a}, {b}, {c})");
        }

        assert_eq!(*median_of_three(&5, &5, &1), 5);
        assert_eq!(*median_of_three(&1, &5, &5), 5);
        assert_eq!(*median_of_three(&5, &1, &5), 5);
        assert_eq!(*median_of_three(&4, &4, &4), 4);
    }

    #[test]
    fn test_partition_splits_around_pivot() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for len in [2, 3, 10, 64, 255] {
            let mut arr = random_vec(&mut rng, len, 20);
            let split = partition(&mut arr);

            assert!(split < len - 1, "len {len}");
            let lower_max = arr[..=split].iter().max().unwrap();
            let upper_min = arr[split + 1..].iter().min().unwrap();
            assert!(lower_max <= upper_min, "len {len}");
        }

        let mut constant = vec![1; 50];
        let split = partition(&mut constant);
        assert!(split < 49);
    }

    #[test]
    fn test_insertion_sort() {
        let mut arr = vec![5, 2, 9, 1, 5, 6];
        insertion_sort(&mut arr);
        assert_eq!(arr, vec![1, 2, 5, 5, 6, 9]);

        let mut empty: Vec<i32> = Vec::new();
        insertion_sort(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_heapsort_sub_slice() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let original = random_vec(&mut rng, 100, 50);

        let mut arr = original.clone();
        heapsort(&mut arr[10..=60]);

        assert_eq!(arr[..10], original[..10]);
        assert_eq!(arr[61..], original[61..]);
        assert_eq!(arr[10..=60], sorted_copy(&original[10..=60])[..]);
    }
}
