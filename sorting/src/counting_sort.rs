use crate::error::SortError;

/// Sorts values known to lie in `[0, upper_bound)` in O(n + upper_bound).
///
/// # Panics
///
/// Panics if any element is `>= upper_bound`. Use [`try_counting_sort`] when
/// the input hasn't been validated.
pub fn counting_sort(arr: &mut [usize], upper_bound: usize) {
    let mut counters = vec![0usize; upper_bound];
    for &value in arr.iter() {
        counters[value] += 1;
    }

    let mut current_idx = 0;
    for (value, &count) in counters.iter().enumerate() {
        let end_idx = current_idx + count;
        arr[current_idx..end_idx].fill(value);
        current_idx = end_idx;
    }
}

/// Checks every element against `upper_bound` before sorting.
///
/// # Errors
///
/// Returns [`SortError::ZeroUpperBound`] if `upper_bound` is zero and
/// [`SortError::OutOfDomain`] for the first element outside `[0, upper_bound)`.
/// The slice is left untouched on error.
pub fn try_counting_sort(arr: &mut [usize], upper_bound: usize) -> Result<(), SortError> {
    if upper_bound == 0 {
        return Err(SortError::ZeroUpperBound);
    }

    if let Some(index) = arr.iter().position(|&value| value >= upper_bound) {
        return Err(SortError::OutOfDomain {
            index,
            value: arr[index],
            upper_bound,
        });
    }

    counting_sort(arr, upper_bound);

    Ok(())
}
