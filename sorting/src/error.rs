#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("upper_bound must be positive")]
    ZeroUpperBound,
    #[error("value {value} at index {index} is outside of [0, {upper_bound})")]
    OutOfDomain {
        index: usize,
        value: usize,
        upper_bound: usize,
    },
    #[error("range end {right} is out of bounds for a sequence of length {len}")]
    RangeOutOfBounds { right: usize, len: usize },
    #[error("capacity must be positive")]
    ZeroCapacity,
}
