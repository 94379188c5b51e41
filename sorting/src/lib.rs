#![deny(unused_must_use)]
#![warn(clippy::pedantic)]

pub use counting_sort::{counting_sort, try_counting_sort};
pub use error::SortError;
pub use introsort::{Introsort, SortStats, introsort, sort, try_sort};
pub use ring_buffer::RingBuffer;

mod counting_sort;
mod error;
pub mod introsort;
mod ring_buffer;
