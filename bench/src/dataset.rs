use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Inputs shared by every benchmark, generated from a single seed
pub struct Datasets {
    pub hexadecimal_digits: Vec<usize>,
    pub unsorted: Vec<f64>,
    pub reverse_sorted: Vec<f64>,
    pub sorted: Vec<f64>,
}

impl Datasets {
    pub const HEXADECIMAL_DIGITS: &'static str = "Hexadecimal digits";
    pub const UNSORTED: &'static str = "Unsorted array";
    pub const REVERSE_SORTED: &'static str = "Reverse sorted array";
    pub const SORTED: &'static str = "Sorted array";

    pub fn generate(size: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // [7, 12, 11...]
        let hexadecimal_digits = (0..size).map(|_| rng.gen_range(0x0..0x10)).collect();

        // [0.088, 0.976, 0.180...]
        let unsorted: Vec<f64> = (0..size).map(|_| rng.gen()).collect();

        let mut sorted = unsorted.clone();
        sorted.sort_by(f64::total_cmp);
        let reverse_sorted = sorted.iter().rev().copied().collect();

        Self {
            hexadecimal_digits,
            unsorted,
            reverse_sorted,
            sorted,
        }
    }

    pub fn floats(&self) -> [(&'static str, &[f64]); 3] {
        [
            (Self::UNSORTED, self.unsorted.as_slice()),
            (Self::REVERSE_SORTED, self.reverse_sorted.as_slice()),
            (Self::SORTED, self.sorted.as_slice()),
        ]
    }
}
