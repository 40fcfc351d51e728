/*
Tie-break randomness for staff selection.

Equally scored candidates are picked at random so assignments spread
across the team instead of piling onto whoever sorts first. All
randomness goes through a `TieBreaker` so callers can swap in a
seeded stream or a fixed stub.
*/

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub trait TieBreaker {
    /// Return an index in `[0, len)`. Only called with `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Pick one element of `candidates` uniformly via `breaker`.
pub fn pick<'a, T>(breaker: &mut dyn TieBreaker, candidates: &'a [T]) -> Option<&'a T> {
    match candidates.len() {
        0 => None,
        1 => candidates.first(),
        len => candidates.get(breaker.pick_index(len).min(len - 1)),
    }
}

/// Production picker backed by the thread-local OS-seeded RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngPicker;

impl TieBreaker for ThreadRngPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible picker: same seed, same sequence of picks.
#[derive(Debug, Clone)]
pub struct SeededPicker {
    inner: Pcg64Mcg,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl TieBreaker for SeededPicker {
    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Last;

    impl TieBreaker for Last {
        fn pick_index(&mut self, len: usize) -> usize {
            len - 1
        }
    }

    struct OutOfRange;

    impl TieBreaker for OutOfRange {
        fn pick_index(&mut self, len: usize) -> usize {
            len + 10
        }
    }

    #[test]
    fn pick_empty_is_none() {
        let empty: [u8; 0] = [];
        assert!(pick(&mut ThreadRngPicker, &empty).is_none());
    }

    #[test]
    fn pick_single_never_consults_breaker() {
        assert_eq!(pick(&mut OutOfRange, &["only"]), Some(&"only"));
    }

    #[test]
    fn pick_uses_breaker_index() {
        assert_eq!(pick(&mut Last, &[1, 2, 3]), Some(&3));
    }

    #[test]
    fn pick_clamps_bad_index() {
        assert_eq!(pick(&mut OutOfRange, &[1, 2, 3]), Some(&3));
    }

    #[test]
    fn seeded_picker_is_reproducible() {
        let mut a = SeededPicker::new(42);
        let mut b = SeededPicker::new(42);
        let seq_a: Vec<usize> = (0..32).map(|_| a.pick_index(7)).collect();
        let seq_b: Vec<usize> = (0..32).map(|_| b.pick_index(7)).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|&i| i < 7));
    }

    #[test]
    fn thread_picker_stays_in_range() {
        let mut p = ThreadRngPicker;
        for _ in 0..100 {
            assert!(p.pick_index(3) < 3);
        }
    }
}
