//! Draw primitives over an injected random source. Every generation roll goes through here
//! so a fixed seed reproduces a layout exactly.

use rand_chacha::rand_core::Rng;

/// Uniform draw from `low..=high`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, low: usize, high: usize) -> usize {
    debug_assert!(low <= high);
    let range_size = (high - low) as u64 + 1;
    low + (rng.next_u64() % range_size) as usize
}

/// True with the given probability. Values at or beyond the unit interval's ends never roll.
pub fn roll_chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    if probability <= 0.0 {
        return false;
    }
    if probability >= 1.0 {
        return true;
    }
    let unit = (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
    unit < probability
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn random_between_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for _ in 0..500 {
            let value = random_between(&mut rng, 7, 13);
            assert!((7..=13).contains(&value));
        }
    }

    #[test]
    fn degenerate_range_always_returns_its_only_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(random_between(&mut rng, 4, 4), 4);
        }
    }

    #[test]
    fn certain_and_impossible_chances_ignore_the_stream() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert!((0..50).all(|_| roll_chance(&mut rng, 1.0)));
        assert!((0..50).all(|_| !roll_chance(&mut rng, 0.0)));
    }

    #[test]
    fn same_seed_rolls_the_same_sequence() {
        let mut left = ChaCha8Rng::seed_from_u64(77);
        let mut right = ChaCha8Rng::seed_from_u64(77);
        let left_rolls: Vec<usize> = (0..32).map(|_| random_between(&mut left, 0, 100)).collect();
        let right_rolls: Vec<usize> = (0..32).map(|_| random_between(&mut right, 0, 100)).collect();
        assert_eq!(left_rolls, right_rolls);
    }
}
