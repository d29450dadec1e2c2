//! Deterministic random stream for decision making.
//!
//! Every randomized choice draws from a [`DecisionRng`] seeded from the game
//! seed, the tick, the acting actor and a salt. Two runs over the same state
//! therefore make the same choices in the same order.

/// PCG-XSH-RR stream: 64-bit state, 32-bit output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionRng {
    state: u64,
}

impl DecisionRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// Stream for one actor's decision on one tick.
    pub fn for_decision(game_seed: u64, tick: u64, actor: u32, salt: u32) -> Self {
        Self::from_seed(compute_seed(game_seed, tick, actor, salt))
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform value in `0..bound`; zero when `bound` is zero.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Lemire's multiply-shift reduction.
        ((u64::from(self.next_u32()) * u64::from(bound)) >> 32) as u32
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.below(len.min(u32::MAX as usize) as u32) as usize
    }

    /// True with probability `percent / 100`.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.below(100) < percent
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }

    /// Picks an item with probability proportional to its weight.
    pub fn weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> Option<&'a T> {
        let total: u32 = items.iter().map(|(_, weight)| *weight).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.below(total);
        for (item, weight) in items {
            if roll < *weight {
                return Some(item);
            }
            roll -= weight;
        }
        None
    }
}

/// Mixes the entropy sources of one random event into a seed.
pub fn compute_seed(game_seed: u64, tick: u64, actor_id: u32, salt: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= tick.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor_id).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(salt).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_stream() {
        let mut a = DecisionRng::for_decision(42, 1_000, 3, 0);
        let mut b = DecisionRng::for_decision(42, 1_000, 3, 0);
        let xs: Vec<_> = (0..8).map(|_| a.next_u32()).collect();
        let ys: Vec<_> = (0..8).map(|_| b.next_u32()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_actors_diverge() {
        let mut a = DecisionRng::for_decision(42, 1_000, 3, 0);
        let mut b = DecisionRng::for_decision(42, 1_000, 4, 0);
        assert_ne!(
            (0..4).map(|_| a.next_u32()).collect::<Vec<_>>(),
            (0..4).map(|_| b.next_u32()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn chance_extremes() {
        let mut rng = DecisionRng::from_seed(9);
        assert!((0..100).all(|_| !rng.chance(0)));
        assert!((0..100).all(|_| rng.chance(100)));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = DecisionRng::from_seed(5);
        let mut items = [1, 2, 3, 4, 5, 6];
        rng.shuffle(&mut items);
        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn zero_weights_pick_nothing() {
        let mut rng = DecisionRng::from_seed(1);
        assert!(rng.weighted(&[("rat", 0u32)]).is_none());
        assert_eq!(rng.weighted(&[("rat", 0u32), ("goblin", 3)]), Some(&"goblin"));
    }
}
