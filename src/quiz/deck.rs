use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shuffled queue of item indices.
///
/// Every index comes out once per pass; an empty queue is refilled with a
/// fresh shuffle of the whole range.
#[derive(Debug, Clone)]
pub struct ItemDeck {
    len: usize,
    queue: Vec<usize>,
    rng: StdRng,
}

impl ItemDeck {
    pub fn new(len: usize, rng: StdRng) -> Self {
        Self { len, queue: Vec::new(), rng }
    }

    /// Next index, or `None` for an empty deck
    pub fn draw(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        if self.queue.is_empty() {
            self.refill();
        }
        self.queue.pop()
    }

    /// Throws away the rest of the current pass
    pub fn reset(&mut self) {
        self.queue.clear();
    }

    /// Indices still to come in this pass
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn refill(&mut self) {
        self.queue.extend(0..self.len);
        self.queue.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn deck(len: usize) -> ItemDeck {
        ItemDeck::new(len, StdRng::seed_from_u64(7))
    }

    #[test]
    fn each_pass_is_a_permutation() {
        let mut d = deck(6);
        for _ in 0..3 {
            let pass: HashSet<_> = (0..6).map(|_| d.draw().unwrap()).collect();
            assert_eq!(pass.len(), 6);
            assert_eq!(d.remaining(), 0);
        }
    }

    #[test]
    fn reset_starts_a_new_pass() {
        let mut d = deck(4);
        d.draw();
        assert_eq!(d.remaining(), 3);
        d.reset();
        d.draw();
        assert_eq!(d.remaining(), 3);
    }

    #[test]
    fn empty_deck_draws_nothing() {
        assert_eq!(deck(0).draw(), None);
    }
}
