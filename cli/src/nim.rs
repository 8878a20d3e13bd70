use harvest_core::GameState;
use std::fmt;

/// Take one or more stones from a pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Take {
    pub pile: usize,
    pub count: u32,
}

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "take {} from pile {}", self.count, self.pile + 1)
    }
}

/// Normal-play Nim: whoever takes the last stone wins.
///
/// Values are from the point of view of the player to move at the root,
/// who is always treated as MAX.
#[derive(Debug, Clone)]
pub struct Nim {
    piles: Vec<u32>,
    max_to_move: bool,
}

impl Nim {
    pub fn new(piles: Vec<u32>) -> Self {
        Nim {
            piles,
            max_to_move: true,
        }
    }

    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    pub fn apply(&self, take: Take) -> Nim {
        let mut piles = self.piles.clone();
        piles[take.pile] -= take.count;
        Nim {
            piles,
            max_to_move: !self.max_to_move,
        }
    }

    fn nim_sum(&self) -> u32 {
        self.piles.iter().fold(0, |acc, &p| acc ^ p)
    }
}

impl GameState for Nim {
    type Action = Take;

    fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&p| p == 0)
    }

    fn utility(&self) -> f64 {
        if self.is_terminal() {
            // The previous mover took the last stone
            return if self.max_to_move { -1.0 } else { 1.0 };
        }
        // Nonzero nim-sum means the player to move can force a win
        let mover_winning = self.nim_sum() != 0;
        if mover_winning == self.max_to_move {
            0.5
        } else {
            -0.5
        }
    }

    fn children(&self) -> Vec<(Take, Nim)> {
        let mut children = Vec::new();
        for (pile, &size) in self.piles.iter().enumerate() {
            for count in 1..=size {
                let take = Take { pile, count };
                children.push((take, self.apply(take)));
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_agents::best_action;

    #[test]
    fn test_takes_last_pile_when_alone() {
        let result = best_action(Nim::new(vec![0, 4, 0]), 2).unwrap();
        assert_eq!(result.best_action, Some(Take { pile: 1, count: 4 }));
        assert_eq!(result.value, 1.0);
    }

    #[test]
    fn test_finds_winning_move() {
        // 3 ^ 4 ^ 5 = 2; taking 2 from the first pile leaves nim-sum 0
        let result = best_action(Nim::new(vec![3, 4, 5]), 1).unwrap();
        assert_eq!(result.best_action, Some(Take { pile: 0, count: 2 }));
    }

    #[test]
    fn test_losing_position_scores_negative() {
        let result = best_action(Nim::new(vec![1, 1]), 2).unwrap();
        assert_eq!(result.value, -1.0);
    }
}
