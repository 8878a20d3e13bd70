//! Best-first forward planner over the harvest action space.
//!
//! States are expanded in order of `f = g + h`, where `g` is the path cost
//! accumulated so far and `h` comes from [`heuristic`]. Ties go to the state
//! that was generated first, so runs are deterministic.

use crate::error::PlanError;
use crate::heuristic::heuristic;
use harvest_core::{successors, Action, Goal, PlanningState, ResourceKind, StateKey};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::{debug, info, trace};

/// An ordered list of actions that takes the initial state to the goal.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub actions: Vec<Action>,
    /// Sum of action costs
    pub cost: u32,
    /// States popped from the frontier
    pub expanded: usize,
    /// Successor states produced
    pub generated: usize,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }
}

impl IntoIterator for Plan {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

struct FrontierEntry {
    f: u64,
    seq: u64,
    state: PlanningState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // BinaryHeap is a max-heap; invert so the lowest f (then oldest) pops first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Plans from `initial` to the goal stored in it.
///
/// The initial state is rebased first, so any path cost or history it carries
/// is ignored. A state that already satisfies its goal yields an empty plan.
pub fn plan(initial: &PlanningState) -> Result<Plan, PlanError> {
    let root = initial.rebased();
    root.check_cargo()?;
    let goal = root.goal();

    if root.is_goal() {
        debug!(gold = goal.gold, wood = goal.wood, "goal already satisfied");
        return Ok(Plan::default());
    }
    check_reachable(&root)?;

    let limit = root.config().max_expansions;
    let mut frontier = BinaryHeap::new();
    let mut best_g: HashMap<StateKey, u32> = HashMap::new();
    let mut closed: HashSet<StateKey> = HashSet::new();
    let mut seq = 0u64;
    let mut expanded = 0usize;
    let mut generated = 0usize;

    debug!(
        gold = goal.gold,
        wood = goal.wood,
        units = root.units().len(),
        nodes = root.resources().len(),
        "planning"
    );

    best_g.insert(root.key(), 0);
    frontier.push(FrontierEntry {
        f: heuristic(&root),
        seq,
        state: root,
    });

    while let Some(FrontierEntry { f, state, .. }) = frontier.pop() {
        let key = state.key();
        if !closed.insert(key) {
            continue;
        }

        if state.is_goal() {
            let actions = state.history().to_vec();
            info!(
                steps = actions.len(),
                cost = state.cost(),
                expanded,
                generated,
                "plan found"
            );
            return Ok(Plan {
                actions,
                cost: state.cost(),
                expanded,
                generated,
            });
        }

        if let Some(limit) = limit {
            if expanded >= limit {
                debug!(limit, frontier = frontier.len(), "expansion budget reached");
                return Err(PlanError::BudgetExhausted { limit });
            }
        }
        expanded += 1;
        trace!(f, g = state.cost(), gold = state.gold(), wood = state.wood(), "expand");

        for (action, next) in successors(&state) {
            generated += 1;
            let key = next.key();
            if closed.contains(&key) {
                continue;
            }
            let g = next.cost();
            if best_g.get(&key).is_some_and(|&seen| seen <= g) {
                continue;
            }
            best_g.insert(key, g);
            seq += 1;
            trace!(%action, g, "push");
            frontier.push(FrontierEntry {
                f: u64::from(g) + heuristic(&next),
                seq,
                state: next,
            });
        }
    }

    debug!(expanded, generated, "frontier exhausted");
    Err(PlanError::NoPlan { expanded })
}

/// Plans for `gold` and `wood` from `state`, replacing whatever goal it held.
pub fn build_plan(state: &PlanningState, gold: u32, wood: u32) -> Result<Plan, PlanError> {
    plan(&state.clone().with_goal(Goal::new(gold, wood)))
}

/// Fails fast when the pool, cargo and bank together cannot cover the goal.
fn check_reachable(state: &PlanningState) -> Result<(), PlanError> {
    for kind in ResourceKind::ALL {
        let required = state.goal().required(kind);
        if state.outstanding(kind) == 0 {
            continue;
        }
        let available = state.obtainable(kind);
        if available < u64::from(required) {
            return Err(PlanError::Unreachable {
                kind,
                required,
                available,
            });
        }
    }
    Ok(())
}
