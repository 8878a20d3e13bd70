use crate::error::SearchError;
use crate::ordering::{order_children, MoveOrdering};
use harvest_core::{GameNode, GameState};
use std::cmp::Ordering;
use tracing::debug;

const INFINITY: f64 = f64::INFINITY;

#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Action leading to the best child, `None` if the root had no moves.
    pub best_action: Option<A>,
    /// Backed-up value of the root from the maximizer's perspective.
    pub value: f64,
    pub depth: u8,
    /// Nodes visited, root included.
    pub nodes: u64,
    /// Siblings skipped by alpha or beta cutoffs.
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub ply_budget: u8,
    pub ordering: MoveOrdering,
}

impl SearchConfig {
    pub fn depth(ply_budget: u8) -> Self {
        Self {
            ply_budget,
            ordering: MoveOrdering::default(),
        }
    }

    pub fn with_ordering(mut self, ordering: MoveOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

type Comparator<'a, S> = &'a dyn Fn(&GameNode<S>, &GameNode<S>) -> Ordering;

struct SearchInfo<'a, S: GameState> {
    nodes: u64,
    cutoffs: u64,
    compare: Comparator<'a, S>,
}

impl<'a, S: GameState> SearchInfo<'a, S> {
    fn new(compare: Comparator<'a, S>) -> Self {
        Self {
            nodes: 0,
            cutoffs: 0,
            compare,
        }
    }

    /// Expands `node` into its successors in heuristic order.
    fn expand(&self, node: &GameNode<S>) -> Vec<GameNode<S>> {
        let mut children = node.children();
        order_children(&mut children, self.compare);
        children
    }
}

/// Searches `ply_budget` plies below `state` with the default ordering and
/// returns the best immediate action for the maximizer.
pub fn best_action<S: GameState>(
    state: S,
    ply_budget: u8,
) -> Result<SearchResult<S::Action>, SearchError> {
    search_with_config(state, &SearchConfig::depth(ply_budget))
}

pub fn search_with_config<S: GameState>(
    state: S,
    config: &SearchConfig,
) -> Result<SearchResult<S::Action>, SearchError> {
    let ordering = config.ordering;
    search(
        GameNode::root(state),
        config.ply_budget,
        -INFINITY,
        INFINITY,
        &|a: &GameNode<S>, b: &GameNode<S>| ordering.compare(a, b),
    )
}

/// Alpha-beta search from `node` with an explicit window and comparator.
///
/// `node` is treated as a MAX node. A budget of zero plies cannot produce a
/// move and is rejected.
pub fn search<S, F>(
    node: GameNode<S>,
    depth: u8,
    alpha: f64,
    beta: f64,
    compare: &F,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    F: Fn(&GameNode<S>, &GameNode<S>) -> Ordering,
{
    if depth == 0 {
        return Err(SearchError::InvalidDepth { depth });
    }
    if alpha.is_nan() || beta.is_nan() || alpha >= beta {
        return Err(SearchError::InvalidWindow { alpha, beta });
    }

    let mut info = SearchInfo::new(compare);
    let (value, best) = alpha_beta_root(node, depth, alpha, beta, &mut info);

    debug!(
        depth,
        value,
        nodes = info.nodes,
        cutoffs = info.cutoffs,
        found_move = best.is_some(),
        "alpha-beta search complete"
    );

    Ok(SearchResult {
        best_action: best.and_then(GameNode::into_action),
        value,
        depth,
        nodes: info.nodes,
        cutoffs: info.cutoffs,
    })
}

/// Backed-up value of `state` searched `depth` plies deep.
/// A depth of zero returns the static utility.
pub fn evaluate<S: GameState>(state: S, depth: u8, ordering: MoveOrdering) -> f64 {
    let compare = |a: &GameNode<S>, b: &GameNode<S>| ordering.compare(a, b);
    let mut info = SearchInfo::new(&compare);
    max_value(&GameNode::root(state), depth, -INFINITY, INFINITY, &mut info)
}

fn alpha_beta_root<S: GameState>(
    node: GameNode<S>,
    depth: u8,
    mut alpha: f64,
    beta: f64,
    info: &mut SearchInfo<S>,
) -> (f64, Option<GameNode<S>>) {
    info.nodes += 1;

    if node.is_terminal() {
        return (node.utility(), None);
    }

    let children = info.expand(&node);
    if children.is_empty() {
        // No legal reply: score the position as it stands.
        return (node.utility(), None);
    }

    let total = children.len();
    let mut best_value = -INFINITY;
    let mut best_child = None;

    for (index, child) in children.into_iter().enumerate() {
        let value = min_value(&child, depth - 1, alpha, beta, info);

        if best_child.is_none() || value > best_value {
            best_value = value;
            best_child = Some(child);
        }

        if value > alpha {
            alpha = value;
        }

        if value >= beta {
            info.cutoffs += (total - index - 1) as u64;
            break;
        }
    }

    (best_value, best_child)
}

fn max_value<S: GameState>(
    node: &GameNode<S>,
    depth: u8,
    mut alpha: f64,
    beta: f64,
    info: &mut SearchInfo<S>,
) -> f64 {
    info.nodes += 1;

    if depth == 0 || node.is_terminal() {
        return node.utility();
    }

    let children = info.expand(node);
    if children.is_empty() {
        return node.utility();
    }

    let total = children.len();
    let mut best = -INFINITY;

    for (index, child) in children.iter().enumerate() {
        let value = min_value(child, depth - 1, alpha, beta, info);

        // Beta cutoff: MIN above will never allow this line
        if value >= beta {
            info.cutoffs += (total - index - 1) as u64;
            return value;
        }

        if value > best {
            best = value;
        }

        if value > alpha {
            alpha = value;
        }
    }

    best
}

fn min_value<S: GameState>(
    node: &GameNode<S>,
    depth: u8,
    alpha: f64,
    mut beta: f64,
    info: &mut SearchInfo<S>,
) -> f64 {
    info.nodes += 1;

    if depth == 0 || node.is_terminal() {
        return node.utility();
    }

    let children = info.expand(node);
    if children.is_empty() {
        return node.utility();
    }

    let total = children.len();
    let mut best = INFINITY;

    for (index, child) in children.iter().enumerate() {
        let value = max_value(child, depth - 1, alpha, beta, info);

        // Alpha cutoff: MAX above already has something at least this good
        if value <= alpha {
            info.cutoffs += (total - index - 1) as u64;
            return value;
        }

        if value < best {
            best = value;
        }

        if value < beta {
            beta = value;
        }
    }

    best
}

/// Plain minimax without pruning. Exponential; meant for checking the
/// pruned search on small trees.
pub fn minimax_value<S: GameState>(node: &GameNode<S>, depth: u8, maximizing: bool) -> f64 {
    if depth == 0 || node.is_terminal() {
        return node.utility();
    }

    let children = node.children();
    if children.is_empty() {
        return node.utility();
    }

    let values = children
        .iter()
        .map(|child| minimax_value(child, depth - 1, !maximizing));

    if maximizing {
        values.fold(-INFINITY, f64::max)
    } else {
        values.fold(INFINITY, f64::min)
    }
}

/// Unpruned root decision: the first child, in `ordering`, with the highest
/// minimax value.
pub fn minimax_decision<S: GameState>(
    state: S,
    depth: u8,
    ordering: MoveOrdering,
) -> (f64, Option<S::Action>) {
    let root = GameNode::root(state);
    if depth == 0 || root.is_terminal() {
        return (root.utility(), None);
    }

    let mut children = root.children();
    if children.is_empty() {
        return (root.utility(), None);
    }
    order_children(&mut children, |a, b| ordering.compare(a, b));

    let mut best_value = -INFINITY;
    let mut best_child = None;
    for child in children {
        let value = minimax_value(&child, depth - 1, false);
        if best_child.is_none() || value > best_value {
            best_value = value;
            best_child = Some(child);
        }
    }

    (best_value, best_child.and_then(GameNode::into_action))
}
