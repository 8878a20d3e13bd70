//! Contract between the adversarial search and the game it plays.
//!
//! The environment knows the rules; the search only sees snapshots, the
//! successors of a snapshot together with the action that produced each, a
//! terminal test and a static utility.

/// A snapshot of a two-player, zero-sum game.
pub trait GameState: Sized {
    /// What the maximizing side issues to move from one snapshot to the next.
    /// For a multi-unit environment this is usually a command per unit.
    type Action: Clone;

    /// Returns true if the game is over in this snapshot.
    fn is_terminal(&self) -> bool;

    /// Static evaluation from the maximizing player's perspective.
    fn utility(&self) -> f64;

    /// All legal successors, paired with the action that produced them.
    /// An empty list means the side to move has no legal reply.
    fn children(&self) -> Vec<(Self::Action, Self)>;
}

/// A node of the search tree: a snapshot, the action that led to it and its
/// cached static utility. Nodes keep no parent link; the tree is rebuilt on
/// every search.
#[derive(Debug, Clone)]
pub struct GameNode<S: GameState> {
    state: S,
    action: Option<S::Action>,
    utility: f64,
}

impl<S: GameState> GameNode<S> {
    /// Wraps the current snapshot. The root has no producing action.
    pub fn root(state: S) -> Self {
        let utility = state.utility();
        Self {
            state,
            action: None,
            utility,
        }
    }

    /// Wraps a successor reached through `action`.
    pub fn child(action: S::Action, state: S) -> Self {
        let utility = state.utility();
        Self {
            state,
            action: Some(action),
            utility,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn action(&self) -> Option<&S::Action> {
        self.action.as_ref()
    }

    /// Consumes the node, returning the action that produced it.
    pub fn into_action(self) -> Option<S::Action> {
        self.action
    }

    /// Static utility, computed once when the node was built.
    pub fn utility(&self) -> f64 {
        self.utility
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Expands the node into fresh child nodes.
    pub fn children(&self) -> Vec<GameNode<S>> {
        self.state
            .children()
            .into_iter()
            .map(|(action, state)| GameNode::child(action, state))
            .collect()
    }
}
