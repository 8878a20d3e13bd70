//! STRIPS-style actions over planning states.
//!
//! Every variant carries the acting unit, a cost, a precondition over a
//! [`PlanningState`] and an effect that produces a new state.

use crate::state::{Cargo, PlanningState};
use crate::types::*;
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    /// Walk from a base to the nearest unclaimed node of `kind`.
    MoveToResource {
        unit: UnitId,
        kind: ResourceKind,
        node: ResourceId,
        to: Position,
        cost: u32,
    },
    /// Walk back next to the nearest base.
    MoveToBase {
        unit: UnitId,
        to: Position,
        cost: u32,
    },
    /// Take one full load from an adjacent node.
    Harvest {
        unit: UnitId,
        kind: ResourceKind,
        node: ResourceId,
        cost: u32,
    },
    /// Unload the carried cargo at an adjacent base.
    Deposit {
        unit: UnitId,
        base: Position,
        cost: u32,
    },
}

impl Action {
    /// Builds the move towards the nearest unclaimed node of `kind`.
    ///
    /// The destination is the free tile beside that node closest to the unit,
    /// and the cost is the Chebyshev distance walked. Returns `None` if the
    /// unit is unknown, no such node is available, or the unit already stands
    /// beside it.
    pub fn move_to_resource(state: &PlanningState, unit: UnitId, kind: ResourceKind) -> Option<Self> {
        let actor = state.unit(unit)?;
        let from = actor.position;

        let mut target = None;
        for node in state.resources_of(kind) {
            if state.is_claimed(node, unit) {
                continue;
            }
            let distance = node.position.chebyshev(from);
            match target {
                Some((_, best)) if best <= distance => {}
                _ => target = Some((node, distance)),
            }
        }
        let (node, _) = target?;
        if from.is_adjacent(node.position) {
            return None;
        }

        let to = state.approach_tile(node.position, from)?;
        Some(Action::MoveToResource {
            unit,
            kind,
            node: node.id,
            to,
            cost: from.chebyshev(to),
        })
    }

    /// Builds the move back beside the nearest base.
    pub fn move_to_base(state: &PlanningState, unit: UnitId) -> Option<Self> {
        let actor = state.unit(unit)?;
        let from = actor.position;
        let base = state.nearest_base(from);
        let to = state.approach_tile(base, from)?;
        Some(Action::MoveToBase {
            unit,
            to,
            cost: from.chebyshev(to),
        })
    }

    /// Builds a harvest of `node`, whatever its kind.
    pub fn harvest(state: &PlanningState, unit: UnitId, node: ResourceId) -> Option<Self> {
        let target = state.resource(node)?;
        Some(Action::Harvest {
            unit,
            kind: target.kind,
            node,
            cost: state.config().harvest_cost,
        })
    }

    /// Builds a deposit at `base`.
    pub fn deposit(state: &PlanningState, unit: UnitId, base: Position) -> Self {
        Action::Deposit {
            unit,
            base,
            cost: state.config().deposit_cost,
        }
    }

    /// The acting unit.
    pub fn unit(&self) -> UnitId {
        match *self {
            Action::MoveToResource { unit, .. }
            | Action::MoveToBase { unit, .. }
            | Action::Harvest { unit, .. }
            | Action::Deposit { unit, .. } => unit,
        }
    }

    pub fn cost(&self) -> u32 {
        match *self {
            Action::MoveToResource { cost, .. }
            | Action::MoveToBase { cost, .. }
            | Action::Harvest { cost, .. }
            | Action::Deposit { cost, .. } => cost,
        }
    }

    /// Short name of the variant, e.g. `MoveToMine` or `HarvestWood`.
    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveToResource {
                kind: ResourceKind::Gold,
                ..
            } => "MoveToMine",
            Action::MoveToResource {
                kind: ResourceKind::Wood,
                ..
            } => "MoveToTree",
            Action::MoveToBase { .. } => "MoveToBase",
            Action::Harvest {
                kind: ResourceKind::Gold,
                ..
            } => "HarvestGold",
            Action::Harvest {
                kind: ResourceKind::Wood,
                ..
            } => "HarvestWood",
            Action::Deposit { .. } => "Deposit",
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Action::MoveToResource { .. } | Action::MoveToBase { .. })
    }

    /// Checks the STRIPS preconditions against `state`.
    pub fn preconditions_met(&self, state: &PlanningState) -> bool {
        let Some(actor) = state.unit(self.unit()) else {
            return false;
        };

        match *self {
            Action::MoveToResource { kind, node, to, .. } => {
                let Some(target) = state.resource(node) else {
                    return false;
                };
                target.kind == kind
                    && state.is_adjacent_to_base(actor.position)
                    && !state.is_claimed(target, actor.id)
                    && state.is_walkable(to)
                    && to.is_adjacent(target.position)
            }
            Action::MoveToBase { to, .. } => {
                !state.is_adjacent_to_base(actor.position)
                    && state.is_walkable(to)
                    && state.is_adjacent_to_base(to)
            }
            Action::Harvest { kind, node, .. } => {
                let Some(target) = state.resource(node) else {
                    return false;
                };
                target.kind == kind
                    && actor.position.is_adjacent(target.position)
                    && !actor.is_carrying()
                    && state.banked(kind) < state.goal().required(kind)
            }
            Action::Deposit { base, .. } => {
                state.bases().contains(&base)
                    && actor.position.is_adjacent(base)
                    && actor.is_carrying()
            }
        }
    }

    /// Applies the effect, returning a new state. `state` is not modified.
    /// This does NOT check the preconditions.
    pub fn apply(&self, state: &PlanningState) -> PlanningState {
        let mut next = state.successor(self);

        match *self {
            Action::MoveToResource { unit, to, .. } | Action::MoveToBase { unit, to, .. } => {
                next.update_unit(unit, |u| u.position = to);
            }
            Action::Harvest { unit, kind, node, .. } => {
                let amount = state.config().load_amount;
                next.update_unit(unit, |u| u.cargo = Some(Cargo { kind, amount }));
                next.deplete(node, amount);
            }
            Action::Deposit { unit, .. } => {
                let cargo = state.unit(unit).and_then(|u| u.cargo);
                next.update_unit(unit, |u| u.cargo = None);
                if let Some(cargo) = cargo {
                    next.bank(cargo.kind, cargo.amount);
                }
            }
        }

        next
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::MoveToResource {
                unit, kind, node, to, cost,
            } => write!(
                f,
                "{} {unit} -> {} {node} via {to} (cost {cost})",
                self.name(),
                kind.node_name()
            ),
            Action::MoveToBase { unit, to, cost } => {
                write!(f, "{} {unit} -> {to} (cost {cost})", self.name())
            }
            Action::Harvest { unit, node, cost, .. } => {
                write!(f, "{} {unit} from {node} (cost {cost})", self.name())
            }
            Action::Deposit { unit, base, cost } => {
                write!(f, "{} {unit} at {base} (cost {cost})", self.name())
            }
        }
    }
}
