/// Planning state: units, bases, resource pool and banked totals.
/// States are values; every action produces a new state and leaves its
/// parent untouched.
use crate::action::Action;
use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::history::History;
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::rc::Rc;

/// What a unit is carrying. A unit with nothing has `cargo: None`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cargo {
    pub kind: ResourceKind,
    pub amount: u32,
}

/// A mobile worker.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub position: Position,
    #[serde(default)]
    pub cargo: Option<Cargo>,
}

impl Unit {
    /// Creates an empty-handed unit.
    pub const fn new(id: UnitId, position: Position) -> Self {
        Self {
            id,
            position,
            cargo: None,
        }
    }

    pub fn is_carrying(&self) -> bool {
        self.cargo.is_some()
    }
}

/// A harvestable gold mine or tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub position: Position,
    pub remaining: u32,
}

impl ResourceNode {
    pub const fn new(id: ResourceId, kind: ResourceKind, position: Position, remaining: u32) -> Self {
        Self {
            id,
            kind,
            position,
            remaining,
        }
    }
}

/// Amounts of gold and wood that must be banked.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Goal {
    pub gold: u32,
    pub wood: u32,
}

impl Goal {
    pub const fn new(gold: u32, wood: u32) -> Self {
        Self { gold, wood }
    }

    pub const fn required(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Gold => self.gold,
            ResourceKind::Wood => self.wood,
        }
    }
}

/// Key used to recognise states already reached during planning.
///
/// Path cost and history are not part of the key: two paths that reach the
/// same configuration share one entry, and the cheaper one wins.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateKey {
    units: Vec<Unit>,
    gold: u32,
    wood: u32,
    goal: Goal,
    resources: Vec<(ResourceId, u32)>,
}

/// One node of the planner's search space.
#[derive(Clone, Debug)]
pub struct PlanningState {
    extent: MapExtent,
    bases: Rc<[Position]>,
    units: Rc<[Unit]>,
    resources: Rc<Vec<ResourceNode>>,
    gold: u32,
    wood: u32,
    goal: Goal,
    config: PlannerConfig,
    cost: u32,
    history: History,
}

impl PlanningState {
    /// Builds the initial state from a snapshot of the world.
    ///
    /// The result has zero path cost and an empty history. Depleted resource
    /// nodes are dropped from the pool.
    pub fn new(
        extent: MapExtent,
        bases: Vec<Position>,
        units: Vec<Unit>,
        resources: Vec<ResourceNode>,
        goal: Goal,
    ) -> Result<Self> {
        if extent.width <= 0 || extent.height <= 0 {
            return Err(Error::EmptyMap {
                width: extent.width,
                height: extent.height,
            });
        }
        if bases.is_empty() {
            return Err(Error::NoBase);
        }
        if let Some(&position) = bases.iter().find(|&&b| !extent.contains(b)) {
            return Err(Error::BaseOutOfBounds { position });
        }

        let mut seen_units = HashSet::new();
        for unit in &units {
            if !extent.contains(unit.position) {
                return Err(Error::UnitOutOfBounds {
                    unit: unit.id,
                    position: unit.position,
                });
            }
            if !seen_units.insert(unit.id) {
                return Err(Error::DuplicateUnit { unit: unit.id });
            }
            if unit.cargo.is_some_and(|c| c.amount == 0) {
                return Err(Error::EmptyCargo { unit: unit.id });
            }
        }

        let mut seen_nodes = HashSet::new();
        for node in &resources {
            if !extent.contains(node.position) {
                return Err(Error::ResourceOutOfBounds {
                    node: node.id,
                    position: node.position,
                });
            }
            if !seen_nodes.insert(node.id) {
                return Err(Error::DuplicateResource { node: node.id });
            }
        }

        let resources: Vec<ResourceNode> =
            resources.into_iter().filter(|n| n.remaining > 0).collect();

        Ok(Self {
            extent,
            bases: bases.into(),
            units: units.into(),
            resources: Rc::new(resources),
            gold: 0,
            wood: 0,
            goal,
            config: PlannerConfig::default(),
            cost: 0,
            history: History::new(),
        })
    }

    /// Replaces the planner configuration.
    pub fn with_config(mut self, config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        self.check_cargo()?;
        Ok(self)
    }

    /// Every carried cargo must be exactly one load under the current config.
    pub fn check_cargo(&self) -> Result<()> {
        let load = self.config.load_amount;
        for unit in self.units.iter() {
            if let Some(cargo) = unit.cargo {
                if cargo.amount != load {
                    return Err(Error::PartialCargo {
                        unit: unit.id,
                        amount: cargo.amount,
                        load,
                    });
                }
            }
        }
        Ok(())
    }

    /// Replaces the goal.
    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    /// Sets amounts already banked before planning starts.
    pub fn with_banked(mut self, gold: u32, wood: u32) -> Self {
        self.gold = gold;
        self.wood = wood;
        self
    }

    pub fn extent(&self) -> MapExtent {
        self.extent
    }

    pub fn bases(&self) -> &[Position] {
        &self.bases
    }

    /// The base used as the origin for distance estimates.
    pub fn primary_base(&self) -> Position {
        self.bases[0]
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn resources(&self) -> &[ResourceNode] {
        &self.resources
    }

    pub fn resource(&self, id: ResourceId) -> Option<&ResourceNode> {
        self.resources.iter().find(|n| n.id == id)
    }

    /// Remaining nodes of one kind.
    pub fn resources_of(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceNode> {
        self.resources.iter().filter(move |n| n.kind == kind)
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn wood(&self) -> u32 {
        self.wood
    }

    /// Amount of `kind` banked so far.
    pub fn banked(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Gold => self.gold,
            ResourceKind::Wood => self.wood,
        }
    }

    /// Amount of `kind` still missing from the goal.
    pub fn outstanding(&self, kind: ResourceKind) -> u32 {
        self.goal.required(kind).saturating_sub(self.banked(kind))
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Path cost accumulated from the initial state.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Positions and remaining quantities do not matter, only banked totals.
    pub fn is_goal(&self) -> bool {
        self.gold >= self.goal.gold && self.wood >= self.goal.wood
    }

    /// Returns true if the tile touches any base.
    pub fn is_adjacent_to_base(&self, pos: Position) -> bool {
        self.bases.iter().any(|b| b.is_adjacent(pos))
    }

    /// The base closest to `pos`; the first listed base wins ties.
    pub fn nearest_base(&self, pos: Position) -> Position {
        let mut best = self.bases[0];
        for &base in self.bases.iter().skip(1) {
            if base.chebyshev(pos) < best.chebyshev(pos) {
                best = base;
            }
        }
        best
    }

    /// A tile a unit may stand on: inside the map and not covered by a base
    /// or a resource node. Units may share tiles.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.extent.contains(pos)
            && !self.bases.contains(&pos)
            && !self.resources.iter().any(|n| n.position == pos)
    }

    /// The walkable tile next to `target` closest to `from`.
    pub fn approach_tile(&self, target: Position, from: Position) -> Option<Position> {
        target
            .neighbors()
            .enumerate()
            .filter(|&(_, tile)| self.is_walkable(tile))
            .min_by_key(|&(order, tile)| (tile.chebyshev(from), order))
            .map(|(_, tile)| tile)
    }

    /// Returns true if a unit other than `unit` is already working the node.
    pub fn is_claimed(&self, node: &ResourceNode, unit: UnitId) -> bool {
        self.units
            .iter()
            .any(|u| u.id != unit && u.position.is_adjacent(node.position))
    }

    /// Total of `kind` still obtainable: banked, carried and in the pool.
    pub fn obtainable(&self, kind: ResourceKind) -> u64 {
        let pooled: u64 = self
            .resources_of(kind)
            .map(|n| u64::from(self.config.loads_for(n.remaining)) * u64::from(self.config.load_amount))
            .sum();
        let carried: u64 = self
            .units
            .iter()
            .filter_map(|u| u.cargo)
            .filter(|c| c.kind == kind)
            .map(|c| u64::from(c.amount))
            .sum();
        u64::from(self.banked(kind)) + pooled + carried
    }

    /// Returns the same world with zero path cost and an empty history,
    /// ready to be used as the root of a new search.
    pub fn rebased(&self) -> Self {
        let mut root = self.clone();
        root.cost = 0;
        root.history = History::new();
        root
    }

    /// Dedup key of this state.
    pub fn key(&self) -> StateKey {
        StateKey {
            units: self.units.to_vec(),
            gold: self.gold,
            wood: self.wood,
            goal: self.goal,
            resources: self.resources.iter().map(|n| (n.id, n.remaining)).collect(),
        }
    }

    /// Starts a successor produced by `action`: path cost and history are
    /// extended, everything else is shared with `self`.
    pub(crate) fn successor(&self, action: &Action) -> Self {
        let mut next = self.clone();
        next.cost = self.cost.saturating_add(action.cost());
        next.history = self.history.push(action.clone());
        next
    }

    /// Rebuilds the roster with one unit changed.
    pub(crate) fn update_unit(&mut self, id: UnitId, f: impl FnOnce(&mut Unit)) {
        let mut units = self.units.to_vec();
        if let Some(unit) = units.iter_mut().find(|u| u.id == id) {
            f(unit);
        }
        self.units = units.into();
    }

    /// Removes one load from a node, dropping it from the pool once exhausted.
    pub(crate) fn deplete(&mut self, id: ResourceId, amount: u32) {
        let pool = Rc::make_mut(&mut self.resources);
        if let Some(index) = pool.iter().position(|n| n.id == id) {
            let node = &mut pool[index];
            node.remaining = node.remaining.saturating_sub(amount);
            if node.remaining == 0 {
                pool.remove(index);
            }
        }
    }

    pub(crate) fn bank(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Gold => self.gold = self.gold.saturating_add(amount),
            ResourceKind::Wood => self.wood = self.wood.saturating_add(amount),
        }
    }

    /// Returns true if both states share the same resource pool allocation.
    pub fn shares_pool_with(&self, other: &PlanningState) -> bool {
        Rc::ptr_eq(&self.resources, &other.resources)
    }
}
