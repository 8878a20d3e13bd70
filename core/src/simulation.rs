use crate::action::Action;
use crate::error::{Error, Result};
use crate::state::PlanningState;
use crate::types::ResourceKind;
use tracing::debug;

/// Summary of a replayed plan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub steps: usize,
    pub cost: u32,
    pub moves: usize,
    pub harvests: usize,
    pub deposits: usize,
    pub gold_banked: u32,
    pub wood_banked: u32,
}

/// Replays `plan` from `state`, checking each step's preconditions against
/// the state produced by the previous step.
pub fn simulate(state: &PlanningState, plan: &[Action]) -> Result<PlanningState> {
    let mut current = state.clone();
    for (step, action) in plan.iter().enumerate() {
        if !action.preconditions_met(&current) {
            debug!(step, %action, "precondition failed during replay");
            return Err(Error::PreconditionFailed {
                step,
                action: action.to_string(),
            });
        }
        current = action.apply(&current);
    }
    Ok(current)
}

/// Replays `plan` and tallies what it did.
pub fn simulate_detailed(state: &PlanningState, plan: &[Action]) -> Result<SimulationReport> {
    let end = simulate(state, plan)?;
    let mut report = SimulationReport {
        steps: plan.len(),
        cost: end.cost() - state.cost(),
        gold_banked: end.banked(ResourceKind::Gold) - state.banked(ResourceKind::Gold),
        wood_banked: end.banked(ResourceKind::Wood) - state.banked(ResourceKind::Wood),
        ..SimulationReport::default()
    };

    for action in plan {
        match action {
            Action::MoveToResource { .. } | Action::MoveToBase { .. } => report.moves += 1,
            Action::Harvest { .. } => report.harvests += 1,
            Action::Deposit { .. } => report.deposits += 1,
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_gen::generate_actions;
    use crate::state::{Goal, ResourceNode, Unit};
    use crate::types::*;

    fn start() -> PlanningState {
        PlanningState::new(
            MapExtent::new(10, 10),
            vec![Position::new(1, 1)],
            vec![Unit::new(UnitId(1), Position::new(2, 2))],
            vec![ResourceNode::new(
                ResourceId(1),
                ResourceKind::Gold,
                Position::new(6, 6),
                300,
            )],
            Goal::new(100, 0),
        )
        .unwrap()
    }

    /// Follows the first applicable action of each name in turn.
    fn walk(state: &PlanningState, names: &[&str]) -> Vec<Action> {
        let mut current = state.clone();
        let mut plan = Vec::new();
        for name in names {
            let action = generate_actions(&current)
                .into_iter()
                .find(|a| a.name() == *name)
                .unwrap();
            current = action.apply(&current);
            plan.push(action);
        }
        plan
    }

    #[test]
    fn test_simulate_round_trip() {
        let state = start();
        let plan = walk(&state, &["MoveToMine", "HarvestGold", "MoveToBase", "Deposit"]);
        let end = simulate(&state, &plan).unwrap();
        assert!(end.is_goal());
        assert_eq!(end.gold(), 100);
        assert_eq!(end.cost(), 3 + 1 + 3 + 1);
    }

    #[test]
    fn test_simulate_detailed_counts() {
        let state = start();
        let plan = walk(&state, &["MoveToMine", "HarvestGold", "MoveToBase", "Deposit"]);
        let report = simulate_detailed(&state, &plan).unwrap();
        assert_eq!(report.steps, 4);
        assert_eq!(report.moves, 2);
        assert_eq!(report.harvests, 1);
        assert_eq!(report.deposits, 1);
        assert_eq!(report.gold_banked, 100);
        assert_eq!(report.cost, 8);
    }

    #[test]
    fn test_simulate_rejects_out_of_order_plan() {
        let state = start();
        let mut plan = walk(&state, &["MoveToMine", "HarvestGold", "MoveToBase", "Deposit"]);
        plan.swap(0, 1);
        match simulate(&state, &plan) {
            Err(Error::PreconditionFailed { step, .. }) => assert_eq!(step, 0),
            other => panic!("expected precondition failure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_plan_is_identity() {
        let state = start();
        let end = simulate(&state, &[]).unwrap();
        assert_eq!(end.key(), state.key());
    }
}
