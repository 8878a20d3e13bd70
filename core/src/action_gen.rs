use crate::action::Action;
use crate::state::PlanningState;
use crate::types::ResourceKind;

/// Generates every action whose preconditions hold in `state`.
///
/// Units are visited in roster order; for each unit the candidates are the
/// moves towards gold and wood, the move back to base, a harvest for every
/// remaining node and a deposit for every base.
pub fn generate_actions(state: &PlanningState) -> Vec<Action> {
    let mut actions = Vec::new();

    for unit in state.units() {
        for kind in ResourceKind::ALL {
            if let Some(action) = Action::move_to_resource(state, unit.id, kind) {
                actions.push(action);
            }
        }

        if let Some(action) = Action::move_to_base(state, unit.id) {
            actions.push(action);
        }

        for node in state.resources() {
            if let Some(action) = Action::harvest(state, unit.id, node.id) {
                actions.push(action);
            }
        }

        for &base in state.bases() {
            actions.push(Action::deposit(state, unit.id, base));
        }
    }

    actions.retain(|action| action.preconditions_met(state));
    actions
}

/// Expands `state` into its successors, each paired with the action applied.
pub fn successors(state: &PlanningState) -> Vec<(Action, PlanningState)> {
    generate_actions(state)
        .into_iter()
        .map(|action| {
            let next = action.apply(state);
            (action, next)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Goal, ResourceNode, Unit};
    use crate::types::*;

    fn two_resource_state(unit_at: Position) -> PlanningState {
        PlanningState::new(
            MapExtent::new(12, 12),
            vec![Position::new(1, 1)],
            vec![Unit::new(UnitId(1), unit_at)],
            vec![
                ResourceNode::new(ResourceId(1), ResourceKind::Gold, Position::new(8, 8), 500),
                ResourceNode::new(ResourceId(2), ResourceKind::Wood, Position::new(1, 9), 500),
            ],
            Goal::new(200, 200),
        )
        .unwrap()
    }

    fn names(actions: &[Action]) -> Vec<&'static str> {
        actions.iter().map(Action::name).collect()
    }

    #[test]
    fn test_actions_at_base() {
        let state = two_resource_state(Position::new(2, 2));
        let actions = generate_actions(&state);
        assert_eq!(names(&actions), vec!["MoveToMine", "MoveToTree"]);
    }

    #[test]
    fn test_actions_beside_mine() {
        let state = two_resource_state(Position::new(7, 7));
        let actions = generate_actions(&state);
        assert_eq!(names(&actions), vec!["MoveToBase", "HarvestGold"]);
    }

    #[test]
    fn test_successors_are_fresh_states() {
        let state = two_resource_state(Position::new(2, 2));
        let children = successors(&state);
        assert_eq!(children.len(), 2);
        for (action, child) in &children {
            assert_eq!(child.cost(), action.cost());
            assert_eq!(child.history().last(), Some(action));
        }
        assert_eq!(state.cost(), 0);
        assert_eq!(state.unit(UnitId(1)).unwrap().position, Position::new(2, 2));
    }

    #[test]
    fn test_no_units_no_actions() {
        let state = PlanningState::new(
            MapExtent::new(4, 4),
            vec![Position::new(0, 0)],
            vec![],
            vec![],
            Goal::new(100, 0),
        )
        .unwrap();
        assert!(generate_actions(&state).is_empty());
    }
}
