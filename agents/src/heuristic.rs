use harvest_core::{PlanningState, ResourceKind};

/// Estimated remaining cost from `state` to a goal state.
///
/// For each resource, the outstanding amount is multiplied by the round trip
/// to the farthest remaining node of that kind, measured from the primary
/// base:
///
/// `h = 2 * maxDistGold * (goalGold - gold) + 2 * maxDistWood * (goalWood - wood)`
///
/// Using the farthest node makes this an estimate rather than a strict lower
/// bound when nodes sit at different distances, so the first plan found is
/// not guaranteed to be the cheapest.
pub fn heuristic(state: &PlanningState) -> u64 {
    ResourceKind::ALL
        .iter()
        .map(|&kind| resource_estimate(state, kind))
        .sum()
}

fn resource_estimate(state: &PlanningState, kind: ResourceKind) -> u64 {
    2 * u64::from(farthest_node(state, kind)) * u64::from(state.outstanding(kind))
}

/// Chebyshev distance from the primary base to the farthest node of `kind`,
/// or zero if none remain.
pub fn farthest_node(state: &PlanningState, kind: ResourceKind) -> u32 {
    let base = state.primary_base();
    state
        .resources_of(kind)
        .map(|node| node.position.chebyshev(base))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::*;

    fn state(goal: Goal) -> PlanningState {
        PlanningState::new(
            MapExtent::new(20, 20),
            vec![Position::new(1, 1)],
            vec![Unit::new(UnitId(1), Position::new(2, 2))],
            vec![
                ResourceNode::new(ResourceId(1), ResourceKind::Gold, Position::new(4, 4), 500),
                ResourceNode::new(ResourceId(2), ResourceKind::Gold, Position::new(9, 3), 500),
                ResourceNode::new(ResourceId(3), ResourceKind::Wood, Position::new(1, 6), 500),
            ],
            goal,
        )
        .unwrap()
    }

    #[test]
    fn test_goal_state_is_zero() {
        assert_eq!(heuristic(&state(Goal::new(0, 0))), 0);
    }

    #[test]
    fn test_uses_farthest_node() {
        let s = state(Goal::new(200, 0));
        assert_eq!(farthest_node(&s, ResourceKind::Gold), 8);
        assert_eq!(heuristic(&s), 2 * 8 * 200);
    }

    #[test]
    fn test_sums_both_resources() {
        let s = state(Goal::new(100, 150));
        assert_eq!(heuristic(&s), 2 * 8 * 100 + 2 * 5 * 150);
    }

    #[test]
    fn test_shrinks_as_resources_are_banked() {
        let s = state(Goal::new(300, 0));
        let banked = s.clone().with_banked(200, 0);
        assert!(heuristic(&banked) < heuristic(&s));
        assert_eq!(heuristic(&banked), 2 * 8 * 100);
    }

    #[test]
    fn test_counts_raw_amounts() {
        let s = PlanningState::new(
            MapExtent::new(12, 12),
            vec![Position::new(1, 1)],
            vec![Unit::new(UnitId(1), Position::new(2, 2))],
            vec![ResourceNode::new(ResourceId(1), ResourceKind::Gold, Position::new(8, 8), 300)],
            Goal::new(200, 0),
        )
        .unwrap();
        assert_eq!(heuristic(&s), 2800);
        // A partly banked goal is not rounded up to whole loads
        assert_eq!(heuristic(&s.with_banked(150, 0)), 2 * 7 * 50);
    }

    #[test]
    fn test_no_nodes_left_estimates_zero() {
        let empty = PlanningState::new(
            MapExtent::new(5, 5),
            vec![Position::new(0, 0)],
            vec![],
            vec![],
            Goal::new(100, 0),
        )
        .unwrap();
        assert_eq!(heuristic(&empty), 0);
    }
}
