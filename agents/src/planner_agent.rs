//! Executes a plan one step at a time against a changing world.

use crate::error::PlanError;
use crate::planner::{plan, Plan};
use harvest_core::{Action, Goal, PlanningState};
use tracing::{debug, warn};

/// Position inside a plan.
///
/// Each step is checked against the caller's latest state before it is handed
/// out, so a plan that no longer fits the world is reported instead of being
/// followed blindly.
#[derive(Debug, Clone, Default)]
pub struct PlanCursor {
    actions: Vec<Action>,
    next: usize,
}

impl PlanCursor {
    pub fn new(plan: Plan) -> Self {
        Self {
            actions: plan.actions,
            next: 0,
        }
    }

    /// Returns the next step if its preconditions hold in `live`.
    pub fn next_action(&mut self, live: &PlanningState) -> Result<Option<Action>, PlanError> {
        let Some(action) = self.actions.get(self.next) else {
            return Ok(None);
        };
        if !action.preconditions_met(live) {
            return Err(PlanError::Diverged {
                step: self.next,
                action: action.to_string(),
            });
        }
        self.next += 1;
        Ok(Some(action.clone()))
    }

    pub fn remaining(&self) -> &[Action] {
        &self.actions[self.next..]
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.actions.len()
    }
}

/// Plans lazily and replans once when the world drifts away from the plan.
pub struct PlannerAgent {
    goal: Goal,
    cursor: Option<PlanCursor>,
    replans: usize,
}

impl PlannerAgent {
    pub fn new(goal: Goal) -> Self {
        Self {
            goal,
            cursor: None,
            replans: 0,
        }
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Times a fresh plan had to be built after divergence.
    pub fn replans(&self) -> usize {
        self.replans
    }

    pub fn cursor(&self) -> Option<&PlanCursor> {
        self.cursor.as_ref()
    }

    /// The next action to carry out in `live`, or `None` once the goal is met.
    pub fn step(&mut self, live: &PlanningState) -> Result<Option<Action>, PlanError> {
        let live = live.clone().with_goal(self.goal);
        if live.is_goal() {
            return Ok(None);
        }

        let mut cursor = match self.cursor.take() {
            Some(cursor) if !cursor.is_finished() => cursor,
            _ => self.fresh_cursor(&live)?,
        };

        let next = match cursor.next_action(&live) {
            Err(PlanError::Diverged { step, action }) => {
                warn!(step, %action, "plan diverged from the world, replanning");
                self.replans += 1;
                cursor = self.fresh_cursor(&live)?;
                cursor.next_action(&live)?
            }
            other => other?,
        };
        self.cursor = Some(cursor);
        Ok(next)
    }

    fn fresh_cursor(&self, live: &PlanningState) -> Result<PlanCursor, PlanError> {
        let plan = plan(live)?;
        debug!(steps = plan.len(), cost = plan.cost, "new plan");
        Ok(PlanCursor::new(plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::*;

    fn world() -> PlanningState {
        PlanningState::new(
            MapExtent::new(10, 10),
            vec![Position::new(1, 1)],
            vec![Unit::new(UnitId(1), Position::new(2, 2))],
            vec![
                ResourceNode::new(ResourceId(1), ResourceKind::Gold, Position::new(6, 2), 300),
                ResourceNode::new(ResourceId(2), ResourceKind::Gold, Position::new(2, 8), 300),
            ],
            Goal::new(0, 0),
        )
        .unwrap()
    }

    #[test]
    fn test_cursor_walks_plan() {
        let state = world().with_goal(Goal::new(100, 0));
        let plan = plan(&state).unwrap();
        let len = plan.len();
        let mut cursor = PlanCursor::new(plan);

        let mut live = state;
        let mut steps = 0;
        while let Some(action) = cursor.next_action(&live).unwrap() {
            live = action.apply(&live);
            steps += 1;
        }
        assert_eq!(steps, len);
        assert!(cursor.is_finished());
        assert!(cursor.remaining().is_empty());
        assert!(live.is_goal());
    }

    #[test]
    fn test_cursor_reports_divergence() {
        let state = world().with_goal(Goal::new(100, 0));
        let mut cursor = PlanCursor::new(plan(&state).unwrap());

        // The mine the plan heads for disappears
        let first = cursor.remaining()[0].clone();
        let Action::MoveToResource { node, .. } = first else {
            panic!("expected a move first, got {first}");
        };
        let remaining: Vec<_> = state
            .resources()
            .iter()
            .filter(|n| n.id != node)
            .cloned()
            .collect();
        let changed = PlanningState::new(
            state.extent(),
            state.bases().to_vec(),
            state.units().to_vec(),
            remaining,
            state.goal(),
        )
        .unwrap();

        match cursor.next_action(&changed) {
            Err(PlanError::Diverged { step: 0, .. }) => {}
            other => panic!("expected divergence, got {other:?}"),
        }
        assert_eq!(cursor.remaining().len(), 4);
    }

    #[test]
    fn test_agent_reaches_goal() {
        let mut agent = PlannerAgent::new(Goal::new(200, 0));
        let mut live = world();
        let mut steps = 0;
        while let Some(action) = agent.step(&live).unwrap() {
            live = action.apply(&live);
            steps += 1;
            assert!(steps < 50);
        }
        assert!(live.clone().with_goal(agent.goal()).is_goal());
        assert_eq!(agent.replans(), 0);
    }

    #[test]
    fn test_agent_replans_after_unit_is_displaced() {
        let mut agent = PlannerAgent::new(Goal::new(100, 0));
        let live = world();
        let first = agent.step(&live).unwrap().unwrap();
        assert!(first.is_move());

        // The move never happened; the unit was pushed elsewhere instead
        let displaced = PlanningState::new(
            live.extent(),
            live.bases().to_vec(),
            vec![Unit::new(UnitId(1), Position::new(5, 5))],
            live.resources().to_vec(),
            live.goal(),
        )
        .unwrap();

        let next = agent.step(&displaced).unwrap().unwrap();
        assert_eq!(agent.replans(), 1);
        assert!(next.preconditions_met(&displaced.clone().with_goal(agent.goal())));
    }

    #[test]
    fn test_agent_idle_when_goal_met() {
        let mut agent = PlannerAgent::new(Goal::new(0, 0));
        assert!(agent.step(&world()).unwrap().is_none());
        assert!(agent.cursor().is_none());
    }
}
