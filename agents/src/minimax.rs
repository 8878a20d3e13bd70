use crate::{
    error::SearchError,
    ordering::MoveOrdering,
    search::{search_with_config, SearchConfig},
    Agent,
};
use harvest_core::GameState;

pub struct AlphaBetaAgent {
    name: String,
    config: SearchConfig,
}

impl AlphaBetaAgent {
    pub fn new(depth: u8) -> Self {
        Self::with_config(SearchConfig::depth(depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        AlphaBetaAgent {
            name: format!("AlphaBeta(depth={})", config.ply_budget),
            config,
        }
    }

    pub fn with_ordering(self, ordering: MoveOrdering) -> Self {
        Self::with_config(self.config.with_ordering(ordering))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl<S: GameState + Clone> Agent<S> for AlphaBetaAgent {
    fn best_action(&mut self, state: &S) -> Result<Option<S::Action>, SearchError> {
        let result = search_with_config(state.clone(), &self.config)?;
        Ok(result.best_action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
