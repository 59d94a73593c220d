//! Ordered registry of analytical models.

use costwise_shared::types::MatchingModelId;

use super::error::MatchingError;
use super::types::{MatchingModel, ModelStatus};

/// Analytical models in registry order (creation ascending, ID as tie-break).
///
/// Registry order is the iteration order of the specificity matcher, so it
/// decides ties.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<MatchingModel>,
}

impl ModelRegistry {
    /// Builds a registry, sorting the models into registry order.
    #[must_use]
    pub fn new(mut models: Vec<MatchingModel>) -> Self {
        models.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Self { models }
    }

    /// Adds a model, keeping registry order.
    pub fn register(&mut self, model: MatchingModel) {
        let pos = self
            .models
            .partition_point(|m| (m.created_at, m.id) <= (model.created_at, model.id));
        self.models.insert(pos, model);
    }

    /// Finds a model by ID regardless of status.
    #[must_use]
    pub fn get(&self, id: MatchingModelId) -> Option<&MatchingModel> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Iterates over confirmed models in registry order.
    pub fn confirmed(&self) -> impl Iterator<Item = &MatchingModel> {
        self.models.iter().filter(|m| m.is_confirmed())
    }

    /// Iterates over every model in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchingModel> {
        self.models.iter()
    }

    /// Number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns true if the registry holds no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Confirms a draft model.
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` or `InvalidTransition`.
    pub fn confirm(&mut self, id: MatchingModelId) -> Result<&MatchingModel, MatchingError> {
        self.transition(id, ModelStatus::Confirmed)
    }

    /// Cancels a draft or confirmed model.
    ///
    /// # Errors
    ///
    /// Returns `ModelNotFound` or `InvalidTransition`.
    pub fn cancel(&mut self, id: MatchingModelId) -> Result<&MatchingModel, MatchingError> {
        self.transition(id, ModelStatus::Cancelled)
    }

    fn transition(
        &mut self,
        id: MatchingModelId,
        to: ModelStatus,
    ) -> Result<&MatchingModel, MatchingError> {
        let model = self
            .models
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(MatchingError::ModelNotFound(id))?;
        model.status = model.status.transition_to(to)?;
        Ok(model)
    }
}

impl FromIterator<MatchingModel> for ModelRegistry {
    fn from_iter<I: IntoIterator<Item = MatchingModel>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
