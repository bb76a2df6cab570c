//! In-memory feedback repository for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::feedback::{
    domain::{Feedback, FeedbackId, FeedbackResponse, FeedbackResponseId},
    ports::{FeedbackRepository, FeedbackRepositoryError, FeedbackRepositoryResult},
};
use crate::submission::domain::SubmissionId;

/// Thread-safe in-memory feedback repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackRepository {
    state: Arc<RwLock<InMemoryFeedbackState>>,
}

#[derive(Debug, Default)]
struct InMemoryFeedbackState {
    feedback: HashMap<FeedbackId, Feedback>,
    responses: HashMap<FeedbackResponseId, FeedbackResponse>,
}

impl InMemoryFeedbackRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn feedback_where(
        &self,
        predicate: impl Fn(&Feedback) -> bool,
    ) -> FeedbackRepositoryResult<Vec<Feedback>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut matching: Vec<Feedback> = state
            .feedback
            .values()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect();
        matching.sort_by_key(Feedback::created_at);
        Ok(matching)
    }
}

fn poisoned(err: impl ToString) -> FeedbackRepositoryError {
    FeedbackRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn store_feedback(&self, feedback: &Feedback) -> FeedbackRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.feedback.contains_key(&feedback.id()) {
            return Err(FeedbackRepositoryError::DuplicateFeedback(feedback.id()));
        }
        state.feedback.insert(feedback.id(), feedback.clone());
        Ok(())
    }

    async fn update_feedback(&self, feedback: &Feedback) -> FeedbackRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .feedback
            .get_mut(&feedback.id())
            .ok_or(FeedbackRepositoryError::FeedbackNotFound(feedback.id()))?;
        *slot = feedback.clone();
        Ok(())
    }

    async fn delete_feedback(&self, id: FeedbackId) -> FeedbackRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.feedback.remove(&id).is_none() {
            return Err(FeedbackRepositoryError::FeedbackNotFound(id));
        }
        state.responses.retain(|_, response| response.feedback_id() != id);
        Ok(())
    }

    async fn find_feedback(&self, id: FeedbackId) -> FeedbackRepositoryResult<Option<Feedback>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.feedback.get(&id).cloned())
    }

    async fn list_feedback(&self) -> FeedbackRepositoryResult<Vec<Feedback>> {
        self.feedback_where(|_| true)
    }

    async fn list_feedback_for_submission(
        &self,
        submission_id: SubmissionId,
    ) -> FeedbackRepositoryResult<Vec<Feedback>> {
        self.feedback_where(|entry| entry.submission_id() == submission_id)
    }

    async fn store_response(&self, response: &FeedbackResponse) -> FeedbackRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.responses.contains_key(&response.id()) {
            return Err(FeedbackRepositoryError::DuplicateResponse(response.id()));
        }
        state.responses.insert(response.id(), response.clone());
        Ok(())
    }

    async fn update_response(&self, response: &FeedbackResponse) -> FeedbackRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .responses
            .get_mut(&response.id())
            .ok_or(FeedbackRepositoryError::ResponseNotFound(response.id()))?;
        *slot = response.clone();
        Ok(())
    }

    async fn delete_response(&self, id: FeedbackResponseId) -> FeedbackRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .responses
            .remove(&id)
            .map(|_| ())
            .ok_or(FeedbackRepositoryError::ResponseNotFound(id))
    }

    async fn find_response(
        &self,
        id: FeedbackResponseId,
    ) -> FeedbackRepositoryResult<Option<FeedbackResponse>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.responses.get(&id).cloned())
    }

    async fn list_responses(&self) -> FeedbackRepositoryResult<Vec<FeedbackResponse>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut responses: Vec<FeedbackResponse> = state.responses.values().cloned().collect();
        responses.sort_by_key(FeedbackResponse::created_at);
        Ok(responses)
    }
}
