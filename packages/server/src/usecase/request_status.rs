//! UseCase: query the chat-request status between two users.
//!
//! This is how a client resolves whether it may send a request, must wait,
//! or may converse.

use std::sync::Arc;

use crate::domain::{ChatRequestStore, PairKey, RequestStatus, UserId};

use super::error::RequestStatusError;

/// What the querying identity sees for a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStatusView {
    /// `None` when no record exists for the pair.
    pub status: Option<RequestStatus>,
    /// True iff the querying identity initiated the stored request.
    pub is_sender: bool,
}

/// Looks up the unordered pair's record from the caller's point of view.
pub struct RequestStatusUseCase {
    requests: Arc<dyn ChatRequestStore>,
}

impl RequestStatusUseCase {
    pub fn new(requests: Arc<dyn ChatRequestStore>) -> Self {
        Self { requests }
    }

    pub async fn execute(
        &self,
        caller: UserId,
        other: UserId,
    ) -> Result<RequestStatusView, RequestStatusError> {
        let pair = PairKey::new(&caller, &other);
        let record = self
            .requests
            .find_by_pair(&pair)
            .await
            .map_err(|e| RequestStatusError::StoreUnavailable(e.to_string()))?;

        Ok(match record {
            Some(request) => RequestStatusView {
                status: Some(request.status),
                is_sender: request.sender == caller,
            },
            None => RequestStatusView {
                status: None,
                is_sender: false,
            },
        })
    }
}
