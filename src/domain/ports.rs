use crate::domain::model::{
    DateWindow, Priority, SatisfactionSurvey, SupportTicket, TicketStatus,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Assigns a tier to free-form question text. Must never fail.
pub trait PriorityClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Priority;
}

/// Filter pushed down to a [`TicketStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub status: Option<TicketStatus>,
    /// Applied to `created_at`, never to `answered_at`.
    pub window: Option<DateWindow>,
}

impl TicketQuery {
    pub fn all(window: Option<DateWindow>) -> Self {
        Self {
            status: None,
            window,
        }
    }

    pub fn answered(window: Option<DateWindow>) -> Self {
        Self {
            status: Some(TicketStatus::Answered),
            window,
        }
    }

    pub fn pending() -> Self {
        Self {
            status: Some(TicketStatus::Pending),
            window: None,
        }
    }

    pub fn matches(&self, ticket: &SupportTicket) -> bool {
        self.status.map_or(true, |status| ticket.status() == status)
            && self
                .window
                .map_or(true, |window| window.contains(ticket.created_at()))
    }
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn tickets(&self, query: &TicketQuery) -> Result<Vec<SupportTicket>>;
}

#[async_trait]
pub trait SurveyStore: Send + Sync {
    async fn surveys(&self, window: Option<&DateWindow>) -> Result<Vec<SatisfactionSurvey>>;
}
