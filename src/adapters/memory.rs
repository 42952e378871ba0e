use crate::core::{
    DateWindow, PriorityClassifier, SatisfactionSurvey, SupportTicket, SurveyStore, TicketQuery,
    TicketStore,
};
use crate::utils::error::{AnalyticsError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    tickets: Vec<SupportTicket>,
    surveys: Vec<SatisfactionSurvey>,
}

/// In-process store. Clones share the same tables.
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    next_id: Arc<AtomicI64>,
    available: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            next_id: Arc::new(AtomicI64::new(1)),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// While unavailable every read fails with `StoreUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AnalyticsError::store_unavailable("memory store is offline"))
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub async fn open_ticket<C: PriorityClassifier + ?Sized>(
        &self,
        customer_contact: &str,
        question_text: &str,
        created_at: DateTime<Utc>,
        classifier: &C,
    ) -> SupportTicket {
        let ticket = SupportTicket::open(
            self.allocate_id(),
            customer_contact,
            question_text,
            created_at,
            classifier,
        );
        tracing::debug!("Opened ticket {} as {}", ticket.id(), ticket.priority());
        self.tables.write().await.tickets.push(ticket.clone());
        ticket
    }

    /// Inserts an already-built ticket, e.g. one restored from another store.
    pub async fn insert_ticket(&self, ticket: SupportTicket) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.tickets.iter().any(|t| t.id() == ticket.id()) {
            return Err(AnalyticsError::invalid_record(
                format!("ticket {}", ticket.id()),
                "duplicate id",
            ));
        }
        self.next_id.fetch_max(ticket.id().saturating_add(1), Ordering::SeqCst);
        tables.tickets.push(ticket);
        Ok(())
    }

    pub async fn answer_ticket(
        &self,
        ticket_id: i64,
        responder_id: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<SupportTicket> {
        let mut tables = self.tables.write().await;
        let ticket = tables
            .tickets
            .iter_mut()
            .find(|t| t.id() == ticket_id)
            .ok_or_else(|| AnalyticsError::InvalidTransition {
                ticket_id,
                reason: "ticket not found".to_string(),
            })?;
        ticket.answer(responder_id, answered_at)?;
        Ok(ticket.clone())
    }

    pub async fn add_survey(
        &self,
        customer_contact: &str,
        rating: u8,
        feedback: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<SatisfactionSurvey> {
        let survey = SatisfactionSurvey::new(
            self.allocate_id(),
            customer_contact,
            rating,
            feedback,
            created_at,
        )?;
        self.tables.write().await.surveys.push(survey.clone());
        Ok(survey)
    }

    pub async fn insert_survey(&self, survey: SatisfactionSurvey) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.surveys.iter().any(|s| s.id() == survey.id()) {
            return Err(AnalyticsError::invalid_record(
                format!("survey {}", survey.id()),
                "duplicate id",
            ));
        }
        self.next_id.fetch_max(survey.id().saturating_add(1), Ordering::SeqCst);
        tables.surveys.push(survey);
        Ok(())
    }

    /// Copies every ticket and survey from `source`. Returns the number of
    /// tickets and surveys copied.
    pub async fn import_from<S>(&self, source: &S) -> Result<(usize, usize)>
    where
        S: TicketStore + SurveyStore + ?Sized,
    {
        let tickets = source.tickets(&TicketQuery::all(None)).await?;
        let surveys = source.surveys(None).await?;
        let counts = (tickets.len(), surveys.len());
        for ticket in tickets {
            self.insert_ticket(ticket).await?;
        }
        for survey in surveys {
            self.insert_survey(survey).await?;
        }
        tracing::info!("Imported {} tickets and {} surveys", counts.0, counts.1);
        Ok(counts)
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn tickets(&self, query: &TicketQuery) -> Result<Vec<SupportTicket>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .tickets
            .iter()
            .filter(|ticket| query.matches(ticket))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SurveyStore for MemoryStore {
    async fn surveys(&self, window: Option<&DateWindow>) -> Result<Vec<SatisfactionSurvey>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .surveys
            .iter()
            .filter(|survey| window.map_or(true, |w| w.contains(survey.created_at())))
            .cloned()
            .collect())
    }
}
