use crate::core::{
    Answer, DateWindow, Priority, SatisfactionSurvey, SupportTicket, SurveyStore, TicketQuery,
    TicketStatus, TicketStore,
};
use crate::utils::error::{AnalyticsError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_TICKETS_FILE: &str = "tickets.csv";
pub const DEFAULT_SURVEYS_FILE: &str = "surveys.csv";

#[derive(Debug, Deserialize)]
struct TicketRow {
    id: i64,
    customer_contact: String,
    question_text: String,
    priority: String,
    status: String,
    responder_id: Option<String>,
    created_at: DateTime<Utc>,
    answered_at: Option<DateTime<Utc>>,
}

/// A CSV row keyed by a numeric id that must be unique within its file.
trait KeyedRow {
    const KIND: &'static str;

    fn id(&self) -> i64;
}

impl KeyedRow for TicketRow {
    const KIND: &'static str = "ticket";

    fn id(&self) -> i64 {
        self.id
    }
}

impl TryFrom<TicketRow> for SupportTicket {
    type Error = AnalyticsError;

    fn try_from(row: TicketRow) -> Result<Self> {
        let label = format!("ticket {}", row.id);
        let priority: Priority = row.priority.parse()?;
        let status: TicketStatus = row.status.parse()?;
        let responder = row.responder_id.filter(|r| !r.trim().is_empty());

        let answer = match (status, responder, row.answered_at) {
            (TicketStatus::Pending, None, None) => None,
            (TicketStatus::Answered, Some(responder_id), Some(answered_at)) => Some(Answer {
                responder_id,
                answered_at,
            }),
            (TicketStatus::Pending, _, _) => {
                return Err(AnalyticsError::invalid_record(
                    label,
                    "pending ticket carries answer fields",
                ))
            }
            (TicketStatus::Answered, _, _) => {
                return Err(AnalyticsError::invalid_record(
                    label,
                    "answered ticket needs both responder_id and answered_at",
                ))
            }
        };

        SupportTicket::restore(
            row.id,
            row.customer_contact,
            row.question_text,
            priority,
            row.created_at,
            answer,
        )
        .map_err(|e| AnalyticsError::invalid_record(label, e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct SurveyRow {
    id: i64,
    customer_contact: String,
    rating: u8,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
}

impl KeyedRow for SurveyRow {
    const KIND: &'static str = "survey";

    fn id(&self) -> i64 {
        self.id
    }
}

impl TryFrom<SurveyRow> for SatisfactionSurvey {
    type Error = AnalyticsError;

    fn try_from(row: SurveyRow) -> Result<Self> {
        SatisfactionSurvey::new(
            row.id,
            row.customer_contact,
            row.rating,
            row.feedback.filter(|f| !f.is_empty()),
            row.created_at,
        )
    }
}

/// Reads ticket and survey exports from a directory. Files are re-read on
/// every query; RFC 3339 timestamps are expected.
#[derive(Debug, Clone)]
pub struct CsvStore {
    base_path: PathBuf,
    tickets_file: String,
    surveys_file: String,
}

impl CsvStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            tickets_file: DEFAULT_TICKETS_FILE.to_string(),
            surveys_file: DEFAULT_SURVEYS_FILE.to_string(),
        }
    }

    pub fn with_files(mut self, tickets_file: &str, surveys_file: &str) -> Self {
        self.tickets_file = tickets_file.to_string();
        self.surveys_file = surveys_file.to_string();
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(name);
        tokio::fs::read(&full_path).await.map_err(|e| {
            AnalyticsError::store_unavailable(format!("{}: {}", full_path.display(), e))
        })
    }

    async fn read_rows<R, T>(&self, name: &str) -> Result<Vec<T>>
    where
        R: KeyedRow + for<'de> Deserialize<'de>,
        T: TryFrom<R, Error = AnalyticsError>,
    {
        let data = self.read_file(name).await?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for row in reader.deserialize::<R>() {
            let row = row?;
            if !seen.insert(row.id()) {
                return Err(AnalyticsError::invalid_record(
                    format!("{} {}", R::KIND, row.id()),
                    "duplicate id",
                ));
            }
            records.push(T::try_from(row)?);
        }
        tracing::debug!("Read {} rows from {}", records.len(), name);
        Ok(records)
    }
}

#[async_trait]
impl TicketStore for CsvStore {
    async fn tickets(&self, query: &TicketQuery) -> Result<Vec<SupportTicket>> {
        let tickets: Vec<SupportTicket> = self
            .read_rows::<TicketRow, SupportTicket>(&self.tickets_file)
            .await?;
        Ok(tickets.into_iter().filter(|t| query.matches(t)).collect())
    }
}

#[async_trait]
impl SurveyStore for CsvStore {
    async fn surveys(&self, window: Option<&DateWindow>) -> Result<Vec<SatisfactionSurvey>> {
        let surveys: Vec<SatisfactionSurvey> = self
            .read_rows::<SurveyRow, SatisfactionSurvey>(&self.surveys_file)
            .await?;
        Ok(surveys
            .into_iter()
            .filter(|s| window.map_or(true, |w| w.contains(s.created_at())))
            .collect())
    }
}
