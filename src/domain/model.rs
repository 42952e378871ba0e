use crate::domain::ports::PriorityClassifier;
use crate::utils::error::{AnalyticsError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Fixed reporting order for per-tier results.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(AnalyticsError::invalid_record(
                "priority",
                format!("unknown priority '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Pending,
    Answered,
}

impl FromStr for TicketStatus {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TicketStatus::Pending),
            "answered" => Ok(TicketStatus::Answered),
            other => Err(AnalyticsError::invalid_record(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub responder_id: String,
    pub answered_at: DateTime<Utc>,
}

/// A customer question. Priority is fixed at creation; the only
/// transition is a single pending -> answered step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    id: i64,
    customer_contact: String,
    question_text: String,
    priority: Priority,
    created_at: DateTime<Utc>,
    answer: Option<Answer>,
}

impl SupportTicket {
    /// Creates a pending ticket, classifying the question exactly once.
    pub fn open<C: PriorityClassifier + ?Sized>(
        id: i64,
        customer_contact: impl Into<String>,
        question_text: impl Into<String>,
        created_at: DateTime<Utc>,
        classifier: &C,
    ) -> Self {
        let question_text = question_text.into();
        let priority = classifier.classify(&question_text);
        Self {
            id,
            customer_contact: customer_contact.into(),
            question_text,
            priority,
            created_at,
            answer: None,
        }
    }

    /// Rebuilds a persisted ticket, checking the answered-field invariants.
    pub fn restore(
        id: i64,
        customer_contact: String,
        question_text: String,
        priority: Priority,
        created_at: DateTime<Utc>,
        answer: Option<Answer>,
    ) -> Result<Self> {
        let mut ticket = Self {
            id,
            customer_contact,
            question_text,
            priority,
            created_at,
            answer: None,
        };
        if let Some(answer) = answer {
            ticket.answer(answer.responder_id, answer.answered_at)?;
        }
        Ok(ticket)
    }

    pub fn answer(&mut self, responder_id: impl Into<String>, answered_at: DateTime<Utc>) -> Result<()> {
        let responder_id = responder_id.into();
        if self.answer.is_some() {
            return Err(self.transition_error("ticket is already answered"));
        }
        if responder_id.trim().is_empty() {
            return Err(self.transition_error("responder id is empty"));
        }
        if answered_at < self.created_at {
            return Err(self.transition_error("answer time precedes creation time"));
        }
        self.answer = Some(Answer {
            responder_id,
            answered_at,
        });
        Ok(())
    }

    fn transition_error(&self, reason: &str) -> AnalyticsError {
        AnalyticsError::InvalidTransition {
            ticket_id: self.id,
            reason: reason.to_string(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn customer_contact(&self) -> &str {
        &self.customer_contact
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> TicketStatus {
        if self.answer.is_some() {
            TicketStatus::Answered
        } else {
            TicketStatus::Pending
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn responder_id(&self) -> Option<&str> {
        self.answer.as_ref().map(|a| a.responder_id.as_str())
    }

    pub fn answered_at(&self) -> Option<DateTime<Utc>> {
        self.answer.as_ref().map(|a| a.answered_at)
    }

    /// Milliseconds between creation and answer, `None` while pending.
    pub fn response_time_ms(&self) -> Option<i64> {
        self.answered_at()
            .map(|answered| (answered - self.created_at).num_milliseconds())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SatisfactionSurvey {
    id: i64,
    customer_contact: String,
    rating: u8,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
}

impl SatisfactionSurvey {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    pub fn new(
        id: i64,
        customer_contact: impl Into<String>,
        rating: u8,
        feedback: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&rating) {
            return Err(AnalyticsError::invalid_record(
                format!("survey {}", id),
                format!(
                    "rating {} outside {}..={}",
                    rating,
                    Self::MIN_RATING,
                    Self::MAX_RATING
                ),
            ));
        }
        Ok(Self {
            id,
            customer_contact: customer_contact.into(),
            rating,
            feedback,
            created_at,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn customer_contact(&self) -> &str {
        &self.customer_contact
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// UTC calendar day the survey is bucketed under.
    pub fn day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Inclusive `[start, end]` instant range applied to `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawWindow> for DateWindow {
    type Error = AnalyticsError;

    fn try_from(raw: RawWindow) -> Result<Self> {
        DateWindow::new(raw.start, raw.end)
    }
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AnalyticsError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whole UTC days: `start` midnight through the last nanosecond of `end`.
    pub fn days(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        DayRange::new(start, end).map(|range| range.window())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Inclusive range of UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDayRange")]
pub struct DayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDayRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDayRange> for DayRange {
    type Error = AnalyticsError;

    fn try_from(raw: RawDayRange) -> Result<Self> {
        DayRange::new(raw.start, raw.end)
    }
}

impl DayRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AnalyticsError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn window(&self) -> DateWindow {
        let last_instant = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
            .unwrap_or(NaiveTime::MIN);
        DateWindow {
            start: self.start.and_time(NaiveTime::MIN).and_utc(),
            end: self.end.and_time(last_instant).and_utc(),
        }
    }

    /// Every day in the range, ascending.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

// ---------------------------------------------------------------------------
// Result shapes handed to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTimeStat {
    pub priority: Priority,
    pub avg_response_time_ms: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPerformance {
    pub staff_id: String,
    pub total_answered: u64,
    pub avg_response_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCount {
    pub priority: Priority,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendPoint {
    pub date: NaiveDate,
    pub avg_rating: Option<f64>,
    pub survey_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub average_rating: f64,
    pub total_surveys: u64,
    pub days_with_data: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub range: DayRange,
    pub trend: Vec<DailyTrendPoint>,
    pub stats: PeriodStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDelta {
    pub rating_change: f64,
    pub percentage_change: f64,
    pub survey_count_change: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub period1: PeriodSummary,
    pub period2: PeriodSummary,
    pub comparison: ComparisonDelta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_requests: u64,
    pub high_priority_avg_response_time_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub window: Option<DateWindow>,
    pub response_times: Vec<ResponseTimeStat>,
    pub staff_performance: Vec<StaffPerformance>,
    pub priority_distribution: Vec<PriorityCount>,
    pub summary: ReportSummary,
}
