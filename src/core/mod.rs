pub mod aggregate;
pub mod classifier;
pub mod comparison;
pub mod engine;
pub mod trend;

pub use crate::domain::model::{
    AnalyticsReport, Answer, ComparisonDelta, DailyTrendPoint, DateWindow, DayRange,
    PeriodComparison, PeriodStats, PeriodSummary, Priority, PriorityCount, ReportSummary,
    ResponseTimeStat, SatisfactionSurvey, StaffPerformance, SupportTicket, TicketStatus,
};
pub use crate::domain::ports::{PriorityClassifier, SurveyStore, TicketQuery, TicketStore};
pub use crate::utils::error::Result;
