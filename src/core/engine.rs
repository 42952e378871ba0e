use crate::core::aggregate;
use crate::core::comparison::compare_periods;
use crate::core::trend::trend_for_range;
use crate::core::{
    AnalyticsReport, DailyTrendPoint, DateWindow, DayRange, PeriodComparison, Priority,
    PriorityCount, ReportSummary, ResponseTimeStat, SatisfactionSurvey, StaffPerformance,
    SupportTicket, SurveyStore, TicketQuery, TicketStore,
};
use crate::utils::error::Result;
use chrono::NaiveDate;

/// Read-only analytics over an injected store. Holds no mutable state, so
/// one engine can serve concurrent callers.
pub struct AnalyticsEngine<S> {
    store: S,
}

impl<S: TicketStore + SurveyStore> AnalyticsEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn load_tickets(&self, query: TicketQuery) -> Result<Vec<SupportTicket>> {
        match self.store.tickets(&query).await {
            Ok(tickets) => {
                tracing::debug!("Loaded {} tickets for {:?}", tickets.len(), query);
                Ok(tickets)
            }
            Err(e) => {
                tracing::warn!("Ticket read failed: {}", e);
                Err(e)
            }
        }
    }

    async fn load_surveys(&self, window: &DateWindow) -> Result<Vec<SatisfactionSurvey>> {
        match self.store.surveys(Some(window)).await {
            Ok(surveys) => {
                tracing::debug!(
                    "Loaded {} surveys for {} .. {}",
                    surveys.len(),
                    window.start,
                    window.end
                );
                Ok(surveys)
            }
            Err(e) => {
                tracing::warn!("Survey read failed: {}", e);
                Err(e)
            }
        }
    }

    pub async fn response_time_by_priority(
        &self,
        window: Option<&DateWindow>,
    ) -> Result<Vec<ResponseTimeStat>> {
        let tickets = self.load_tickets(TicketQuery::answered(window.copied())).await?;
        Ok(aggregate::response_time_by_priority(&tickets, window))
    }

    pub async fn staff_performance(
        &self,
        window: Option<&DateWindow>,
    ) -> Result<Vec<StaffPerformance>> {
        let tickets = self.load_tickets(TicketQuery::answered(window.copied())).await?;
        Ok(aggregate::staff_performance(&tickets, window))
    }

    pub async fn priority_distribution(
        &self,
        window: Option<&DateWindow>,
    ) -> Result<Vec<PriorityCount>> {
        let tickets = self.load_tickets(TicketQuery::all(window.copied())).await?;
        Ok(aggregate::priority_distribution(&tickets, window))
    }

    pub async fn pending_queue(&self) -> Result<Vec<SupportTicket>> {
        let tickets = self.load_tickets(TicketQuery::pending()).await?;
        Ok(aggregate::pending_queue(&tickets))
    }

    pub async fn answered_log(&self, window: Option<&DateWindow>) -> Result<Vec<SupportTicket>> {
        let tickets = self.load_tickets(TicketQuery::answered(window.copied())).await?;
        Ok(aggregate::answered_log(&tickets, window))
    }

    pub async fn daily_trend(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyTrendPoint>> {
        let range = DayRange::new(start, end)?;
        let surveys = self.load_surveys(&range.window()).await?;
        Ok(trend_for_range(&surveys, &range))
    }

    pub async fn compare(&self, period1: DayRange, period2: DayRange) -> Result<PeriodComparison> {
        let (window1, window2) = (period1.window(), period2.window());
        let (first, second) =
            tokio::try_join!(self.load_surveys(&window1), self.load_surveys(&window2))?;
        let result = compare_periods(&first, &period1, &second, &period2);
        tracing::debug!(
            "Compared {:?} with {:?}: rating change {}",
            period1,
            period2,
            result.comparison.rating_change
        );
        Ok(result)
    }

    /// Response times, staff rows and distribution for one window, from a
    /// single ticket read.
    pub async fn report(&self, window: Option<&DateWindow>) -> Result<AnalyticsReport> {
        let tickets = self.load_tickets(TicketQuery::all(window.copied())).await?;

        let response_times = aggregate::response_time_by_priority(&tickets, window);
        let staff_performance = aggregate::staff_performance(&tickets, window);
        let priority_distribution = aggregate::priority_distribution(&tickets, window);

        let summary = ReportSummary {
            total_requests: priority_distribution.iter().map(|p| p.count).sum(),
            high_priority_avg_response_time_ms: response_times
                .iter()
                .find(|stat| stat.priority == Priority::High && stat.count > 0)
                .map(|stat| stat.avg_response_time_ms),
        };

        tracing::info!(
            "Report built over {} requests ({} responders)",
            summary.total_requests,
            staff_performance.len()
        );

        Ok(AnalyticsReport {
            window: window.copied(),
            response_times,
            staff_performance,
            priority_distribution,
            summary,
        })
    }
}
