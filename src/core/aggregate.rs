//! Ticket aggregations over an optional creation-date window.
//!
//! Windows select the cohort of tickets by `created_at`. Response-time and
//! staff figures only count answered tickets; the distribution counts every
//! ticket because it measures incoming load.

use crate::core::{
    DateWindow, Priority, PriorityCount, ResponseTimeStat, StaffPerformance, SupportTicket,
    TicketQuery, TicketStatus,
};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default, Clone, Copy)]
struct Latency {
    total_ms: i64,
    count: u64,
}

impl Latency {
    fn record(&mut self, ms: i64) {
        self.total_ms += ms;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms as f64 / self.count as f64
        }
    }
}

fn answered_cohort<'a>(
    tickets: &'a [SupportTicket],
    window: Option<&DateWindow>,
) -> impl Iterator<Item = (&'a SupportTicket, i64)> + 'a {
    let query = TicketQuery::answered(window.copied());
    tickets
        .iter()
        .filter(move |ticket| query.matches(ticket))
        .filter_map(|ticket| ticket.response_time_ms().map(|ms| (ticket, ms)))
}

/// Mean latency per tier, always high, medium, low. Empty tiers report
/// `0.0` with `count == 0`.
pub fn response_time_by_priority(
    tickets: &[SupportTicket],
    window: Option<&DateWindow>,
) -> Vec<ResponseTimeStat> {
    let mut by_tier: HashMap<Priority, Latency> = HashMap::new();
    for (ticket, ms) in answered_cohort(tickets, window) {
        by_tier.entry(ticket.priority()).or_default().record(ms);
    }

    Priority::ALL
        .iter()
        .map(|priority| {
            let latency = by_tier.get(priority).copied().unwrap_or_default();
            ResponseTimeStat {
                priority: *priority,
                avg_response_time_ms: latency.mean(),
                count: latency.count,
            }
        })
        .collect()
}

/// One row per responder seen in the answered cohort, ordered by staff id.
pub fn staff_performance(
    tickets: &[SupportTicket],
    window: Option<&DateWindow>,
) -> Vec<StaffPerformance> {
    let mut by_staff: BTreeMap<&str, Latency> = BTreeMap::new();
    for (ticket, ms) in answered_cohort(tickets, window) {
        if let Some(responder) = ticket.responder_id() {
            by_staff.entry(responder).or_default().record(ms);
        }
    }

    by_staff
        .into_iter()
        .map(|(staff_id, latency)| StaffPerformance {
            staff_id: staff_id.to_string(),
            total_answered: latency.count,
            avg_response_time_ms: latency.mean(),
        })
        .collect()
}

/// Ticket count per tier regardless of status, always high, medium, low.
pub fn priority_distribution(
    tickets: &[SupportTicket],
    window: Option<&DateWindow>,
) -> Vec<PriorityCount> {
    let query = TicketQuery::all(window.copied());
    let mut counts: HashMap<Priority, u64> = HashMap::new();
    for ticket in tickets.iter().filter(|ticket| query.matches(ticket)) {
        *counts.entry(ticket.priority()).or_default() += 1;
    }

    Priority::ALL
        .iter()
        .map(|priority| PriorityCount {
            priority: *priority,
            count: counts.get(priority).copied().unwrap_or(0),
        })
        .collect()
}

/// Pending tickets for the staff queue: higher tiers first, newest first
/// within a tier.
pub fn pending_queue(tickets: &[SupportTicket]) -> Vec<SupportTicket> {
    let mut pending: Vec<SupportTicket> = tickets
        .iter()
        .filter(|ticket| ticket.status() == TicketStatus::Pending)
        .cloned()
        .collect();
    pending.sort_by(|a, b| {
        a.priority()
            .cmp(&b.priority())
            .then_with(|| b.created_at().cmp(&a.created_at()))
            .then_with(|| a.id().cmp(&b.id()))
    });
    pending
}

/// Answered tickets for the audit log, most recently answered first.
pub fn answered_log(tickets: &[SupportTicket], window: Option<&DateWindow>) -> Vec<SupportTicket> {
    let query = TicketQuery::answered(window.copied());
    let mut answered: Vec<SupportTicket> = tickets
        .iter()
        .filter(|ticket| query.matches(ticket))
        .cloned()
        .collect();
    answered.sort_by(|a, b| {
        b.answered_at()
            .cmp(&a.answered_at())
            .then_with(|| a.id().cmp(&b.id()))
    });
    answered
}
