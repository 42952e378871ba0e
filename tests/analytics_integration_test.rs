use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use helpdesk_analytics::core::{DateWindow, DayRange, Priority, PriorityClassifier, TicketStatus};
use helpdesk_analytics::{AnalyticsEngine, AnalyticsError, KeywordClassifier, MemoryStore};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
}

/// Tickets answered one and two hours after creation.
#[tokio::test]
async fn test_response_time_scenario_through_engine() -> Result<()> {
    let store = MemoryStore::new();
    let classifier = KeywordClassifier::default();

    let high = store
        .open_ticket("a@example.com", "Emergency: site is down", t0(), &classifier)
        .await;
    let medium = store
        .open_ticket("b@example.com", "How long until delivery?", t0(), &classifier)
        .await;
    assert_eq!(high.priority(), Priority::High);
    assert_eq!(medium.priority(), Priority::Medium);

    store
        .answer_ticket(high.id(), "alice", t0() + Duration::milliseconds(3_600_000))
        .await?;
    store
        .answer_ticket(medium.id(), "bob", t0() + Duration::milliseconds(7_200_000))
        .await?;

    let engine = AnalyticsEngine::new(store);
    let stats = engine.response_time_by_priority(None).await?;

    assert_eq!(stats.len(), 3);
    assert_eq!(stats[0].priority, Priority::High);
    assert_eq!(stats[0].avg_response_time_ms, 3_600_000.0);
    assert_eq!(stats[0].count, 1);
    assert_eq!(stats[1].priority, Priority::Medium);
    assert_eq!(stats[1].avg_response_time_ms, 7_200_000.0);
    assert_eq!(stats[1].count, 1);
    assert_eq!(stats[2].priority, Priority::Low);
    assert_eq!(stats[2].avg_response_time_ms, 0.0);
    assert_eq!(stats[2].count, 0);
    Ok(())
}

#[tokio::test]
async fn test_counts_sum_to_window_totals() -> Result<()> {
    let store = MemoryStore::new();
    let classifier = KeywordClassifier::default();
    let questions = [
        "urgent help",
        "when is my order coming",
        "hello there",
        "refund request",
        "problem with login",
    ];
    for (i, question) in questions.iter().enumerate() {
        let created = t0() + Duration::days(i as i64);
        let ticket = store
            .open_ticket("c@example.com", question, created, &classifier)
            .await;
        if i % 2 == 0 {
            store
                .answer_ticket(ticket.id(), "alice", created + Duration::minutes(30))
                .await?;
        }
    }

    let engine = AnalyticsEngine::new(store);
    let window = DateWindow::days(day(1), day(3))?;

    let distribution = engine.priority_distribution(Some(&window)).await?;
    assert_eq!(distribution.iter().map(|p| p.count).sum::<u64>(), 3);

    let latency = engine.response_time_by_priority(Some(&window)).await?;
    assert_eq!(latency.iter().map(|r| r.count).sum::<u64>(), 2);

    let staff = engine.staff_performance(Some(&window)).await?;
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].total_answered, 2);
    assert_eq!(staff[0].avg_response_time_ms, 1_800_000.0);

    let everything = engine.priority_distribution(None).await?;
    assert_eq!(everything.iter().map(|p| p.count).sum::<u64>(), 5);
    Ok(())
}

#[tokio::test]
async fn test_trend_scenario_with_gap_day() -> Result<()> {
    let store = MemoryStore::new();
    for rating in [5, 4, 3] {
        store.add_survey("s@example.com", rating, None, t0()).await?;
    }

    let engine = AnalyticsEngine::new(store);
    let trend = engine.daily_trend(day(1), day(2)).await?;

    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].date, day(1));
    assert_eq!(trend[0].avg_rating, Some(4.0));
    assert_eq!(trend[0].survey_count, 3);
    assert_eq!(trend[1].date, day(2));
    assert_eq!(trend[1].avg_rating, None);
    assert_eq!(trend[1].survey_count, 0);

    let json = serde_json::to_value(&trend)?;
    assert_eq!(json[0]["avgRating"], 4.0);
    assert!(json[1]["avgRating"].is_null());
    assert_eq!(json[1]["surveyCount"], 0);
    assert_eq!(json[0]["date"], "2024-07-01");
    Ok(())
}

#[tokio::test]
async fn test_trend_length_matches_range() -> Result<()> {
    let engine = AnalyticsEngine::new(MemoryStore::new());

    assert_eq!(engine.daily_trend(day(4), day(4)).await?.len(), 1);

    let range = DayRange::new(day(1), day(31))?;
    let trend = engine.daily_trend(range.start, range.end).await?;
    assert_eq!(trend.len() as i64, range.len_days());
    assert!(trend.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));

    let err = engine.daily_trend(day(5), day(4)).await.unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidRange { .. }));
    Ok(())
}

#[tokio::test]
async fn test_compare_weights_days_equally() -> Result<()> {
    let store = MemoryStore::new();
    // period 1: one busy happy day and one quiet unhappy day
    for _ in 0..9 {
        store.add_survey("a", 5, None, t0()).await?;
    }
    store.add_survey("b", 1, None, t0() + Duration::days(1)).await?;
    // period 2: steady 3s
    store.add_survey("c", 3, None, t0() + Duration::days(10)).await?;
    store.add_survey("d", 3, None, t0() + Duration::days(11)).await?;

    let engine = AnalyticsEngine::new(store);
    let result = engine
        .compare(DayRange::new(day(1), day(2))?, DayRange::new(day(11), day(12))?)
        .await?;

    // daily means 5.0 and 1.0 -> 3.0, not the 4.6 an overall mean would give
    assert_eq!(result.period1.stats.average_rating, 3.0);
    assert_eq!(result.period1.stats.total_surveys, 10);
    assert_eq!(result.period1.stats.days_with_data, 2);
    assert_eq!(result.period2.stats.average_rating, 3.0);
    assert_eq!(result.comparison.rating_change, 0.0);
    assert_eq!(result.comparison.percentage_change, 0.0);
    assert_eq!(result.comparison.survey_count_change, 8);
    Ok(())
}

#[tokio::test]
async fn test_compare_identical_periods() -> Result<()> {
    let store = MemoryStore::new();
    store.add_survey("a", 2, None, t0()).await?;
    store.add_survey("b", 5, None, t0() + Duration::days(2)).await?;

    let engine = AnalyticsEngine::new(store);
    let period = DayRange::new(day(1), day(7))?;
    let result = engine.compare(period, period).await?;
    assert_eq!(result.comparison.rating_change, 0.0);
    assert_eq!(result.comparison.percentage_change, 0.0);
    assert_eq!(result.comparison.survey_count_change, 0);
    assert_eq!(result.period1, result.period2);
    Ok(())
}

#[tokio::test]
async fn test_pending_queue_and_lifecycle() -> Result<()> {
    let store = MemoryStore::new();
    let classifier = KeywordClassifier::default();
    let hello = store.open_ticket("a", "hello", t0(), &classifier).await;
    let broken = store
        .open_ticket("b", "my order is broken", t0() - Duration::hours(1), &classifier)
        .await;
    let answered = store
        .open_ticket("c", "complaint", t0(), &classifier)
        .await;
    store
        .answer_ticket(answered.id(), "alice", t0() + Duration::hours(1))
        .await?;

    let engine = AnalyticsEngine::new(store);
    let queue = engine.pending_queue().await?;
    let ids: Vec<i64> = queue.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec![broken.id(), hello.id()]);
    assert!(queue.iter().all(|t| t.status() == TicketStatus::Pending));

    let log = engine.answered_log(None).await?;
    let ids: Vec<i64> = log.iter().map(|t| t.id()).collect();
    assert_eq!(ids, vec![answered.id()]);
    assert_eq!(log[0].responder_id(), Some("alice"));
    Ok(())
}

#[tokio::test]
async fn test_classifier_is_shareable_across_tasks() -> Result<()> {
    let classifier = std::sync::Arc::new(KeywordClassifier::default());
    let mut handles = Vec::new();
    for text in ["urgent", "hello", "issue"] {
        let classifier = classifier.clone();
        handles.push(tokio::spawn(async move { classifier.classify(text) }));
    }
    let mut tiers = Vec::new();
    for handle in handles {
        tiers.push(handle.await?);
    }
    assert_eq!(tiers, vec![Priority::High, Priority::Medium, Priority::Medium]);
    Ok(())
}
