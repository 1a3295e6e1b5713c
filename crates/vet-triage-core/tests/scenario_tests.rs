//! End-to-end scenarios for a single clinic session.

use chrono::{DateTime, Duration, TimeZone, Utc};
use vet_triage_core::{
    AppointmentDraft, AppointmentType, ClinicConfig, Coordinator, CoordinatorError, InMemoryPets,
    ManualClock, NotificationClass, Pet, Reminder, ReminderKind, SequentialIds, Severity,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).unwrap()
}

fn session(pets: Vec<Pet>) -> (Coordinator, ManualClock) {
    let clock = ManualClock::new(t0());
    let config = ClinicConfig {
        welcome_notification: false,
        ..ClinicConfig::default()
    };
    let coordinator = Coordinator::with_sources(
        config,
        InMemoryPets::with_pets(pets),
        clock.clone(),
        SequentialIds::new(),
    );
    (coordinator, clock)
}

fn roster() -> Vec<Pet> {
    vec![
        Pet::new("p1", "Buddy", "Dog"),
        Pet::new("p2", "Whiskers", "Cat"),
    ]
}

fn draft(pet_id: &str, severity: Severity, date: DateTime<Utc>) -> AppointmentDraft {
    AppointmentDraft::new(pet_id, "City Vet Clinic", date, AppointmentType::Checkup, severity)
}

fn severities(coordinator: &Coordinator) -> Vec<Severity> {
    coordinator
        .queue_snapshot()
        .into_iter()
        .map(|a| a.severity)
        .collect()
}

#[test]
fn test_critical_later_beats_routine_earlier_in_either_order() -> anyhow::Result<()> {
    let (mut first, _) = session(roster());
    first.book_appointment(draft("p1", Severity::Critical, t0() + Duration::hours(1)))?;
    first.book_appointment(draft("p2", Severity::Routine, t0()))?;

    let (mut second, _) = session(roster());
    second.book_appointment(draft("p2", Severity::Routine, t0()))?;
    second.book_appointment(draft("p1", Severity::Critical, t0() + Duration::hours(1)))?;

    assert_eq!(severities(&first), vec![Severity::Critical, Severity::Routine]);
    assert_eq!(severities(&second), vec![Severity::Critical, Severity::Routine]);
    Ok(())
}

#[test]
fn test_same_date_routine_keeps_booking_order() -> anyhow::Result<()> {
    let (mut coordinator, _) = session(roster());
    let a = coordinator.book_appointment(draft("p1", Severity::Routine, t0()))?;
    let b = coordinator.book_appointment(draft("p2", Severity::Routine, t0()))?;

    let ids: Vec<_> = coordinator.queue_snapshot().into_iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    Ok(())
}

#[test]
fn test_confirming_overdue_reminder() -> anyhow::Result<()> {
    let (mut coordinator, _) = session(roster());
    coordinator.import_reminders(vec![Reminder::new(
        "m1",
        "p1",
        "Heartgard Plus",
        ReminderKind::Medicine,
        t0() - Duration::hours(1),
    )
    .with_schedule("1 Chewable", "Monthly")])?;

    let before = coordinator.reminder("m1")?;
    assert!(coordinator.is_overdue(&before));

    let confirmed = coordinator.confirm_medication("m1")?;
    assert!(confirmed.confirmed);
    assert!(!coordinator.is_overdue(&confirmed));

    let feed = coordinator.feed_snapshot();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].title, "Medication Confirmed");
    assert_eq!(feed[0].class, NotificationClass::Success);
    assert!(!feed[0].read);

    // Second confirmation is a no-op
    coordinator.confirm_medication("m1")?;
    assert_eq!(coordinator.feed_snapshot().len(), 1);
    Ok(())
}

#[test]
fn test_walk_in_with_empty_roster() {
    let (mut coordinator, _) = session(vec![]);
    let queue_before = coordinator.queue_snapshot();
    let feed_before = coordinator.feed_snapshot();

    let result = coordinator.register_walk_in(Severity::Critical);

    assert!(matches!(result, Err(CoordinatorError::EmptyRoster)));
    assert_eq!(coordinator.queue_snapshot(), queue_before);
    assert_eq!(coordinator.feed_snapshot(), feed_before);
}

#[test]
fn test_mark_all_read_on_empty_feed() {
    let (mut coordinator, _) = session(vec![]);
    coordinator.mark_all_read();
    assert_eq!(coordinator.unread_count(), 0);
    assert!(coordinator.feed_snapshot().is_empty());
}

#[test]
fn test_busy_morning() -> anyhow::Result<()> {
    let (mut coordinator, clock) = session(roster());

    coordinator.book_appointment(draft("p1", Severity::Routine, t0() + Duration::hours(2)))?;
    coordinator.book_appointment(draft("p2", Severity::Urgent, t0() + Duration::hours(3)))?;

    clock.advance(Duration::minutes(10));
    let walk_in = coordinator.register_walk_in(Severity::Critical)?;
    clock.advance(Duration::minutes(10));
    let second_walk_in = coordinator.register_walk_in(Severity::Routine)?;

    let queue = coordinator.queue_snapshot();
    assert_eq!(queue[0].id, walk_in.id);
    assert_eq!(queue[1].severity, Severity::Urgent);
    // Routine walk-in arrived before the routine booking's slot
    assert_eq!(queue[2].id, second_walk_in.id);
    assert_eq!(queue[3].severity, Severity::Routine);

    assert_eq!(coordinator.count_by_severity(Severity::Critical), 1);
    assert_eq!(coordinator.count_by_severity(Severity::Routine), 2);

    let titles: Vec<_> = coordinator
        .feed_snapshot()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(
        titles,
        vec!["New Walk-in", "New Walk-in", "Booking Confirmed", "Booking Confirmed"]
    );
    assert_eq!(coordinator.unread_count(), 4);

    let newest = coordinator.feed_snapshot()[0].id.clone();
    coordinator.mark_read(&newest)?;
    assert_eq!(coordinator.unread_count(), 3);
    coordinator.mark_all_read();
    assert_eq!(coordinator.unread_count(), 0);
    Ok(())
}

#[test]
fn test_due_window_moves_with_the_clock() -> anyhow::Result<()> {
    let (mut coordinator, clock) = session(roster());
    coordinator.import_reminders(vec![
        Reminder::new("m1", "p1", "Rabies Booster", ReminderKind::Vaccine, t0() + Duration::days(14)),
        Reminder::new("m2", "p2", "Annual Checkup", ReminderKind::Checkup, t0() + Duration::days(2)),
    ])?;

    let due: Vec<_> = coordinator
        .due_within(Duration::days(3))
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(due, vec!["m2"]);

    clock.advance(Duration::days(12));
    let due: Vec<_> = coordinator
        .due_within(Duration::days(3))
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(due, vec!["m1"]);

    let overdue: Vec<_> = coordinator
        .overdue_reminders()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(overdue, vec!["m2"]);
    Ok(())
}
