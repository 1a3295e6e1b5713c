//! Property tests for queue ordering, confirmation and read state.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use vet_triage_core::{
    AppointmentDraft, AppointmentType, ClinicConfig, Coordinator, InMemoryPets, ManualClock,
    NotificationClass, Pet, Reminder, ReminderKind, SequentialIds, Severity,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).unwrap()
}

fn session() -> (Coordinator, ManualClock) {
    let clock = ManualClock::new(t0());
    let config = ClinicConfig {
        welcome_notification: false,
        ..ClinicConfig::default()
    };
    let coordinator = Coordinator::with_sources(
        config,
        InMemoryPets::with_pets(vec![Pet::new("p1", "Buddy", "Dog")]),
        clock.clone(),
        SequentialIds::new(),
    );
    (coordinator, clock)
}

#[derive(Debug, Clone)]
enum QueueOp {
    /// Book at t0 + offset minutes
    Book(Severity, i64),
    /// Advance the clock, then register a walk-in
    WalkIn(Severity, i64),
}

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Critical),
        Just(Severity::Urgent),
        Just(Severity::Routine),
    ]
}

fn queue_op() -> impl Strategy<Value = QueueOp> {
    // Small ranges so equal dates show up often
    prop_oneof![
        (severity(), 0i64..4).prop_map(|(s, m)| QueueOp::Book(s, m)),
        (severity(), 0i64..2).prop_map(|(s, m)| QueueOp::WalkIn(s, m)),
    ]
}

#[derive(Debug, Clone)]
enum FeedOp {
    Emit,
    MarkRead(usize),
    MarkAllRead,
}

fn feed_op() -> impl Strategy<Value = FeedOp> {
    prop_oneof![
        3 => Just(FeedOp::Emit),
        3 => (0usize..16).prop_map(FeedOp::MarkRead),
        1 => Just(FeedOp::MarkAllRead),
    ]
}

proptest! {
    #[test]
    fn queue_is_always_triage_sorted_and_stable(ops in prop::collection::vec(queue_op(), 1..40)) {
        let (mut coordinator, clock) = session();
        let mut inserted_at: HashMap<String, usize> = HashMap::new();

        for (i, op) in ops.into_iter().enumerate() {
            let appt = match op {
                QueueOp::Book(severity, offset) => {
                    let draft = AppointmentDraft::new(
                        "p1",
                        "City Vet Clinic",
                        t0() + Duration::minutes(offset),
                        AppointmentType::Checkup,
                        severity,
                    );
                    coordinator.book_appointment(draft).unwrap()
                }
                QueueOp::WalkIn(severity, advance) => {
                    clock.advance(Duration::minutes(advance));
                    coordinator.register_walk_in(severity).unwrap()
                }
            };
            inserted_at.insert(appt.id, i);

            let queue = coordinator.queue_snapshot();
            for pair in queue.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let key_a = (std::cmp::Reverse(a.severity.weight()), a.date);
                let key_b = (std::cmp::Reverse(b.severity.weight()), b.date);
                prop_assert!(key_a <= key_b, "out of order: {:?} before {:?}", a, b);
                if key_a == key_b {
                    prop_assert!(inserted_at[&a.id] < inserted_at[&b.id]);
                }
            }
        }

        prop_assert_eq!(coordinator.queue_snapshot().len(), inserted_at.len());
        prop_assert_eq!(coordinator.feed_snapshot().len(), inserted_at.len());
    }

    #[test]
    fn confirm_twice_equals_confirm_once(count in 1usize..6, pick in 0usize..6) {
        let reminders: Vec<Reminder> = (0..count)
            .map(|i| Reminder::new(
                format!("m{}", i),
                "p1",
                "Heartgard",
                ReminderKind::Medicine,
                t0() + Duration::hours(i as i64 - 2),
            ))
            .collect();
        let id = format!("m{}", pick % count);

        let (mut once, _) = session();
        once.import_reminders(reminders.clone()).unwrap();
        once.confirm_medication(&id).unwrap();

        let (mut twice, _) = session();
        twice.import_reminders(reminders).unwrap();
        twice.confirm_medication(&id).unwrap();
        twice.confirm_medication(&id).unwrap();

        prop_assert_eq!(once.reminders(), twice.reminders());
        prop_assert_eq!(once.feed_snapshot(), twice.feed_snapshot());
        prop_assert_eq!(twice.feed_snapshot().len(), 1);
    }

    #[test]
    fn read_state_is_monotonic(ops in prop::collection::vec(feed_op(), 0..50)) {
        let (mut coordinator, _) = session();
        let mut ids: Vec<String> = Vec::new();

        for op in ops {
            let read_before: Vec<String> = coordinator
                .feed_snapshot()
                .into_iter()
                .filter(|n| n.read)
                .map(|n| n.id)
                .collect();

            match op {
                FeedOp::Emit => {
                    let n = coordinator.record_event("Event", "Something happened", NotificationClass::Info, None);
                    ids.push(n.id);
                }
                FeedOp::MarkRead(i) => {
                    if let Some(id) = ids.get(i) {
                        coordinator.mark_read(id).unwrap();
                        coordinator.mark_read(id).unwrap();
                    }
                }
                FeedOp::MarkAllRead => coordinator.mark_all_read(),
            }

            let feed = coordinator.feed_snapshot();
            for id in &read_before {
                prop_assert!(feed.iter().any(|n| &n.id == id && n.read));
            }
            let unread = feed.iter().filter(|n| !n.read).count();
            prop_assert_eq!(coordinator.unread_count(), unread);
        }

        // Newest first
        let order: Vec<String> = coordinator.feed_snapshot().into_iter().map(|n| n.id).collect();
        let mut expected = ids.clone();
        expected.reverse();
        prop_assert_eq!(order, expected);
    }
}
