//! Notification feed.
//!
//! Newest entry first. Entries are never removed and read flags never revert.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Notification, NotificationClass};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Notification not found: {0}")]
    NotFound(String),
}

pub type FeedResult<T> = Result<T, FeedError>;

/// Reverse-chronological notification log.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new unread notification.
    pub fn emit(
        &mut self,
        id: String,
        timestamp: DateTime<Utc>,
        title: impl Into<String>,
        message: impl Into<String>,
        class: NotificationClass,
        action_label: Option<String>,
    ) -> Notification {
        let notification = Notification {
            id,
            title: title.into(),
            message: message.into(),
            class,
            timestamp,
            read: false,
            action_label,
        };
        self.entries.push_front(notification.clone());
        notification
    }

    /// Mark one entry read. Already-read entries are left as they are.
    pub fn mark_read(&mut self, id: &str) -> FeedResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| FeedError::NotFound(id.to_string()))?;
        entry.read = true;
        Ok(())
    }

    /// Mark every entry read; returns how many were unread.
    pub fn mark_all_read(&mut self) -> usize {
        let mut flipped = 0;
        for entry in self.entries.iter_mut().filter(|n| !n.read) {
            entry.read = true;
            flipped += 1;
        }
        flipped
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Copy of the feed, newest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
