//! Sequential outbox drain
//!
//! Processes the queue one item at a time (single flight per item by
//! construction). Due items are attempted through the transport: a
//! delivery drops the item from the queue, a failure goes through the
//! retry state machine. Items not due, and dead items, pass through
//! untouched — nothing is ever silently dropped.

use chrono::{DateTime, Utc};

use crate::observability::Logger;

use super::message::QueuedEmail;
use super::retry::RetryPolicy;
use super::transport::MailTransport;

/// Counts from one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Items that were due and attempted.
    pub attempted: usize,
    /// Attempts that delivered (items removed from the queue).
    pub delivered: usize,
    /// Attempts that failed but remain pending.
    pub failed: usize,
    /// Attempts that failed and crossed the attempt cap.
    pub dead_lettered: usize,
}

/// Drains the queue through an injected transport and policy.
pub struct OutboxWorker<'a> {
    transport: &'a dyn MailTransport,
    policy: &'a RetryPolicy,
}

impl<'a> OutboxWorker<'a> {
    pub fn new(transport: &'a dyn MailTransport, policy: &'a RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// One sequential pass over the queue at time `now`.
    ///
    /// Returns the surviving queue (pending and dead items, in order)
    /// plus the pass counts.
    pub fn drain(
        &self,
        queue: Vec<QueuedEmail>,
        now: DateTime<Utc>,
    ) -> (Vec<QueuedEmail>, DrainReport) {
        let mut surviving = Vec::with_capacity(queue.len());
        let mut report = DrainReport::default();

        for mut item in queue {
            if !item.is_due(now) {
                surviving.push(item);
                continue;
            }

            report.attempted += 1;
            match self.transport.deliver(&item) {
                Ok(()) => {
                    report.delivered += 1;
                    Logger::info(
                        "NOTICE_DELIVERED",
                        &[("id", &item.id), ("to", &item.email)],
                    );
                    // Confirmed delivery: the item ceases to exist.
                }
                Err(e) => {
                    item.record_failure(now, &e.to_string(), self.policy);
                    if item.dead {
                        report.dead_lettered += 1;
                        Logger::error(
                            "NOTICE_DEAD_LETTERED",
                            &[
                                ("id", &item.id),
                                ("to", &item.email),
                                ("attempts", &item.attempts.to_string()),
                                ("error", &item.last_error),
                            ],
                        );
                    } else {
                        report.failed += 1;
                        Logger::warn(
                            "NOTICE_RETRY_SCHEDULED",
                            &[
                                ("id", &item.id),
                                ("to", &item.email),
                                ("attempts", &item.attempts.to_string()),
                                ("error", &item.last_error),
                            ],
                        );
                    }
                    surviving.push(item);
                }
            }
        }

        (surviving, report)
    }
}
