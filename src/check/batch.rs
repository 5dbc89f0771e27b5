use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use tracing::warn;

use super::{CheckOptions, ValidationResult, validate};

/// Validates a batch of addresses on a fixed-size pool of worker threads.
///
/// Workers pull the next input from a shared cursor, so a slow SMTP server
/// only delays its own address. Results arrive in completion order, not
/// input order. Every input yields exactly one result: a panicking check is
/// caught and reported as `check_error` instead of poisoning the batch.
pub fn validate_batch(emails: &[String], options: &CheckOptions) -> Vec<ValidationResult> {
    if emails.is_empty() {
        return Vec::new();
    }

    let workers = options.concurrency.clamp(1, emails.len());
    let cursor = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let cursor = &cursor;
            scope.spawn(move || {
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(email) = emails.get(index) else { break };
                    let result = catch_unwind(AssertUnwindSafe(|| validate(email, options)))
                        .unwrap_or_else(|payload| {
                            warn!(email = %email, "validation worker panicked");
                            ValidationResult::check_error(
                                email.as_str(),
                                describe_panic(payload.as_ref()),
                            )
                        });
                    if tx.send(result).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);
        rx.into_iter().collect()
    })
}

fn describe_panic(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("check failed: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("check failed: {message}")
    } else {
        "check failed: unexpected error".to_string()
    }
}
