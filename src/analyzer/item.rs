//! Per-item analyzer: accessibility check, then policy, folded into exactly one outcome.

use log::debug;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::any::Any;
use std::mem;
use std::panic::{self, AssertUnwindSafe};

use super::access::check_accessible;
use super::policy::AnalysisPolicy;
use crate::error::ClassifiedError;
use crate::{AnalysisOutcome, LogDescriptor};

/// Analyze one descriptor. Never fails: every error, including a panicking policy, becomes a
/// `FAILED` outcome. Holds no state across calls, so distinct descriptors can run concurrently.
pub fn analyze_item(
    descriptor: &LogDescriptor,
    policy: &dyn AnalysisPolicy,
    rng: &mut dyn RngCore,
) -> AnalysisOutcome {
    match check_then_analyze(descriptor, policy, rng) {
        Ok(()) => AnalysisOutcome::ok(descriptor),
        Err(err) => {
            debug!("{} failed: {}", descriptor.id, err.chain());
            AnalysisOutcome::failed(descriptor, &err)
        }
    }
}

fn check_then_analyze(
    descriptor: &LogDescriptor,
    policy: &dyn AnalysisPolicy,
    rng: &mut dyn RngCore,
) -> Result<(), ClassifiedError> {
    check_accessible(&descriptor.path)?;
    contain_panic(|| policy.analyze(descriptor, rng)).unwrap_or_else(|msg| {
        Err(ClassifiedError::parsing_failure(
            &descriptor.id,
            &descriptor.path,
            format!("analysis policy panicked: {msg}"),
        ))
    })
}

/// [`analyze_item`] with a panic guard around the whole item, for worker threads: a panic that
/// escapes the analyzer itself still yields a `FAILED` outcome for `descriptor`.
pub fn analyze_item_guarded(
    descriptor: &LogDescriptor,
    policy: &dyn AnalysisPolicy,
    rng: &mut dyn RngCore,
) -> AnalysisOutcome {
    contain_panic(|| analyze_item(descriptor, policy, rng)).unwrap_or_else(|msg| {
        lost_outcome(descriptor, &format!("analysis panicked: {msg}"))
    })
}

/// `FAILED` outcome for an item whose analysis ended without producing one.
pub fn lost_outcome(descriptor: &LogDescriptor, reason: &str) -> AnalysisOutcome {
    let err = ClassifiedError::parsing_failure(&descriptor.id, &descriptor.path, reason);
    AnalysisOutcome::failed(descriptor, &err)
}

/// Run `f`, turning a panic into its message. The payload is dropped under its own guard and
/// leaked if its `Drop` panics too, so nothing unwinds out of here.
fn contain_panic<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let msg = panic_message(payload.as_ref()).to_string();
        if let Err(nested) = panic::catch_unwind(AssertUnwindSafe(move || drop(payload))) {
            mem::forget(nested);
        }
        msg
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

/// RNG for the item at input position `index`: `seed + index` when seeded, else from entropy.
pub fn item_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;
    use std::fs;

    fn always_ok(_: &LogDescriptor, _: &mut dyn RngCore) -> Result<(), ClassifiedError> {
        Ok(())
    }

    fn always_fail(d: &LogDescriptor, _: &mut dyn RngCore) -> Result<(), ClassifiedError> {
        Err(ClassifiedError::parsing_failure(&d.id, &d.path, "unsupported format"))
    }

    fn always_panic(_: &LogDescriptor, _: &mut dyn RngCore) -> Result<(), ClassifiedError> {
        panic!("boom")
    }

    fn log_file(dir: &tempfile::TempDir, name: &str) -> LogDescriptor {
        let p = dir.path().join(name);
        fs::write(&p, "127.0.0.1 - GET /\n").unwrap();
        LogDescriptor::new(name, p.to_str().unwrap(), "apache")
    }

    #[test]
    fn accessible_and_accepted_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let d = log_file(&dir, "a.log");
        let out = analyze_item(&d, &always_ok, &mut item_rng(Some(0), 0));
        assert_eq!(out.status, Status::Ok);
        assert_eq!(out.log_id, "a.log");
        assert_eq!(out.file_path, d.path);
        assert!(out.error_details.is_empty());
    }

    #[test]
    fn missing_file_skips_policy() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.log");
        let d = LogDescriptor::new("gone", missing.to_str().unwrap(), "syslog");
        // Panicking policy would turn into a parsing failure if it were reached.
        let out = analyze_item(&d, &always_panic, &mut item_rng(None, 0));
        assert_eq!(out.status, Status::Failed);
        assert_eq!(out.message, "File not found.");
        assert!(out.error_details.contains(missing.to_str().unwrap()));
    }

    #[test]
    fn rejected_content_is_parsing_failure() {
        let dir = tempfile::tempdir().unwrap();
        let d = log_file(&dir, "b.log");
        let out = analyze_item(&d, &always_fail, &mut item_rng(None, 0));
        assert_eq!(out.status, Status::Failed);
        assert_eq!(out.message, "Parsing error.");
        assert_eq!(
            out.error_details,
            format!("parsing error for b.log ({}): unsupported format", d.path)
        );
    }

    #[test]
    fn panicking_policy_is_contained() {
        let dir = tempfile::tempdir().unwrap();
        let d = log_file(&dir, "c.log");
        let out = analyze_item(&d, &always_panic, &mut item_rng(None, 0));
        assert_eq!(out.status, Status::Failed);
        assert!(out.error_details.contains("analysis policy panicked: boom"));
    }

    struct ExplodingPayload;

    impl Drop for ExplodingPayload {
        fn drop(&mut self) {
            panic!("payload drop");
        }
    }

    fn panic_with_exploding_payload(
        _: &LogDescriptor,
        _: &mut dyn RngCore,
    ) -> Result<(), ClassifiedError> {
        panic::panic_any(ExplodingPayload)
    }

    #[test]
    fn payload_that_panics_on_drop_is_contained() {
        let dir = tempfile::tempdir().unwrap();
        let d = log_file(&dir, "d.log");
        let out = analyze_item_guarded(&d, &panic_with_exploding_payload, &mut item_rng(None, 0));
        assert_eq!(out.status, Status::Failed);
        assert_eq!(out.log_id, "d.log");
        assert!(out.error_details.contains("analysis policy panicked: unknown panic"));
    }

    #[test]
    fn guarded_matches_plain_when_nothing_panics() {
        let dir = tempfile::tempdir().unwrap();
        let d = log_file(&dir, "e.log");
        let plain = analyze_item(&d, &always_fail, &mut item_rng(Some(1), 0));
        let guarded = analyze_item_guarded(&d, &always_fail, &mut item_rng(Some(1), 0));
        assert_eq!(plain, guarded);
    }

    #[test]
    fn seeded_rng_depends_on_index() {
        let a = item_rng(Some(9), 0).next_u64();
        let b = item_rng(Some(9), 0).next_u64();
        let c = item_rng(Some(9), 1).next_u64();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
