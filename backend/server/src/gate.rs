//! # Reveal Gate
//!
//! Time-gated access to the case files.
//!
//! Two states: **Sealed** until `now >= deadline` or a force reveal, then **Revealed** until
//! the next reset. Resets clear the force flag and push the deadline to `now + offset`.
//!
//! ## Notes
//! - State lives in this process only. Multiple server processes each hold their own gate,
//!   so a force reveal or reset is only seen by the process that received it.
//! - Callers pass `now` in, tests never touch the wall clock.
use bank::CaseFile;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
struct Timer {
    deadline: DateTime<Utc>,
    force_reveal: bool,
}

impl Timer {
    fn is_revealed(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline || self.force_reveal
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Disclosure<'a> {
    Locked,
    Open(&'a [CaseFile]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStatus {
    /// Whole seconds until the automatic reveal, zero once the deadline passed.
    pub time_remaining: u64,
    pub is_revealed: bool,
}

#[derive(Debug)]
pub struct RevealGate {
    offset: Duration,
    cases: Vec<CaseFile>,
    timer: RwLock<Timer>,
}

impl RevealGate {
    pub fn new(now: DateTime<Utc>, offset: Duration, cases: Vec<CaseFile>) -> Self {
        Self {
            offset,
            cases,
            timer: RwLock::new(Timer {
                deadline: now + offset,
                force_reveal: false,
            }),
        }
    }

    pub fn evaluate(&self, now: DateTime<Utc>) -> Disclosure<'_> {
        let timer = *self.timer.read();

        debug!(
            now = %now.format("%H:%M:%S"),
            deadline = %timer.deadline.format("%H:%M:%S"),
            forced = timer.force_reveal,
            "Evaluating case files"
        );

        if timer.is_revealed(now) {
            info!("Revealing case files");
            Disclosure::Open(&self.cases)
        } else {
            debug!("Case files still sealed");
            Disclosure::Locked
        }
    }

    pub fn force_disclose(&self) {
        self.timer.write().force_reveal = true;

        info!("Force reveal activated");
    }

    pub fn reset_timer(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let deadline = now + self.offset;

        *self.timer.write() = Timer {
            deadline,
            force_reveal: false,
        };

        info!(%deadline, "Investigation restarted");
        deadline
    }

    pub fn status(&self, now: DateTime<Utc>) -> GateStatus {
        let timer = *self.timer.read();

        GateStatus {
            time_remaining: (timer.deadline - now).num_seconds().max(0) as u64,
            is_revealed: timer.is_revealed(now),
        }
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.timer.read().deadline
    }

    pub fn is_forced(&self) -> bool {
        self.timer.read().force_reveal
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use bank::get_bank;
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
    }

    fn gate() -> RevealGate {
        RevealGate::new(at(0), Duration::seconds(30), get_bank().unwrap())
    }

    #[test]
    fn test_sealed_before_deadline() {
        let gate = gate();

        for secs in [-100, 0, 5, 29] {
            assert_eq!(gate.evaluate(at(secs)), Disclosure::Locked);
        }
    }

    #[test]
    fn test_open_at_and_after_deadline() {
        let gate = gate();
        let bank = get_bank().unwrap();

        for secs in [30, 31, 3600] {
            assert_eq!(gate.evaluate(at(secs)), Disclosure::Open(&bank));
        }
    }

    #[test]
    fn test_force_opens_any_time() {
        let gate = gate();
        gate.force_disclose();

        assert!(gate.is_forced());
        for secs in [-100, 0, 5, 30, 3600] {
            assert!(matches!(gate.evaluate(at(secs)), Disclosure::Open(_)));
        }
    }

    #[test]
    fn test_force_idempotent() {
        let gate = gate();
        gate.force_disclose();
        let deadline = gate.deadline();

        gate.force_disclose();

        assert!(gate.is_forced());
        assert_eq!(gate.deadline(), deadline);
    }

    #[test]
    fn test_reset_reseals() {
        let gate = gate();
        gate.force_disclose();

        let deadline = gate.reset_timer(at(40));

        assert_eq!(deadline, at(70));
        assert_eq!(gate.deadline(), at(70));
        assert!(!gate.is_forced());
        assert_eq!(gate.evaluate(at(40)), Disclosure::Locked);
    }

    #[test]
    fn test_reset_moves_forward() {
        let gate = gate();
        let first = gate.reset_timer(at(10));
        let second = gate.reset_timer(at(11));

        assert!(second > first);
        assert!(first > at(10));
    }

    #[test]
    fn test_status_remaining() {
        let gate = gate();

        assert_eq!(
            gate.status(at(0)),
            GateStatus {
                time_remaining: 30,
                is_revealed: false
            }
        );
        assert_eq!(gate.status(at(5)).time_remaining, 25);

        for secs in [30, 31, 10_000] {
            assert_eq!(
                gate.status(at(secs)),
                GateStatus {
                    time_remaining: 0,
                    is_revealed: true
                }
            );
        }
    }

    #[test]
    fn test_status_truncates_partial_seconds() {
        let gate = gate();
        let now = at(5) + Duration::milliseconds(900);

        assert_eq!(gate.status(now).time_remaining, 24);
    }

    #[test]
    fn test_status_matches_evaluate_when_forced() {
        let gate = gate();
        gate.force_disclose();

        let status = gate.status(at(5));

        assert!(status.is_revealed);
        assert_eq!(status.time_remaining, 25);
    }

    #[test]
    fn test_scenario() {
        let gate = gate();

        assert_eq!(gate.evaluate(at(5)), Disclosure::Locked);

        match gate.evaluate(at(30)) {
            Disclosure::Open(cases) => {
                assert_eq!(cases.len(), 10);
                assert_eq!(cases, get_bank().unwrap().as_slice());
            }
            Disclosure::Locked => panic!("expected case files to be open"),
        }

        gate.force_disclose();
        assert!(matches!(gate.evaluate(at(5)), Disclosure::Open(_)));

        assert_eq!(gate.reset_timer(at(40)), at(70));
        assert_eq!(gate.evaluate(at(45)), Disclosure::Locked);
    }
}
