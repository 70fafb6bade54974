//! Named scheduled tasks, owned in one place.
//!
//! The original UI-framework rendition of this game scattered its timing
//! across ad-hoc interval and timeout callbacks that each mutated shared
//! state. Here every timer is a named due-timestamp owned by this one
//! struct; the engine drains `due()` and applies the matching pure
//! transition, so nothing ever fires "between" mutations.
//!
//! RULES:
//!   - Decay runs only while the pet is alive, hatched, and awake.
//!   - Sleep timers are cancelled BEFORE the waking mutation is applied.
//!   - A due recurring task reschedules relative to now, not to its
//!     missed slot; long stalls are the offline catch-up's problem.

use crate::{config::GameConfig, types::EpochMs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Recurring stat decay, nominally every 30 s.
    DecayTick,
    /// 1 s sleep-energy interpolation update.
    SleepTick,
    /// One-shot full-recovery bonus at the end of the sleep window.
    SleepComplete,
    /// Cosmetic hourly age recomputation.
    AgeRefresh,
    /// Random-event eligibility check.
    EventCheck,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    decay_interval_ms: EpochMs,
    sleep_tick_interval_ms: EpochMs,
    age_interval_ms: EpochMs,
    event_interval_ms: EpochMs,

    next_decay: Option<EpochMs>,
    next_sleep_tick: Option<EpochMs>,
    sleep_complete_at: Option<EpochMs>,
    next_age_refresh: EpochMs,
    next_event_check: EpochMs,
}

impl Scheduler {
    pub fn new(now_ms: EpochMs, config: &GameConfig) -> Self {
        Self {
            decay_interval_ms: config.decay.tick_interval_ms,
            sleep_tick_interval_ms: config.sleep.tick_interval_ms,
            age_interval_ms: config.age_refresh_interval_ms,
            event_interval_ms: config.event_timing.check_interval_ms,
            next_decay: None,
            next_sleep_tick: None,
            sleep_complete_at: None,
            next_age_refresh: now_ms + config.age_refresh_interval_ms,
            next_event_check: now_ms + config.event_timing.check_interval_ms,
        }
    }

    pub fn arm_decay(&mut self, now_ms: EpochMs) {
        self.next_decay = Some(now_ms + self.decay_interval_ms);
    }

    pub fn cancel_decay(&mut self) {
        self.next_decay = None;
    }

    pub fn decay_armed(&self) -> bool {
        self.next_decay.is_some()
    }

    /// Arm both sleep timers: the recurring interpolation tick and the
    /// one-shot completion mark.
    pub fn arm_sleep(&mut self, now_ms: EpochMs, complete_at: EpochMs) {
        self.next_sleep_tick = Some(now_ms + self.sleep_tick_interval_ms);
        self.sleep_complete_at = Some(complete_at);
    }

    pub fn cancel_sleep(&mut self) {
        self.next_sleep_tick = None;
        self.sleep_complete_at = None;
    }

    /// Pop every task due at `now_ms`, re-arming the recurring ones.
    /// Order is fixed: sleep updates run before decay so a completion
    /// lands before any same-instant decay bookkeeping, and the cheap
    /// cosmetic tasks come last.
    pub fn due(&mut self, now_ms: EpochMs) -> Vec<TaskKind> {
        let mut due = Vec::new();

        if self.next_sleep_tick.is_some_and(|t| now_ms >= t) {
            self.next_sleep_tick = Some(now_ms + self.sleep_tick_interval_ms);
            due.push(TaskKind::SleepTick);
        }
        if self.sleep_complete_at.is_some_and(|t| now_ms >= t) {
            self.sleep_complete_at = None;
            due.push(TaskKind::SleepComplete);
        }
        if self.next_decay.is_some_and(|t| now_ms >= t) {
            self.next_decay = Some(now_ms + self.decay_interval_ms);
            due.push(TaskKind::DecayTick);
        }
        if now_ms >= self.next_age_refresh {
            self.next_age_refresh = now_ms + self.age_interval_ms;
            due.push(TaskKind::AgeRefresh);
        }
        if now_ms >= self.next_event_check {
            self.next_event_check = now_ms + self.event_interval_ms;
            due.push(TaskKind::EventCheck);
        }

        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    /// Decay fires once per interval and re-arms itself.
    #[test]
    fn decay_tick_recurs() {
        let config = GameConfig::default();
        let mut sched = Scheduler::new(0, &config);
        sched.arm_decay(0);

        assert!(sched.due(29_999).is_empty(), "nothing due before the interval");
        assert_eq!(sched.due(30_000), vec![TaskKind::DecayTick]);
        assert!(sched.due(30_001).is_empty(), "re-armed relative to now");
        assert!(
            sched.due(60_001).contains(&TaskKind::DecayTick),
            "second interval elapsed"
        );
    }

    /// Cancelling sleep drops both the recurring tick and the one-shot.
    #[test]
    fn cancel_sleep_clears_both_timers() {
        let config = GameConfig::default();
        let mut sched = Scheduler::new(0, &config);
        sched.arm_sleep(0, 300_000);
        sched.cancel_sleep();

        let due = sched.due(400_000);
        assert!(
            !due.contains(&TaskKind::SleepTick) && !due.contains(&TaskKind::SleepComplete),
            "cancelled sleep timers still fired: {due:?}"
        );
    }

    /// The one-shot completion fires exactly once.
    #[test]
    fn sleep_complete_is_one_shot() {
        let config = GameConfig::default();
        let mut sched = Scheduler::new(0, &config);
        sched.arm_sleep(0, 300_000);

        let due = sched.due(300_000);
        assert!(due.contains(&TaskKind::SleepComplete), "due at the mark: {due:?}");
        let again = sched.due(600_000);
        assert!(
            !again.contains(&TaskKind::SleepComplete),
            "one-shot fired twice: {again:?}"
        );
    }
}
