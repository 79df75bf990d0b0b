// File: src/banner.rs
// Purpose: Transient status banner shown after a submit attempt

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long an auto-hiding banner stays up
pub const DEFAULT_AUTO_HIDE_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    #[default]
    None,
    Success,
    Error,
}

impl BannerKind {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerKind::None => "",
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

/// When a shown banner disappears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum BannerPolicy {
    /// Hide after a fixed delay
    AutoHide { after_ms: u64 },
    /// Stay until the next submit clears it; the page scrolls to the banner
    UntilNextSubmit,
}

impl Default for BannerPolicy {
    fn default() -> Self {
        BannerPolicy::AutoHide {
            after_ms: DEFAULT_AUTO_HIDE_MS,
        }
    }
}

/// What the host should do with its one-shot hide timer
///
/// A `Schedule` always replaces whatever timer the host had pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TimerInstruction {
    /// Leave the current timer alone
    #[default]
    None,
    /// Start a timer that reports back with `BannerExpired { generation }`
    Schedule { generation: u64, delay_ms: u64 },
    /// Drop the pending timer
    Cancel,
}

/// Banner state owned by the form
///
/// `generation` increases every time the banner is shown or cleared, so an
/// expiry carrying an older generation belongs to a superseded banner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerState {
    pub kind: BannerKind,
    pub message: String,
    pub visible: bool,
    pub visible_until: Option<DateTime<Utc>>,
    pub generation: u64,
}

impl BannerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a banner and tell the host how to time its removal
    pub fn show(
        &mut self,
        kind: BannerKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
        policy: BannerPolicy,
    ) -> TimerInstruction {
        self.generation += 1;
        self.kind = kind;
        self.message = message.into();
        self.visible = true;

        match policy {
            BannerPolicy::AutoHide { after_ms } => {
                let delay = i64::try_from(after_ms).unwrap_or(i64::MAX);
                self.visible_until = Duration::try_milliseconds(delay)
                    .and_then(|delay| now.checked_add_signed(delay));
                TimerInstruction::Schedule {
                    generation: self.generation,
                    delay_ms: after_ms,
                }
            }
            BannerPolicy::UntilNextSubmit => {
                self.visible_until = None;
                TimerInstruction::None
            }
        }
    }

    /// Hide the banner and invalidate any pending timer
    pub fn clear(&mut self) -> TimerInstruction {
        let had_timer = self.visible_until.is_some();
        self.generation += 1;
        self.hide();

        if had_timer {
            TimerInstruction::Cancel
        } else {
            TimerInstruction::None
        }
    }

    /// Timer callback; returns whether the banner was hidden
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.visible {
            return false;
        }
        self.hide();
        true
    }

    /// Clock-driven expiry for hosts without timers
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match self.visible_until {
            Some(until) if self.visible && now >= until => {
                self.hide();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn hide(&mut self) {
        self.kind = BannerKind::None;
        self.message.clear();
        self.visible = false;
        self.visible_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_auto_hide_schedules_timer() {
        let mut banner = BannerState::new();
        let timer = banner.show(BannerKind::Success, "ok", t0(), BannerPolicy::default());

        assert_eq!(
            timer,
            TimerInstruction::Schedule {
                generation: 1,
                delay_ms: 3000
            }
        );
        assert!(banner.is_visible());
        assert_eq!(banner.visible_until, Some(t0() + Duration::milliseconds(3000)));
    }

    #[test]
    fn test_expire_hides_current_banner() {
        let mut banner = BannerState::new();
        banner.show(BannerKind::Error, "bad", t0(), BannerPolicy::default());

        assert!(banner.expire(1));
        assert!(!banner.is_visible());
        assert_eq!(banner.kind, BannerKind::None);
        assert!(banner.message.is_empty());
    }

    #[test]
    fn test_superseded_timer_is_ignored() {
        let mut banner = BannerState::new();
        banner.show(BannerKind::Error, "first", t0(), BannerPolicy::default());
        banner.show(BannerKind::Success, "second", t0(), BannerPolicy::default());

        // the first banner's timer fires late
        assert!(!banner.expire(1));
        assert!(banner.is_visible());
        assert_eq!(banner.message, "second");

        assert!(banner.expire(2));
    }

    #[test]
    fn test_clear_cancels_pending_timer() {
        let mut banner = BannerState::new();
        banner.show(BannerKind::Success, "ok", t0(), BannerPolicy::default());

        assert_eq!(banner.clear(), TimerInstruction::Cancel);
        assert!(!banner.expire(1));
        assert_eq!(banner.clear(), TimerInstruction::None);
    }

    #[test]
    fn test_until_next_submit_persists() {
        let mut banner = BannerState::new();
        let timer = banner.show(
            BannerKind::Error,
            "bad",
            t0(),
            BannerPolicy::UntilNextSubmit,
        );

        assert_eq!(timer, TimerInstruction::None);
        assert!(!banner.tick(t0() + Duration::hours(1)));
        assert!(banner.is_visible());
    }

    #[test]
    fn test_tick() {
        let mut banner = BannerState::new();
        banner.show(BannerKind::Success, "ok", t0(), BannerPolicy::default());

        assert!(!banner.tick(t0() + Duration::milliseconds(2999)));
        assert!(banner.tick(t0() + Duration::milliseconds(3000)));
        assert!(!banner.is_visible());
    }
}
