use crate::api::{SortDirection, User};

pub const TOOLTIP_MISSING_TOKEN: &str = "Set API token in Settings → Miniflux Tweaks";
pub const TOOLTIP_FETCH_FAILED: &str = "Failed to fetch user settings - check API token";
pub const ALERT_UPDATE_FAILED: &str = "Failed to update sort order. Check console for details.";

/// Lifecycle of the injected sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortControlPhase {
    /// Selector is in the page but not yet initialized.
    Initializing,
    /// Permanently inert for this page load (no token, or the user
    /// fetch failed).
    Disabled,
    /// Initialized from the server and accepting changes.
    Ready,
    /// A preference update is in flight; the selector is disabled so a
    /// second change cannot start while one is pending.
    Saving,
}

/// What happened, as reported by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortControlEvent {
    TokenMissing,
    UserLoaded { user: User },
    UserLoadFailed,
    DirectionChanged { direction: SortDirection },
    UpdateSucceeded,
    UpdateFailed,
}

/// What the shell must now do to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortControlEffect {
    /// Disable the selector and explain why in its tooltip.
    DisableControl { tooltip: &'static str },
    /// Enable the selector, showing the given value.
    EnableControl { value: SortDirection },
    /// Disable the selector and issue the preference update.
    BeginUpdate {
        user_id: i64,
        direction: SortDirection,
    },
    /// Reload the page so the list re-renders server-side.
    ReloadPage,
    /// Put the selector back to `value`, re-enable it, and alert.
    RevertControl {
        value: SortDirection,
        alert: &'static str,
    },
}

/// Policy half of the sort control: events in, DOM/network effects out.
/// The shell performs the effects; nothing here touches the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortControlState {
    phase: SortControlPhase,
    user_id: Option<i64>,
    /// Value to roll back to when an update fails.
    original: SortDirection,
}

impl Default for SortControlState {
    fn default() -> Self {
        Self {
            phase: SortControlPhase::Initializing,
            user_id: None,
            original: SortDirection::Desc,
        }
    }
}

impl SortControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SortControlPhase {
        self.phase
    }

    pub fn apply_event(&mut self, event: SortControlEvent) -> Vec<SortControlEffect> {
        match event {
            SortControlEvent::TokenMissing => {
                if self.phase != SortControlPhase::Initializing {
                    return Vec::new();
                }
                self.phase = SortControlPhase::Disabled;
                vec![SortControlEffect::DisableControl {
                    tooltip: TOOLTIP_MISSING_TOKEN,
                }]
            }
            SortControlEvent::UserLoadFailed => {
                if self.phase != SortControlPhase::Initializing {
                    return Vec::new();
                }
                self.phase = SortControlPhase::Disabled;
                vec![SortControlEffect::DisableControl {
                    tooltip: TOOLTIP_FETCH_FAILED,
                }]
            }
            SortControlEvent::UserLoaded { user } => {
                if self.phase != SortControlPhase::Initializing {
                    return Vec::new();
                }
                self.phase = SortControlPhase::Ready;
                self.user_id = Some(user.id);
                self.original = user.sorting_direction();
                vec![SortControlEffect::EnableControl {
                    value: self.original,
                }]
            }
            SortControlEvent::DirectionChanged { direction } => {
                if self.phase != SortControlPhase::Ready {
                    return Vec::new();
                }
                let Some(user_id) = self.user_id else {
                    return Vec::new();
                };
                if direction == self.original {
                    return Vec::new();
                }
                self.phase = SortControlPhase::Saving;
                vec![SortControlEffect::BeginUpdate { user_id, direction }]
            }
            SortControlEvent::UpdateSucceeded => {
                if self.phase != SortControlPhase::Saving {
                    return Vec::new();
                }
                self.phase = SortControlPhase::Ready;
                vec![SortControlEffect::ReloadPage]
            }
            SortControlEvent::UpdateFailed => {
                if self.phase != SortControlPhase::Saving {
                    return Vec::new();
                }
                self.phase = SortControlPhase::Ready;
                vec![SortControlEffect::RevertControl {
                    value: self.original,
                    alert: ALERT_UPDATE_FAILED,
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, direction: Option<SortDirection>) -> User {
        User {
            id,
            entry_sorting_direction: direction,
        }
    }

    #[test]
    fn missing_token_disables_without_network() {
        let mut state = SortControlState::new();
        let effects = state.apply_event(SortControlEvent::TokenMissing);
        assert_eq!(
            effects,
            vec![SortControlEffect::DisableControl {
                tooltip: TOOLTIP_MISSING_TOKEN
            }]
        );
        assert_eq!(state.phase(), SortControlPhase::Disabled);
        // A stray change on the disabled control does nothing.
        let effects = state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Asc,
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn fetch_failure_disables_with_failure_tooltip() {
        let mut state = SortControlState::new();
        let effects = state.apply_event(SortControlEvent::UserLoadFailed);
        assert_eq!(
            effects,
            vec![SortControlEffect::DisableControl {
                tooltip: TOOLTIP_FETCH_FAILED
            }]
        );
    }

    #[test]
    fn fetch_success_enables_with_server_direction() {
        let mut state = SortControlState::new();
        let effects = state.apply_event(SortControlEvent::UserLoaded {
            user: user(1, Some(SortDirection::Asc)),
        });
        assert_eq!(
            effects,
            vec![SortControlEffect::EnableControl {
                value: SortDirection::Asc
            }]
        );
        assert_eq!(state.phase(), SortControlPhase::Ready);
    }

    #[test]
    fn fetch_success_defaults_to_desc_when_direction_absent() {
        let mut state = SortControlState::new();
        let effects = state.apply_event(SortControlEvent::UserLoaded {
            user: user(1, None),
        });
        assert_eq!(
            effects,
            vec![SortControlEffect::EnableControl {
                value: SortDirection::Desc
            }]
        );
    }

    #[test]
    fn change_begins_exactly_one_update() {
        let mut state = SortControlState::new();
        state.apply_event(SortControlEvent::UserLoaded {
            user: user(9, Some(SortDirection::Asc)),
        });
        let effects = state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Desc,
        });
        assert_eq!(
            effects,
            vec![SortControlEffect::BeginUpdate {
                user_id: 9,
                direction: SortDirection::Desc
            }]
        );
        assert_eq!(state.phase(), SortControlPhase::Saving);
        // While saving, further changes are ignored; the shell keeps the
        // selector disabled so at most one update is ever in flight.
        let effects = state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Asc,
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn change_to_current_value_is_a_no_op() {
        let mut state = SortControlState::new();
        state.apply_event(SortControlEvent::UserLoaded {
            user: user(9, Some(SortDirection::Asc)),
        });
        let effects = state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Asc,
        });
        assert!(effects.is_empty());
        assert_eq!(state.phase(), SortControlPhase::Ready);
    }

    #[test]
    fn update_success_reloads_exactly_once() {
        let mut state = SortControlState::new();
        state.apply_event(SortControlEvent::UserLoaded {
            user: user(9, Some(SortDirection::Asc)),
        });
        state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Desc,
        });
        let effects = state.apply_event(SortControlEvent::UpdateSucceeded);
        assert_eq!(effects, vec![SortControlEffect::ReloadPage]);
        // A duplicate settle event produces nothing further.
        assert!(state.apply_event(SortControlEvent::UpdateSucceeded).is_empty());
    }

    #[test]
    fn update_failure_reverts_to_the_original_value() {
        let mut state = SortControlState::new();
        state.apply_event(SortControlEvent::UserLoaded {
            user: user(9, Some(SortDirection::Asc)),
        });
        state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Desc,
        });
        let effects = state.apply_event(SortControlEvent::UpdateFailed);
        assert_eq!(
            effects,
            vec![SortControlEffect::RevertControl {
                value: SortDirection::Asc,
                alert: ALERT_UPDATE_FAILED,
            }]
        );
        assert_eq!(state.phase(), SortControlPhase::Ready);
    }

    #[test]
    fn failed_update_can_be_retried_by_another_change() {
        let mut state = SortControlState::new();
        state.apply_event(SortControlEvent::UserLoaded {
            user: user(9, Some(SortDirection::Asc)),
        });
        state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Desc,
        });
        state.apply_event(SortControlEvent::UpdateFailed);
        let effects = state.apply_event(SortControlEvent::DirectionChanged {
            direction: SortDirection::Desc,
        });
        assert_eq!(
            effects,
            vec![SortControlEffect::BeginUpdate {
                user_id: 9,
                direction: SortDirection::Desc
            }]
        );
    }
}
