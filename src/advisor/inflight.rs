use std::sync::atomic::{AtomicU8, Ordering};

use serde::Serialize;

use crate::error::ApiError;

const IDLE: u8 = 0;
const PENDING: u8 = 1;
const DONE: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    Idle,
    Pending,
    Done,
}

/// Per-operation guard against firing a second advisory call while one is
/// still outstanding.
#[derive(Debug)]
pub struct RequestSlot {
    name: &'static str,
    state: AtomicU8,
}

impl RequestSlot {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            state: AtomicU8::new(IDLE),
        }
    }

    pub fn state(&self) -> SlotState {
        match self.state.load(Ordering::Acquire) {
            IDLE => SlotState::Idle,
            PENDING => SlotState::Pending,
            _ => SlotState::Done,
        }
    }

    pub fn try_begin(&self) -> Result<SlotGuard<'_>, ApiError> {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                (s != PENDING).then_some(PENDING)
            })
            .map_err(|_| ApiError::Busy(self.name))?;
        Ok(SlotGuard { slot: self })
    }
}

/// Marks the slot done when dropped, including on early return.
#[must_use]
pub struct SlotGuard<'a> {
    slot: &'a RequestSlot,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.slot.state.store(DONE, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct InFlight {
    pub analyze_food: RequestSlot,
    pub meal_plan: RequestSlot,
    pub remaining: RequestSlot,
    pub advice: RequestSlot,
}

impl Default for InFlight {
    fn default() -> Self {
        Self {
            analyze_food: RequestSlot::new("food analysis"),
            meal_plan: RequestSlot::new("meal plan"),
            remaining: RequestSlot::new("remaining-calorie suggestion"),
            advice: RequestSlot::new("advice"),
        }
    }
}
