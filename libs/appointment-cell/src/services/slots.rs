use chrono::{Duration, NaiveTime};

use shared_config::AppConfig;

use crate::models::{AppointmentError, TimeInterval};

/// The fixed daily schedule grid: candidate slot start times between the
/// opening and closing hour, at a fixed slot length. Pure and deterministic;
/// the grid is derived per query and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct SlotGrid {
    open: NaiveTime,
    close: NaiveTime,
    slot_minutes: u32,
}

impl SlotGrid {
    /// Build a grid from whole opening hours. The closing hour is exclusive
    /// and must fit in the same day.
    pub fn new(open_hour: u32, close_hour: u32, slot_minutes: u32) -> Result<Self, AppointmentError> {
        if slot_minutes == 0 {
            return Err(AppointmentError::ValidationError(
                "Slot duration must be positive".to_string(),
            ));
        }
        let open = NaiveTime::from_hms_opt(open_hour, 0, 0).ok_or_else(|| {
            AppointmentError::ValidationError(format!("Invalid opening hour: {}", open_hour))
        })?;
        let close = NaiveTime::from_hms_opt(close_hour, 0, 0).ok_or_else(|| {
            AppointmentError::ValidationError(format!("Invalid closing hour: {}", close_hour))
        })?;
        if open >= close {
            return Err(AppointmentError::ValidationError(format!(
                "Schedule window {}..{} is empty",
                open_hour, close_hour
            )));
        }

        Ok(Self {
            open,
            close,
            slot_minutes,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppointmentError> {
        Self::new(
            config.schedule_open_hour,
            config.schedule_close_hour,
            config.slot_minutes,
        )
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(self.slot_minutes as i64)
    }

    /// The ordered candidate slots for one day. A trailing window shorter
    /// than the slot length is dropped rather than offered truncated.
    pub fn slots(&self) -> Vec<TimeInterval> {
        let mut slots = Vec::new();
        let mut start = self.open;

        loop {
            let (end, wrapped) = start.overflowing_add_signed(self.slot_duration());
            if wrapped != 0 || end > self.close || end <= start {
                break;
            }
            slots.push(TimeInterval::from_parts(start, end));
            start = end;
        }

        slots
    }

    /// Just the start times, the shape the wire surface exposes.
    pub fn slot_starts(&self) -> Vec<NaiveTime> {
        self.slots().iter().map(|slot| slot.start()).collect()
    }
}
