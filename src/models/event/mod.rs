// Event module
// Calendar event model consumed by the row layout engine

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A materialized calendar event instance.
///
/// Recurring events are expected to be expanded into one `Event` per
/// occurrence before they reach the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `title` - Event title (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time (may equal `start`)
    ///
    /// # Examples
    /// ```
    /// use calendar_row_layout::models::event::Event;
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("Team Meeting", start, end).unwrap();
    /// assert_eq!(event.title, "Team Meeting");
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, String> {
        let event = Self {
            id: None,
            title: title.into(),
            start,
            end,
            all_day: false,
            category: None,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if self.end < self.start {
            return Err("Event end time cannot be before start time".to_string());
        }

        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<i64>,
    title: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    all_day: bool,
    category: Option<String>,
    color: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, String> {
        let title = self.title.ok_or("Event title is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.ok_or("Event end time is required")?;

        let event = Event {
            id: self.id,
            title,
            start,
            end,
            all_day: self.all_day,
            category: self.category,
            color: self.color,
        };

        event.validate()?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap()
    }

    #[test]
    fn test_new_event_valid() {
        let start = noon(2025, 3, 3);
        let event = Event::new("Standup", start, start + Duration::minutes(15)).unwrap();
        assert_eq!(event.title, "Standup");
        assert!(!event.all_day);
        assert!(event.id.is_none());
    }

    #[test]
    fn test_zero_length_event_is_valid() {
        let start = noon(2025, 3, 3);
        assert!(Event::new("Reminder", start, start).is_ok());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let start = noon(2025, 3, 3);
        let result = Event::new("Backwards", start, start - Duration::hours(1));
        assert_eq!(
            result.unwrap_err(),
            "Event end time cannot be before start time"
        );
    }

    #[test]
    fn test_empty_title_rejected() {
        let start = noon(2025, 3, 3);
        assert!(Event::new("   ", start, start).is_err());
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = Event::builder()
            .id(7)
            .title("Conference")
            .start(noon(2025, 3, 3))
            .end(noon(2025, 3, 5))
            .category("Work")
            .color("#FF5733")
            .build()
            .unwrap();

        assert_eq!(event.id, Some(7));
        assert_eq!(event.category.as_deref(), Some("Work"));
        assert_ne!(event.start.date_naive(), event.end.date_naive());
    }

    #[test]
    fn test_builder_rejects_bad_color() {
        let result = Event::builder()
            .title("Conference")
            .start(noon(2025, 3, 3))
            .end(noon(2025, 3, 3))
            .color("red")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_requires_start() {
        let result = Event::builder().title("No start").build();
        assert_eq!(result.unwrap_err(), "Event start time is required");
    }
}
