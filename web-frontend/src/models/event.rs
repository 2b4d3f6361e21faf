use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(alias = "startDate", alias = "date")]
    pub starts_at: DateTime<Utc>,
    #[serde(default, alias = "endDate")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub registration_url: Option<String>,
}

impl Event {
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.ends_at.unwrap_or(self.starts_at) >= now
    }

    pub fn when_label(&self) -> String {
        self.starts_at.format("%a, %b %-d %Y · %H:%M UTC").to_string()
    }
}

/// Upcoming events soonest first, then past events most recent first.
pub fn order_for_listing(mut events: Vec<Event>, now: DateTime<Utc>) -> (Vec<Event>, Vec<Event>) {
    events.sort_by_key(|e| e.starts_at);
    let (upcoming, mut past): (Vec<_>, Vec<_>) =
        events.into_iter().partition(|e| e.is_upcoming(now));
    past.reverse();
    (upcoming, past)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(id: &str, day: u32) -> Event {
        Event {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            location: String::new(),
            starts_at: Utc.with_ymd_and_hms(2026, 5, day, 9, 0, 0).unwrap(),
            ends_at: None,
            registration_url: None,
        }
    }

    #[test]
    fn upcoming_events_come_first_in_date_order() {
        let now = Utc.with_ymd_and_hms(2026, 5, 10, 0, 0, 0).unwrap();
        let (upcoming, past) = order_for_listing(
            vec![event("c", 20), event("a", 2), event("b", 12), event("z", 8)],
            now,
        );
        let ids: Vec<_> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
        let ids: Vec<_> = past.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["z", "a"]);
    }
}
