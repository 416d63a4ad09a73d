use chrono::{DateTime, Datelike, Utc, Weekday};

use crate::ids::PromoId;
use crate::image::{ImageKind, resolve_image_url};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A promotional offer as served by the site's promo listing.
///
/// Immutable once loaded; the carousel only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PromoItem {
    pub id: PromoId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_url: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl PromoItem {
    pub fn new(
        id: impl Into<PromoId>,
        title: impl Into<String>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            image_url: None,
            start_at,
            end_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Whether the offer runs at `now`. Both bounds are inclusive.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_at <= now && now <= self.end_at
    }

    /// Whole days until the offer ends, rounded up. Negative once expired.
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        let ms = (self.end_at - now).num_milliseconds();
        -(-ms).div_euclid(DAY_MS)
    }

    /// English weekday name of the start date, used for the day tag.
    pub fn day_name(&self) -> &'static str {
        match self.start_at.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn image_src(&self) -> String {
        resolve_image_url(self.image_url.as_deref(), ImageKind::Promo)
    }
}

/// Offers running at `now`, newest start first.
pub fn active_promos<I>(items: I, now: DateTime<Utc>) -> Vec<PromoItem>
where
    I: IntoIterator<Item = PromoItem>,
{
    let mut active: Vec<PromoItem> = items
        .into_iter()
        .filter(|promo| promo.is_active_at(now))
        .collect();
    active.sort_by(|a, b| b.start_at.cmp(&a.start_at));
    active
}

/// Parse the JSON array produced by the promo listing endpoint.
#[cfg(feature = "serde")]
pub fn load_promos_json<R: std::io::Read>(
    reader: R,
) -> crate::error::Result<Vec<PromoItem>> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn active_window_is_inclusive() {
        let promo = PromoItem::new(1, "Latte Monday", at(19, 0), at(25, 0));
        assert!(promo.is_active_at(at(19, 0)));
        assert!(promo.is_active_at(at(25, 0)));
        assert!(!promo.is_active_at(at(25, 0) + Duration::seconds(1)));
        assert!(!promo.is_active_at(at(18, 23)));
    }

    #[test]
    fn days_left_rounds_up() {
        let promo = PromoItem::new(2, "Cold Brew", at(1, 0), at(20, 12));
        assert_eq!(promo.days_left(at(19, 12)), 1);
        assert_eq!(promo.days_left(at(19, 13)), 1);
        assert_eq!(promo.days_left(at(20, 12)), 0);
        assert_eq!(promo.days_left(at(22, 12)), -2);
    }

    #[test]
    fn day_name_uses_start_date() {
        // 2026-10-19 is a Monday
        let promo = PromoItem::new(1, "Latte Monday", at(19, 9), at(25, 0));
        assert_eq!(promo.day_name(), "Monday");
    }

    #[test]
    fn active_promos_filters_and_orders_newest_first() {
        let now = at(20, 0);
        let older = PromoItem::new(1, "older", at(1, 0), at(30, 0));
        let newer = PromoItem::new(2, "newer", at(15, 0), at(30, 0));
        let expired = PromoItem::new(3, "expired", at(1, 0), at(10, 0));
        let upcoming = PromoItem::new(4, "upcoming", at(21, 0), at(30, 0));

        let active = active_promos(vec![older, expired, newer, upcoming], now);
        let titles: Vec<_> = active.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["newer", "older"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_listing_json() {
        let raw = r#"[
            {
                "id": 7,
                "title": "Buy One Get One",
                "description": null,
                "imageUrl": "bogo.jpg",
                "startAt": "2026-10-19T00:00:00.000Z",
                "endAt": "2026-10-26T00:00:00.000Z"
            }
        ]"#;
        let promos = load_promos_json(raw.as_bytes()).expect("parse");
        assert_eq!(promos.len(), 1);
        assert_eq!(promos[0].id, PromoId(7));
        assert_eq!(promos[0].title, "Buy One Get One");
        assert_eq!(promos[0].description, None);
        assert_eq!(promos[0].image_src(), "/uploads/promos/bogo.jpg");
        assert_eq!(promos[0].day_name(), "Monday");
    }
}
