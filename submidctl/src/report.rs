//! Plain-text rendering for promo listings and carousel snapshots.

use chrono::{DateTime, Utc};
use submid_core::CarouselSnapshot;
use submid_model::{PromoItem, format_date};
use tokio::sync::watch;
use tracing::info;

/// One listing row: day tag, title, run dates, days remaining and image.
pub fn promo_line(promo: &PromoItem, now: DateTime<Utc>) -> String {
    let days_left = promo.days_left(now);
    let remaining = match days_left {
        d if d < 0 => "expired".to_string(),
        0 => "ends today".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    };
    format!(
        "[{day}] {title} | {start} - {end} | {remaining} | {image}",
        day = promo.day_name(),
        title = promo.title,
        start = format_date(promo.start_at),
        end = format_date(promo.end_at),
        image = promo.image_src(),
    )
}

pub fn snapshot_line(snapshot: &CarouselSnapshot) -> String {
    if snapshot.is_empty() {
        return "carousel empty".to_string();
    }
    let base = snapshot
        .base_index
        .map(|b| (b + 1).to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "slide {base}/{count} (extended {active}){moving}",
        count = snapshot.item_count,
        active = snapshot.active_index,
        moving = if snapshot.in_transition { " moving" } else { "" },
    );
    if let Some(selected) = &snapshot.selected {
        line.push_str(&format!(" | detail: {}", selected.title));
    }
    line
}

/// Log one line per published snapshot until the carousel is unmounted.
/// Returns how many changes were logged.
pub async fn log_snapshots(mut snapshots: watch::Receiver<CarouselSnapshot>) -> usize {
    let mut logged = 0;
    while snapshots.changed().await.is_ok() {
        let line = snapshot_line(&snapshots.borrow_and_update());
        info!("{line}");
        logged += 1;
    }
    logged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn promo() -> PromoItem {
        PromoItem::new(
            1,
            "Latte Monday",
            Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 25, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn promo_line_shows_dates_and_countdown() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let line = promo_line(&promo(), now);
        assert_eq!(
            line,
            "[Monday] Latte Monday | 19 Oktober 2026 - 25 Oktober 2026 | 6 days left | /images/no-image.png"
        );
    }

    #[test]
    fn promo_line_marks_expired_offers() {
        let now = Utc.with_ymd_and_hms(2026, 10, 27, 0, 0, 0).unwrap();
        assert!(promo_line(&promo(), now).contains("| expired |"));
    }

    #[test]
    fn snapshot_line_reports_position_and_detail() {
        let snapshot = CarouselSnapshot {
            item_count: 3,
            active_index: 4,
            base_index: Some(1),
            in_transition: true,
            selected: Some(promo()),
            scroll_locked: true,
        };
        assert_eq!(
            snapshot_line(&snapshot),
            "slide 2/3 (extended 4) moving | detail: Latte Monday"
        );
        assert_eq!(snapshot_line(&CarouselSnapshot::default()), "carousel empty");
    }

    #[tokio::test]
    async fn snapshot_logger_stops_when_the_carousel_goes_away() {
        let (tx, rx) = watch::channel(CarouselSnapshot::default());
        let logger = tokio::spawn(log_snapshots(rx));

        tx.send_modify(|snapshot| snapshot.item_count = 1);
        drop(tx);

        let logged = logger.await.expect("logger task");
        assert_eq!(logged, 1);
    }
}
