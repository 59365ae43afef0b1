//! Category swimlanes holding date-positioned cards.

use indexmap::IndexSet;
use log::debug;

use almanac_core::geometry::{Point, Rect};

use crate::layout::{Context, Lane, MarkerShape, PlacedEvent, Placement, StyleEngine};

const HEADER_HEIGHT: f32 = 50.0;
const LANE_LABEL_WIDTH: f32 = 120.0;
const MAX_CARD_WIDTH: f32 = 140.0;
/// Cards never shrink as if a lane held fewer than this many events
const MIN_CARDS_PER_LANE: f32 = 3.0;
const CARD_INSET: f32 = 10.0;
const CARD_LABEL_HEIGHT: f32 = 24.0;
/// Offset of the description from the card top
const CARD_DESCRIPTION_TOP: f32 = 38.0;

pub struct Roadmap;

impl StyleEngine for Roadmap {
    fn place<'a>(&self, ctx: &Context<'a, '_>) -> Placement<'a> {
        let m = ctx.metrics();
        let header_top = ctx.content_top();
        let lanes_top = header_top + HEADER_HEIGHT + m.region_gap;
        let lanes_height = ctx.height() - lanes_top - m.margin;

        let chart_left = m.margin + LANE_LABEL_WIDTH + m.region_gap;
        let chart_width = ctx.width() - chart_left - m.margin;

        let names: IndexSet<String> = ctx.timeline().lanes().into_iter().collect();
        let lane_count = names.len().max(1);
        let lane_height = lanes_height / lane_count as f32;
        let lane_y = |lane: usize| lanes_top + lane as f32 * lane_height;

        let events = ctx.events();
        let per_lane = (events.len() as f32 / lane_count as f32).max(MIN_CARDS_PER_LANE);
        let card_width = MAX_CARD_WIDTH.min(chart_width / per_lane);
        let card_height = lane_height - 2.0 * CARD_INSET;

        let mut by_lane: Vec<Vec<PlacedEvent<'a>>> = vec![Vec::new(); lane_count];
        for (index, event) in events.iter().enumerate() {
            let lane = names.get_index_of(event.lane_name()).unwrap_or(0);
            let top = lane_y(lane);
            let x = ctx.position(event.date(), chart_left, chart_width);

            let card = Rect::new(x - card_width / 2.0, top + CARD_INSET, card_width, card_height);
            let label = Rect::new(
                card.x() + CARD_INSET,
                card.y() + CARD_INSET,
                card_width - 2.0 * CARD_INSET,
                CARD_LABEL_HEIGHT,
            );
            let description = (ctx.show_descriptions() && event.description().is_some()).then(|| {
                Rect::new(
                    card.x() + CARD_INSET,
                    card.y() + CARD_DESCRIPTION_TOP,
                    card_width - 2.0 * CARD_INSET,
                    card_height - CARD_DESCRIPTION_TOP - CARD_INSET,
                )
            });

            by_lane[lane].push(
                PlacedEvent::new(event, index, card, MarkerShape::Card, label)
                    .with_description(description)
                    .with_connector(Point::new(x, top), Point::new(card.center_x(), card.y()))
                    .with_row(lane),
            );
        }

        let mut placed_events: Vec<PlacedEvent<'a>> = by_lane
            .into_iter()
            .flat_map(|cards| sweep(cards, m.min_gap))
            .collect();
        placed_events.sort_by_key(|placed| placed.event.date());

        let lanes = names
            .iter()
            .enumerate()
            .map(|(lane, name)| Lane {
                name: name.clone(),
                area: Rect::new(m.margin, lane_y(lane), ctx.width() - 2.0 * m.margin, lane_height),
            })
            .collect();
        debug!(lanes = lane_count, card_width; "Roadmap lanes built");

        let header_bottom = header_top + HEADER_HEIGHT;
        Placement {
            timeline_area: Rect::new(chart_left, lanes_top, chart_width, lanes_height),
            legend_area: Some(Rect::new(m.margin, lanes_top, LANE_LABEL_WIDTH, lanes_height)),
            axis_start: Point::new(chart_left, header_top),
            axis_end: Point::new(chart_left + chart_width, header_bottom),
            ticks: ctx.ticks(chart_left, chart_width, |x| Point::new(x, header_bottom)),
            lanes,
            placed_events,
        }
    }
}

/// Shifts cards right until each clears its left neighbour by `min_gap`.
///
/// Cards start centered on their dates and are visited left to right; a
/// card is only ever moved rightward.
fn sweep(mut cards: Vec<PlacedEvent<'_>>, min_gap: f32) -> Vec<PlacedEvent<'_>> {
    cards.sort_by(|a, b| a.marker.x().total_cmp(&b.marker.x()));

    let mut last_right: Option<f32> = None;
    cards
        .into_iter()
        .map(|card| {
            let earliest = last_right.map_or(card.marker.x(), |right| right + min_gap);
            let card = if card.marker.x() < earliest {
                let dx = earliest - card.marker.x();
                card.shift_all(Point::new(dx, 0.0))
            } else {
                card
            };
            last_right = Some(card.marker.right());
            card
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use float_cmp::assert_approx_eq;

    use almanac_core::timeline::{Event, Style, Timeline};

    use crate::layout::{LayoutEngine, MarkerShape};

    fn day(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn roadmap(events: Vec<Event>) -> Timeline {
        Timeline::new("R", events).with_style(Style::Roadmap)
    }

    #[test]
    fn test_lanes_from_first_seen_categories() {
        let timeline = roadmap(vec![
            Event::new(day(1, 1), "api").with_category("Backend"),
            Event::new(day(2, 1), "docs"),
            Event::new(day(3, 1), "db").with_category("Backend"),
        ]);
        let layout = LayoutEngine::default().calculate(&timeline);

        let names: Vec<&str> = layout.lanes().iter().map(|lane| lane.name()).collect();
        assert_eq!(names, ["Backend", "default"]);

        let rows: Vec<usize> = layout.placed_events().iter().map(|p| p.row()).collect();
        assert_eq!(rows, [0, 1, 0]);
        assert!(layout.placed_events().iter().all(|p| p.marker_shape() == MarkerShape::Card));
    }

    #[test]
    fn test_unknown_category_goes_to_first_lane() {
        let timeline = roadmap(vec![
            Event::new(day(1, 1), "a").with_category("Design"),
            Event::new(day(2, 1), "b").with_category("Marketing"),
        ])
        .with_categories(vec!["Design".to_string(), "Engineering".to_string()]);
        let layout = LayoutEngine::default().calculate(&timeline);

        assert_eq!(layout.lanes().len(), 2);
        assert_eq!(layout.placed_events()[1].row(), 0);
    }

    #[test]
    fn test_single_default_lane() {
        let timeline = roadmap(vec![Event::new(day(1, 1), "a")]);
        let layout = LayoutEngine::default().calculate(&timeline);

        assert_eq!(layout.lanes().len(), 1);
        assert_eq!(layout.lanes()[0].name(), "default");
        // 1080 - 40 - 60 - 10 - 50 - 10 - 40 = 870 tall, minus the insets.
        assert_approx_eq!(f32, layout.placed_events()[0].marker().height(), 850.0);
    }

    #[test]
    fn test_same_day_cards_do_not_overlap() {
        let events = (0..4)
            .map(|i| Event::new(day(5, 1), format!("e{i}")).with_description("details"))
            .collect();
        let timeline = roadmap(events);
        let layout = LayoutEngine::default().calculate(&timeline);

        let cards: Vec<_> = layout.placed_events().iter().map(|p| p.marker()).collect();
        for pair in cards.windows(2) {
            assert!(pair[1].x() >= pair[0].right() + 15.0 - 1e-3);
        }
        // Text moves with its card.
        for placed in layout.placed_events() {
            assert_approx_eq!(f32, placed.label().x(), placed.marker().x() + 10.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_output_sorted_by_date() {
        let timeline = roadmap(vec![
            Event::new(day(1, 1), "a").with_category("Ops"),
            Event::new(day(2, 1), "b").with_category("Dev"),
            Event::new(day(3, 1), "c").with_category("Ops"),
        ]);
        let layout = LayoutEngine::default().calculate(&timeline);
        let dates: Vec<_> = layout.placed_events().iter().map(|p| p.event().date()).collect();
        assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_card_width_shrinks_with_crowded_lanes() {
        let events = (0..40).map(|i| Event::new(day(1 + i % 12, 1), format!("e{i}"))).collect();
        let timeline = roadmap(events);
        let layout = LayoutEngine::default().calculate(&timeline);
        // Chart is 1920 - 170 - 40 = 1710 wide; 40 events in one lane.
        assert_approx_eq!(f32, layout.placed_events()[0].marker().width(), 1710.0 / 40.0, epsilon = 1e-3);
    }
}
