//! Events alternating left and right of a vertical axis.

use almanac_core::geometry::{Point, Rect, Size};

use crate::layout::{Context, MarkerShape, PlacedEvent, Placement, StyleEngine};

/// Horizontal distance between the axis and a card
const AXIS_GAP: f32 = 20.0;
const DESCRIPTION_GAP: f32 = 5.0;
/// Space below a description before the next card may start
const CARD_PADDING: f32 = 20.0;

pub struct Vertical;

impl StyleEngine for Vertical {
    fn place<'a>(&self, ctx: &Context<'a, '_>) -> Placement<'a> {
        let m = ctx.metrics();
        let top = ctx.content_top();
        let area = Rect::new(
            m.margin,
            top,
            ctx.width() - 2.0 * m.margin,
            ctx.height() - top - m.margin,
        );
        let axis_x = ctx.width() / 2.0;
        let card_width = ((ctx.width() - 2.0 * m.margin - 2.0 * AXIS_GAP) / 2.0).max(0.0);
        let half_marker = m.marker_size / 2.0;

        let mut placed: Vec<PlacedEvent<'a>> = ctx
            .events()
            .iter()
            .enumerate()
            .map(|(index, event)| {
                let y = ctx.position(event.date(), area.y(), area.height());
                let left = index % 2 == 0;
                let label_x = if left {
                    axis_x - AXIS_GAP - card_width
                } else {
                    axis_x + AXIS_GAP
                };

                let marker = Rect::from_center(Point::new(axis_x, y), Size::new(m.marker_size, m.marker_size));
                let label = Rect::new(label_x, y - m.label_height / 2.0, card_width, m.label_height);
                let description = (ctx.show_descriptions() && event.description().is_some()).then(|| {
                    Rect::new(
                        label_x,
                        y + m.label_height / 2.0 + DESCRIPTION_GAP,
                        card_width,
                        m.description_height * 2.0,
                    )
                });
                let (start, end) = if left {
                    (axis_x - half_marker, label_x + card_width)
                } else {
                    (axis_x + half_marker, label_x)
                };

                PlacedEvent::new(event, index, marker, MarkerShape::Circle, label)
                    .with_description(description)
                    .with_connector(Point::new(start, y), Point::new(end, y))
                    .with_primary_side(left)
            })
            .collect();

        for side in [true, false] {
            push_down(&mut placed, side, m.min_gap, m.min_card_height);
        }

        Placement {
            timeline_area: area,
            axis_start: Point::new(axis_x, area.y()),
            axis_end: Point::new(axis_x, area.bottom()),
            ticks: ctx.ticks(area.y(), area.height(), |y| Point::new(axis_x, y)),
            placed_events: placed,
            ..Placement::default()
        }
    }
}

/// Clears overlaps between cards on one side of the axis.
///
/// Cards are visited top to bottom; each is pushed down just enough to
/// clear the previous card. Earlier cards never move.
fn push_down(placed: &mut [PlacedEvent<'_>], primary_side: bool, min_gap: f32, min_card_height: f32) {
    let mut order: Vec<usize> = (0..placed.len())
        .filter(|&i| placed[i].primary_side == primary_side)
        .collect();
    order.sort_by(|&a, &b| {
        placed[a]
            .marker
            .center_y()
            .total_cmp(&placed[b].marker.center_y())
    });

    let mut last_bottom: Option<f32> = None;
    for i in order {
        let card = &placed[i];
        let card_height = card
            .description
            .map_or(min_card_height, |d| card.label.merge(d).height() + CARD_PADDING);

        let natural_top = card.label.y();
        let earliest_top = last_bottom.map_or(natural_top, |bottom| bottom + min_gap);
        let top = natural_top.max(earliest_top);
        if top > natural_top {
            placed[i] = placed[i].clone().shift_text(Point::new(0.0, top - natural_top));
        }
        last_bottom = Some(top + card_height);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use float_cmp::assert_approx_eq;

    use almanac_core::timeline::{DisplaySettings, Event, Style, Timeline};

    use crate::layout::LayoutEngine;

    fn day(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn vertical(events: Vec<Event>) -> Timeline {
        Timeline::new("V", events).with_style(Style::Vertical)
    }

    #[test]
    fn test_alternates_sides() {
        let timeline = vertical(vec![
            Event::new(day(1, 1), "a"),
            Event::new(day(6, 1), "b"),
            Event::new(day(11, 1), "c"),
        ]);
        let layout = LayoutEngine::default().calculate(&timeline);
        let axis_x = layout.axis_start().x();

        for placed in layout.placed_events() {
            assert_eq!(placed.primary_side(), placed.index() % 2 == 0);
            if placed.primary_side() {
                assert!(placed.label().right() < axis_x);
            } else {
                assert!(placed.label().x() > axis_x);
            }
            assert_eq!(placed.level(), 0);
        }
    }

    #[test]
    fn test_card_width() {
        let timeline = vertical(vec![Event::new(day(1, 1), "a")]);
        let layout = LayoutEngine::default().calculate(&timeline);
        // (1920 - 80 - 40) / 2
        assert_approx_eq!(f32, layout.placed_events()[0].label().width(), 900.0);
    }

    #[test]
    fn test_close_cards_pushed_down() {
        let events = (1..=6)
            .map(|d| Event::new(day(1, d), format!("e{d}")).with_description("detail"))
            .collect();
        let timeline = vertical(events);
        let layout = LayoutEngine::default().calculate(&timeline);

        for side in [true, false] {
            let cards: Vec<_> = layout
                .placed_events()
                .iter()
                .filter(|p| p.primary_side() == side)
                .collect();
            for pair in cards.windows(2) {
                let previous_bottom = pair[0].description().map_or(0.0, |d| d.bottom());
                assert!(pair[1].label().y() >= previous_bottom + 15.0 - 1e-3);
            }
        }
        // Markers stay on their dates.
        let first = &layout.placed_events()[0];
        assert_approx_eq!(f32, first.connector_start().y(), first.marker().center_y());
    }

    #[test]
    fn test_compact_mode_tightens_gap() {
        let events: Vec<Event> = (1..=4).map(|d| Event::new(day(1, d), format!("e{d}"))).collect();
        let regular = vertical(events.clone());
        let compact = vertical(events).with_display(DisplaySettings::default().with_compact(true));

        let engine = LayoutEngine::default();
        let regular = engine.calculate(&regular);
        let compact = engine.calculate(&compact);

        let third = |layout: &crate::layout::Layout<'_>| layout.placed_events()[2].label().y();
        assert!(third(&compact) < third(&regular));
    }
}
