//! A three-column snake grid ordered by event sequence.

use almanac_core::geometry::{Point, Rect, Size};

use crate::{
    config::LayoutConfig,
    layout::{Context, MarkerShape, PlacedEvent, Placement, StyleEngine},
};

const TITLE_HEIGHT: f32 = 100.0;
const CONTENT_GAP: f32 = 30.0;
const COLUMNS: usize = 3;
const MARKER_SIZE: f32 = 80.0;
const LABEL_SIZE: Size = Size::new(160.0, 30.0);
const DESCRIPTION_SIZE: Size = Size::new(180.0, 40.0);
/// Distance from the marker bottom to the label top
const LABEL_GAP: f32 = 10.0;
/// Distance from the marker bottom to the description top
const DESCRIPTION_GAP: f32 = 45.0;

pub struct Infographic;

impl StyleEngine for Infographic {
    fn title_height(&self, _config: &LayoutConfig) -> f32 {
        TITLE_HEIGHT
    }

    fn place<'a>(&self, ctx: &Context<'a, '_>) -> Placement<'a> {
        let m = ctx.metrics();
        let top = m.margin + m.title_height + CONTENT_GAP;
        let area = Rect::new(
            m.margin,
            top,
            ctx.width() - 2.0 * m.margin,
            ctx.height() - top - m.margin,
        );

        let events = ctx.events();
        let rows = events.len().div_ceil(COLUMNS);
        let row_height = area.height() / (rows as f32 + 0.5);
        let column_width = area.width() / COLUMNS as f32;

        let mut previous: Option<Point> = None;
        let placed_events: Vec<PlacedEvent<'a>> = events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                let row = index / COLUMNS;
                let column = if row % 2 == 0 {
                    index % COLUMNS
                } else {
                    COLUMNS - 1 - index % COLUMNS
                };

                let center = Point::new(
                    area.x() + (column as f32 + 0.5) * column_width,
                    area.y() + (row as f32 + 0.5) * row_height,
                );
                let marker = Rect::from_center(center, Size::new(MARKER_SIZE, MARKER_SIZE));
                let below = marker.bottom();

                let label = Rect::new(
                    center.x() - LABEL_SIZE.width() / 2.0,
                    below + LABEL_GAP,
                    LABEL_SIZE.width(),
                    LABEL_SIZE.height(),
                );
                let description = (ctx.show_descriptions() && event.description().is_some()).then(|| {
                    Rect::new(
                        center.x() - DESCRIPTION_SIZE.width() / 2.0,
                        below + DESCRIPTION_GAP,
                        DESCRIPTION_SIZE.width(),
                        DESCRIPTION_SIZE.height(),
                    )
                });

                // The connector traces the path from the previous marker.
                let start = previous.unwrap_or(center);
                previous = Some(center);

                PlacedEvent::new(event, index, marker, MarkerShape::Circle, label)
                    .with_description(description)
                    .with_connector(start, center)
                    .with_row(row)
            })
            .collect();

        let (axis_start, axis_end) = match (placed_events.first(), placed_events.last()) {
            (Some(first), Some(last)) => (first.marker.center(), last.marker.center()),
            _ => (area.center(), area.center()),
        };

        Placement {
            timeline_area: area,
            axis_start,
            axis_end,
            placed_events,
            ..Placement::default()
        }
    }
}
