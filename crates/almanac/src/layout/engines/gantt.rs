//! One row per event, bars spanning each event's date range.

use almanac_core::geometry::{Point, Rect, Size};

use crate::layout::{Context, MarkerShape, PlacedEvent, Placement, StyleEngine};

const HEADER_HEIGHT: f32 = 40.0;
const LABEL_COLUMN_WIDTH: f32 = 150.0;
const MIN_ROW_HEIGHT: f32 = 30.0;
const MAX_ROW_HEIGHT: f32 = 50.0;
/// Vertical inset of a bar within its row
const BAR_INSET: f32 = 5.0;
const MIN_BAR_WIDTH: f32 = 10.0;
const DIAMOND_SIZE: f32 = 20.0;

pub struct Gantt;

impl StyleEngine for Gantt {
    fn place<'a>(&self, ctx: &Context<'a, '_>) -> Placement<'a> {
        let m = ctx.metrics();
        let header_top = ctx.content_top();
        let rows_top = header_top + HEADER_HEIGHT + m.region_gap;
        let rows_height = ctx.height() - rows_top - m.margin;

        let chart_left = m.margin + LABEL_COLUMN_WIDTH + m.region_gap;
        let chart_width = ctx.width() - chart_left - m.margin;
        let area = Rect::new(chart_left, rows_top, chart_width, rows_height);

        let events = ctx.events();
        let row_height = (rows_height / events.len().max(1) as f32).clamp(MIN_ROW_HEIGHT, MAX_ROW_HEIGHT);

        let placed_events = events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                let row_y = rows_top + index as f32 * row_height;
                let row_center = row_y + row_height / 2.0;
                let start_x = ctx.position(event.date(), chart_left, chart_width);

                let (marker, shape) = match event.end_date() {
                    Some(end_date) => {
                        let end_x = ctx.position(end_date, chart_left, chart_width);
                        let bar = Rect::new(
                            start_x,
                            row_y + BAR_INSET,
                            (end_x - start_x).max(MIN_BAR_WIDTH),
                            row_height - 2.0 * BAR_INSET,
                        );
                        (bar, MarkerShape::Bar)
                    }
                    None => {
                        let diamond = Rect::from_center(
                            Point::new(start_x, row_center),
                            Size::new(DIAMOND_SIZE, DIAMOND_SIZE),
                        );
                        (diamond, MarkerShape::Diamond)
                    }
                };

                let progress = event
                    .progress()
                    .filter(|&p| p < 100.0)
                    .map(|p| Rect::new(marker.x(), marker.y(), marker.width() * p / 100.0, marker.height()));

                let label = Rect::new(m.margin, row_y, LABEL_COLUMN_WIDTH, row_height);

                PlacedEvent::new(event, index, marker, shape, label)
                    .with_progress(progress)
                    .with_connector(
                        Point::new(label.right(), row_center),
                        Point::new(marker.x(), row_center),
                    )
                    .with_row(index)
            })
            .collect();

        let header_bottom = header_top + HEADER_HEIGHT;
        Placement {
            timeline_area: area,
            legend_area: Some(Rect::new(m.margin, rows_top, LABEL_COLUMN_WIDTH, rows_height)),
            axis_start: Point::new(chart_left, header_top),
            axis_end: Point::new(chart_left + chart_width, header_bottom),
            ticks: ctx.ticks(chart_left, chart_width, |x| Point::new(x, header_bottom)),
            placed_events,
            ..Placement::default()
        }
    }
}
