//! Events along a horizontal axis with labels stacked above and below.

use std::collections::HashSet;

use log::debug;

use almanac_core::geometry::{Point, Rect, Size};

use crate::{
    collision::{LevelAssigner, density, detect_collisions},
    layout::{Context, MarkerShape, PlacedEvent, Placement, StyleEngine},
};

const LABEL_WIDTH: f32 = 130.0;
const INITIAL_LABEL_OFFSET: f32 = 10.0;
const STACKED_LABEL_OFFSET: f32 = 20.0;
const DESCRIPTION_GAP: f32 = 5.0;
const INITIAL_DESCRIPTION_WIDTH: f32 = 160.0;
const STACKED_DESCRIPTION_WIDTH: f32 = 150.0;

/// Below this many events the alternating placement is kept as is.
const MIN_EVENTS_FOR_STACKING: usize = 3;

pub struct Horizontal;

impl StyleEngine for Horizontal {
    fn place<'a>(&self, ctx: &Context<'a, '_>) -> Placement<'a> {
        let m = ctx.metrics();
        let top = ctx.content_top();
        let area = Rect::new(
            m.margin,
            top,
            ctx.width() - 2.0 * m.margin,
            ctx.height() - top - m.margin,
        );
        let axis_y = area.center_y();

        let centers: Vec<f32> = ctx
            .events()
            .iter()
            .map(|event| ctx.position(event.date(), area.x(), area.width()))
            .collect();

        let placed_events = if centers.len() >= MIN_EVENTS_FOR_STACKING {
            stacked(ctx, &centers, axis_y)
        } else {
            alternating(ctx, &centers, axis_y)
        };

        Placement {
            timeline_area: area,
            axis_start: Point::new(area.x(), axis_y),
            axis_end: Point::new(area.right(), axis_y),
            ticks: ctx.ticks(area.x(), area.width(), |x| Point::new(x, axis_y)),
            placed_events,
            ..Placement::default()
        }
    }
}

fn marker_at(ctx: &Context<'_, '_>, x: f32, axis_y: f32) -> Rect {
    let size = ctx.metrics().marker_size;
    Rect::from_center(Point::new(x, axis_y), Size::new(size, size))
}

/// Vertical position of a label `offset` pixels beyond the marker
fn label_y(ctx: &Context<'_, '_>, axis_y: f32, above: bool, offset: f32) -> f32 {
    let m = ctx.metrics();
    if above {
        axis_y - m.marker_size - offset - m.label_height
    } else {
        axis_y + m.marker_size + offset
    }
}

fn description_y(ctx: &Context<'_, '_>, label: Rect, above: bool) -> f32 {
    if above {
        label.y() - ctx.metrics().description_height - DESCRIPTION_GAP
    } else {
        label.bottom() + DESCRIPTION_GAP
    }
}

fn connect<'a>(placed: PlacedEvent<'a>, axis_y: f32, half_marker: f32, above: bool) -> PlacedEvent<'a> {
    let x = placed.marker.center_x();
    let (start, end) = if above {
        (axis_y - half_marker, placed.label.bottom())
    } else {
        (axis_y + half_marker, placed.label.y())
    };
    placed
        .with_connector(Point::new(x, start), Point::new(x, end))
        .with_primary_side(above)
}

/// Alternates labels above and below the axis by index parity.
fn alternating<'a>(ctx: &Context<'a, '_>, centers: &[f32], axis_y: f32) -> Vec<PlacedEvent<'a>> {
    let m = ctx.metrics();
    ctx.events()
        .iter()
        .zip(centers)
        .enumerate()
        .map(|(index, (event, &x))| {
            let above = index % 2 == 0;
            let label = Rect::new(
                x - LABEL_WIDTH / 2.0,
                label_y(ctx, axis_y, above, INITIAL_LABEL_OFFSET),
                LABEL_WIDTH,
                m.label_height,
            );
            let description = (ctx.show_descriptions() && event.description().is_some()).then(|| {
                Rect::new(
                    x - INITIAL_DESCRIPTION_WIDTH / 2.0,
                    description_y(ctx, label, above),
                    INITIAL_DESCRIPTION_WIDTH,
                    m.description_height,
                )
            });

            let placed = PlacedEvent::new(event, index, marker_at(ctx, x, axis_y), MarkerShape::Circle, label)
                .with_description(description);
            connect(placed, axis_y, m.marker_size / 2.0, above)
        })
        .collect()
}

/// Stacks labels on collision-free levels.
///
/// Even levels sit above the axis and odd levels below; every pair of
/// levels moves one level spacing further out. Descriptions survive only on
/// sparse timelines and only where they clear every earlier description.
fn stacked<'a>(ctx: &Context<'a, '_>, centers: &[f32], axis_y: f32) -> Vec<PlacedEvent<'a>> {
    let m = ctx.metrics();
    let assignment = LevelAssigner::new(m.label_width, m.min_gap, m.max_levels).assign(centers);
    let crowding = density(centers, m.density_label_width + m.min_gap);
    let show_descriptions = ctx.show_descriptions() && crowding <= m.description_density_limit;
    debug!(density = crowding, show_descriptions; "Stacking horizontal labels");

    let mut placed: Vec<PlacedEvent<'a>> = ctx
        .events()
        .iter()
        .zip(centers)
        .zip(assignment.levels())
        .enumerate()
        .map(|(index, ((event, &x), &level))| {
            let above = level % 2 == 0;
            let offset = STACKED_LABEL_OFFSET + (level / 2) as f32 * m.level_spacing;
            let label = Rect::new(
                x - LABEL_WIDTH / 2.0,
                label_y(ctx, axis_y, above, offset),
                LABEL_WIDTH,
                m.label_height,
            );
            let description = (show_descriptions && event.description().is_some()).then(|| {
                Rect::new(
                    x - STACKED_DESCRIPTION_WIDTH / 2.0,
                    description_y(ctx, label, above),
                    STACKED_DESCRIPTION_WIDTH,
                    m.description_height,
                )
            });

            let placed = PlacedEvent::new(event, index, marker_at(ctx, x, axis_y), MarkerShape::Circle, label)
                .with_description(description)
                .with_level(level);
            connect(placed, axis_y, m.marker_size / 2.0, above)
        })
        .collect();

    drop_colliding_descriptions(&mut placed, m.min_gap);
    placed
}

/// Removes every description that collides with an earlier kept one.
fn drop_colliding_descriptions(placed: &mut [PlacedEvent<'_>], padding: f32) {
    let (owners, rects): (Vec<usize>, Vec<Rect>) = placed
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.description.map(|rect| (i, rect)))
        .unzip();

    // Pairs arrive ordered by their first element, so the fate of `a` is
    // settled before any pair `(a, b)` is seen.
    let mut dropped = HashSet::new();
    for (a, b) in detect_collisions(&rects, padding) {
        if !dropped.contains(&a) {
            dropped.insert(b);
        }
    }

    if !dropped.is_empty() {
        debug!(dropped = dropped.len(); "Dropped colliding descriptions");
    }
    for slot in dropped {
        placed[owners[slot]].description = None;
    }
}
