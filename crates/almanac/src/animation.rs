//! Animation frame planning.
//!
//! An [`Animator`] turns a timeline into a sequence of [`Frame`]s: for each
//! frame it recomputes the layout and decides how far every event has
//! faded in. Nothing is painted here; frames are data for a renderer.

use std::f32::consts::PI;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use almanac_core::timeline::Timeline;

use crate::{
    config::AnimationConfig,
    layout::{Layout, LayoutEngine},
};

/// Progress past which scale markers are drawn
const SCALE_MARKER_THRESHOLD: f32 = 0.1;

/// Easing curve applied to linear animation progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Cubic ease-in
    EaseIn,
    /// Cubic ease-out
    #[default]
    EaseOut,
    /// Cubic ease-in-out
    EaseInOut,
    EaseOutBounce,
    EaseOutElastic,
}

impl Easing {
    /// Applies the curve to `t`, clamped to `0..=1` first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use almanac::animation::Easing;
    /// assert_eq!(Easing::EaseIn.apply(0.5), 0.125);
    /// assert_eq!(Easing::EaseOut.apply(2.0), 1.0);
    /// ```
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::EaseOutBounce => bounce_out(t),
            Self::EaseOutElastic => elastic_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

fn elastic_out(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let c4 = 2.0 * PI / 3.0;
    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
}

/// One planned animation frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame<'a> {
    index: usize,
    progress: f32,
    opacities: Vec<f32>,
    show_scale_markers: bool,
    #[serde(skip)]
    layout: Layout<'a>,
}

impl<'a> Frame<'a> {
    /// Zero-based frame number
    pub fn index(&self) -> usize {
        self.index
    }

    /// Eased animation progress in `0..=1`
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Opacity per event, in the layout's event order; 0 means hidden
    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Number of events drawn in this frame
    pub fn visible_count(&self) -> usize {
        self.opacities.iter().filter(|&&o| o > 0.0).count()
    }

    pub fn show_scale_markers(&self) -> bool {
        self.show_scale_markers
    }

    pub fn layout(&self) -> &Layout<'a> {
        &self.layout
    }
}

/// Plans the frames of a timeline animation.
///
/// Frame count and rate come from the timeline's output settings; hold
/// times and easing from [`AnimationConfig`].
///
/// # Examples
///
/// ```
/// # use almanac::{animation::Animator, config::AnimationConfig, layout::LayoutEngine};
/// # use almanac::timeline::{Event, OutputSettings, Timeline};
/// use chrono::NaiveDate;
///
/// let day = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let timeline = Timeline::new("Plan", vec![Event::new(day(1), "Start"), Event::new(day(9), "End")])
///     .with_output(OutputSettings::default().with_fps(10).with_duration(2.0));
///
/// let animator = Animator::new(&timeline, LayoutEngine::default(), AnimationConfig::default());
/// assert_eq!(animator.total_frames(), 20);
/// assert_eq!(animator.progress(0), 0.0);
/// assert_eq!(animator.progress(19), 1.0);
///
/// let last = animator.frames().last().unwrap();
/// assert_eq!(last.visible_count(), 2);
/// ```
pub struct Animator<'a> {
    timeline: &'a Timeline,
    engine: LayoutEngine,
    config: AnimationConfig,
}

impl<'a> Animator<'a> {
    pub fn new(timeline: &'a Timeline, engine: LayoutEngine, config: AnimationConfig) -> Self {
        Self {
            timeline,
            engine,
            config,
        }
    }

    fn fps(&self) -> f32 {
        self.timeline.output().fps() as f32
    }

    /// `floor(fps * duration)`
    pub fn total_frames(&self) -> usize {
        (self.fps() * self.timeline.output().duration()).floor().max(0.0) as usize
    }

    fn hold_start_frames(&self) -> usize {
        (self.fps() * self.config.hold_start()).floor().max(0.0) as usize
    }

    fn hold_end_frames(&self) -> usize {
        (self.fps() * self.config.hold_end()).floor().max(0.0) as usize
    }

    fn animated_frames(&self) -> usize {
        self.total_frames()
            .saturating_sub(self.hold_start_frames())
            .saturating_sub(self.hold_end_frames())
    }

    /// Eased progress of a frame.
    ///
    /// Progress is 0 throughout the start hold and 1 throughout the end
    /// hold.
    pub fn progress(&self, frame: usize) -> f32 {
        let hold_start = self.hold_start_frames();
        if frame < hold_start {
            return 0.0;
        }
        if frame >= self.total_frames().saturating_sub(self.hold_end_frames()) {
            return 1.0;
        }

        let step = frame - hold_start;
        let span = self.animated_frames().saturating_sub(1).max(1);
        self.config.easing().apply(step as f32 / span as f32)
    }

    /// Plans a single frame.
    pub fn frame(&self, index: usize) -> Frame<'a> {
        let progress = self.progress(index);
        let layout = self.engine.calculate(self.timeline);

        // One extra reveal step is taken by the axis.
        let reveal = progress * (layout.placed_events().len() + 1) as f32;
        let visible = reveal.floor();
        let opacities = layout
            .placed_events()
            .iter()
            .map(|placed| {
                let position = placed.index() as f32;
                if position < visible {
                    (reveal - position).min(1.0)
                } else {
                    0.0
                }
            })
            .collect();

        Frame {
            index,
            progress,
            opacities,
            show_scale_markers: progress > SCALE_MARKER_THRESHOLD,
            layout,
        }
    }

    /// Lazily plans every frame in order.
    ///
    /// Dropping the iterator stops planning.
    pub fn frames(&self) -> impl Iterator<Item = Frame<'a>> + '_ {
        (0..self.total_frames()).map(|index| self.frame(index))
    }

    /// Plans every frame, reporting `(completed, total)` after each one.
    pub fn render_all(&self, mut callback: impl FnMut(usize, usize)) -> Vec<Frame<'a>> {
        let total = self.total_frames();
        info!(total_frames = total; "Planning animation frames");

        let frames = self
            .frames()
            .inspect(|frame| callback(frame.index() + 1, total))
            .collect();

        debug!("Animation frames planned");
        frames
    }
}
