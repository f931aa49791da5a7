use crate::geometry::{Layout, Point};
use crate::progress::ProgressRange;
use derive_more::{Deref, Display};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::f64::consts::{PI, TAU};
use strum::{Display as StrumDisplay, EnumString};

/// How a drag maps onto progress.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    /// Tracks crossings of 12 o'clock so a drag pins at either end instead of wrapping.
    #[default]
    #[strum(serialize = "winding", serialize = "w")]
    Winding,
    /// Every sample maps the raw angle straight onto progress.
    #[strum(serialize = "absolute", serialize = "a")]
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
        }
    }
}

/// Extra revolutions accumulated by a drag, bounded to `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deref, Display)]
pub struct Winding(i32);

impl Winding {
    pub const LIMIT: i32 = 1;

    fn turn(self, delta: i32) -> Self {
        Self((self.0 + delta).clamp(-Self::LIMIT, Self::LIMIT))
    }
}

/// Result of feeding a pointer event to the [`InputMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Started(i32),
    Moved(i32),
    Finished(i32),
    Cancelled,
}

/// Position of `local` around the ring in `[0, 1]`, 0 and 1 both at 12 o'clock, growing
/// clockwise. `local` is relative to the center with y pointing up.
pub fn angle_position(local: Point) -> f64 {
    ((-local.x).atan2(-local.y) + PI) / TAU
}

/// Side of the vertical axis the drag was last seen on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Side {
    Left,
    #[default]
    Right,
}

impl Side {
    /// A sample exactly on the axis has no side of its own.
    fn of(x: f64) -> Option<Self> {
        if x < 0.0 {
            Some(Self::Left)
        } else if x > 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    mode: DragMode,
    tracking: bool,
    side: Side,
    winding: Winding,
}

impl InputMapper {
    pub fn new(mode: DragMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DragMode) {
        self.mode = mode;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Drops any gesture in progress without reporting it.
    pub fn reset(&mut self) {
        self.tracking = false;
        self.winding = Winding::default();
    }

    /// Advances the gesture state machine and returns the absolute progress the event asks for.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        layout: &Layout,
        range: &ProgressRange,
    ) -> InputOutcome {
        let local = layout.to_local(event.position);

        match event.phase {
            PointerPhase::Down => {
                if !layout.hit_test(event.position) {
                    return InputOutcome::Ignored;
                }
                self.tracking = true;
                self.winding = Winding::default();
                // a press exactly at 12 o'clock sits at the start of the lap
                self.side = Side::of(local.x).unwrap_or(Side::Right);
                // first sample has no previous offset to compare against
                InputOutcome::Started(self.target(local, range, false))
            }
            PointerPhase::Move if self.tracking => {
                InputOutcome::Moved(self.target(local, range, true))
            }
            PointerPhase::Up if self.tracking => {
                let progress = self.target(local, range, true);
                self.tracking = false;
                InputOutcome::Finished(progress)
            }
            PointerPhase::Cancel if self.tracking => {
                self.tracking = false;
                InputOutcome::Cancelled
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn target(&mut self, local: Point, range: &ProgressRange, wind: bool) -> i32 {
        let span = range.span() as f64;
        let mut position = angle_position(local);

        if !wind || self.mode == DragMode::Absolute {
            return range.min() + (position * span).round() as i32;
        }

        // exactly at 12 o'clock coming from the left closes the lap rather than starting it
        if local.x == 0.0 && local.y > 0.0 && self.side == Side::Left {
            position = 1.0;
        }
        self.update_winding(local);

        let absolute = (*self.winding as f64 + position).clamp(0.0, 1.0);
        range.min() + (absolute * span).round() as i32
    }

    /// Only crossings of the upper half count, so passing through 6 o'clock never turns.
    fn update_winding(&mut self, local: Point) {
        let Some(side) = Side::of(local.x) else {
            return;
        };
        if local.y > 0.0 {
            match (self.side, side) {
                (Side::Right, Side::Left) => self.winding = self.winding.turn(-1),
                (Side::Left, Side::Right) => self.winding = self.winding.turn(1),
                _ => {}
            }
        }
        self.side = side;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f64 = 92.5;

    fn layout() -> Layout {
        Layout::calculate(200.0, 200.0, 0.15, 5.0)
    }

    /// Point on the ring `theta` radians clockwise from 12 o'clock.
    fn on_ring(phase: PointerPhase, theta: f64) -> PointerEvent {
        PointerEvent::new(
            phase,
            100.0 + RADIUS * theta.sin(),
            100.0 - RADIUS * theta.cos(),
        )
    }

    #[test]
    fn test_angle_position_cardinals() {
        assert!((angle_position(Point::new(1.0, 0.0)) - 0.25).abs() < 1e-12);
        assert!((angle_position(Point::new(0.0, -1.0)) - 0.5).abs() < 1e-12);
        assert!((angle_position(Point::new(-1.0, 0.0)) - 0.75).abs() < 1e-12);
        assert!(angle_position(Point::new(0.01, 1.0)) < 0.01);
        assert!(angle_position(Point::new(-0.01, 1.0)) > 0.99);
    }

    #[test]
    fn test_drag_mode_deserialization() {
        let cases = vec![
            ("\"winding\"", DragMode::Winding),
            ("\"Winding\"", DragMode::Winding),
            ("\"w\"", DragMode::Winding),
            ("\"ABSOLUTE\"", DragMode::Absolute),
            ("\"a\"", DragMode::Absolute),
        ];

        for (json, expected) in cases {
            let deserialized: DragMode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_down_outside_band_is_ignored() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::default();
        let outcome = mapper.handle(
            PointerEvent::new(PointerPhase::Down, 100.0, 100.0),
            &layout(),
            &range,
        );
        assert_eq!(outcome, InputOutcome::Ignored);
        assert!(!mapper.is_tracking());
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::default();
        for phase in [PointerPhase::Move, PointerPhase::Up, PointerPhase::Cancel] {
            let outcome = mapper.handle(on_ring(phase, 1.0), &layout(), &range);
            assert_eq!(outcome, InputOutcome::Ignored);
        }
    }

    #[test]
    fn test_down_maps_angle_to_progress() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::new(20, 60, 20);
        let outcome = mapper.handle(
            on_ring(PointerPhase::Down, TAU / 4.0),
            &layout(),
            &range,
        );
        assert_eq!(outcome, InputOutcome::Started(30));
        assert!(mapper.is_tracking());
    }

    #[test]
    fn test_full_clockwise_turn_pins_to_max() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::default();
        let layout = layout();

        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Down, 0.01), &layout, &range),
            InputOutcome::Started(0)
        );
        for step in 1..=12 {
            let theta = step as f64 * 0.5;
            mapper.handle(on_ring(PointerPhase::Move, theta), &layout, &range);
        }
        assert_eq!(*mapper.winding(), 0);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Move, 6.3), &layout, &range),
            InputOutcome::Moved(100)
        );
        assert_eq!(*mapper.winding(), 1);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Up, 6.4), &layout, &range),
            InputOutcome::Finished(100)
        );
        assert!(!mapper.is_tracking());
    }

    #[test]
    fn test_lap_ending_exactly_at_top_reaches_max() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::default();
        let layout = layout();

        assert_eq!(
            mapper.handle(
                PointerEvent::new(PointerPhase::Down, 100.0, 7.5),
                &layout,
                &range
            ),
            InputOutcome::Started(0)
        );
        for step in 1..=12 {
            let theta = step as f64 * 0.5;
            mapper.handle(on_ring(PointerPhase::Move, theta), &layout, &range);
        }
        assert_eq!(
            mapper.handle(
                PointerEvent::new(PointerPhase::Up, 100.0, 7.5),
                &layout,
                &range
            ),
            InputOutcome::Finished(100)
        );
        assert_eq!(*mapper.winding(), 0);
    }

    #[test]
    fn test_press_exactly_at_top_starts_the_lap() {
        let range = ProgressRange::default();
        let layout = layout();
        let top = PointerEvent::new(PointerPhase::Down, 100.0, 7.5);

        let mut mapper = InputMapper::default();
        mapper.handle(top, &layout, &range);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Move, 0.5), &layout, &range),
            InputOutcome::Moved(8)
        );
        assert_eq!(*mapper.winding(), 0);

        let mut mapper = InputMapper::default();
        mapper.handle(top, &layout, &range);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Move, -0.5), &layout, &range),
            InputOutcome::Moved(0)
        );
        assert_eq!(*mapper.winding(), -1);
    }

    #[test]
    fn test_counter_clockwise_past_top_pins_to_min() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::default();
        let layout = layout();

        mapper.handle(on_ring(PointerPhase::Down, 0.3), &layout, &range);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Move, -0.3), &layout, &range),
            InputOutcome::Moved(0)
        );
        assert_eq!(*mapper.winding(), -1);

        // a second counter-clockwise lap stays clamped
        for theta in [-1.5, -3.0, -4.5, -6.0, -6.6] {
            assert_eq!(
                mapper.handle(on_ring(PointerPhase::Move, theta), &layout, &range),
                InputOutcome::Moved(0)
            );
        }
        assert_eq!(*mapper.winding(), -1);
    }

    #[test]
    fn test_returning_across_top_unwinds() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::default();
        let layout = layout();

        mapper.handle(on_ring(PointerPhase::Down, -0.3), &layout, &range);
        mapper.handle(on_ring(PointerPhase::Move, 0.3), &layout, &range);
        assert_eq!(*mapper.winding(), 1);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Move, -0.3), &layout, &range),
            InputOutcome::Moved(95)
        );
        assert_eq!(*mapper.winding(), 0);
    }

    #[test]
    fn test_absolute_mode_wraps() {
        let mut mapper = InputMapper::new(DragMode::Absolute);
        let range = ProgressRange::default();
        let layout = layout();

        mapper.handle(on_ring(PointerPhase::Down, -0.3), &layout, &range);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Move, TAU / 4.0), &layout, &range),
            InputOutcome::Moved(25)
        );
        assert_eq!(*mapper.winding(), 0);
    }

    #[test]
    fn test_cancel_ends_tracking() {
        let mut mapper = InputMapper::default();
        let range = ProgressRange::default();
        mapper.handle(on_ring(PointerPhase::Down, 1.0), &layout(), &range);
        assert_eq!(
            mapper.handle(on_ring(PointerPhase::Cancel, 2.0), &layout(), &range),
            InputOutcome::Cancelled
        );
        assert!(!mapper.is_tracking());
    }
}
