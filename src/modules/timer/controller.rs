//! Playback controller.
//!
//! Owns the countdown and the sweep animation and turns user requests and
//! frame callbacks into state transitions:
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v
//!       Completed -> (reset / preset) -> Idle
//! ```
//!
//! At most one frame request is live at a time, and only while running.
//! A frame that arrives without a live request has no effect, which is what
//! makes pause and reset take hold before any already-queued frame.

use crate::core::models::TimerPhase;
use crate::core::traits::RenderSink;
use crate::modules::timer::countdown::{CountdownError, CountdownState};
use crate::modules::timer::spring::SweepAnimationState;
use crate::modules::ui::progress_formatter::format_time;
use tracing::{debug, info};

/// Handle for the single pending "render on next frame" request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub id: u64,
}

/// Result of delivering a frame to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// No request was live; nothing happened
    Ignored,
    /// Rendered and requested the next frame
    Rendered,
    /// Reached zero on this frame; the chain has stopped
    Completed,
}

pub struct PlaybackController {
    countdown: CountdownState,
    sweep: SweepAnimationState,
    phase: TimerPhase,
    selected_minutes: u32,
    frame: Option<FrameRequest>,
    next_frame_id: u64,
}

impl PlaybackController {
    pub fn new(minutes: u32, now: u64) -> Self {
        Self {
            countdown: CountdownState::new(minutes),
            sweep: SweepAnimationState::new(now),
            phase: TimerPhase::Idle,
            selected_minutes: minutes,
            frame: None,
            next_frame_id: 0,
        }
    }

    /// Choose a new duration. Stops whatever was running.
    pub fn select_preset(&mut self, minutes: u32, now: u64, sink: &mut dyn RenderSink) {
        self.selected_minutes = minutes;
        self.reset(now, sink);
    }

    /// Start or resume. Returns `false` when the request was ignored.
    pub fn start(&mut self, now: u64, sink: &mut dyn RenderSink) -> bool {
        if let Err(e) = self.countdown.begin(now) {
            debug!(error = %e, phase = ?self.phase, "start ignored");
            return false;
        }

        self.phase = TimerPhase::Running;
        self.snap(now, sink);
        self.request_frame();
        info!(
            remaining_ms = self.countdown.remaining_ms(),
            started_at = self.countdown.start_timestamp(),
            deadline = self.countdown.end_timestamp(),
            "timer started"
        );
        true
    }

    /// Pause a running countdown. Returns `true` if the timer completed
    /// instead, because the deadline had already passed.
    pub fn pause(&mut self, now: u64, sink: &mut dyn RenderSink) -> bool {
        match self.countdown.tick(now) {
            Ok(true) => {
                self.complete(now, sink);
                true
            }
            Ok(false) => {
                self.countdown.suspend();
                self.cancel_frame();
                self.phase = TimerPhase::Paused;
                self.render_current(sink);
                info!(remaining_ms = self.countdown.remaining_ms(), "timer paused");
                false
            }
            Err(CountdownError::NotRunning) => {
                debug!(phase = ?self.phase, "pause ignored");
                false
            }
            Err(e) => {
                debug!(error = %e, "pause ignored");
                false
            }
        }
    }

    /// Start/pause button: pause when running, start otherwise.
    /// Returns `true` if this produced a completion.
    pub fn toggle(&mut self, now: u64, sink: &mut dyn RenderSink) -> bool {
        if self.phase.is_running() {
            self.pause(now, sink)
        } else {
            self.start(now, sink);
            false
        }
    }

    /// Back to the full selected duration with the needle at zero.
    pub fn reset(&mut self, now: u64, sink: &mut dyn RenderSink) {
        self.cancel_frame();
        self.countdown.suspend();
        // Cannot fail: the countdown was suspended on the line above.
        let _ = self.countdown.set_duration(self.selected_minutes);
        self.phase = TimerPhase::Idle;
        self.snap(now, sink);
        debug!(duration_ms = self.countdown.duration_ms(), "timer reset");
    }

    /// Deliver a display frame.
    pub fn frame_elapsed(&mut self, now: u64, sink: &mut dyn RenderSink) -> FrameOutcome {
        if self.frame.take().is_none() {
            return FrameOutcome::Ignored;
        }

        let reached_zero = match self.countdown.tick(now) {
            Ok(done) => done,
            Err(e) => {
                debug!(error = %e, "frame without running countdown");
                return FrameOutcome::Ignored;
            }
        };

        let angle = self.sweep.step(now, self.countdown.target_angle_deg());
        sink.render(angle, &self.time_text());

        if reached_zero {
            self.complete(now, sink);
            return FrameOutcome::Completed;
        }

        self.request_frame();
        FrameOutcome::Rendered
    }

    /// Paint the current state without advancing anything.
    pub fn render_current(&self, sink: &mut dyn RenderSink) {
        sink.render(self.sweep.angle_deg(), &self.time_text());
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn button_label(&self) -> &'static str {
        if self.phase.is_running() { "Pause" } else { "Start" }
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.frame
    }

    pub fn selected_minutes(&self) -> u32 {
        self.selected_minutes
    }

    pub fn countdown(&self) -> &CountdownState {
        &self.countdown
    }

    #[cfg(test)]
    pub fn sweep(&self) -> &SweepAnimationState {
        &self.sweep
    }

    pub fn time_text(&self) -> String {
        format_time(self.countdown.remaining_ms() as i64)
    }

    fn complete(&mut self, now: u64, sink: &mut dyn RenderSink) {
        self.cancel_frame();
        self.countdown.finish();
        self.phase = TimerPhase::Completed;
        self.snap(now, sink);
        info!("timer completed");
    }

    fn snap(&mut self, now: u64, sink: &mut dyn RenderSink) {
        self.sweep.snap_to(self.countdown.target_angle_deg(), now);
        self.render_current(sink);
    }

    fn request_frame(&mut self) {
        self.next_frame_id += 1;
        self.frame = Some(FrameRequest {
            id: self.next_frame_id,
        });
    }

    fn cancel_frame(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::DialFrame;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<DialFrame>,
    }

    impl RenderSink for RecordingSink {
        fn render(&mut self, angle_deg: f64, time_text: &str) {
            self.frames.push(DialFrame {
                angle_deg,
                time_text: time_text.to_string(),
            });
        }
    }

    impl RecordingSink {
        fn last(&self) -> &DialFrame {
            self.frames.last().expect("nothing rendered")
        }
    }

    fn observable(c: &PlaybackController) -> (TimerPhase, u64, u64, f64, f64, Option<FrameRequest>) {
        (
            c.phase(),
            c.countdown().duration_ms(),
            c.countdown().remaining_ms(),
            c.sweep().angle_deg(),
            c.sweep().velocity(),
            c.pending_frame(),
        )
    }

    #[test]
    fn presets_load_full_duration_and_readout() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(25, 0);

        for minutes in [1, 5, 15, 25, 45] {
            c.select_preset(minutes, 0, &mut sink);
            assert_eq!(c.countdown().remaining_ms(), u64::from(minutes) * 60_000);
            assert_eq!(c.phase(), TimerPhase::Idle);
            assert_eq!(sink.last().time_text, format!("{:02}:00", minutes));
            assert_eq!(sink.last().angle_deg, 0.0);
        }
    }

    #[test]
    fn start_twice_equals_start_once() {
        let mut sink = RecordingSink::default();
        let mut once = PlaybackController::new(1, 0);
        let mut twice = PlaybackController::new(1, 0);

        assert!(once.start(100, &mut sink));
        assert!(twice.start(100, &mut sink));
        assert!(!twice.start(100, &mut sink));

        assert_eq!(observable(&once), observable(&twice));
        assert_eq!(once.countdown(), twice.countdown());
    }

    #[test]
    fn frames_are_ignored_unless_requested() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(1, 0);
        assert_eq!(c.frame_elapsed(16, &mut sink), FrameOutcome::Ignored);
        assert!(sink.frames.is_empty());

        c.start(0, &mut sink);
        let first = c.pending_frame().unwrap();
        assert_eq!(c.frame_elapsed(16, &mut sink), FrameOutcome::Rendered);
        let second = c.pending_frame().unwrap();
        assert_ne!(first, second, "each frame re-requests a new one");
    }

    #[test]
    fn pause_cancels_queued_frame_and_freezes_remaining() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(1, 0);
        c.start(0, &mut sink);
        c.frame_elapsed(10_000, &mut sink);

        assert!(!c.pause(15_000, &mut sink));
        assert_eq!(c.phase(), TimerPhase::Paused);
        assert_eq!(c.countdown().remaining_ms(), 45_000);
        assert_eq!(c.pending_frame(), None);

        let rendered = sink.frames.len();
        assert_eq!(c.frame_elapsed(20_000, &mut sink), FrameOutcome::Ignored);
        assert_eq!(sink.frames.len(), rendered);
        assert_eq!(c.countdown().remaining_ms(), 45_000);
        assert_eq!(c.button_label(), "Start");
    }

    #[test]
    fn resume_continues_from_frozen_remaining() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(1, 0);
        c.start(0, &mut sink);
        c.pause(20_000, &mut sink);

        assert!(c.start(100_000, &mut sink));
        assert_eq!(c.button_label(), "Pause");
        c.frame_elapsed(110_000, &mut sink);
        assert_eq!(c.countdown().remaining_ms(), 30_000);
        assert_eq!(sink.last().time_text, "00:30");
    }

    #[test]
    fn progress_is_monotonic_and_reaches_exactly_one() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(1, 0);
        c.start(0, &mut sink);

        let mut last = 0.0;
        let mut now = 0;
        for delta in [16, 17, 16, 5_000, 33, 16, 20_000, 1] {
            now += delta;
            c.frame_elapsed(now, &mut sink);
            let progress = c.countdown().progress_fraction();
            assert!(progress >= last);
            last = progress;
        }

        // A backgrounded tab waking long after the deadline.
        now += 10 * 60_000;
        assert_eq!(c.frame_elapsed(now, &mut sink), FrameOutcome::Completed);
        assert_eq!(c.countdown().progress_fraction(), 1.0);
    }

    #[test]
    fn one_minute_jump_completes_once() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(1, 0);
        c.start(0, &mut sink);

        assert_eq!(c.frame_elapsed(61_000, &mut sink), FrameOutcome::Completed);
        assert_eq!(c.phase(), TimerPhase::Completed);
        assert_eq!(c.countdown().remaining_ms(), 0);
        assert_eq!(c.pending_frame(), None);
        assert_eq!(sink.last().angle_deg, 360.0);
        assert_eq!(sink.last().time_text, "00:00");
        assert_eq!(c.button_label(), "Start");

        // Nothing left to drive another completion.
        assert_eq!(c.frame_elapsed(62_000, &mut sink), FrameOutcome::Ignored);
        assert!(!c.start(63_000, &mut sink));
        assert_eq!(c.phase(), TimerPhase::Completed);
    }

    #[test]
    fn pause_after_deadline_completes() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(1, 0);
        c.start(0, &mut sink);
        assert!(c.pause(70_000, &mut sink));
        assert_eq!(c.phase(), TimerPhase::Completed);
    }

    #[test]
    fn reset_is_identical_from_any_state() {
        let mut sink = RecordingSink::default();
        let mut fresh = PlaybackController::new(5, 0);
        fresh.reset(999, &mut sink);
        let expected = observable(&fresh);

        let mut running = PlaybackController::new(5, 0);
        running.start(0, &mut sink);
        running.frame_elapsed(30_000, &mut sink);
        running.reset(999, &mut sink);

        let mut paused = PlaybackController::new(5, 0);
        paused.start(0, &mut sink);
        paused.frame_elapsed(60_000, &mut sink);
        paused.pause(70_000, &mut sink);
        paused.reset(999, &mut sink);

        let mut completed = PlaybackController::new(5, 0);
        completed.start(0, &mut sink);
        completed.frame_elapsed(10 * 60_000, &mut sink);
        assert_eq!(completed.phase(), TimerPhase::Completed);
        completed.reset(999, &mut sink);

        for c in [&running, &paused, &completed] {
            assert_eq!(observable(c), expected);
            assert_eq!(c.sweep().angle_deg(), 0.0);
            assert_eq!(c.sweep().velocity(), 0.0);
        }
        assert_eq!(sink.last().time_text, "05:00");
    }

    #[test]
    fn needle_lags_behind_true_progress() {
        let mut sink = RecordingSink::default();
        let mut c = PlaybackController::new(1, 0);
        c.start(0, &mut sink);
        c.frame_elapsed(16, &mut sink);
        // Big jump in true progress; the spring only moves a bounded step.
        c.frame_elapsed(30_016, &mut sink);
        assert!(sink.last().angle_deg < c.countdown().target_angle_deg());
    }
}
