//! Timed, non-interruptible replay of a frame sequence.
//!
//! [`PlaybackEngine::play`] renders frame 0 immediately, then each remaining
//! frame after the configured delay. Waiting is an async sleep, so the rest
//! of the program keeps running; only a second playback is refused while one
//! is in flight. A playback is never cancelled by new input: every frame of a
//! sequence is rendered, in order, before the next sequence can start.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::game::{MoveFrame, Sequence};

/// Returned by [`PlaybackEngine::play`] when another playback is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a playback is already in progress")]
pub struct PlaybackBusy;

/// Summary of a completed playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Number of frames rendered; always the sequence length.
    pub frames_rendered: usize,
    /// The last frame rendered.
    pub last: MoveFrame,
    /// Index and value of the most recent terminal frame, if any.
    pub terminal: Option<(usize, MoveFrame)>,
}

impl PlaybackReport {
    /// Returns `true` if the sequence ended the game.
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }
}

/// Replays sequences at a fixed cadence, one at a time.
#[derive(Debug)]
pub struct PlaybackEngine {
    delay: Duration,
    lock: Mutex<()>,
}

impl PlaybackEngine {
    /// Create an engine that waits `delay` between consecutive frames.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            lock: Mutex::new(()),
        }
    }

    /// Delay between consecutive frames.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns `true` while a playback is in flight.
    pub fn is_playing(&self) -> bool {
        self.lock.try_lock().is_err()
    }

    /// Replay `sequence`, calling `render` once per frame in order.
    ///
    /// Frame 0 is rendered before the first suspension point. Each later
    /// frame is rendered after sleeping for the configured delay, measured
    /// from the end of the previous render.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackBusy`] without rendering anything if another
    /// playback holds the engine.
    pub async fn play<F>(
        &self,
        sequence: &Sequence,
        mut render: F,
    ) -> Result<PlaybackReport, PlaybackBusy>
    where
        F: FnMut(usize, &MoveFrame),
    {
        let _guard = self.lock.try_lock().map_err(|_| PlaybackBusy)?;

        debug!(frames = sequence.len(), delay_ms = self.delay.as_millis(), "playback started");

        let mut rendered = 0;
        for (index, frame) in sequence.frames().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.delay).await;
            }
            trace!(index, "rendering frame");
            render(index, frame);
            rendered += 1;
        }

        let terminal = sequence
            .terminal_frame()
            .map(|(index, frame)| (index, *frame));

        debug!(terminal = terminal.is_some(), "playback finished");
        Ok(PlaybackReport {
            frames_rendered: rendered,
            last: *sequence.last(),
            terminal,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use crate::board::{self, Board};
    use crate::protocol::WireFrame;
    use tokio::time::Instant;

    fn sequence(terminal_flags: &[bool]) -> Sequence {
        let wire = terminal_flags
            .iter()
            .enumerate()
            .map(|(i, &game_over)| WireFrame {
                success: Some(true),
                next_turn: if game_over { ' ' } else { 'X' },
                board: board::encode(&Board::opening()),
                game_over,
                pieces_count: Some([u32::try_from(i).unwrap(), 0]),
            })
            .collect();
        Sequence::from_wire(wire).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn frames_render_in_order_at_fixed_cadence() {
        let engine = PlaybackEngine::new(Duration::from_secs(1));
        let seq = sequence(&[false, false, false, false]);
        let started = Instant::now();
        let mut seen = Vec::new();

        let report = engine
            .play(&seq, |index, frame| {
                seen.push((index, frame.score.human, started.elapsed()));
            })
            .await
            .unwrap();

        assert_eq!(report.frames_rendered, 4);
        assert!(!report.is_terminal());
        let order: Vec<usize> = seen.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        let scores: Vec<u32> = seen.iter().map(|(_, s, _)| *s).collect();
        assert_eq!(scores, vec![0, 1, 2, 3]);
        assert_eq!(seen[0].2, Duration::ZERO);
        assert_eq!(seen[1].2, Duration::from_secs(1));
        assert_eq!(seen[3].2, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn single_frame_needs_no_delay() {
        let engine = PlaybackEngine::new(Duration::from_secs(1));
        let started = Instant::now();
        let report = engine.play(&sequence(&[false]), |_, _| {}).await.unwrap();
        assert_eq!(report.frames_rendered, 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn second_playback_is_refused_while_first_runs() {
        let engine = PlaybackEngine::new(Duration::from_millis(500));
        let long = sequence(&[false, false, false]);
        let short = sequence(&[false]);

        let mut second_rendered = 0;
        let (first, second) = tokio::join!(engine.play(&long, |_, _| {}), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            assert!(engine.is_playing());
            engine.play(&short, |_, _| second_rendered += 1).await
        });

        assert_eq!(first.unwrap().frames_rendered, 3);
        assert_eq!(second, Err(PlaybackBusy));
        assert_eq!(second_rendered, 0);
        assert!(!engine.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_flag_before_trailing_frame_is_reported() {
        let engine = PlaybackEngine::new(Duration::from_millis(10));
        let report = engine
            .play(&sequence(&[false, true, false]), |_, _| {})
            .await
            .unwrap();
        let (index, frame) = report.terminal.unwrap();
        assert_eq!(index, 1);
        assert!(frame.terminal);
        assert_eq!(report.last.score.human, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_rendering_does_not_skip_frames() {
        let engine = PlaybackEngine::new(Duration::from_millis(1));
        let mut rendered = 0;
        engine
            .play(&sequence(&[false, false, false]), |_, _| {
                // A render that takes longer than the cadence.
                std::thread::sleep(std::time::Duration::from_millis(5));
                rendered += 1;
            })
            .await
            .unwrap();
        assert_eq!(rendered, 3);
    }
}
