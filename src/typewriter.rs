//! Typewriter reveal of a reply that is already known in full.
//!
//! [`Reveal`] is the pure part: a finite iterator over successively longer
//! prefixes of the reply, one character per step.  [`Typewriter::ticks`]
//! paces a `Reveal` with a tokio interval, and [`Typewriter::play`] applies
//! the paced frames to a [`SessionState`].

use std::time::Duration;

use futures::Stream;
use futures::stream::{self, StreamExt};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::Result;
use crate::observability::{REVEAL_DURATION, REVEAL_EMPTY_REPLIES, REVEAL_TICKS};
use crate::render::{TranscriptView, present};
use crate::session::SessionState;
use crate::types::{SessionStatus, TranscriptEntry};

/// Default time between reveal ticks.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(20);

const MIN_CADENCE: Duration = Duration::from_millis(1);

/// One step of a reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    /// 1-based tick number.
    pub tick: usize,
    /// Everything revealed so far.
    pub revealed: String,
    /// True on the step that reveals the last character.
    pub complete: bool,
}

/// Successively longer prefixes of a reply.
///
/// Yields exactly one frame per character; an empty reply yields nothing.
/// A `Reveal` is not restartable.
#[derive(Debug, Clone)]
pub struct Reveal {
    text: String,
    end: usize,
    tick: usize,
}

impl Reveal {
    /// Creates a reveal over `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end: 0,
            tick: 0,
        }
    }

    /// Returns the full text being revealed.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Iterator for Reveal {
    type Item = RevealFrame;

    fn next(&mut self) -> Option<RevealFrame> {
        let ch = self.text[self.end..].chars().next()?;
        self.end += ch.len_utf8();
        self.tick += 1;
        Some(RevealFrame {
            tick: self.tick,
            revealed: self.text[..self.end].to_string(),
            complete: self.end == self.text.len(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text[self.end..].chars().count();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Reveal {}

/// Reveals replies at a fixed cadence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Typewriter {
    cadence: Duration,
}

impl Typewriter {
    /// Creates a typewriter ticking every `cadence`, at least 1ms.
    pub fn new(cadence: Duration) -> Self {
        Self {
            cadence: cadence.max(MIN_CADENCE),
        }
    }

    /// Returns the time between ticks.
    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    /// Returns the unpaced reveal of `reply`.
    pub fn reveal(&self, reply: &str) -> Reveal {
        Reveal::new(reply)
    }

    /// Returns the reveal of `reply` paced by a repeating timer.
    ///
    /// The first frame arrives one cadence after the stream is first polled.
    /// The timer lives inside the stream and is dropped with it.
    pub fn ticks(&self, reply: &str) -> impl Stream<Item = RevealFrame> + Send + 'static {
        let cadence = self.cadence;
        let reveal = self.reveal(reply);
        stream::unfold(
            (reveal, None),
            move |(mut reveal, interval): (Reveal, Option<time::Interval>)| async move {
                let frame = reveal.next()?;
                let mut interval = interval.unwrap_or_else(|| {
                    let mut interval = time::interval_at(Instant::now() + cadence, cadence);
                    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    interval
                });
                interval.tick().await;
                Some((frame, (reveal, Some(interval))))
            },
        )
    }

    /// Types `reply` into `session`, forwarding every change to `view`.
    ///
    /// The session must be awaiting a reply.  An empty reply returns it to
    /// idle without touching the transcript.  Otherwise the session streams:
    /// the first tick appends an in-progress entry, later ticks replace it,
    /// and the last tick locks it with the full reply before the session
    /// returns to idle.  Returns the number of ticks.
    pub async fn play(
        &self,
        session: &mut SessionState,
        reply: &str,
        view: &mut dyn TranscriptView,
    ) -> Result<usize> {
        if reply.is_empty() {
            REVEAL_EMPTY_REPLIES.click();
            session.set_status(SessionStatus::Idle)?;
            present(view, session);
            return Ok(0);
        }

        session.set_status(SessionStatus::Streaming)?;
        present(view, session);

        let start = Instant::now();
        let ticks = self.ticks(reply);
        futures::pin_mut!(ticks);
        let mut count = 0;
        while let Some(frame) = ticks.next().await {
            REVEAL_TICKS.click();
            count = frame.tick;
            if frame.tick == 1 {
                session.append_entry(TranscriptEntry::streaming(frame.revealed.as_str()));
                if frame.complete {
                    session.finish_last(&frame.revealed)?;
                }
            } else if frame.complete {
                session.finish_last(&frame.revealed)?;
            } else {
                session.update_last(&frame.revealed)?;
            }
            present(view, session);
        }
        REVEAL_DURATION.add(start.elapsed().as_secs_f64());

        session.set_status(SessionStatus::Idle)?;
        present(view, session);
        Ok(count)
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(DEFAULT_CADENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready};

    #[test]
    fn reveal_yields_one_frame_per_char() {
        let frames: Vec<_> = Reveal::new("héllo").collect();
        assert_eq!(frames.len(), 5);
        let revealed: Vec<_> = frames.iter().map(|f| f.revealed.as_str()).collect();
        assert_eq!(revealed, vec!["h", "hé", "hél", "héll", "héllo"]);
        assert!(frames[..4].iter().all(|f| !f.complete));
        assert!(frames[4].complete);
        assert_eq!(frames[4].tick, 5);
    }

    #[test]
    fn reveal_is_monotonic() {
        let mut last = 0;
        for frame in Reveal::new("a longer reply\nwith lines") {
            assert!(frame.revealed.len() > last);
            last = frame.revealed.len();
        }
    }

    #[test]
    fn empty_reveal_is_empty() {
        assert_eq!(Reveal::new("").next(), None);
        assert_eq!(Reveal::new("").len(), 0);
    }

    #[test]
    fn reveal_size_hint_counts_chars() {
        let mut reveal = Reveal::new("añb");
        assert_eq!(reveal.len(), 3);
        reveal.next();
        assert_eq!(reveal.len(), 2);
    }

    #[test]
    fn zero_cadence_is_clamped() {
        assert_eq!(Typewriter::new(Duration::ZERO).cadence(), MIN_CADENCE);
        assert_eq!(Typewriter::default().cadence(), DEFAULT_CADENCE);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_wait_one_cadence() {
        let typewriter = Typewriter::new(Duration::from_millis(20));
        let ticks = typewriter.ticks("ab");
        let mut ticks = tokio_test::task::spawn(ticks);

        assert_pending!(ticks.poll_next());
        time::advance(Duration::from_millis(20)).await;
        let frame = assert_ready!(ticks.poll_next()).unwrap();
        assert_eq!(frame.revealed, "a");

        assert_pending!(ticks.poll_next());
        time::advance(Duration::from_millis(20)).await;
        let frame = assert_ready!(ticks.poll_next()).unwrap();
        assert_eq!(frame.revealed, "ab");
        assert!(frame.complete);

        assert_eq!(assert_ready!(ticks.poll_next()), None);
    }

    struct NullView;

    impl TranscriptView for NullView {
        fn entry_appended(&mut self, _: usize, _: &TranscriptEntry) {}
        fn entry_updated(&mut self, _: usize, _: &TranscriptEntry) {}
        fn print_error(&mut self, _: &str) {}
        fn print_info(&mut self, _: &str) {}
    }

    #[tokio::test(start_paused = true)]
    async fn play_takes_n_cadences() {
        let typewriter = Typewriter::new(Duration::from_millis(20));
        let mut session = SessionState::new();
        session.submit("hello");
        session.drain_events();

        let start = Instant::now();
        let ticks = typewriter
            .play(&mut session, "hi!", &mut NullView)
            .await
            .unwrap();
        assert_eq!(ticks, 3);
        assert_eq!(start.elapsed(), Duration::from_millis(60));
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.transcript()[1].output_text(), "hi!");
        assert!(!session.transcript()[1].in_progress);
    }

    #[tokio::test(start_paused = true)]
    async fn play_single_char_appends_then_locks() {
        let typewriter = Typewriter::default();
        let mut session = SessionState::new();
        session.submit("q");
        session.drain_events();

        typewriter.play(&mut session, "k", &mut NullView).await.unwrap();
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.transcript()[1].output_text(), "k");
        assert!(!session.transcript()[1].in_progress);
    }

    #[tokio::test(start_paused = true)]
    async fn play_empty_reply_returns_to_idle() {
        let typewriter = Typewriter::default();
        let mut session = SessionState::new();
        session.submit("hello");
        session.drain_events();

        let ticks = typewriter.play(&mut session, "", &mut NullView).await.unwrap();
        assert_eq!(ticks, 0);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(session.drain_events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn play_requires_awaiting_reply() {
        let typewriter = Typewriter::default();
        let mut session = SessionState::new();
        assert!(typewriter.play(&mut session, "hi", &mut NullView).await.is_err());
        assert!(session.transcript().is_empty());
    }
}
