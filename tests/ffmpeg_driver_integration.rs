// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the FFmpeg playback driver against a real video.
//!
//! Every test skips when `tests/data/sample.mp4` is absent. The sample should
//! last a few seconds so the end-of-stream tests finish quickly.

use approx::assert_abs_diff_eq;
use iced_reel::video_player::{
    BoundEvent, EventBinder, FfmpegDriver, PlaybackDriver, PlaybackSpeed,
};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver};

const SAMPLE: &str = "tests/data/sample.mp4";
const WAIT: Duration = Duration::from_secs(10);

/// Driver playing the sample, with its notifications bound to a channel.
struct Session {
    driver: FfmpegDriver,
    _binder: EventBinder<FfmpegDriver>,
    events: UnboundedReceiver<BoundEvent>,
    duration: f64,
}

impl Session {
    /// Opens the sample and waits for its duration, or `None` when the
    /// sample is missing.
    async fn open() -> Option<Self> {
        if !std::path::Path::new(SAMPLE).exists() {
            return None; // Skip if test file doesn't exist
        }

        let driver = FfmpegDriver::open(SAMPLE).expect("sample should open");
        let (tx, events) = mpsc::unbounded_channel();
        let binder = EventBinder::attach(driver.clone(), tx);
        let mut session = Self {
            driver,
            _binder: binder,
            events,
            duration: 0.0,
        };

        let Some(BoundEvent::MetadataLoaded(duration)) = session
            .next_matching(|e| matches!(e, BoundEvent::MetadataLoaded(_)))
            .await
        else {
            panic!("metadata was never reported");
        };
        session.duration = duration;
        Some(session)
    }

    /// Next event accepted by `accept`, dropping the others.
    async fn next_matching(
        &mut self,
        mut accept: impl FnMut(&BoundEvent) -> bool,
    ) -> Option<BoundEvent> {
        let events = &mut self.events;
        tokio::time::timeout(WAIT, async {
            while let Some(event) = events.recv().await {
                if accept(&event) {
                    return Some(event);
                }
            }
            None
        })
        .await
        .ok()
        .flatten()
    }

    async fn next_time_update(&mut self, accept: impl Fn(f64) -> bool) -> Option<f64> {
        match self
            .next_matching(|e| matches!(e, BoundEvent::TimeUpdate(t) if accept(*t)))
            .await
        {
            Some(BoundEvent::TimeUpdate(t)) => Some(t),
            _ => None,
        }
    }

    async fn next_play_state(&mut self) -> Option<bool> {
        match self
            .next_matching(|e| matches!(e, BoundEvent::PlayStateChanged(_)))
            .await
        {
            Some(BoundEvent::PlayStateChanged(playing)) => Some(playing),
            _ => None,
        }
    }
}

#[tokio::test]
async fn test_metadata_reports_duration() {
    let Some(session) = Session::open().await else {
        return;
    };

    assert!(session.duration > 0.0, "Duration should be > 0");
    assert_abs_diff_eq!(session.driver.duration(), session.duration);
    assert!(session.driver.is_paused());
    assert!(session.driver.last_error().is_none());
}

#[tokio::test]
async fn test_first_frame_is_decoded_before_play() {
    let Some(session) = Session::open().await else {
        return;
    };

    let started = Instant::now();
    let frame = loop {
        if let Some(frame) = session.driver.current_frame() {
            break frame;
        }
        assert!(started.elapsed() < WAIT, "the first picture was never decoded");
        tokio::time::sleep(Duration::from_millis(10)).await;
    };

    assert!(frame.width > 0 && frame.height > 0);
    assert_eq!(frame.rgba.len(), (frame.width * frame.height * 4) as usize);
    assert!(session.driver.is_paused());
}

#[tokio::test]
async fn test_play_raises_time_update_per_frame() {
    let Some(mut session) = Session::open().await else {
        return;
    };

    session.driver.play().expect("play should be accepted");
    assert_eq!(session.next_play_state().await, Some(true));

    let mut positions = Vec::new();
    while positions.len() < 5 {
        let t = session
            .next_time_update(|_| true)
            .await
            .expect("playback should keep reporting its position");
        positions.push(t);
    }

    assert!(
        positions.windows(2).all(|w| w[1] > w[0]),
        "Positions should increase frame by frame: {positions:?}"
    );
    assert!(!session.driver.is_paused());
    assert!(session.driver.current_frame().is_some());
}

#[tokio::test]
async fn test_paused_seek_moves_position_without_playing() {
    let Some(mut session) = Session::open().await else {
        return;
    };
    let target = session.duration / 2.0;

    session.driver.set_current_time(target);

    let reported = session
        .next_time_update(|t| t >= target - 0.001)
        .await
        .expect("seek should report the new position");
    assert!(reported <= session.duration);

    // Give the decoder time to present the frame at the target.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(session.driver.is_paused());
    assert!(session.driver.current_time() >= target - 0.001);
    while let Ok(event) = session.events.try_recv() {
        assert_ne!(event, BoundEvent::PlayStateChanged(true));
    }
}

#[tokio::test]
async fn test_half_speed_paces_frames_slower() {
    let Some(mut session) = Session::open().await else {
        return;
    };
    let span = (session.duration / 4.0).min(0.5);

    session.driver.set_playback_rate(PlaybackSpeed::Half);
    let started = Instant::now();
    session.driver.play().expect("play should be accepted");

    let first = session
        .next_time_update(|_| true)
        .await
        .expect("playback should report its position");
    session
        .next_time_update(|t| t >= first + span)
        .await
        .expect("playback should advance");

    // At half speed, `span` media seconds need about twice as long on the
    // wall; allow one frame of slack.
    assert!(
        started.elapsed() >= Duration::from_secs_f64(span * 1.5),
        "Half speed finished in {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_end_of_stream_stops_playback() {
    let Some(mut session) = Session::open().await else {
        return;
    };
    let duration = session.duration;
    session.driver.set_current_time((duration - 0.5).max(0.0));

    session.driver.play().expect("play should be accepted");
    assert_eq!(session.next_play_state().await, Some(true));
    assert_eq!(session.next_play_state().await, Some(false));

    assert!(session.driver.is_paused());
    assert_abs_diff_eq!(session.driver.current_time(), duration, epsilon = 1e-6);
}

#[tokio::test]
async fn test_play_after_paused_seek_to_end_replays_from_start() {
    let Some(mut session) = Session::open().await else {
        return;
    };
    let duration = session.duration;

    session.driver.set_current_time(duration);
    // One update from the seek, one once the decoder runs out of frames.
    for _ in 0..2 {
        session
            .next_time_update(|t| (t - duration).abs() < 1e-6)
            .await
            .expect("seek to the end should report the duration");
    }

    session.driver.play().expect("play should be accepted");
    assert_eq!(session.next_play_state().await, Some(true));
    session
        .next_time_update(|t| t < duration / 2.0)
        .await
        .expect("playback should restart from the beginning");

    assert!(!session.driver.is_paused());
}

#[tokio::test]
async fn test_valid_sample_accepts_play_after_pause() {
    let Some(mut session) = Session::open().await else {
        return;
    };

    session.driver.play().expect("play should be accepted");
    assert_eq!(session.next_play_state().await, Some(true));
    session.driver.pause();
    assert_eq!(session.next_play_state().await, Some(false));

    assert!(session.driver.play().is_ok());
    assert!(session.driver.last_error().is_none());
}
