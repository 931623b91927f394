// SPDX-License-Identifier: MPL-2.0
//! FFmpeg-backed playback driver.
//!
//! [`FfmpegDriver::open`] checks the file on the calling thread, then spawns
//! a decoder thread that owns every FFmpeg object. The handle talks to the
//! thread through an unbounded command channel and reads the clock, the
//! listener registry and the latest frame through shared state.
//!
//! The thread stops once every handle clone has been dropped.

use super::driver::{Notification, NotificationKind, PlaybackDriver, VideoFrame};
use super::listeners::{lock, Listener, ListenerId, Listeners};
use super::playback_speed::PlaybackSpeed;
use super::time_units::pts_to_micros;
use super::volume::Volume;
use crate::error::DriverError;
use std::path::Path;
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

static FFMPEG_INIT: Once = Once::new();

/// Idle delay of the decoder thread while paused.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Initializes FFmpeg once and silences its warnings.
pub fn init_ffmpeg() -> Result<(), DriverError> {
    let mut init_result = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(DriverError::Open(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

#[derive(Debug, Clone)]
enum Command {
    Play,
    Pause,
    Seek { target_secs: f64 },
    SetRate(PlaybackSpeed),
}

#[derive(Debug)]
struct Clock {
    paused: bool,
    current_time: f64,
    duration: f64,
    metadata_loaded: bool,
    volume: Volume,
    speed: PlaybackSpeed,
}

#[derive(Debug)]
struct Shared {
    clock: Mutex<Clock>,
    listeners: Mutex<Listeners>,
    frame: Mutex<Option<VideoFrame>>,
    last_error: Mutex<Option<DriverError>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            clock: Mutex::new(Clock {
                paused: true,
                current_time: 0.0,
                duration: 0.0,
                metadata_loaded: false,
                volume: Volume::default(),
                speed: PlaybackSpeed::default(),
            }),
            listeners: Mutex::new(Listeners::default()),
            frame: Mutex::new(None),
            last_error: Mutex::new(None),
        }
    }

    fn emit(&self, notification: Notification) {
        lock(&self.listeners).dispatch(&notification);
    }

    fn report(&self, error: DriverError) {
        log::error!("Decoder: {}", error);
        *lock(&self.last_error) = Some(error);
    }
}

/// Handle to a decoder thread playing one media file.
#[derive(Debug, Clone)]
pub struct FfmpegDriver {
    shared: Arc<Shared>,
    command_tx: mpsc::UnboundedSender<Command>,
}

impl FfmpegDriver {
    /// Opens `path` and starts a paused decoder thread.
    ///
    /// Fails if the file cannot be opened or has no video stream.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DriverError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(DriverError::Open(format!(
                "file not found: {}",
                path.display()
            )));
        }
        init_ffmpeg()?;
        check_video_stream(&path)?;

        let shared = Arc::new(Shared::new());
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let worker_shared = Arc::clone(&shared);
        std::thread::Builder::new()
            .name("iced-reel-decoder".to_string())
            .spawn(move || {
                if let Err(e) = run_decoder(&path, &worker_shared, command_rx) {
                    worker_shared.report(e);
                }
                log::debug!("Decoder thread for {} stopped", path.display());
            })
            .map_err(|e| DriverError::Open(format!("cannot spawn decoder thread: {e}")))?;

        Ok(Self { shared, command_tx })
    }

    /// Last failure raised by the decoder thread, if any.
    pub fn last_error(&self) -> Option<DriverError> {
        lock(&self.shared.last_error).clone()
    }

    /// Volume last requested. There is no audio output; the level is kept
    /// so it survives into a future audio path.
    pub fn volume(&self) -> Volume {
        lock(&self.shared.clock).volume
    }

    fn send(&self, command: Command) -> Result<(), DriverError> {
        self.command_tx
            .send(command)
            .map_err(|_| DriverError::NotRunning)
    }
}

impl PlaybackDriver for FfmpegDriver {
    fn play(&mut self) -> Result<(), DriverError> {
        if let Some(error) = self.last_error() {
            return Err(DriverError::PlayRejected(error.to_string()));
        }
        self.send(Command::Play)
    }

    fn pause(&mut self) {
        if let Err(e) = self.send(Command::Pause) {
            log::warn!("Pause ignored: {}", e);
        }
    }

    fn is_paused(&self) -> bool {
        lock(&self.shared.clock).paused
    }

    fn current_time(&self) -> f64 {
        lock(&self.shared.clock).current_time
    }

    fn set_current_time(&mut self, secs: f64) {
        if !secs.is_finite() {
            log::warn!("Ignoring seek to non-finite position");
            return;
        }
        let target_secs = {
            let clock = lock(&self.shared.clock);
            if clock.metadata_loaded {
                secs.clamp(0.0, clock.duration)
            } else {
                secs.max(0.0)
            }
        };
        if let Err(e) = self.send(Command::Seek { target_secs }) {
            log::warn!("Seek ignored: {}", e);
        }
    }

    fn duration(&self) -> f64 {
        lock(&self.shared.clock).duration
    }

    fn set_volume(&mut self, volume: Volume) {
        lock(&self.shared.clock).volume = volume;
    }

    fn set_playback_rate(&mut self, speed: PlaybackSpeed) {
        lock(&self.shared.clock).speed = speed;
        if let Err(e) = self.send(Command::SetRate(speed)) {
            log::warn!("Rate change ignored: {}", e);
        }
    }

    fn add_listener(&mut self, kind: NotificationKind, mut listener: Listener) -> ListenerId {
        let known_duration = {
            let clock = lock(&self.shared.clock);
            clock.metadata_loaded.then_some(clock.duration)
        };
        if let (NotificationKind::MetadataLoaded, Some(duration)) = (kind, known_duration) {
            listener(&Notification::MetadataLoaded { duration });
        }
        lock(&self.shared.listeners).add(kind, listener)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        lock(&self.shared.listeners).remove(id)
    }

    fn current_frame(&self) -> Option<VideoFrame> {
        lock(&self.shared.frame).clone()
    }
}

/// Checks that `path` opens and holds a video stream.
fn check_video_stream(path: &Path) -> Result<(), DriverError> {
    let ictx =
        ffmpeg_next::format::input(&path).map_err(|e| DriverError::Open(e.to_string()))?;
    if ictx.streams().best(ffmpeg_next::media::Type::Video).is_none() {
        return Err(DriverError::NoVideoStream);
    }
    Ok(())
}

/// Duration in seconds, from the stream or else from the container.
fn stream_duration(ictx: &ffmpeg_next::format::context::Input, stream_index: usize) -> f64 {
    let from_stream = ictx.stream(stream_index).and_then(|stream| {
        let time_base = stream.time_base();
        (stream.duration() > 0 && time_base.denominator() != 0).then(|| {
            stream.duration() as f64 * f64::from(time_base.numerator())
                / f64::from(time_base.denominator())
        })
    });
    from_stream.unwrap_or_else(|| {
        if ictx.duration() > 0 {
            ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
        } else {
            0.0
        }
    })
}

/// Wall-clock pacing of presented frames.
#[derive(Debug, Default)]
struct Pacer {
    start: Option<Instant>,
    first_pts: Option<f64>,
}

impl Pacer {
    fn reset(&mut self) {
        self.start = None;
        self.first_pts = None;
    }

    /// Sleeps until the frame at `pts_secs` is due at `rate`.
    fn wait_for(&mut self, pts_secs: f64, rate: f64) {
        let start = *self.start.get_or_insert_with(Instant::now);
        let first = *self.first_pts.get_or_insert(pts_secs);
        let delay = ((pts_secs - first) / rate).max(0.0);
        let target = start + Duration::from_secs_f64(delay);
        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        }
    }
}

/// FFmpeg objects owned by the decoder thread.
struct Decoder {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    time_base: f64,
    width: u32,
    height: u32,
    /// End of file reached and signalled to the decoder.
    drained: bool,
}

impl Decoder {
    fn open(path: &Path) -> Result<Self, DriverError> {
        let ictx =
            ffmpeg_next::format::input(path).map_err(|e| DriverError::Open(e.to_string()))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(DriverError::NoVideoStream)?;
        let stream_index = input.index();
        let time_base = input.time_base();
        let time_base = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
            .and_then(|context| context.decoder().video())
            .map_err(|e| DriverError::Open(format!("cannot create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();
        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| DriverError::Open(format!("cannot create scaler: {e}")))?;

        Ok(Self {
            ictx,
            decoder,
            scaler,
            stream_index,
            time_base,
            width,
            height,
            drained: false,
        })
    }

    fn duration(&self) -> f64 {
        stream_duration(&self.ictx, self.stream_index)
    }

    /// Seeks to the keyframe at or before `target_secs`.
    fn seek(&mut self, target_secs: f64) -> Result<(), DriverError> {
        let timestamp = pts_to_micros(target_secs);
        self.ictx
            .seek(timestamp, ..timestamp)
            .map_err(|e| DriverError::Seek(e.to_string()))?;
        self.decoder.flush();
        self.drained = false;
        Ok(())
    }

    /// Decodes the next picture. `Ok(None)` means end of stream.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, DriverError> {
        let mut decoded = ffmpeg_next::frame::Video::empty();
        loop {
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                return self.convert(&decoded).map(Some);
            }
            if self.drained {
                return Ok(None);
            }

            match self.ictx.packets().next() {
                Some((stream, packet)) => {
                    if stream.index() != self.stream_index {
                        continue;
                    }
                    if let Err(e) = self.decoder.send_packet(&packet) {
                        log::debug!("Skipping undecodable packet: {}", e);
                    }
                }
                None => {
                    // Out of packets: let the decoder hand out what it buffered.
                    if let Err(e) = self.decoder.send_eof() {
                        log::debug!("Decoder refused end of stream: {}", e);
                    }
                    self.drained = true;
                }
            }
        }
    }

    fn convert(&mut self, decoded: &ffmpeg_next::frame::Video) -> Result<VideoFrame, DriverError> {
        let mut rgba = ffmpeg_next::frame::Video::empty();
        self.scaler
            .run(decoded, &mut rgba)
            .map_err(|e| DriverError::Decode(format!("scaling failed: {e}")))?;

        let pts_secs = decoded
            .timestamp()
            .map_or(0.0, |pts| pts as f64 * self.time_base);

        Ok(VideoFrame {
            rgba: Arc::new(extract_rgba_data(&rgba)),
            width: self.width,
            height: self.height,
            pts_secs,
        })
    }
}

/// Copies the packed RGBA rows out of a frame, dropping the stride padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        rgba_bytes.extend_from_slice(&data[row_start..row_start + width * 4]);
    }
    rgba_bytes
}

fn set_paused(shared: &Shared, paused: bool) {
    let changed = {
        let mut clock = lock(&shared.clock);
        let changed = clock.paused != paused;
        clock.paused = paused;
        changed
    };
    if changed {
        shared.emit(Notification::PlayState { playing: !paused });
    }
}

fn set_position(shared: &Shared, current_time: f64) {
    lock(&shared.clock).current_time = current_time;
    shared.emit(Notification::TimeUpdate { current_time });
}

fn run_decoder(
    path: &Path,
    shared: &Shared,
    mut command_rx: mpsc::UnboundedReceiver<Command>,
) -> Result<(), DriverError> {
    let mut decoder = Decoder::open(path)?;

    let duration = decoder.duration();
    {
        let mut clock = lock(&shared.clock);
        clock.duration = duration;
        clock.metadata_loaded = true;
    }
    shared.emit(Notification::MetadataLoaded { duration });
    log::info!(
        "Opened {} ({}x{}, {:.2}s)",
        path.display(),
        decoder.width,
        decoder.height,
        duration
    );

    let mut playing = false;
    let mut ended = false;
    let mut rate = PlaybackSpeed::default().value();
    let mut pacer = Pacer::default();
    // Frames before a seek target are decoded but not presented.
    let mut skip_until: Option<f64> = None;
    // Show one frame after a seek while paused.
    let mut present_one = true;

    loop {
        match command_rx.try_recv() {
            Ok(Command::Play) => {
                if ended {
                    match decoder.seek(0.0) {
                        Ok(()) => set_position(shared, 0.0),
                        Err(e) => shared.report(e),
                    }
                    ended = false;
                }
                playing = true;
                pacer.reset();
                set_paused(shared, false);
            }
            Ok(Command::Pause) => {
                playing = false;
                pacer.reset();
                set_paused(shared, true);
            }
            Ok(Command::Seek { target_secs }) => match decoder.seek(target_secs) {
                Ok(()) => {
                    ended = false;
                    skip_until = Some(target_secs);
                    present_one = !playing;
                    pacer.reset();
                    set_position(shared, target_secs);
                }
                Err(e) => shared.report(e),
            },
            Ok(Command::SetRate(speed)) => {
                rate = speed.value();
                pacer.reset();
            }
            Err(mpsc::error::TryRecvError::Disconnected) => break,
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        if !playing && !present_one {
            std::thread::sleep(IDLE_POLL);
            continue;
        }

        match decoder.next_frame() {
            Ok(Some(frame)) => {
                if skip_until.is_some_and(|target| frame.pts_secs < target) {
                    continue;
                }
                skip_until = None;
                if playing {
                    pacer.wait_for(frame.pts_secs, rate);
                }
                let pts_secs = frame.pts_secs;
                *lock(&shared.frame) = Some(frame);
                present_one = false;
                set_position(shared, pts_secs);
            }
            Ok(None) => {
                // Also reached by a paused seek past the last frame; the
                // next play has to rewind either way.
                log::debug!("End of stream");
                ended = true;
                set_position(shared, duration);
                playing = false;
                present_one = false;
                skip_until = None;
                pacer.reset();
                set_paused(shared, true);
            }
            Err(e) => {
                shared.report(e);
                playing = false;
                present_one = false;
                set_paused(shared, true);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Handle wired to a command queue the test owns instead of a thread.
    fn detached() -> (FfmpegDriver, mpsc::UnboundedReceiver<Command>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let driver = FfmpegDriver {
            shared: Arc::new(Shared::new()),
            command_tx,
        };
        (driver, command_rx)
    }

    #[test]
    fn play_is_queued_while_decoder_is_healthy() {
        let (mut driver, mut command_rx) = detached();

        assert!(driver.play().is_ok());
        assert!(matches!(command_rx.try_recv(), Ok(Command::Play)));
    }

    #[test]
    fn play_is_rejected_after_decoder_error() {
        let (mut driver, mut command_rx) = detached();
        driver
            .shared
            .report(DriverError::Decode("corrupt packet".to_string()));

        let result = driver.play();

        assert!(matches!(result, Err(DriverError::PlayRejected(_))));
        assert!(command_rx.try_recv().is_err());
        assert!(driver.is_paused());
    }

    #[test]
    fn play_fails_once_decoder_thread_is_gone() {
        let (mut driver, command_rx) = detached();
        drop(command_rx);

        assert!(matches!(driver.play(), Err(DriverError::NotRunning)));
    }

    #[test]
    fn seek_is_clamped_to_known_duration() {
        let (mut driver, mut command_rx) = detached();
        {
            let mut clock = lock(&driver.shared.clock);
            clock.duration = 12.0;
            clock.metadata_loaded = true;
        }

        driver.set_current_time(40.0);
        driver.set_current_time(f64::NAN);

        assert!(matches!(
            command_rx.try_recv(),
            Ok(Command::Seek { target_secs }) if (target_secs - 12.0).abs() < f64::EPSILON
        ));
        assert!(command_rx.try_recv().is_err());
    }

    #[test]
    fn open_missing_file_fails() {
        let result = FfmpegDriver::open("/definitely/not/here.mp4");
        assert!(matches!(result, Err(DriverError::Open(_))));
    }

    #[test]
    fn open_garbage_file_fails() {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("fake.mp4");
        std::fs::write(&path, b"not a video").expect("failed to write file");

        assert!(FfmpegDriver::open(&path).is_err());
    }

    #[test]
    fn pacer_waits_relative_to_first_frame() {
        let mut pacer = Pacer::default();
        let started = Instant::now();

        pacer.wait_for(10.0, 1.0);
        pacer.wait_for(10.02, 1.0);

        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn pacer_scales_by_rate() {
        let mut pacer = Pacer::default();
        let started = Instant::now();

        pacer.wait_for(0.0, 2.0);
        pacer.wait_for(0.04, 2.0);

        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn init_ffmpeg_is_idempotent() {
        assert!(init_ffmpeg().is_ok());
        assert!(init_ffmpeg().is_ok());
    }
}
