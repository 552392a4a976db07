//! Recording controller use case
//!
//! Drives a [`RecordingSession`] from a single one-second timer and talks to
//! the capture provider at the phase boundaries: access at mount, capture
//! start when the countdown ends, finalization when the recording stops.

use std::future;
use std::time::Duration as StdDuration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::domain::error::InvalidStateTransition;
use crate::domain::recording::{
    Duration, RecordingArtifact, RecordingPhase, RecordingSession, TickOutcome,
};

use super::ports::{CaptureError, CaptureProvider, CaptureSettings, LiveFeedSink, LiveStream};

/// Period of the countdown and elapsed-time ticker
pub const TICK_PERIOD: StdDuration = StdDuration::from_secs(1);

/// Configuration for a recording controller
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Countdown before capture begins
    pub countdown: Duration,
    /// Hard ceiling for one capture cycle
    pub max_duration: Duration,
    /// Encoding parameters passed to the capture provider
    pub settings: CaptureSettings,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            countdown: Duration::default_countdown(),
            max_duration: Duration::default_max_duration(),
            settings: CaptureSettings::default(),
        }
    }
}

/// Capture lifecycle controller for one question attempt at a time
pub struct RecordingController<C>
where
    C: CaptureProvider,
{
    capture: C,
    settings: CaptureSettings,
    session: RecordingSession,
    stream: Option<LiveStream>,
    access_error: Option<CaptureError>,
    /// The only timer. Replacing or clearing it cancels the previous one.
    ticker: Option<Interval>,
    capturing: bool,
}

impl<C> RecordingController<C>
where
    C: CaptureProvider,
{
    /// Create a new controller in idle state
    pub fn new(capture: C, config: RecorderConfig) -> Self {
        Self {
            capture,
            settings: config.settings,
            session: RecordingSession::new(config.countdown, config.max_duration),
            stream: None,
            access_error: None,
            ticker: None,
            capturing: false,
        }
    }

    pub fn phase(&self) -> RecordingPhase {
        self.session.phase()
    }

    /// Recording ceiling in seconds
    pub fn max_secs(&self) -> u64 {
        self.session.max_secs()
    }

    /// Whether a countdown or elapsed-time timer is armed
    pub fn has_active_timer(&self) -> bool {
        self.ticker.is_some()
    }

    /// Whether the capture provider is currently encoding
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Why the last access request failed, if it did
    pub fn access_error(&self) -> Option<&CaptureError> {
        self.access_error.as_ref()
    }

    /// Request device access and attach the live feed.
    /// A refusal moves the session to `PermissionDenied`.
    pub async fn acquire(
        &mut self,
        sink: &dyn LiveFeedSink,
    ) -> Result<RecordingPhase, InvalidStateTransition> {
        if !self.session.is_idle() {
            return Err(InvalidStateTransition::new(self.phase(), "request capture access"));
        }
        if !self.request_access(sink).await {
            self.session.deny_access()?;
        }
        Ok(self.phase())
    }

    /// Repeat the access request from the blocked state.
    /// Ignored in any other phase.
    pub async fn retry_permission(
        &mut self,
        sink: &dyn LiveFeedSink,
    ) -> Result<RecordingPhase, InvalidStateTransition> {
        if self.phase() != RecordingPhase::PermissionDenied {
            debug!(phase = %self.phase(), "permission retry ignored");
            return Ok(self.phase());
        }
        if self.request_access(sink).await {
            self.session.grant_access()?;
        }
        Ok(self.phase())
    }

    async fn request_access(&mut self, sink: &dyn LiveFeedSink) -> bool {
        match self.capture.request_access().await {
            Ok(stream) => {
                info!(video = %stream.video_device, audio = %stream.audio_device, "capture access granted");
                self.capture.attach_live_feed(&stream, &self.settings, sink);
                self.stream = Some(stream);
                self.access_error = None;
                true
            }
            Err(e) => {
                warn!(error = %e, "capture access refused");
                self.stream = None;
                self.access_error = Some(e);
                false
            }
        }
    }

    /// Begin the countdown. Returns false if the request was ignored.
    pub fn start(&mut self) -> bool {
        if !self.session.request_start() {
            debug!(phase = %self.phase(), "start request ignored");
            return false;
        }
        self.arm_ticker();
        debug!(phase = ?self.phase(), "countdown started");
        true
    }

    /// Stop the recording and finalize the capture.
    ///
    /// Returns `None` when there is nothing to stop or the provider could not
    /// produce an artifact; in the latter case the session keeps recording.
    pub async fn stop(&mut self) -> Result<Option<RecordingArtifact>, InvalidStateTransition> {
        if !self.session.is_recording() {
            debug!(phase = %self.phase(), "stop request ignored");
            return Ok(None);
        }
        if !self.capturing {
            warn!(error = %CaptureError::CaptureUnavailable, "stop has nothing to finalize");
            return Ok(None);
        }

        let elapsed = self.session.stop()?;
        self.ticker = None;

        match self.capture.finalize_capture().await {
            Ok(artifact) => {
                self.capturing = false;
                let artifact = artifact.with_elapsed_secs(elapsed);
                info!(
                    artifact = %artifact.id(),
                    elapsed,
                    size = %artifact.human_readable_size(),
                    "recording stopped"
                );
                Ok(Some(artifact))
            }
            Err(e) => {
                if matches!(e, CaptureError::CaptureUnavailable) {
                    warn!(elapsed, "capture lost, nothing left to finalize");
                    self.capturing = false;
                } else {
                    warn!(error = %e, elapsed, "finalization failed, still recording");
                }
                self.session.resume_recording(elapsed)?;
                self.arm_ticker();
                Ok(None)
            }
        }
    }

    /// Wait until the armed timer fires.
    ///
    /// Never completes while no timer is armed. Cancel-safe: dropping the
    /// future before it completes leaves the session untouched.
    pub async fn wait_tick(&mut self) {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }

    /// Wait for the next tick and apply it
    pub async fn tick(&mut self) -> Result<Option<RecordingArtifact>, InvalidStateTransition> {
        self.wait_tick().await;
        self.on_tick().await
    }

    /// Apply one elapsed second. Returns the artifact when the ceiling stops the recording.
    pub async fn on_tick(&mut self) -> Result<Option<RecordingArtifact>, InvalidStateTransition> {
        match self.session.tick() {
            TickOutcome::Ignored => {
                self.ticker = None;
                Ok(None)
            }
            TickOutcome::Countdown(remaining) => {
                debug!(remaining, "countdown");
                Ok(None)
            }
            TickOutcome::BeginCapture => {
                // Countdown timer ends here; the elapsed timer starts from zero.
                self.arm_ticker();
                self.begin_capture().await;
                Ok(None)
            }
            TickOutcome::Elapsed(elapsed) => {
                debug!(elapsed, "recording");
                Ok(None)
            }
            TickOutcome::CeilingReached(elapsed) if !self.capturing => {
                warn!(elapsed, error = %CaptureError::CaptureUnavailable, "maximum duration reached with nothing to finalize");
                self.ticker = None;
                Ok(None)
            }
            TickOutcome::CeilingReached(elapsed) => {
                info!(elapsed, "maximum duration reached, auto-stopping");
                self.stop().await
            }
        }
    }

    async fn begin_capture(&mut self) {
        let Some(stream) = self.stream.as_ref() else {
            warn!(error = %CaptureError::CaptureUnavailable, "cannot begin capture");
            return;
        };
        match self.capture.begin_capture(stream, &self.settings).await {
            Ok(()) => {
                self.capturing = true;
                info!(bitrate = self.settings.bitrate, format = %self.settings.mime_type, "capture started");
            }
            Err(e) => {
                self.capturing = false;
                warn!(error = %e, "capture did not start");
            }
        }
    }

    /// Return to idle after the artifact has been handed off
    pub fn reset(&mut self) -> Result<(), InvalidStateTransition> {
        self.session.reset()
    }

    /// Cancel the timer and discard any capture in progress.
    /// Never produces an artifact.
    pub async fn teardown(&mut self) {
        self.ticker = None;
        if self.capturing {
            self.capturing = false;
            if let Err(e) = self.capture.discard_capture().await {
                warn!(error = %e, "failed to discard capture");
            }
            info!("capture discarded");
        }
    }

    fn arm_ticker(&mut self) {
        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
    }
}

impl<C> Drop for RecordingController<C>
where
    C: CaptureProvider,
{
    fn drop(&mut self) {
        if self.capturing {
            warn!("recording controller dropped while capturing; call teardown first");
        }
    }
}
