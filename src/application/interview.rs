//! Interview use case
//!
//! Owns the interview flow, the recording controller and the review
//! presenter, routes operator commands to them and publishes a snapshot of
//! the combined state after every change.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::error::InvalidStateTransition;
use crate::domain::interview::{AcceptOutcome, FlowPhase, InterviewFlow, OperatorCommand, QuestionSet};
use crate::domain::recording::{RecordingArtifact, RecordingPhase};

use super::ports::{
    CaptureError, CaptureProvider, LiveFeedSink, Navigator, NotificationIcon, Notifier,
    PlaybackProvider,
};
use super::recorder::{RecorderConfig, RecordingController};
use super::review::ReviewPresenter;

const NOTIFY_TITLE: &str = "Video Interview";

/// Message shown once an answer has been accepted
pub const SUBMITTED_MESSAGE: &str = "Video response submitted successfully!";

/// Errors from the interview use case
#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),

    #[error("Interview has not been started")]
    NotStarted,
}

/// Configuration for one interview session
#[derive(Debug, Clone)]
pub struct InterviewConfig {
    pub questions: QuestionSet,
    pub recorder: RecorderConfig,
    /// Whether to show desktop notifications
    pub enable_notify: bool,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            questions: QuestionSet::builtin(),
            recorder: RecorderConfig::default(),
            enable_notify: false,
        }
    }
}

/// What the candidate is currently looking at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum InterviewView {
    Capture {
        recording: RecordingPhase,
        max_secs: u64,
        /// Reason the last access request failed
        access_error: Option<String>,
    },
    Review {
        artifact_id: u64,
        elapsed_secs: u64,
        size: String,
        /// Where the playable copy lives, if one could be created
        location: Option<PathBuf>,
    },
    Finished,
}

/// Combined, render-ready state of the interview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewSnapshot {
    /// 0-based question index
    pub position: usize,
    pub total: usize,
    pub question: Option<String>,
    #[serde(flatten)]
    pub view: InterviewView,
}

impl InterviewSnapshot {
    /// 1-based question number for display
    pub fn number(&self) -> usize {
        self.position + 1
    }

    pub fn is_finished(&self) -> bool {
        self.view == InterviewView::Finished
    }

    pub fn recording_phase(&self) -> Option<RecordingPhase> {
        match self.view {
            InterviewView::Capture { recording, .. } => Some(recording),
            _ => None,
        }
    }
}

/// Result of handling one operator command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    /// Not valid in the current view; nothing changed
    Ignored(&'static str),
    /// Valid but the external system failed; the state is unchanged
    Failed(String),
    /// The operator asked to leave
    Quit,
}

/// Interview use case
pub struct InterviewUseCase<C, P, N, V>
where
    C: CaptureProvider,
    P: PlaybackProvider,
    N: Notifier,
    V: Navigator,
{
    flow: InterviewFlow,
    recorder: RecordingController<C>,
    review: ReviewPresenter<P>,
    notifier: N,
    navigator: V,
    live_feed: Arc<dyn LiveFeedSink>,
    enable_notify: bool,
    started: bool,
    state_tx: watch::Sender<InterviewSnapshot>,
}

impl<C, P, N, V> InterviewUseCase<C, P, N, V>
where
    C: CaptureProvider,
    P: PlaybackProvider,
    N: Notifier,
    V: Navigator,
{
    /// Create a new interview use case instance
    pub fn new(
        capture: C,
        playback: P,
        notifier: N,
        navigator: V,
        live_feed: Arc<dyn LiveFeedSink>,
        config: InterviewConfig,
    ) -> Self {
        let flow = InterviewFlow::start(config.questions);
        let recorder = RecordingController::new(capture, config.recorder);
        let review = ReviewPresenter::new(playback);
        let initial = build_snapshot(&flow, &recorder, &review);
        let (state_tx, _) = watch::channel(initial);

        Self {
            flow,
            recorder,
            review,
            notifier,
            navigator,
            live_feed,
            enable_notify: config.enable_notify,
            started: false,
            state_tx,
        }
    }

    /// Current state
    pub fn snapshot(&self) -> InterviewSnapshot {
        build_snapshot(&self.flow, &self.recorder, &self.review)
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<InterviewSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn is_finished(&self) -> bool {
        self.flow.is_finished()
    }

    /// Whether a countdown or recording timer is armed
    pub fn has_active_timer(&self) -> bool {
        self.recorder.has_active_timer()
    }

    /// Leave the entry view and request capture access for the first question.
    /// Calling it again has no effect.
    pub async fn begin(&mut self) -> Result<InterviewSnapshot, InterviewError> {
        if self.started {
            return Ok(self.snapshot());
        }
        self.started = true;

        info!(questions = self.flow.questions().len(), "interview started");
        self.navigator.enter_interview(self.flow.questions().len()).await;

        let phase = self.recorder.acquire(self.live_feed.as_ref()).await?;
        if phase == RecordingPhase::PermissionDenied {
            self.notify_access_required().await;
        }

        self.publish();
        Ok(self.snapshot())
    }

    /// Apply an operator command
    pub async fn handle(
        &mut self,
        command: OperatorCommand,
    ) -> Result<CommandOutcome, InterviewError> {
        if command == OperatorCommand::Quit {
            return Ok(CommandOutcome::Quit);
        }
        if !self.started {
            return Err(InterviewError::NotStarted);
        }

        let command = self.resolve(command);
        let outcome = match (self.flow.phase(), command) {
            (FlowPhase::Finished, _) => CommandOutcome::Ignored("the interview is already complete"),
            (FlowPhase::Capturing, OperatorCommand::Start) => self.start_recording(),
            (FlowPhase::Capturing, OperatorCommand::Stop) => self.stop_recording().await?,
            (FlowPhase::Capturing, OperatorCommand::RetryPermission) => {
                self.retry_permission().await?
            }
            (FlowPhase::Reviewing, OperatorCommand::Play) => self.play().await,
            (FlowPhase::Reviewing, OperatorCommand::Accept) => self.accept().await?,
            (FlowPhase::Reviewing, OperatorCommand::ReRecord) => self.re_record()?,
            (_, OperatorCommand::Primary) => CommandOutcome::Ignored("nothing to do right now"),
            (FlowPhase::Capturing, _) => {
                CommandOutcome::Ignored("not available while recording an answer")
            }
            (FlowPhase::Reviewing, _) => {
                CommandOutcome::Ignored("not available while reviewing an answer")
            }
        };

        if let CommandOutcome::Ignored(reason) = &outcome {
            debug!(%command, reason, "command ignored");
        }
        self.publish();
        Ok(outcome)
    }

    /// Wait until the recording timer fires. Cancel-safe; pending while no
    /// timer is armed.
    pub async fn wait_tick(&mut self) {
        self.recorder.wait_tick().await;
    }

    /// Apply one timer tick. A ceiling stop hands the artifact to review.
    pub async fn on_tick(&mut self) -> Result<(), InterviewError> {
        if let Some(artifact) = self.recorder.on_tick().await? {
            self.artifact_ready(artifact).await?;
        }
        self.publish();
        Ok(())
    }

    /// Wait for the next tick and apply it
    pub async fn tick(&mut self) -> Result<(), InterviewError> {
        self.wait_tick().await;
        self.on_tick().await
    }

    /// Tear everything down without submitting anything further
    pub async fn abandon(&mut self) {
        if !self.flow.is_finished() {
            info!(position = self.flow.position(), "interview abandoned");
        }
        self.recorder.teardown().await;
        self.review.release();
        self.publish();
    }

    /// Map the primary action onto the command the current view offers
    fn resolve(&self, command: OperatorCommand) -> OperatorCommand {
        if command != OperatorCommand::Primary {
            return command;
        }
        match self.flow.phase() {
            FlowPhase::Capturing => match self.recorder.phase() {
                RecordingPhase::Idle => OperatorCommand::Start,
                RecordingPhase::Recording(_) => OperatorCommand::Stop,
                RecordingPhase::PermissionDenied => OperatorCommand::RetryPermission,
                RecordingPhase::CountingDown(_) | RecordingPhase::Stopped => command,
            },
            FlowPhase::Reviewing => OperatorCommand::Accept,
            FlowPhase::Finished => command,
        }
    }

    fn start_recording(&mut self) -> CommandOutcome {
        match self.recorder.phase() {
            RecordingPhase::PermissionDenied => {
                CommandOutcome::Ignored("camera access is required before recording")
            }
            _ if self.recorder.start() => CommandOutcome::Applied,
            _ => CommandOutcome::Ignored("a recording is already in progress"),
        }
    }

    async fn stop_recording(&mut self) -> Result<CommandOutcome, InterviewError> {
        if !matches!(self.recorder.phase(), RecordingPhase::Recording(_)) {
            return Ok(CommandOutcome::Ignored("no recording in progress"));
        }
        match self.recorder.stop().await? {
            Some(artifact) => {
                self.artifact_ready(artifact).await?;
                Ok(CommandOutcome::Applied)
            }
            None if !self.recorder.is_capturing() => Ok(CommandOutcome::Failed(
                CaptureError::CaptureUnavailable.to_string(),
            )),
            None => Ok(CommandOutcome::Failed(
                "The recording could not be finalized. Try stopping again.".to_string(),
            )),
        }
    }

    async fn retry_permission(&mut self) -> Result<CommandOutcome, InterviewError> {
        if self.recorder.phase() != RecordingPhase::PermissionDenied {
            return Ok(CommandOutcome::Ignored("camera access is already granted"));
        }
        let phase = self.recorder.retry_permission(self.live_feed.as_ref()).await?;
        if phase == RecordingPhase::PermissionDenied {
            let reason = self
                .recorder
                .access_error()
                .map(ToString::to_string)
                .unwrap_or_else(|| "Camera access was refused".to_string());
            return Ok(CommandOutcome::Failed(reason));
        }
        Ok(CommandOutcome::Applied)
    }

    async fn play(&self) -> CommandOutcome {
        match self.review.play().await {
            Ok(true) => CommandOutcome::Applied,
            Ok(false) => CommandOutcome::Ignored("no playable copy of this recording"),
            Err(e) => {
                warn!(error = %e, "playback failed");
                CommandOutcome::Failed(e.to_string())
            }
        }
    }

    async fn accept(&mut self) -> Result<CommandOutcome, InterviewError> {
        let outcome = self.flow.on_accept()?;
        self.review.release();

        let finished = matches!(outcome, AcceptOutcome::Finished { .. });
        self.submit(outcome.into_submitted()).await;

        if finished {
            self.recorder.teardown().await;
            info!("all questions answered");
            self.navigator.complete().await;
        } else {
            self.recorder.reset()?;
            debug!(position = self.flow.position(), "advanced to next question");
        }
        Ok(CommandOutcome::Applied)
    }

    fn re_record(&mut self) -> Result<CommandOutcome, InterviewError> {
        let discarded = self.flow.on_re_record()?;
        self.review.release();
        debug!(artifact = %discarded.id(), "recording discarded for re-record");
        drop(discarded);
        self.recorder.reset()?;
        Ok(CommandOutcome::Applied)
    }

    async fn artifact_ready(&mut self, artifact: RecordingArtifact) -> Result<(), InterviewError> {
        self.flow.on_artifact_ready(artifact)?;
        if let Some(artifact) = self.flow.artifact() {
            if let Err(e) = self.review.present(artifact).await {
                warn!(error = %e, "no playable copy for review");
            }
        }
        Ok(())
    }

    /// Hand the accepted answer off. There is no upload target; the
    /// artifact is logged, acknowledged and released.
    async fn submit(&self, artifact: RecordingArtifact) {
        info!(
            artifact = %artifact.id(),
            elapsed = artifact.elapsed_secs(),
            size = %artifact.human_readable_size(),
            "response submitted"
        );
        if self.enable_notify {
            let _ = self
                .notifier
                .notify(NOTIFY_TITLE, SUBMITTED_MESSAGE, NotificationIcon::Success)
                .await;
        }
    }

    async fn notify_access_required(&self) {
        if self.enable_notify {
            let _ = self
                .notifier
                .notify(
                    NOTIFY_TITLE,
                    "Camera access required. Allow access and retry.",
                    NotificationIcon::Warning,
                )
                .await;
        }
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.snapshot());
    }
}

fn build_snapshot<C, P>(
    flow: &InterviewFlow,
    recorder: &RecordingController<C>,
    review: &ReviewPresenter<P>,
) -> InterviewSnapshot
where
    C: CaptureProvider,
    P: PlaybackProvider,
{
    let view = match (flow.phase(), flow.artifact()) {
        (FlowPhase::Finished, _) => InterviewView::Finished,
        (FlowPhase::Reviewing, Some(artifact)) => InterviewView::Review {
            artifact_id: artifact.id().value(),
            elapsed_secs: artifact.elapsed_secs(),
            size: artifact.human_readable_size(),
            location: review.handle().map(|h| h.location().to_path_buf()),
        },
        _ => InterviewView::Capture {
            recording: recorder.phase(),
            max_secs: recorder.max_secs(),
            access_error: recorder.access_error().map(ToString::to_string),
        },
    };

    InterviewSnapshot {
        position: flow.position(),
        total: flow.questions().len(),
        question: flow.current_question().map(String::from),
        view,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        CaptureSettings, LiveStream, NotificationError, PlayableHandle, PlaybackError,
    };
    use crate::domain::recording::VideoMimeType;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockCapture {
        deny: Arc<AtomicBool>,
        discards: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CaptureProvider for MockCapture {
        async fn request_access(&self) -> Result<LiveStream, CaptureError> {
            if self.deny.load(Ordering::SeqCst) {
                return Err(CaptureError::PermissionDenied("blocked".to_string()));
            }
            Ok(LiveStream::new("cam", "mic"))
        }

        async fn begin_capture(
            &self,
            _stream: &LiveStream,
            _settings: &CaptureSettings,
        ) -> Result<(), CaptureError> {
            Ok(())
        }

        async fn finalize_capture(&self) -> Result<RecordingArtifact, CaptureError> {
            Ok(RecordingArtifact::new(vec![0u8; 256], VideoMimeType::Webm))
        }

        async fn discard_capture(&self) -> Result<(), CaptureError> {
            self.discards.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockPlayback {
        live: Arc<Mutex<Vec<u64>>>,
    }

    #[async_trait]
    impl PlaybackProvider for MockPlayback {
        async fn create_handle(
            &self,
            artifact: &RecordingArtifact,
        ) -> Result<PlayableHandle, PlaybackError> {
            self.live.lock().unwrap().push(artifact.id().value());
            Ok(PlayableHandle::new(artifact.id(), "/tmp/review.webm"))
        }

        async fn play(&self, _handle: &PlayableHandle) -> Result<(), PlaybackError> {
            Ok(())
        }

        fn release(&self, handle: PlayableHandle) {
            self.live
                .lock()
                .unwrap()
                .retain(|id| *id != handle.artifact_id().value());
        }
    }

    #[derive(Clone, Default)]
    struct MockNotifier {
        messages: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(
            &self,
            _title: &str,
            message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            self.messages.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockNavigator {
        entered: Arc<AtomicUsize>,
        completed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Navigator for MockNavigator {
        async fn enter_interview(&self, _total_questions: usize) {
            self.entered.fetch_add(1, Ordering::SeqCst);
        }

        async fn complete(&self) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct NullSink;

    impl LiveFeedSink for NullSink {
        fn show_live_feed(&self, _stream: &LiveStream, _settings: &CaptureSettings) {}
    }

    type TestUseCase = InterviewUseCase<MockCapture, MockPlayback, MockNotifier, MockNavigator>;

    struct Harness {
        use_case: TestUseCase,
        capture: MockCapture,
        playback: MockPlayback,
        notifier: MockNotifier,
        navigator: MockNavigator,
    }

    fn harness(questions: &[&str]) -> Harness {
        let capture = MockCapture::default();
        let playback = MockPlayback::default();
        let notifier = MockNotifier::default();
        let navigator = MockNavigator::default();
        let config = InterviewConfig {
            questions: QuestionSet::new(questions.iter().copied()).unwrap(),
            enable_notify: true,
            ..Default::default()
        };
        let use_case = InterviewUseCase::new(
            capture.clone(),
            playback.clone(),
            notifier.clone(),
            navigator.clone(),
            Arc::new(NullSink),
            config,
        );
        Harness {
            use_case,
            capture,
            playback,
            notifier,
            navigator,
        }
    }

    async fn record_answer(use_case: &mut TestUseCase, seconds: u64) {
        assert_eq!(
            use_case.handle(OperatorCommand::Start).await.unwrap(),
            CommandOutcome::Applied
        );
        for _ in 0..(3 + seconds) {
            use_case.tick().await.unwrap();
        }
        assert_eq!(
            use_case.handle(OperatorCommand::Stop).await.unwrap(),
            CommandOutcome::Applied
        );
    }

    #[tokio::test(start_paused = true)]
    async fn handle_before_begin_fails() {
        let mut h = harness(&["Q1"]);
        assert!(matches!(
            h.use_case.handle(OperatorCommand::Start).await,
            Err(InterviewError::NotStarted)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn begin_enters_once_and_shows_first_question() {
        let mut h = harness(&["Q1", "Q2"]);
        let snapshot = h.use_case.begin().await.unwrap();
        h.use_case.begin().await.unwrap();

        assert_eq!(h.navigator.entered.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.question.as_deref(), Some("Q1"));
        assert_eq!(snapshot.total, 2);
        assert_eq!(snapshot.recording_phase(), Some(RecordingPhase::Idle));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_moves_to_review_with_handle() {
        let mut h = harness(&["Q1", "Q2"]);
        h.use_case.begin().await.unwrap();
        record_answer(&mut h.use_case, 5).await;

        let snapshot = h.use_case.snapshot();
        match snapshot.view {
            InterviewView::Review {
                elapsed_secs,
                location,
                ..
            } => {
                assert_eq!(elapsed_secs, 5);
                assert!(location.is_some());
            }
            other => panic!("expected review, got {:?}", other),
        }
        assert_eq!(h.playback.live.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn re_record_releases_handle_and_stays_on_question() {
        let mut h = harness(&["Q1", "Q2"]);
        h.use_case.begin().await.unwrap();
        record_answer(&mut h.use_case, 2).await;

        assert_eq!(
            h.use_case.handle(OperatorCommand::ReRecord).await.unwrap(),
            CommandOutcome::Applied
        );
        let snapshot = h.use_case.snapshot();
        assert_eq!(snapshot.position, 0);
        assert_eq!(snapshot.recording_phase(), Some(RecordingPhase::Idle));
        assert!(h.playback.live.lock().unwrap().is_empty());
        assert!(h.notifier.messages.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn accept_last_question_completes_once() {
        let mut h = harness(&["Q1", "Q2"]);
        h.use_case.begin().await.unwrap();

        record_answer(&mut h.use_case, 1).await;
        h.use_case.handle(OperatorCommand::Accept).await.unwrap();
        assert_eq!(h.use_case.snapshot().question.as_deref(), Some("Q2"));
        assert_eq!(h.navigator.completed.load(Ordering::SeqCst), 0);

        record_answer(&mut h.use_case, 1).await;
        h.use_case.handle(OperatorCommand::Primary).await.unwrap();

        assert!(h.use_case.is_finished());
        assert!(h.use_case.snapshot().is_finished());
        assert_eq!(h.navigator.completed.load(Ordering::SeqCst), 1);
        assert_eq!(
            *h.notifier.messages.lock().unwrap(),
            vec![SUBMITTED_MESSAGE.to_string(), SUBMITTED_MESSAGE.to_string()]
        );
        assert!(h.playback.live.lock().unwrap().is_empty());
        assert!(!h.use_case.has_active_timer());

        assert_eq!(
            h.use_case.handle(OperatorCommand::Accept).await.unwrap(),
            CommandOutcome::Ignored("the interview is already complete")
        );
        assert_eq!(h.navigator.completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_outside_their_view_are_ignored() {
        let mut h = harness(&["Q1"]);
        h.use_case.begin().await.unwrap();

        assert!(matches!(
            h.use_case.handle(OperatorCommand::Accept).await.unwrap(),
            CommandOutcome::Ignored(_)
        ));
        assert!(matches!(
            h.use_case.handle(OperatorCommand::Stop).await.unwrap(),
            CommandOutcome::Ignored(_)
        ));

        h.use_case.handle(OperatorCommand::Start).await.unwrap();
        assert!(matches!(
            h.use_case.handle(OperatorCommand::Start).await.unwrap(),
            CommandOutcome::Ignored(_)
        ));
        assert!(matches!(
            h.use_case.handle(OperatorCommand::Primary).await.unwrap(),
            CommandOutcome::Ignored(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn denied_access_blocks_start_until_retry() {
        let mut h = harness(&["Q1"]);
        h.capture.deny.store(true, Ordering::SeqCst);
        let snapshot = h.use_case.begin().await.unwrap();

        assert_eq!(snapshot.recording_phase(), Some(RecordingPhase::PermissionDenied));
        assert_eq!(h.notifier.messages.lock().unwrap().len(), 1);
        assert!(matches!(
            h.use_case.handle(OperatorCommand::Start).await.unwrap(),
            CommandOutcome::Ignored(_)
        ));
        assert!(matches!(
            h.use_case.handle(OperatorCommand::RetryPermission).await.unwrap(),
            CommandOutcome::Failed(_)
        ));

        h.capture.deny.store(false, Ordering::SeqCst);
        assert_eq!(
            h.use_case.handle(OperatorCommand::Primary).await.unwrap(),
            CommandOutcome::Applied
        );
        assert_eq!(
            h.use_case.snapshot().recording_phase(),
            Some(RecordingPhase::Idle)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn abandon_while_recording_discards() {
        let mut h = harness(&["Q1"]);
        h.use_case.begin().await.unwrap();
        h.use_case.handle(OperatorCommand::Start).await.unwrap();
        for _ in 0..4 {
            h.use_case.tick().await.unwrap();
        }

        h.use_case.abandon().await;
        assert!(!h.use_case.has_active_timer());
        assert_eq!(h.capture.discards.load(Ordering::SeqCst), 1);
        assert!(!h.use_case.is_finished());
        assert_eq!(h.navigator.completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_countdown() {
        let mut h = harness(&["Q1"]);
        let mut rx = h.use_case.subscribe();
        h.use_case.begin().await.unwrap();
        h.use_case.handle(OperatorCommand::Start).await.unwrap();
        assert_eq!(
            rx.borrow_and_update().recording_phase(),
            Some(RecordingPhase::CountingDown(3))
        );

        h.use_case.tick().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().recording_phase(),
            Some(RecordingPhase::CountingDown(2))
        );
    }

    #[test]
    fn snapshot_serializes_with_view_tag() {
        let snapshot = InterviewSnapshot {
            position: 0,
            total: 3,
            question: Some("Q1".to_string()),
            view: InterviewView::Capture {
                recording: RecordingPhase::Recording(7),
                max_secs: 120,
                access_error: None,
            },
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["view"], "capture");
        assert_eq!(json["recording"]["phase"], "recording");
        assert_eq!(json["recording"]["seconds"], 7);
        assert_eq!(json["total"], 3);
    }
}
