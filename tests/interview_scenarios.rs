//! Whole-interview scenarios driven through the public use case API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::{self, Duration};

use video_interview::application::ports::{
    CaptureError, CaptureProvider, CaptureSettings, LiveFeedSink, LiveStream, Navigator,
    NotificationError, NotificationIcon, Notifier, PlayableHandle, PlaybackError,
    PlaybackProvider,
};
use video_interview::application::{
    CommandOutcome, InterviewConfig, InterviewUseCase, InterviewView, SUBMITTED_MESSAGE,
};
use video_interview::domain::interview::{OperatorCommand, QuestionSet};
use video_interview::domain::recording::{RecordingArtifact, RecordingPhase, VideoMimeType};

#[derive(Clone, Default)]
struct FakeCamera {
    denials_left: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
    finalized: Arc<AtomicUsize>,
    discarded: Arc<AtomicUsize>,
}

#[async_trait]
impl CaptureProvider for FakeCamera {
    async fn request_access(&self) -> Result<LiveStream, CaptureError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let denied = self
            .denials_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if denied {
            return Err(CaptureError::PermissionDenied("/dev/video0".to_string()));
        }
        Ok(LiveStream::new("/dev/video0", "default"))
    }

    async fn begin_capture(
        &self,
        _stream: &LiveStream,
        _settings: &CaptureSettings,
    ) -> Result<(), CaptureError> {
        Ok(())
    }

    async fn finalize_capture(&self) -> Result<RecordingArtifact, CaptureError> {
        self.finalized.fetch_add(1, Ordering::SeqCst);
        Ok(RecordingArtifact::new(vec![7u8; 1024], VideoMimeType::Webm))
    }

    async fn discard_capture(&self) -> Result<(), CaptureError> {
        self.discarded.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FakePlayer {
    open_handles: Arc<Mutex<Vec<u64>>>,
}

#[async_trait]
impl PlaybackProvider for FakePlayer {
    async fn create_handle(
        &self,
        artifact: &RecordingArtifact,
    ) -> Result<PlayableHandle, PlaybackError> {
        self.open_handles.lock().unwrap().push(artifact.id().value());
        Ok(PlayableHandle::new(artifact.id(), "/tmp/answer.webm"))
    }

    async fn play(&self, _handle: &PlayableHandle) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn release(&self, handle: PlayableHandle) {
        self.open_handles
            .lock()
            .unwrap()
            .retain(|id| *id != handle.artifact_id().value());
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, NotificationIcon)>>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        _title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push((message.to_string(), icon));
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CountingNavigator {
    completed: Arc<AtomicUsize>,
}

#[async_trait]
impl Navigator for CountingNavigator {
    async fn enter_interview(&self, _total_questions: usize) {}

    async fn complete(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }
}

struct NoPreview;

impl LiveFeedSink for NoPreview {
    fn show_live_feed(&self, _stream: &LiveStream, _settings: &CaptureSettings) {}
}

type Interview = InterviewUseCase<FakeCamera, FakePlayer, RecordingNotifier, CountingNavigator>;

struct Session {
    interview: Interview,
    camera: FakeCamera,
    player: FakePlayer,
    notifier: RecordingNotifier,
    navigator: CountingNavigator,
}

fn session(questions: &[&str], denials: usize) -> Session {
    let camera = FakeCamera::default();
    camera.denials_left.store(denials, Ordering::SeqCst);
    let player = FakePlayer::default();
    let notifier = RecordingNotifier::default();
    let navigator = CountingNavigator::default();

    let config = InterviewConfig {
        questions: QuestionSet::new(questions.iter().copied()).unwrap(),
        enable_notify: true,
        ..Default::default()
    };
    let interview = InterviewUseCase::new(
        camera.clone(),
        player.clone(),
        notifier.clone(),
        navigator.clone(),
        Arc::new(NoPreview),
        config,
    );

    Session {
        interview,
        camera,
        player,
        notifier,
        navigator,
    }
}

fn phase(interview: &Interview) -> Option<RecordingPhase> {
    interview.snapshot().recording_phase()
}

/// Start, let the countdown run out, record `seconds`, then stop
async fn answer(interview: &mut Interview, seconds: u64) {
    assert_eq!(
        interview.handle(OperatorCommand::Start).await.unwrap(),
        CommandOutcome::Applied
    );
    for _ in 0..3 {
        interview.tick().await.unwrap();
    }
    assert_eq!(phase(interview), Some(RecordingPhase::Recording(0)));
    for _ in 0..seconds {
        interview.tick().await.unwrap();
    }
    assert_eq!(
        interview.handle(OperatorCommand::Stop).await.unwrap(),
        CommandOutcome::Applied
    );
}

#[tokio::test(start_paused = true)]
async fn three_questions_finish_only_after_third_accept() {
    let mut s = session(&["Who are you?", "Why this team?", "Any questions?"], 0);
    s.interview.begin().await.unwrap();

    for position in 0..3 {
        let snapshot = s.interview.snapshot();
        assert_eq!(snapshot.position, position);
        assert!(!snapshot.is_finished());

        answer(&mut s.interview, 4).await;
        assert!(matches!(
            s.interview.snapshot().view,
            InterviewView::Review { elapsed_secs: 4, .. }
        ));
        assert!(!s.interview.is_finished());

        assert_eq!(
            s.interview.handle(OperatorCommand::Accept).await.unwrap(),
            CommandOutcome::Applied
        );
    }

    assert!(s.interview.is_finished());
    assert!(s.interview.snapshot().is_finished());
    assert_eq!(s.navigator.completed.load(Ordering::SeqCst), 1);
    assert_eq!(s.camera.finalized.load(Ordering::SeqCst), 3);
    assert!(!s.interview.has_active_timer());
    assert!(s.player.open_handles.lock().unwrap().is_empty());

    let sent = s.notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    assert!(sent
        .iter()
        .all(|(message, icon)| message == SUBMITTED_MESSAGE && *icon == NotificationIcon::Success));

    // Further commands do nothing once complete.
    drop(sent);
    assert!(matches!(
        s.interview.handle(OperatorCommand::Start).await.unwrap(),
        CommandOutcome::Ignored(_)
    ));
    assert_eq!(s.navigator.completed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn teardown_during_countdown_emits_nothing() {
    let mut s = session(&["Only question"], 0);
    s.interview.begin().await.unwrap();

    s.interview.handle(OperatorCommand::Start).await.unwrap();
    assert_eq!(phase(&s.interview), Some(RecordingPhase::CountingDown(3)));
    assert!(s.interview.has_active_timer());

    s.interview.abandon().await;

    assert!(!s.interview.has_active_timer());
    assert_eq!(s.camera.finalized.load(Ordering::SeqCst), 0);
    assert!(s.player.open_handles.lock().unwrap().is_empty());
    assert!(!matches!(
        s.interview.snapshot().view,
        InterviewView::Review { .. }
    ));

    // No tick arrives after teardown.
    let waited = time::timeout(Duration::from_secs(10), s.interview.wait_tick()).await;
    assert!(waited.is_err());
    assert_eq!(s.camera.finalized.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn denied_access_recovers_after_retry() {
    let mut s = session(&["Only question"], 1);
    s.interview.begin().await.unwrap();

    assert_eq!(phase(&s.interview), Some(RecordingPhase::PermissionDenied));
    match s.interview.snapshot().view {
        InterviewView::Capture { access_error, .. } => assert!(access_error.is_some()),
        other => panic!("expected capture view, got {:?}", other),
    }
    assert!(matches!(
        s.interview.handle(OperatorCommand::Start).await.unwrap(),
        CommandOutcome::Ignored(_)
    ));
    assert_eq!(
        s.notifier.sent.lock().unwrap()[0].1,
        NotificationIcon::Warning
    );

    assert_eq!(
        s.interview
            .handle(OperatorCommand::RetryPermission)
            .await
            .unwrap(),
        CommandOutcome::Applied
    );
    assert_eq!(s.camera.requests.load(Ordering::SeqCst), 2);
    assert_eq!(phase(&s.interview), Some(RecordingPhase::Idle));

    s.interview.handle(OperatorCommand::Start).await.unwrap();
    let mut seen = vec![phase(&s.interview)];
    for _ in 0..5 {
        s.interview.tick().await.unwrap();
        seen.push(phase(&s.interview));
    }
    assert_eq!(
        seen,
        vec![
            Some(RecordingPhase::CountingDown(3)),
            Some(RecordingPhase::CountingDown(2)),
            Some(RecordingPhase::CountingDown(1)),
            Some(RecordingPhase::Recording(0)),
            Some(RecordingPhase::Recording(1)),
            Some(RecordingPhase::Recording(2)),
        ]
    );

    s.interview.handle(OperatorCommand::Stop).await.unwrap();
    assert!(matches!(
        s.interview.snapshot().view,
        InterviewView::Review { elapsed_secs: 2, .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn ceiling_hands_answer_to_review() {
    let mut s = session(&["Only question"], 0);
    s.interview.begin().await.unwrap();
    s.interview.handle(OperatorCommand::Start).await.unwrap();

    for _ in 0..(3 + 120) {
        s.interview.tick().await.unwrap();
    }

    assert!(matches!(
        s.interview.snapshot().view,
        InterviewView::Review { elapsed_secs: 120, .. }
    ));
    assert!(!s.interview.has_active_timer());
    assert_eq!(s.camera.finalized.load(Ordering::SeqCst), 1);
}
