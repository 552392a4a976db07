//! Interview app runner

use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::application::ports::{
    CaptureProvider, CaptureSettings, LiveFeedSink, Navigator, Notifier, PlaybackProvider,
};
use crate::application::{
    CommandOutcome, InterviewConfig, InterviewError, InterviewSnapshot, InterviewUseCase,
    RecorderConfig,
};
use crate::domain::interview::QuestionSet;
use crate::infrastructure::{create_notifier, FfmpegCapture, FilePlayback};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::InterviewOptions;
use super::navigator::TerminalNavigator;
use super::presenter::Presenter;
use super::signals::{spawn_stdin_reader, InterviewEvent, InterviewEvents};

/// Run an interview session until it finishes or the candidate leaves
pub async fn run_interview(options: InterviewOptions, questions: QuestionSet) -> ExitCode {
    let presenter = Arc::new(if options.json {
        Presenter::json()
    } else {
        Presenter::new()
    });

    // Create adapters
    let capture = FfmpegCapture::new(&options.video_device, &options.audio_device);
    let playback = FilePlayback::new(&options.player);
    let notifier = create_notifier(options.notify);
    let navigator = TerminalNavigator::new(Arc::clone(&presenter));

    let config = InterviewConfig {
        questions,
        recorder: RecorderConfig {
            countdown: options.countdown,
            max_duration: options.max_duration,
            settings: CaptureSettings {
                bitrate: options.bitrate,
                ..Default::default()
            },
        },
        enable_notify: options.notify,
    };

    let live_feed: Arc<dyn LiveFeedSink> = presenter.clone();
    let mut use_case =
        InterviewUseCase::new(capture, playback, notifier, navigator, live_feed, config);

    // Setup event sources
    let (mut events, event_tx) = match InterviewEvents::new().await {
        Ok(e) => e,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    spawn_stdin_reader(event_tx);

    if let Err(e) = use_case.begin().await {
        presenter.error(&format!("Failed to start interview: {}", e));
        use_case.abandon().await;
        return ExitCode::from(EXIT_ERROR);
    }

    let renderer = spawn_renderer(Arc::clone(&presenter), use_case.subscribe());

    let result = interview_loop(&mut use_case, &mut events, &presenter).await;

    // Cleanup: cancel timers, discard any running capture, release playback
    use_case.abandon().await;
    let last = use_case.snapshot();
    drop(use_case);
    if let Err(e) = renderer.await {
        debug!(error = %e, "renderer task ended abnormally");
    }

    match result {
        Ok(()) if last.is_finished() => ExitCode::from(EXIT_SUCCESS),
        Ok(()) => {
            presenter.warn(&format!(
                "Interview abandoned at question {}/{}",
                last.number(),
                last.total
            ));
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            error!(error = %e, "interview stopped on an invalid transition");
            presenter.error(&format!("Interview failed: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Render every published snapshot until the use case goes away
fn spawn_renderer(
    presenter: Arc<Presenter>,
    mut rx: watch::Receiver<InterviewSnapshot>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut previous: Option<InterviewSnapshot> = None;
        loop {
            let current = rx.borrow_and_update().clone();
            presenter.render(previous.as_ref(), &current);
            previous = Some(current);

            if rx.changed().await.is_err() {
                break;
            }
        }
    })
}

/// Main event loop: operator commands, shutdown signals, and timer ticks
async fn interview_loop<C, P, N, V>(
    use_case: &mut InterviewUseCase<C, P, N, V>,
    events: &mut InterviewEvents,
    presenter: &Presenter,
) -> Result<(), InterviewError>
where
    C: CaptureProvider,
    P: PlaybackProvider,
    N: Notifier,
    V: Navigator,
{
    while !use_case.is_finished() {
        tokio::select! {
            event = events.recv() => match event {
                Some(InterviewEvent::Command(command)) => {
                    match use_case.handle(command).await? {
                        CommandOutcome::Quit => return Ok(()),
                        outcome => presenter.command_feedback(&outcome),
                    }
                }
                Some(InterviewEvent::Unrecognized(message)) => presenter.warn(&message),
                Some(InterviewEvent::Shutdown) | Some(InterviewEvent::InputClosed) | None => {
                    debug!("input closed or shutdown requested");
                    return Ok(());
                }
            },
            _ = use_case.wait_tick() => use_case.on_tick().await?,
        }
    }
    Ok(())
}
