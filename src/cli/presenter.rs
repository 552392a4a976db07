//! CLI presenter for output formatting
//!
//! Renders interview snapshots as terminal views (or JSON lines) and owns
//! the recording clock progress bar.

use std::sync::Mutex;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::{CaptureSettings, LiveFeedSink, LiveStream};
use crate::application::{CommandOutcome, InterviewSnapshot, InterviewView};
use crate::domain::recording::{format_clock, RecordingPhase};

/// Presenter for CLI output formatting
pub struct Presenter {
    json: bool,
    clock: Mutex<Option<ProgressBar>>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            json: false,
            clock: Mutex::new(None),
        }
    }

    /// Create a presenter that prints snapshots as JSON lines
    pub fn json() -> Self {
        Self {
            json: true,
            clock: Mutex::new(None),
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Entry view
    pub fn welcome(&self, total_questions: usize) {
        if self.json {
            return;
        }
        eprintln!();
        eprintln!("{}", "Video Interview".bold());
        eprintln!(
            "You will answer {} question{} on camera. Each answer can be reviewed and re-recorded before you submit it.",
            total_questions,
            if total_questions == 1 { "" } else { "s" }
        );
        eprintln!(
            "Commands: {}  (Enter performs the highlighted action)",
            "start stop play accept redo retry quit".dimmed()
        );
    }

    /// Thank-you view
    pub fn thank_you(&self) {
        self.finish_clock();
        if self.json {
            return;
        }
        eprintln!();
        eprintln!("{} {}", "✓".green(), "Thank you!".bold());
        eprintln!("All of your answers have been submitted.");
    }

    /// Report the result of a command the use case did not apply
    pub fn command_feedback(&self, outcome: &CommandOutcome) {
        match outcome {
            CommandOutcome::Ignored(reason) => self.warn(&capitalize(reason)),
            CommandOutcome::Failed(message) => self.error(message),
            CommandOutcome::Applied | CommandOutcome::Quit => {}
        }
    }

    /// Render a state change. `previous` is the last rendered snapshot.
    pub fn render(&self, previous: Option<&InterviewSnapshot>, current: &InterviewSnapshot) {
        if previous == Some(current) {
            return;
        }
        if self.json {
            self.render_json(current);
            return;
        }

        let new_question = previous.map_or(true, |p| p.position != current.position);
        if new_question && !current.is_finished() {
            self.finish_clock();
            self.question_header(current);
        }

        match &current.view {
            InterviewView::Capture {
                recording,
                max_secs,
                access_error,
            } => {
                let previous_phase = previous.and_then(InterviewSnapshot::recording_phase);
                let phase_changed = new_question || previous_phase != Some(*recording);
                self.render_capture(*recording, *max_secs, access_error.as_deref(), phase_changed);
            }
            InterviewView::Review {
                elapsed_secs,
                size,
                location,
                ..
            } => {
                self.finish_clock();
                eprintln!();
                self.success(&format!(
                    "Recorded {} ({})",
                    format_clock(*elapsed_secs),
                    size
                ));
                match location {
                    Some(path) => self.info(&format!("Saved for review at: {}", path.display())),
                    None => self.warn("No playable copy of this recording is available"),
                }
                eprintln!(
                    "{} to watch it, {} to record again, Enter or {} to submit",
                    "play".cyan(),
                    "redo".cyan(),
                    "accept".cyan().bold()
                );
            }
            InterviewView::Finished => self.finish_clock(),
        }
    }

    fn render_json(&self, snapshot: &InterviewSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(line) => self.output(&line),
            Err(e) => self.error(&format!("Failed to serialize state: {}", e)),
        }
    }

    fn question_header(&self, snapshot: &InterviewSnapshot) {
        eprintln!();
        eprintln!(
            "{}",
            format!("Question {}/{}", snapshot.number(), snapshot.total)
                .cyan()
                .bold()
        );
        if let Some(question) = &snapshot.question {
            eprintln!("{}", question.bold());
        }
    }

    fn render_capture(
        &self,
        phase: RecordingPhase,
        max_secs: u64,
        access_error: Option<&str>,
        phase_changed: bool,
    ) {
        match phase {
            RecordingPhase::Idle if phase_changed => {
                self.finish_clock();
                for tip in tips(max_secs) {
                    eprintln!("  {} {}", "•".dimmed(), tip);
                }
                eprintln!("Press Enter or type {} to begin recording", "start".cyan().bold());
            }
            RecordingPhase::PermissionDenied if phase_changed => {
                eprintln!();
                eprintln!("{} {}", "⚠".yellow(), "Camera Access Required".yellow().bold());
                eprintln!(
                    "{}",
                    access_error.unwrap_or("Camera and microphone access was refused.")
                );
                eprintln!(
                    "Allow access to your camera and microphone, then press Enter or type {}",
                    "retry".cyan().bold()
                );
            }
            RecordingPhase::CountingDown(remaining) => {
                eprintln!("{} Recording starts in {}...", "●".yellow(), remaining);
            }
            RecordingPhase::Recording(elapsed) => self.update_clock(elapsed, max_secs),
            _ => {}
        }
    }

    fn update_clock(&self, elapsed: u64, max_secs: u64) {
        let mut guard = self.clock.lock().unwrap_or_else(|e| e.into_inner());
        let bar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(max_secs);
            let style = ProgressStyle::default_bar()
                .template("{prefix} {msg} [{bar:30.red/white}]  stop: Enter")
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style.progress_chars("█░"));
            bar.set_prefix(format!("{}", "● REC".red().bold()));
            bar
        });
        bar.set_position(elapsed.min(max_secs));
        bar.set_message(format_clock_line(elapsed, max_secs));
    }

    fn finish_clock(&self) {
        let mut guard = self.clock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(bar) = guard.take() {
            bar.finish_and_clear();
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveFeedSink for Presenter {
    fn show_live_feed(&self, stream: &LiveStream, settings: &CaptureSettings) {
        if self.json {
            return;
        }
        let audio = if settings.with_audio {
            format!(" + {}", stream.audio_device)
        } else {
            String::new()
        };
        self.success(&format!(
            "Camera ready: {}{} ({}x{}, {})",
            stream.video_device, audio, settings.width, settings.height, settings.mime_type
        ));
    }
}

/// `MM:SS / MM:SS` recording clock
pub fn format_clock_line(elapsed: u64, max_secs: u64) -> String {
    format!("{} / {}", format_clock(elapsed), format_clock(max_secs))
}

/// Human wording for the answer length limit
pub fn format_limit(max_secs: u64) -> String {
    match (max_secs / 60, max_secs % 60) {
        (0, s) => format!("{} seconds", s),
        (1, 0) => "1 minute".to_string(),
        (m, 0) => format!("{} minutes", m),
        _ => format_clock(max_secs),
    }
}

/// Recording tips shown before each capture
pub fn tips(max_secs: u64) -> Vec<String> {
    vec![
        "Find a quiet, well-lit place".to_string(),
        "Speak clearly and look at the camera".to_string(),
        "You can review and re-record before submitting".to_string(),
        format!("Maximum recording time is {}", format_limit(max_secs)),
    ]
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
