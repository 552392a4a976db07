//! FFmpeg-based camera and microphone capture adapter

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempPath;
use tokio::fs;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::{CaptureError, CaptureProvider, CaptureSettings, LiveStream};
use crate::domain::recording::{RecordingArtifact, VideoMimeType};

const FFMPEG: &str = "ffmpeg";
const FRAME_RATE: &str = "30";
const AUDIO_BITRATE: &str = "64k";

/// Uniquely named temp file for one capture, removed on drop
struct TempVideoFile {
    path: TempPath,
}

impl TempVideoFile {
    fn new(mime_type: VideoMimeType) -> Result<Self, CaptureError> {
        let path = tempfile::Builder::new()
            .prefix("video-interview-")
            .suffix(&format!(".{}", mime_type.extension()))
            .tempfile()
            .map_err(|e| CaptureError::StartFailed(format!("Failed to create temp file: {}", e)))?
            .into_temp_path();
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// A running FFmpeg encoder and the file it writes
struct ActiveCapture {
    child: Child,
    output: TempVideoFile,
    mime_type: VideoMimeType,
}

/// FFmpeg capture provider (v4l2 + PulseAudio on Linux, AVFoundation on macOS)
pub struct FfmpegCapture {
    program: String,
    video_device: String,
    audio_device: String,
    active: Mutex<Option<ActiveCapture>>,
}

impl FfmpegCapture {
    /// Create a capture provider for the given devices
    pub fn new(video_device: impl Into<String>, audio_device: impl Into<String>) -> Self {
        Self {
            program: FFMPEG.to_string(),
            video_device: video_device.into(),
            audio_device: audio_device.into(),
            active: Mutex::new(None),
        }
    }

    /// Use a different encoder executable than `ffmpeg` from `PATH`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Build the input half of the FFmpeg command line
    #[cfg(target_os = "macos")]
    fn input_args(stream: &LiveStream, settings: &CaptureSettings) -> Vec<String> {
        let device = if settings.with_audio {
            format!("{}:{}", stream.video_device, stream.audio_device)
        } else {
            format!("{}:none", stream.video_device)
        };
        vec![
            "-f".to_string(),
            "avfoundation".to_string(),
            "-framerate".to_string(),
            FRAME_RATE.to_string(),
            "-video_size".to_string(),
            format!("{}x{}", settings.width, settings.height),
            "-i".to_string(),
            device,
        ]
    }

    /// Build the input half of the FFmpeg command line
    #[cfg(not(target_os = "macos"))]
    fn input_args(stream: &LiveStream, settings: &CaptureSettings) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            "v4l2".to_string(),
            "-framerate".to_string(),
            FRAME_RATE.to_string(),
            "-video_size".to_string(),
            format!("{}x{}", settings.width, settings.height),
            "-i".to_string(),
            stream.video_device.clone(),
        ];
        if settings.with_audio {
            args.extend([
                "-f".to_string(),
                "pulse".to_string(),
                "-i".to_string(),
                stream.audio_device.clone(),
            ]);
        }
        args
    }

    /// Build FFmpeg args for a capture
    fn build_ffmpeg_args(
        stream: &LiveStream,
        settings: &CaptureSettings,
        output_path: &Path,
    ) -> Vec<String> {
        let mut args = Self::input_args(stream, settings);

        let (video_codec, audio_codec, format) = match settings.mime_type {
            VideoMimeType::Webm => ("libvpx", "libopus", "webm"),
            VideoMimeType::Mp4 => ("libx264", "aac", "mp4"),
        };

        args.extend([
            "-c:v".to_string(),
            video_codec.to_string(),
            "-b:v".to_string(),
            settings.bitrate.to_string(),
            "-deadline".to_string(),
            "realtime".to_string(),
        ]);

        if settings.with_audio {
            args.extend([
                "-c:a".to_string(),
                audio_codec.to_string(),
                "-b:a".to_string(),
                AUDIO_BITRATE.to_string(),
            ]);
        } else {
            args.push("-an".to_string());
        }

        args.extend([
            "-f".to_string(),
            format.to_string(),
            "-y".to_string(),
            output_path.to_string_lossy().to_string(),
        ]);

        args
    }

    /// Spawn FFmpeg process
    fn spawn_ffmpeg(&self, args: &[String]) -> Result<Child, CaptureError> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        // Keep terminal Ctrl+C away from the encoder; shutdown discards explicitly.
        #[cfg(unix)]
        command.process_group(0);

        command
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    CaptureError::FfmpegNotFound
                } else {
                    CaptureError::StartFailed(e.to_string())
                }
            })
    }

    /// Check that FFmpeg can be executed at all
    async fn probe_ffmpeg(&self) -> Result<(), CaptureError> {
        let status = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    CaptureError::FfmpegNotFound
                } else {
                    CaptureError::DeviceUnavailable(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(CaptureError::DeviceUnavailable(format!(
                "ffmpeg -version exited with status: {}",
                status
            )));
        }
        Ok(())
    }

    /// Open the camera device node to surface permission problems early
    async fn probe_video_device(device: &str) -> Result<(), CaptureError> {
        if !device.starts_with("/dev/") {
            return Ok(());
        }
        fs::File::open(device).await.map(|_| ()).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CaptureError::PermissionDenied(device.to_string()),
            ErrorKind::NotFound => {
                CaptureError::DeviceUnavailable(format!("{} does not exist", device))
            }
            _ => CaptureError::DeviceUnavailable(format!("{}: {}", device, e)),
        })
    }

    /// Read recorded video file
    async fn read_video_file(
        path: &Path,
        mime_type: VideoMimeType,
    ) -> Result<RecordingArtifact, CaptureError> {
        let data = fs::read(path)
            .await
            .map_err(|e| CaptureError::FinalizeFailed(e.to_string()))?;

        if data.is_empty() {
            return Err(CaptureError::FinalizeFailed(
                "Recording file is empty".to_string(),
            ));
        }

        Ok(RecordingArtifact::new(data, mime_type))
    }

    /// Ask FFmpeg to finish writing the container
    #[cfg(unix)]
    fn interrupt(child: &mut Child) -> Result<(), CaptureError> {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        if let Some(id) = child.id() {
            signal::kill(Pid::from_raw(id as i32), Signal::SIGINT)
                .map_err(|e| CaptureError::FinalizeFailed(format!("Signal failed: {}", e)))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn interrupt(child: &mut Child) -> Result<(), CaptureError> {
        child
            .start_kill()
            .map_err(|e| CaptureError::FinalizeFailed(e.to_string()))
    }
}

#[async_trait]
impl CaptureProvider for FfmpegCapture {
    async fn request_access(&self) -> Result<LiveStream, CaptureError> {
        self.probe_ffmpeg().await?;
        Self::probe_video_device(&self.video_device).await?;
        debug!(video = %self.video_device, audio = %self.audio_device, "capture devices available");
        Ok(LiveStream::new(&self.video_device, &self.audio_device))
    }

    async fn begin_capture(
        &self,
        stream: &LiveStream,
        settings: &CaptureSettings,
    ) -> Result<(), CaptureError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            return Err(CaptureError::StartFailed(
                "Capture already in progress".to_string(),
            ));
        }

        let output = TempVideoFile::new(settings.mime_type)?;
        let args = Self::build_ffmpeg_args(stream, settings, output.path());
        debug!(program = %self.program, ?args, "spawning encoder");
        let child = self.spawn_ffmpeg(&args)?;

        *active = Some(ActiveCapture {
            child,
            output,
            mime_type: settings.mime_type,
        });
        Ok(())
    }

    async fn finalize_capture(&self) -> Result<RecordingArtifact, CaptureError> {
        let mut active = self.active.lock().await;
        let capture = active.as_mut().ok_or(CaptureError::CaptureUnavailable)?;

        // An earlier failed attempt may already have stopped the encoder.
        let exited = capture
            .child
            .try_wait()
            .map_err(|e| CaptureError::FinalizeFailed(format!("FFmpeg failed: {}", e)))?;
        if exited.is_none() {
            Self::interrupt(&mut capture.child)?;
        }
        let status = capture
            .child
            .wait()
            .await
            .map_err(|e| CaptureError::FinalizeFailed(format!("FFmpeg failed: {}", e)))?;
        debug!(%status, "ffmpeg exited");

        let artifact = Self::read_video_file(capture.output.path(), capture.mime_type).await?;

        // The capture stays registered until its output has been read; the
        // temp file goes with it.
        *active = None;
        Ok(artifact)
    }

    async fn discard_capture(&self) -> Result<(), CaptureError> {
        if let Some(mut capture) = self.active.lock().await.take() {
            if matches!(capture.child.try_wait(), Ok(Some(_))) {
                return Ok(());
            }
            if let Err(e) = capture.child.kill().await {
                warn!(error = %e, "failed to stop ffmpeg");
            }
        }
        Ok(())
    }
}
