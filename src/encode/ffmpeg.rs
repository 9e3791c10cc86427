use crate::encode::codec::{VideoCodec, parse_ffmpeg_encoders};
use crate::encode::sink::{RecordedVideo, Recorder, RecorderConfig, RecorderFactory};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::OnceLock;
use std::thread::JoinHandle;

type Drain = JoinHandle<std::io::Result<Vec<u8>>>;

/// Creates [`FfmpegRecorder`]s backed by one `ffmpeg` executable.
///
/// The encoder list is probed once; a failed probe is retried on the next call.
#[derive(Clone, Debug)]
pub struct FfmpegRecorderFactory {
    program: PathBuf,
    bg_rgba: [u8; 4],
    probed: OnceLock<Vec<VideoCodec>>,
}

impl Default for FfmpegRecorderFactory {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegRecorderFactory {
    /// Use `program` (a name on `PATH` or an explicit path) as the encoder.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            bg_rgba: [0, 0, 0, 255],
            probed: OnceLock::new(),
        }
    }

}

impl RecorderFactory for FfmpegRecorderFactory {
    type Recorder = FfmpegRecorder;

    #[tracing::instrument(skip(self), fields(program = %self.program.display()))]
    fn supported_codecs(&self) -> StudioResult<Vec<VideoCodec>> {
        if let Some(codecs) = self.probed.get() {
            return Ok(codecs.clone());
        }
        let output = match Command::new(&self.program)
            .args(["-hide_banner", "-encoders"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(error = %e, "ffmpeg could not be started");
                return Ok(Vec::new());
            }
        };
        if !output.status.success() {
            tracing::debug!(status = %output.status, "ffmpeg -encoders failed");
            return Ok(Vec::new());
        }
        let codecs = parse_ffmpeg_encoders(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(?codecs, "probed ffmpeg encoders");
        Ok(self.probed.get_or_init(|| codecs).clone())
    }

    fn open(&self, codec: VideoCodec) -> StudioResult<FfmpegRecorder> {
        Ok(FfmpegRecorder::new(self.program.clone(), codec, self.bg_rgba))
    }
}

/// Recorder that spawns `ffmpeg`, streams raw frames to stdin and collects the container from
/// stdout.
///
/// Dropping a recorder that was not finished kills and reaps the child process.
pub struct FfmpegRecorder {
    program: PathBuf,
    codec: VideoCodec,
    bg_rgba: [u8; 4],

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stdout_drain: Option<Drain>,
    stderr_drain: Option<Drain>,

    scratch: Vec<u8>,
    cfg: Option<RecorderConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegRecorder {
    fn new(program: PathBuf, codec: VideoCodec, bg_rgba: [u8; 4]) -> Self {
        Self {
            program,
            codec,
            bg_rgba,
            child: None,
            stdin: None,
            stdout_drain: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Codec this recorder encodes with.
    pub fn codec(&self) -> VideoCodec {
        self.codec
    }

    fn command(&self, cfg: &RecorderConfig) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Input: raw RGBA8 frames. `ffmpeg` does not understand premul, so frames are flattened
        // before they are written (push_frame).
        cmd.args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);

        // yuv420p needs even dimensions; drop the odd row/column instead of rejecting the canvas.
        cmd.args([
            "-an",
            "-vf",
            "crop=trunc(iw/2)*2:trunc(ih/2)*2",
            "-c:v",
            self.codec.ffmpeg_encoder(),
            "-pix_fmt",
            "yuv420p",
        ]);
        cmd.args(self.codec.ffmpeg_output_args());
        cmd.args(["-f", self.codec.ffmpeg_muxer(), "pipe:1"]);
        cmd
    }

    fn kill(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        // Both pipes are closed once the child is gone, so the drains terminate.
        if let Some(h) = self.stdout_drain.take() {
            let _ = h.join();
        }
        if let Some(h) = self.stderr_drain.take() {
            let _ = h.join();
        }
        self.cfg = None;
    }
}

impl Recorder for FfmpegRecorder {
    #[tracing::instrument(skip(self), fields(codec = %self.codec))]
    fn begin(&mut self, cfg: RecorderConfig) -> StudioResult<()> {
        if self.child.is_some() {
            return Err(StudioError::recording("ffmpeg recorder already started"));
        }
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(StudioError::validation("fps must be non-zero"));
        }
        if cfg.width < 2 || cfg.height < 2 {
            return Err(StudioError::validation(
                "ffmpeg recorder width/height must be at least 2",
            ));
        }

        let mut child = self.command(&cfg).spawn().map_err(|e| {
            StudioError::unsupported(format!(
                "failed to spawn {} (is it installed and on PATH?): {e}",
                self.program.display()
            ))
        })?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (Some(stdin), Some(stdout), Some(stderr)) = (stdin, stdout, stderr) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(StudioError::recording("failed to open ffmpeg pipes (unexpected)"));
        };

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.stdout_drain = Some(drain(stdout));
        self.stderr_drain = Some(drain(stderr));
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.cfg = Some(cfg);
        self.last_idx = None;
        tracing::debug!(width = cfg.width, height = cfg.height, "ffmpeg recorder started");
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StudioResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| StudioError::recording("ffmpeg recorder not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(StudioError::recording(
                "ffmpeg recorder received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(StudioError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        flatten_premul_over_bg_to_opaque_rgba8(&mut self.scratch, &frame.data, self.bg_rgba)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(StudioError::recording("ffmpeg recorder is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&self.scratch).map_err(|e| {
            StudioError::recording(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        Ok(())
    }

    fn finish(&mut self) -> StudioResult<RecordedVideo> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| StudioError::recording("ffmpeg recorder not started"))?;

        let status = child.wait().map_err(|e| {
            StudioError::recording(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stdout_bytes = join_drain(self.stdout_drain.take(), "stdout")?;
        let stderr_bytes = join_drain(self.stderr_drain.take(), "stderr")?;
        self.cfg = None;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(StudioError::recording(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }
        if stdout_bytes.is_empty() {
            return Err(StudioError::recording("ffmpeg produced no output"));
        }

        tracing::debug!(bytes = stdout_bytes.len(), codec = %self.codec, "ffmpeg recorder finished");
        Ok(RecordedVideo {
            bytes: stdout_bytes,
            codec: self.codec,
        })
    }
}

impl Drop for FfmpegRecorder {
    fn drop(&mut self) {
        if self.child.is_some() {
            tracing::debug!("releasing unfinished ffmpeg recorder");
            self.kill();
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Drain {
    std::thread::spawn(move || {
        let mut bytes = Vec::new();
        pipe.read_to_end(&mut bytes)?;
        Ok(bytes)
    })
}

fn join_drain(handle: Option<Drain>, name: &str) -> StudioResult<Vec<u8>> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| StudioError::recording(format!("ffmpeg {name} drain thread panicked")))?
            .map_err(|e| StudioError::recording(format!("ffmpeg {name} read failed: {e}"))),
        None => Ok(Vec::new()),
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, `-r` before `-i` sets the input framerate as `num/den`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

fn flatten_premul_over_bg_to_opaque_rgba8(
    dst: &mut [u8],
    src_premul: &[u8],
    bg_rgba: [u8; 4],
) -> StudioResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(StudioError::validation(
            "flatten_premul_over_bg_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg_r = u16::from(bg_rgba[0]);
    let bg_g = u16::from(bg_rgba[1]);
    let bg_b = u16::from(bg_rgba[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (u16::from(s[0]) + mul_div255_u16(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255_u16(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255_u16(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> StudioResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
