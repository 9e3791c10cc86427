use crate::foundation::error::{StudioError, StudioResult};

/// Video codecs a recording may use, each tied to one container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    /// VP9 in WebM.
    Vp9,
    /// VP8 in WebM.
    Vp8,
    /// H.264 in fragmented MP4; the generic fallback.
    H264,
}

/// Codec preference used when nothing else is configured: VP9, then VP8, then H.264/MP4.
pub const DEFAULT_CODEC_PREFERENCE: [VideoCodec; 3] =
    [VideoCodec::Vp9, VideoCodec::Vp8, VideoCodec::H264];

impl VideoCodec {
    /// MIME type of the produced container.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Vp9 => "video/webm; codecs=vp9",
            Self::Vp8 => "video/webm; codecs=vp8",
            Self::H264 => "video/mp4",
        }
    }

    /// File extension of the produced container.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Vp9 | Self::Vp8 => "webm",
            Self::H264 => "mp4",
        }
    }

    /// Name of the `ffmpeg` encoder implementing this codec.
    pub fn ffmpeg_encoder(self) -> &'static str {
        match self {
            Self::Vp9 => "libvpx-vp9",
            Self::Vp8 => "libvpx",
            Self::H264 => "libx264",
        }
    }

    /// `ffmpeg` muxer (`-f`) for this codec's container.
    pub(crate) fn ffmpeg_muxer(self) -> &'static str {
        match self {
            Self::Vp9 | Self::Vp8 => "webm",
            Self::H264 => "mp4",
        }
    }

    /// Encoder and muxer flags tuned for short clips written to a pipe.
    pub(crate) fn ffmpeg_output_args(self) -> &'static [&'static str] {
        match self {
            Self::Vp9 => &[
                "-deadline", "realtime", "-cpu-used", "8", "-row-mt", "1", "-b:v", "2M",
            ],
            Self::Vp8 => &["-deadline", "realtime", "-cpu-used", "8", "-b:v", "2M"],
            // Pipes are not seekable, so the moov atom must come first.
            Self::H264 => &[
                "-preset",
                "veryfast",
                "-movflags",
                "frag_keyframe+empty_moov+default_base_moof",
            ],
        }
    }
}

impl std::fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Vp9 => "vp9",
            Self::Vp8 => "vp8",
            Self::H264 => "h264",
        })
    }
}

impl std::str::FromStr for VideoCodec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vp9" => Ok(Self::Vp9),
            "vp8" => Ok(Self::Vp8),
            "h264" | "avc" | "mp4" => Ok(Self::H264),
            other => Err(format!("unknown codec '{other}'")),
        }
    }
}

/// First codec in `preference` that appears in `supported`.
pub fn select_codec(preference: &[VideoCodec], supported: &[VideoCodec]) -> StudioResult<VideoCodec> {
    preference
        .iter()
        .copied()
        .find(|c| supported.contains(c))
        .ok_or_else(|| {
            let wanted = preference
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            StudioError::unsupported(format!(
                "none of the preferred codecs [{wanted}] can be encoded here"
            ))
        })
}

/// Extract the codecs whose encoders appear in `ffmpeg -encoders` output.
///
/// Encoder lines look like ` V....D libvpx-vp9   libvpx VP9 (codec vp9)`; only video encoders
/// (flags starting with `V`) count.
pub fn parse_ffmpeg_encoders(listing: &str) -> Vec<VideoCodec> {
    let names: Vec<&str> = listing
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let flags = parts.next()?;
            let name = parts.next()?;
            (flags.len() == 6 && flags.starts_with('V')).then_some(name)
        })
        .collect();

    DEFAULT_CODEC_PREFERENCE
        .into_iter()
        .filter(|c| names.contains(&c.ffmpeg_encoder()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/codec.rs"]
mod tests;
