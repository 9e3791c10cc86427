//! Recording rendered frames into a video container.
//!
//! A [`sink::Recorder`] consumes frames in timeline order and returns the encoded bytes when
//! finished. [`sink::RecorderFactory`] reports which codecs the environment can encode so codec
//! selection happens before any recorder is opened.

/// Codec preference and selection.
pub mod codec;
/// `ffmpeg`-based recorder (system binary, frames over stdin, container over stdout).
pub mod ffmpeg;
/// Recorder traits and the in-memory recorder.
pub mod sink;
