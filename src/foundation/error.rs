/// Convenience result type used across stillmotion.
pub type StudioResult<T> = Result<T, StudioError>;

/// Top-level error taxonomy for prompt generation and motion synthesis.
#[derive(thiserror::Error, Debug)]
pub enum StudioError {
    /// Invalid user input (for example, both prompts empty) or invalid settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// The image-generation endpoint was unreachable, slow, or answered with an error.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// No usable recorder or codec exists in this environment. Not retryable.
    #[error("unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    /// The source image could not be fetched or decoded.
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// The recorder failed while capturing frames.
    #[error("recording error: {0}")]
    Recording(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StudioError {
    /// Build a [`StudioError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StudioError::Upstream`] value.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Build a [`StudioError::UnsupportedEnvironment`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedEnvironment(msg.into())
    }

    /// Build a [`StudioError::ImageLoad`] value.
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    /// Build a [`StudioError::Recording`] value.
    pub fn recording(msg: impl Into<String>) -> Self {
        Self::Recording(msg.into())
    }

    /// Whether resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::Validation(_) | Self::UnsupportedEnvironment(_)
        )
    }

    /// Message suitable for showing to an end user.
    ///
    /// Upstream and internal failures are collapsed into generic text; validation and capability
    /// errors keep their detail because the user can act on it.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Upstream(_) => {
                "The image service is unavailable right now. Please try again later.".to_string()
            }
            Self::UnsupportedEnvironment(msg) => {
                format!("Video recording is not supported in this environment: {msg}")
            }
            Self::ImageLoad(_) => {
                "The generated image could not be loaded. Please submit again.".to_string()
            }
            Self::Recording(_) => "Recording the video failed. Please submit again.".to_string(),
            Self::Other(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
