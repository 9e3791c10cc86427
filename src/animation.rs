pub(crate) mod clock;
pub(crate) mod ease;
pub(crate) mod ken_burns;
