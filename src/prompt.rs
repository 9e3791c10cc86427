pub(crate) mod enhance;
pub(crate) mod image_url;
pub(crate) mod service;
pub(crate) mod vocab;
