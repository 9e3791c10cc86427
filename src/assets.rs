pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod font;
