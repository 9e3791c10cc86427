pub(crate) mod caption;
pub(crate) mod cpu;
pub(crate) mod frame;
