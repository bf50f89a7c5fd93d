pub(crate) mod format;
pub(crate) mod locale;
pub(crate) mod source;
