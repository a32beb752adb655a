pub(crate) mod compression;
pub(crate) mod settings;
