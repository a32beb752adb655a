pub(crate) mod builder;
pub(crate) mod paths;
pub(crate) mod pipeline;
pub(crate) mod prepass;
pub(crate) mod report;
