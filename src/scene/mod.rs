pub(crate) mod lifecycle;
pub(crate) mod model;
pub(crate) mod view_layer;
