pub(crate) mod fingerprint;
pub(crate) mod node;
pub(crate) mod tree;
