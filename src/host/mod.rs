pub(crate) mod outputs;
