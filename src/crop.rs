pub(crate) mod rasterize;
pub(crate) mod region;
pub(crate) mod selection;
