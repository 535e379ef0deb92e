pub(crate) mod decode;
pub(crate) mod poster;
pub(crate) mod text;
