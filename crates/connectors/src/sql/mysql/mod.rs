pub mod adapter;
pub mod decode;
pub mod encoder;
