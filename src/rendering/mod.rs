pub mod preview;
pub mod sampler;

pub use preview::{encode_png, render_preview, ColorSource, PreviewImage};
pub use sampler::average;
