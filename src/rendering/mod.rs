pub mod codec;
pub mod preview;

pub use preview::PreviewRenderer;
