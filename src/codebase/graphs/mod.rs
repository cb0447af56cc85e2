pub mod reference_index;

pub use reference_index::{ReferenceBuffer, ReferenceIndex, ReferenceRecorder};
