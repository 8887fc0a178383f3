pub mod context;

pub use context::{
    DEFAULT_COLOR, DEFAULT_STROKE_WIDTH, EditorContext, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH,
    Preview,
};
