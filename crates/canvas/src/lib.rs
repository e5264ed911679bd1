pub mod config;
pub mod crop;
pub mod editor;
pub mod scene;
pub mod shape;
pub mod style;
pub mod tools;

pub use config::Config;
pub use crop::{draw_crop_handles, draw_crop_rectangle};
pub use editor::{CropOutcome, Editor};
pub use scene::Scene;
pub use shape::{Handle, HandleError, Shape};
pub use style::Style;

/// Lets the editor ask its host for a new frame.
pub trait RedrawRequest {
    fn request_redraw(&self);
}

/// Installs a test-writer subscriber filtered by `DRAW_LOG`; later calls are no-ops.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("DRAW_LOG"))
        .with_test_writer()
        .try_init();
}
