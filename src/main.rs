mod app;
mod canvas;
mod cropper;
mod error;
mod geometry;
mod gesture;
mod model;
mod project;
mod selection;
mod store;
mod surface;

/// Console logging, filtered by `RUST_LOG` on top of an `info` default.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> eframe::Result<()> {
    init_tracing();
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Slide Editor",
        native_options,
        Box::new(|cc| Ok(Box::new(app::SlideApp::new(cc)))),
    )
}
