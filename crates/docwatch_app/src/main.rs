mod app;
mod display;
mod effects;
mod input;
mod persistence;

use std::path::Path;

use watch_logging::LogDestination;

fn main() -> anyhow::Result<()> {
    watch_logging::initialize(LogDestination::File, Path::new("./docwatch.log"));
    app::run(app::RunSettings::from_env())
}
