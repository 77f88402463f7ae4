use log::LevelFilter;

/// Console logger for the panel host: HH:MM:SS, level, message.
/// Debug level for our own crates, info for everything else.
pub fn setup() {
    let result = fern::Dispatch::new()
        .level(LevelFilter::Info)
        .level_for("sidechat_core", LevelFilter::Debug)
        .level_for("sidechat_panel", LevelFilter::Debug)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                message
            ))
        })
        .chain(std::io::stdout())
        .apply();

    if let Err(e) = result {
        eprintln!("failed to initialize logger: {e}");
    }
}
