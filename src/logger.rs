/// Logging setup: `logs/locgenai.log`, falling back to stderr when the
/// file cannot be opened.
use std::io::Write;
use log::LevelFilter;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "logs/locgenai.log";

pub fn init() {
    let mut builder = env_logger::Builder::new();

    if let Ok(log_level) = std::env::var("RUST_LOG") {
        builder.parse_filters(&log_level);
    } else {
        builder.filter_level(LevelFilter::Info);
        // UI and HTTP stacks are too chatty at info
        for noisy in ["eframe", "egui", "egui_glow", "wgpu", "winit", "reqwest", "hyper"] {
            builder.filter_module(noisy, LevelFilter::Warn);
        }
    }

    // [HH:MM:SS LEVEL] target - message
    builder.format(|buf, record| {
        let now = chrono::Local::now().format("%H:%M:%S");
        writeln!(
            buf,
            "[{} {}] {} - {}",
            now,
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        eprintln!("could not create {LOG_DIR}: {e}");
    }

    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
    {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("could not open {LOG_FILE}, logging to stderr: {e}");
            builder.target(env_logger::Target::Stderr);
        }
    }

    if builder.try_init().is_err() {
        return;
    }

    log::info!("Logging initialised ✓");
}
