use colored::Colorize;
use log::Level;
use std::time::SystemTime;

pub fn setup_logger() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let level = match record.level() {
                Level::Error => "ERROR".red().to_string(),
                Level::Warn => "WARN".yellow().to_string(),
                Level::Info => "INFO".green().to_string(),
                Level::Debug => "DEBUG".blue().to_string(),
                Level::Trace => "TRACE".normal().to_string(),
            };
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                level,
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
