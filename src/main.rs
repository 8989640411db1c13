//! Headless tinct driver: reads selector commands from stdin.
//!
//! ```text
//! slider <slot> <field> <value>   text <slot> <field> [text]
//! add <kind>   remove   retype <slot> <kind>
//! copy   paste [#rrggbb]   undo   redo
//! press <keycode>   release <keycode>   show   quit
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use std::io::{BufRead, Write};

    use env_logger::Env;
    use tinct::PickerConfig;
    use tinct::driver::{Command, Driver};
    use tinct_ui::Platform;

    // An explicit path must load; a broken default file falls back to defaults
    let (config, default_load_error) = match std::env::args().nth(1) {
        Some(path) => (PickerConfig::load(std::path::Path::new(&path))?, None),
        None => match PickerConfig::load_from_default_path() {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(e) => (PickerConfig::default(), Some(e)),
        },
    };

    env_logger::Builder::from_env(Env::default())
        .filter_level(config.log_level.to_level_filter())
        .init();

    if let Some(e) = default_load_error {
        log::warn!(
            "Failed to load config file {:?}: {}",
            PickerConfig::default_path(),
            e
        );
    }

    let platform = Platform::detect()?;
    log::info!("Starting tinct on {:?}", platform);

    let mut driver = Driver::new(&config, config.key_codes(platform))?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    for line in driver.render() {
        writeln!(stdout, "{}", line)?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                log::warn!("{}", e);
                continue;
            }
        };

        match driver.execute(command) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => log::error!("{}", e),
        }
        for line in driver.render() {
            writeln!(stdout, "{}", line)?;
        }
        stdout.flush()?;
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
