use std::path::Path;
use std::process;

use anyhow::Context;
use beau_collector::BeauCollector;

use flagschema::configuration::{load_config, ConfigReadError, ExportConfig};
use flagschema::export::{build_bundle, ExportBundle};

fn check_flags(config: &ExportConfig) -> Result<(), anyhow::Error> {
    let _ = config
        .flags
        .iter()
        .map(|entry| {
            entry
                .definition
                .check()
                .with_context(|| format!("flag `{}` ({})", entry.key, entry.definition.kind()))
        })
        .bcollect::<Vec<_>>()?;

    Ok(())
}

fn write_bundle(directory: &str, bundle: &ExportBundle) -> Result<(), anyhow::Error> {
    let directory = Path::new(directory);
    std::fs::create_dir_all(directory)
        .with_context(|| format!("trying to create {}", directory.display()))?;

    for (name, content) in [
        ("flags.d.ts", &bundle.declarations),
        ("flags.zod.ts", &bundle.validators),
        ("defaults.ts", &bundle.defaults),
    ] {
        let path = directory.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("trying to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "flags.toml".to_string());

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(ConfigReadError::ReadError(e)) => {
            eprintln!("failed to read {config_path}: {e}");
            process::exit(exitcode::IOERR)
        }

        Err(e @ ConfigReadError::ParseError(_)) => {
            eprintln!("{e}");
            process::exit(exitcode::CONFIG)
        }
    };

    log::info!(
        "loaded {} flag(s) from {config_path}",
        config.flags.len()
    );

    if let Err(e) = check_flags(&config) {
        eprintln!("errors while checking flags");
        eprintln!("{e:?}");
        process::exit(exitcode::DATAERR)
    }

    let bundle = build_bundle(&config.flags);

    if let Err(e) = write_bundle(&config.output.directory, &bundle) {
        eprintln!("{e:?}");
        process::exit(exitcode::CANTCREAT)
    }
}
