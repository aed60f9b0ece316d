use std::path::Path;

use clap::ArgMatches;

use crate::config::{default_config_path, load_config, load_config_from, save_config, Config};
use crate::error::LoadTestResult;

pub async fn handle_config(matches: &ArgMatches) -> LoadTestResult<()> {
    if matches.get_flag("init") {
        let path = default_config_path()?;
        if path.exists() && !matches.get_flag("force") {
            println!("{} already exists, pass --force to overwrite", path.display());
            return Ok(());
        }
        let path = save_config(&Config::default())?;
        println!("Default configuration written to {}", path.display());
    } else {
        let config = match matches.get_one::<String>("config") {
            Some(path) => load_config_from(Path::new(path))?,
            None => load_config()?,
        };
        config.validate()?;
        println!("{}", serde_json::to_string_pretty(&config)?);
    }
    Ok(())
}
