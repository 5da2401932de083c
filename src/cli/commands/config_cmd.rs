//! config command - Show the effective configuration

use std::fmt::Display;
use std::path::Path;

use anyhow::Result;

use super::resolve_settings;
use crate::cli::Context;
use crate::core::config::{CliOverrides, Settings, Source};

/// Print every setting with the layer it came from.
pub fn config(_ctx: &Context, env_file: Option<&Path>) -> Result<()> {
    let resolved = resolve_settings(env_file, &CliOverrides::default())?;

    match resolved.config.loaded_from() {
        Some(path) => println!("config file: {}", path.display()),
        None => println!("config file: (none)"),
    }
    match &resolved.env_file {
        Some(path) => println!("env file:    {}", path.display()),
        None => println!("env file:    (none)"),
    }
    println!();

    for line in describe(&resolved.settings) {
        println!("{}", line);
    }
    Ok(())
}

/// One `key = value (source)` line per setting. The password is only
/// shown as set or unset.
fn describe(settings: &Settings) -> Vec<String> {
    fn line(key: &str, value: Option<impl Display>, source: Option<Source>) -> String {
        match (value, source) {
            (Some(value), Some(source)) => format!("{:<10} = {} ({})", key, value, source),
            (Some(value), None) => format!("{:<10} = {}", key, value),
            (None, _) => format!("{:<10} = (unset)", key),
        }
    }

    vec![
        line(
            "base_url",
            settings.base_url.as_deref(),
            settings.source("base_url"),
        ),
        line(
            "username",
            settings.username.as_deref(),
            settings.source("username"),
        ),
        line(
            "password",
            settings.password.as_ref().map(|_| "(set)"),
            settings.source("password"),
        ),
        line("per_page", Some(settings.per_page), settings.source("per_page")),
        line(
            "output_dir",
            Some(settings.output_dir.display()),
            settings.source("output_dir"),
        ),
    ]
}
