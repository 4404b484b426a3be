//! Version command handler

use std::io::Write;

use anyhow::Context;

use crate::config::ConfigLoader;
use crate::error::AppResult;

/// Prints the build version and where configuration is looked up.
pub struct VersionCommandHandler {
    loader: ConfigLoader,
}

impl VersionCommandHandler {
    pub fn new(loader: ConfigLoader) -> Self {
        Self { loader }
    }

    pub fn execute(&self, out: &mut impl Write) -> AppResult<()> {
        self.write_report(out)
            .context("Failed to write version information")?;
        Ok(())
    }

    fn write_report(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "tg-notifier {}", crate::clap_long_version())?;
        writeln!(out)?;
        writeln!(out, "Config file lookup order:")?;
        for (idx, path) in self.loader.candidates().iter().enumerate() {
            let marker = if path.is_file() { " (found)" } else { "" };
            writeln!(out, "  {}. {}{}", idx + 1, path.display(), marker)?;
        }

        match self.loader.resolve() {
            Ok(Some(path)) => writeln!(out, "Active config file: {}", path.display()),
            Ok(None) => writeln!(out, "Active config file: none, using defaults"),
            Err(e) => writeln!(out, "Active config file: {e}"),
        }
    }
}
