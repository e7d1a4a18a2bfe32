use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

/// Where the message bytes come from: a data file, an inline message, or stdin.
#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Data file holding the message
    pub data: Option<PathBuf>,

    /// Message given inline (ignored when a data file is given)
    #[arg(long, short)]
    pub message: Option<String>,
}

impl MessageArgs {
    pub fn read(&self) -> Result<Vec<u8>> {
        if let Some(path) = &self.data {
            return fs::read(path)
                .with_context(|| format!("failed to read data file: {}", path.display()));
        }
        if let Some(message) = &self.message {
            return Ok(message.as_bytes().to_vec());
        }

        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail!("data/message/STDIN required");
        }
        let mut buf = Vec::new();
        stdin
            .lock()
            .read_to_end(&mut buf)
            .context("failed to read message from stdin")?;
        Ok(buf)
    }
}
