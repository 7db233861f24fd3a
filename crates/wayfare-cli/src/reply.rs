//! Generator backed by a stored generation reply.
//!
//! `wf recommend --reply FILE` feeds a previously captured model answer
//! through the same parsing and guarding path as a live call.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use wayfare_core::{parse_reply, GenerationReply, Generator};

/// A generator that answers every prompt with the same raw reply text.
pub struct CannedReply {
    text: String,
}

impl CannedReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Reads the reply text from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reply file {}", path.display()))?;
        Ok(Self::new(text))
    }
}

#[async_trait]
impl Generator for CannedReply {
    async fn generate(&self, prompt: &str) -> wayfare_core::Result<GenerationReply> {
        debug!("Answering {}-byte prompt from canned reply", prompt.len());
        parse_reply(&self.text)
    }
}
