//! Prompt template access

use suno_common::json_file::read_text_optional;
use suno_common::{Error, Result};

use super::ProjectStore;

pub const PROMPT_TEMPLATE_NOT_FOUND: &str = "Prompt template not found";

impl ProjectStore {
    /// Text of the lyrics-enhancement prompt template
    pub fn read_prompt_template(&self) -> Result<String> {
        read_text_optional(&self.layout().prompt_template_path())?
            .ok_or_else(|| Error::NotFound(PROMPT_TEMPLATE_NOT_FOUND.to_string()))
    }
}
