use std::fmt::{self, Write as _};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use super::{
    answers::AnswerValue,
    ids::generate_unique_id,
    layout::{FormLayout, RenderMode},
    schema::{Form, FormField, ParseKindError},
    submission::FormSubmission,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Header,
    Text,
    Answers,
    Image,
    Footer,
}

impl BlockType {
    pub const ALL: [BlockType; 5] = [
        BlockType::Header,
        BlockType::Text,
        BlockType::Answers,
        BlockType::Image,
        BlockType::Footer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Header => "header",
            BlockType::Text => "text",
            BlockType::Answers => "answers",
            BlockType::Image => "image",
            BlockType::Footer => "footer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BlockType::Header => "Practitioner header with client details",
            BlockType::Text => "Fixed text or explanations",
            BlockType::Answers => "Questions and answers from the form",
            BlockType::Image => "Image or chart highlight",
            BlockType::Footer => "Links and signature",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ParseKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        BlockType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let names = BlockType::ALL.map(BlockType::as_str);
                ParseKindError::new("block type", raw, &names)
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub config: Value,
    #[serde(default)]
    pub order: usize,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl PdfBlock {
    fn config_str(&self, key: &str) -> Option<&str> {
        self.config
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template has no block with id '{0}'")]
    UnknownBlock(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfTemplate {
    pub id: String,
    pub form_id: String,
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<PdfBlock>,
}

impl PdfTemplate {
    pub fn new(
        id: impl Into<String>,
        form_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            form_id: form_id.into(),
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    /// Header, answers and footer, the layout most session reports start from.
    pub fn with_default_blocks(mut self) -> Self {
        self.add_block(BlockType::Header, json!({ "title": self.name.to_uppercase() }));
        self.add_block(BlockType::Answers, json!({ "style": "list" }));
        self.add_block(BlockType::Footer, Value::Null);
        self
    }

    pub fn block(&self, id: &str) -> Option<&PdfBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, TemplateError> {
        self.blocks
            .iter()
            .position(|block| block.id == id)
            .ok_or_else(|| TemplateError::UnknownBlock(id.to_string()))
    }

    pub fn add_block(&mut self, block_type: BlockType, config: Value) -> String {
        let id = generate_unique_id(self.blocks.iter().map(|block| block.id.as_str()));
        self.blocks.push(PdfBlock {
            id: id.clone(),
            block_type,
            config,
            order: self.blocks.len(),
            visible: true,
        });
        id
    }

    pub fn remove_block(&mut self, id: &str) -> Result<PdfBlock, TemplateError> {
        let index = self.position(id)?;
        let removed = self.blocks.remove(index);
        self.renumber();
        Ok(removed)
    }

    pub fn toggle_block(&mut self, id: &str) -> Result<bool, TemplateError> {
        let index = self.position(id)?;
        let block = &mut self.blocks[index];
        block.visible = !block.visible;
        Ok(block.visible)
    }

    /// Moves a block by `delta` positions, clamped to the ends.
    pub fn move_block(&mut self, id: &str, delta: i32) -> Result<usize, TemplateError> {
        let from = self.position(id)?;
        let last = self.blocks.len().saturating_sub(1) as i64;
        let to = (from as i64 + i64::from(delta)).clamp(0, last) as usize;
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        self.renumber();
        Ok(to)
    }

    fn renumber(&mut self) {
        for (order, block) in self.blocks.iter_mut().enumerate() {
            block.order = order;
        }
    }
}

const RULE: &str = "----------------------------------------";

/// Plain text preview of the visible blocks of `template` filled with
/// `submission`.
pub fn compose_preview(
    template: &PdfTemplate,
    form: &Form,
    submission: &FormSubmission,
) -> String {
    let mut out = String::new();
    for block in template.blocks.iter().filter(|block| block.visible) {
        match block.block_type {
            BlockType::Header => {
                let title = block.config_str("title").unwrap_or(template.name.as_str());
                let _ = writeln!(out, "{}", title.to_uppercase());
                if let Some(client) = submission.client_name.as_deref() {
                    let _ = writeln!(out, "Client: {client}");
                }
                let _ = writeln!(out, "Form: {}", form.title);
                if let Some(date) =
                    chrono::DateTime::from_timestamp_millis(submission.submitted_at)
                {
                    let _ = writeln!(out, "Date: {}", date.format("%Y-%m-%d"));
                }
                let _ = writeln!(out, "{RULE}");
            }
            BlockType::Text => {
                let content = block
                    .config_str("content")
                    .unwrap_or("Your custom text will appear here...");
                let _ = writeln!(out, "{content}");
            }
            BlockType::Answers => write_answers(&mut out, form, submission),
            BlockType::Image => {
                let source = block.config_str("src").unwrap_or("no image selected");
                let _ = writeln!(out, "[image: {source}]");
            }
            BlockType::Footer => {
                let _ = writeln!(out, "{RULE}");
                let _ = writeln!(out, "Signature: ________________________");
            }
        }
        out.push('\n');
    }
    out
}

fn write_answers(out: &mut String, form: &Form, submission: &FormSubmission) {
    let layout = FormLayout::build(form, RenderMode::Internal);
    for field in &layout.loose {
        write_answer(out, field, submission, "");
    }
    for group in &layout.sections {
        let _ = writeln!(out, "## {}", group.section.display_label());
        for field in &group.fields {
            write_answer(out, field, submission, "  ");
        }
    }
}

fn write_answer(out: &mut String, field: &FormField, submission: &FormSubmission, indent: &str) {
    let answer = submission
        .answers
        .get(&field.id)
        .filter(|value| !value.is_blank())
        .map(AnswerValue::display)
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(out, "{indent}{}: {answer}", field.display_label());
}
