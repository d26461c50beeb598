use serde_json::json;

use crate::domain::{
    AnswerSet, AnswerValue, BlockType, FieldType, FormDraft, FormSubmission, PdfTemplate,
    TemplateError, compose_preview,
};

fn template() -> PdfTemplate {
    let mut template = PdfTemplate::new("t1", "f1", "Session report");
    template.add_block(BlockType::Header, json!({ "title": "Session report" }));
    template.add_block(BlockType::Text, json!({ "content": "Confidential" }));
    template.add_block(BlockType::Answers, json!({ "style": "list" }));
    template.add_block(BlockType::Footer, json!(null));
    template
}

fn block_types(template: &PdfTemplate) -> Vec<BlockType> {
    template.blocks.iter().map(|block| block.block_type).collect()
}

fn orders(template: &PdfTemplate) -> Vec<usize> {
    template.blocks.iter().map(|block| block.order).collect()
}

#[test]
fn added_blocks_are_visible_and_ordered() {
    let template = template();
    assert_eq!(orders(&template), vec![0, 1, 2, 3]);
    assert!(template.blocks.iter().all(|block| block.visible));
}

#[test]
fn default_blocks_cover_header_answers_footer() {
    let template = PdfTemplate::new("t1", "f1", "Notes").with_default_blocks();
    assert_eq!(
        block_types(&template),
        vec![BlockType::Header, BlockType::Answers, BlockType::Footer]
    );
}

#[test]
fn moving_blocks_clamps_and_renumbers() {
    let mut template = template();
    let footer = template.blocks[3].id.clone();
    assert_eq!(template.move_block(&footer, -1), Ok(2));
    assert_eq!(
        block_types(&template),
        vec![
            BlockType::Header,
            BlockType::Text,
            BlockType::Footer,
            BlockType::Answers
        ]
    );
    assert_eq!(template.move_block(&footer, -10), Ok(0));
    assert_eq!(template.blocks[0].block_type, BlockType::Footer);
    assert_eq!(template.move_block(&footer, 10), Ok(3));
    assert_eq!(orders(&template), vec![0, 1, 2, 3]);
}

#[test]
fn removing_blocks_renumbers_the_rest() {
    let mut template = template();
    let text = template.blocks[1].id.clone();
    let removed = template.remove_block(&text).expect("remove");
    assert_eq!(removed.block_type, BlockType::Text);
    assert_eq!(orders(&template), vec![0, 1, 2]);
    assert_eq!(
        template.remove_block(&text),
        Err(TemplateError::UnknownBlock(text.clone()))
    );
}

#[test]
fn toggling_flips_visibility() {
    let mut template = template();
    let id = template.blocks[0].id.clone();
    assert_eq!(template.toggle_block(&id), Ok(false));
    assert_eq!(template.toggle_block(&id), Ok(true));
    assert!(template.toggle_block("missing").is_err());
}

#[test]
fn preview_renders_visible_blocks_with_answers() {
    let mut draft = FormDraft::new().with_title("Intake");
    let loose = draft.add_field(FieldType::Text, None);
    let section = draft.add_field(FieldType::Section, None);
    let inside = draft.add_field(FieldType::Checkbox, Some(section.as_str()));
    let blank = draft.add_field(FieldType::Number, Some(section.as_str()));
    draft.fields[0].label = "Goal".into();
    draft.fields[1].label = "History".into();
    draft.fields[2].label = "Symptoms".into();
    draft.fields[3].label = "Weight".into();
    let form = draft.into_form("f1".into(), 0);

    let mut answers = AnswerSet::for_form(&form);
    answers.set_text(&loose, "Run 5k");
    answers.set(&inside, AnswerValue::Choices(vec!["Option 1".into()]));
    answers.set_text(&blank, "");
    let submission = FormSubmission {
        id: "s1".into(),
        form_id: form.id.clone(),
        client_id: None,
        client_name: Some("Ada".into()),
        answers,
        submitted_at: 1_700_000_000_000,
    };

    let mut template = template();
    let text = template.blocks[1].id.clone();
    template.toggle_block(&text).expect("toggle");

    let preview = compose_preview(&template, &form, &submission);
    assert!(preview.contains("SESSION REPORT"));
    assert!(preview.contains("Client: Ada"));
    assert!(preview.contains("Form: Intake"));
    assert!(preview.contains("Date: 2023-11-14"));
    assert!(preview.contains("Goal: Run 5k"));
    assert!(preview.contains("## History"));
    assert!(preview.contains("  Symptoms: Option 1"));
    assert!(preview.contains("  Weight: -"));
    assert!(preview.contains("Signature:"));
    assert!(!preview.contains("Confidential"));
}
