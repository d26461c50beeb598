use std::fs;

use chrono::{DateTime, Local};
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::{Value, json};
use tracing::info;

use reportflow::{
    FillUI, UiOptions,
    domain::{
        AnswerSet, BlockType, FieldPatch, FormDraft, FormField, FormLayout, FormSubmission,
        PdfTemplate, RenderMode, compose_preview, now_millis, parse_public_path, public_link,
        public_path,
    },
    io::{emit, parse_form_documents, read_document},
    store::{
        Collection, FormRepository, JsonFileStore, SubmissionRepository, TemplateRepository,
        collection_schema,
    },
};

use crate::cli::{
    Cli, CollectionArg, Command, FieldCommand, FillArgs, FormCommand, OpenArgs, OptionCommand,
    OutputArgs, StyleArg, SubmissionCommand, TemplateCommand, UiArgs,
};
use crate::output::build_output_options;

pub fn run(cli: Cli) -> Result<()> {
    let mut store = JsonFileStore::new(&cli.store);
    match cli.command {
        Command::Forms { action } => forms(&mut store, action),
        Command::Fields { action } => fields(&mut store, action),
        Command::Options { action } => options(&mut store, action),
        Command::Fill(args) => fill(&mut store, args),
        Command::Open(args) => open(&mut store, args),
        Command::Submissions { action } => submissions(&store, action),
        Command::Templates { action } => templates(&mut store, action),
        Command::Schema { collection } => {
            let collection = match collection {
                CollectionArg::Forms => Collection::Forms,
                CollectionArg::Submissions => Collection::Submissions,
                CollectionArg::Templates => Collection::Templates,
            };
            println!("{}", serde_json::to_string_pretty(&collection_schema(collection))?);
            Ok(())
        }
    }
}

fn load_draft(store: &JsonFileStore, id: &str) -> Result<FormDraft> {
    store
        .get_form(id)?
        .map(|form| FormDraft::from_form(&form))
        .ok_or_else(|| eyre!("form '{id}' was not found"))
}

/// Applies `edit` to the stored form and saves the whole draft back.
fn edit_form<T>(
    store: &mut JsonFileStore,
    id: &str,
    edit: impl FnOnce(&mut FormDraft) -> Result<T>,
) -> Result<T> {
    let mut draft = load_draft(store, id)?;
    let result = edit(&mut draft)?;
    store.save_form(draft)?;
    Ok(result)
}

fn format_millis(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|date| date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn forms(store: &mut JsonFileStore, action: FormCommand) -> Result<()> {
    match action {
        FormCommand::List { category } => {
            let forms = store
                .list_forms()?
                .into_iter()
                .filter(|form| category.is_none_or(|category| form.category == category))
                .collect::<Vec<_>>();
            match category {
                Some(category) if forms.is_empty() => println!("No {category} forms."),
                None if forms.is_empty() => {
                    println!("No forms yet. Create one with `reportflow forms new --title <TITLE>`.")
                }
                _ => {}
            }
            for form in forms {
                println!(
                    "{}  {:<9} {:<8} {:>3} fields  {}",
                    form.id,
                    form.category.as_str(),
                    form.status.to_string(),
                    form.input_fields().count(),
                    form.title
                );
            }
        }
        FormCommand::New {
            title,
            description,
            category,
        } => {
            let draft = FormDraft::new()
                .with_title(title)
                .with_description(description)
                .with_category(category);
            let form = store.save_form(draft)?;
            println!("{}", form.id);
        }
        FormCommand::Show { form } => {
            let form = store
                .get_form(&form)?
                .ok_or_else(|| eyre!("form '{form}' was not found"))?;
            println!("{} ({})", form.title, form.id);
            if !form.description.is_empty() {
                println!("{}", form.description);
            }
            println!(
                "{} / {} / created {}",
                form.category,
                form.status,
                format_millis(form.created_at)
            );
            let layout = FormLayout::grouped(&form);
            for field in &layout.loose {
                print_field(field, "");
            }
            for group in &layout.sections {
                println!("[{}] {}", group.section.id, group.section.display_label());
                if group.fields.is_empty() {
                    println!("  (no fields)");
                }
                for field in &group.fields {
                    print_field(field, "  ");
                }
            }
        }
        FormCommand::Set {
            form,
            title,
            description,
            category,
            status,
        } => {
            edit_form(store, &form, |draft| {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                if let Some(category) = category {
                    draft.category = category;
                }
                if let Some(status) = status {
                    draft.status = status;
                }
                Ok(())
            })?;
        }
        FormCommand::Delete { form } => {
            if !store.delete_form(&form)? {
                return Err(eyre!("form '{form}' was not found"));
            }
            info!(form = %form, "form deleted");
        }
        FormCommand::Link { form, base_url } => {
            if store.get_form(&form)?.is_none() {
                return Err(eyre!("form '{form}' was not found"));
            }
            match base_url {
                Some(base) => println!("{}", public_link(&base, &form)),
                None => println!("{}", public_path(&form)),
            }
        }
        FormCommand::Export { form, output } => {
            let form = store
                .get_form(&form)?
                .ok_or_else(|| eyre!("form '{form}' was not found"))?;
            if let Some(options) = build_output_options(&output, true)? {
                emit(&form, &options).map_err(|err| eyre!("{err:#}"))?;
            }
        }
        FormCommand::Import { path, format } => {
            let value = read_document(&path, format).map_err(|err| eyre!("{err:#}"))?;
            let drafts = parse_form_documents(value).map_err(|err| eyre!("{err:#}"))?;
            for draft in drafts {
                let form = store.save_form(draft)?;
                println!("{}  {}", form.id, form.title);
            }
        }
    }
    Ok(())
}

fn print_field(field: &FormField, indent: &str) {
    let required = if field.required { " *" } else { "" };
    println!(
        "{indent}{}  {:<8} {}{required}",
        field.id,
        field.field_type.as_str(),
        field.display_label()
    );
    for (index, option) in field.choices().iter().enumerate() {
        println!("{indent}    {index}. {option}");
    }
}

fn fields(store: &mut JsonFileStore, action: FieldCommand) -> Result<()> {
    match action {
        FieldCommand::Add {
            form,
            field_type,
            label,
            required,
            section,
            placeholder,
            options,
        } => {
            let id = edit_form(store, &form, |draft| {
                if let Some(section) = section.as_deref()
                    && !draft.sections().any(|existing| existing.id == section)
                {
                    return Err(eyre!("form '{form}' has no section '{section}'"));
                }
                let id = draft.add_field(field_type, section.as_deref());
                let mut patch = FieldPatch::new().with_required(required);
                if let Some(label) = label {
                    patch = patch.with_label(label);
                }
                if placeholder.is_some() {
                    patch = patch.with_placeholder(placeholder);
                }
                if !options.is_empty() {
                    patch = patch.with_options(options);
                }
                draft.update_field(&id, patch)?;
                Ok(id)
            })?;
            println!("{id}");
        }
        FieldCommand::Remove { form, field } => {
            edit_form(store, &form, |draft| {
                draft
                    .remove_field(&field)
                    .map(|_| ())
                    .ok_or_else(|| eyre!("form '{form}' has no field '{field}'"))
            })?;
        }
        FieldCommand::Update {
            form,
            field,
            field_type,
            label,
            required,
            section,
            no_section,
            placeholder,
            clear_placeholder,
        } => {
            let mut patch = FieldPatch::new();
            if let Some(field_type) = field_type {
                patch = patch.with_type(field_type);
            }
            if let Some(label) = label {
                patch = patch.with_label(label);
            }
            if let Some(required) = required {
                patch = patch.with_required(required);
            }
            if no_section {
                patch = patch.with_section(None);
            } else if section.is_some() {
                patch = patch.with_section(section);
            }
            if clear_placeholder {
                patch = patch.with_placeholder(None);
            } else if placeholder.is_some() {
                patch = patch.with_placeholder(placeholder);
            }
            if patch.is_empty() {
                return Err(eyre!("nothing to update; pass at least one change"));
            }
            edit_form(store, &form, |draft| {
                draft.update_field(&field, patch)?;
                Ok(())
            })?;
        }
    }
    Ok(())
}

fn options(store: &mut JsonFileStore, action: OptionCommand) -> Result<()> {
    match action {
        OptionCommand::Add { form, field, text } => {
            let index = edit_form(store, &form, |draft| {
                Ok(draft.add_option(&field, text.as_deref())?)
            })?;
            println!("{index}");
        }
        OptionCommand::Remove { form, field, index } => {
            let removed = edit_form(store, &form, |draft| {
                Ok(draft.remove_option(&field, index)?)
            })?;
            println!("removed '{removed}'");
        }
        OptionCommand::Set {
            form,
            field,
            index,
            text,
        } => edit_form(store, &form, |draft| {
            Ok(draft.set_option(&field, index, text)?)
        })?,
        OptionCommand::Move {
            form,
            field,
            from,
            to,
        } => edit_form(store, &form, |draft| {
            Ok(draft.move_option(&field, from, to)?)
        })?,
    }
    Ok(())
}

fn ui_options(args: &UiArgs) -> Result<UiOptions> {
    let mut options = UiOptions::default()
        .with_confirm_exit(!args.no_confirm_exit)
        .with_help(!args.no_help);
    if let Some(style) = args.style {
        options = options.with_style(match style {
            StyleArg::Internal => RenderMode::Internal,
            StyleArg::Public => RenderMode::Public,
        });
    }
    if let Some(path) = &args.keymap {
        let source = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read keymap {}", path.display()))?;
        options = options
            .with_keymap_json(&source)
            .wrap_err_with(|| format!("invalid keymap {}", path.display()))?;
    }
    Ok(options)
}

fn finish_fill(submission: &FormSubmission, output: &OutputArgs) -> Result<()> {
    match build_output_options(output, false)? {
        Some(options) => {
            emit(submission, &options).map_err(|err| eyre!("{err:#}"))?
        }
        None => println!("Submission {} recorded.", submission.id),
    }
    Ok(())
}

fn fill(store: &mut JsonFileStore, args: FillArgs) -> Result<()> {
    // Fail on bad destinations before the screen opens.
    build_output_options(&args.output, false)?;
    let mut ui = FillUI::new(&args.form, RenderMode::Internal).with_options(ui_options(&args.ui)?);
    if let Some(name) = args.client_name {
        ui = ui.with_client_name(name);
    }
    if let Some(id) = args.client_id {
        ui = ui.with_client_id(id);
    }
    let submission = ui.run(store).map_err(|err| eyre!("{err:#}"))?;
    finish_fill(&submission, &args.output)
}

fn open(store: &mut JsonFileStore, args: OpenArgs) -> Result<()> {
    let form_id = parse_public_path(&args.link)
        .ok_or_else(|| eyre!("'{}' is not a form link", args.link))?;
    build_output_options(&args.output, false)?;
    let submission = FillUI::new(form_id, RenderMode::Public)
        .with_options(ui_options(&args.ui)?)
        .run(store)
        .map_err(|err| eyre!("{err:#}"))?;
    finish_fill(&submission, &args.output)
}

fn submissions(store: &JsonFileStore, action: SubmissionCommand) -> Result<()> {
    match action {
        SubmissionCommand::List { form } => {
            let submissions = store.list_submissions(form.as_deref())?;
            if submissions.is_empty() {
                println!("No submissions.");
            }
            for submission in submissions {
                println!(
                    "{}  {}  {}  {}",
                    submission.id,
                    submission.form_id,
                    format_millis(submission.submitted_at),
                    submission.client_name.as_deref().unwrap_or("-")
                );
            }
        }
        SubmissionCommand::Show { id, output } => {
            let submission = store
                .get_submission(&id)?
                .ok_or_else(|| eyre!("submission '{id}' was not found"))?;
            if let Some(options) = build_output_options(&output, true)? {
                emit(&submission, &options).map_err(|err| eyre!("{err:#}"))?;
            }
        }
    }
    Ok(())
}

fn load_template(store: &JsonFileStore, id: &str) -> Result<PdfTemplate> {
    store
        .get_template(id)?
        .ok_or_else(|| eyre!("template '{id}' was not found"))
}

fn edit_template<T>(
    store: &mut JsonFileStore,
    id: &str,
    edit: impl FnOnce(&mut PdfTemplate) -> Result<T>,
) -> Result<T> {
    let mut template = load_template(store, id)?;
    let result = edit(&mut template)?;
    store.save_template(template)?;
    Ok(result)
}

fn block_config(
    block_type: BlockType,
    title: Option<String>,
    content: Option<String>,
    src: Option<String>,
) -> Value {
    match block_type {
        BlockType::Header => title.map_or(Value::Null, |title| json!({ "title": title })),
        BlockType::Text => content.map_or(Value::Null, |content| json!({ "content": content })),
        BlockType::Image => src.map_or(Value::Null, |src| json!({ "src": src })),
        BlockType::Answers => json!({ "style": "list" }),
        BlockType::Footer => Value::Null,
    }
}

fn templates(store: &mut JsonFileStore, action: TemplateCommand) -> Result<()> {
    match action {
        TemplateCommand::New { form, name, empty } => {
            if store.get_form(&form)?.is_none() {
                return Err(eyre!("form '{form}' was not found"));
            }
            let mut template = PdfTemplate::new(String::new(), form, name);
            if !empty {
                template = template.with_default_blocks();
            }
            let template = store.save_template(template)?;
            println!("{}", template.id);
        }
        TemplateCommand::List { form } => {
            let templates = store
                .list_templates()?
                .into_iter()
                .filter(|template| form.as_deref().is_none_or(|form| template.form_id == form))
                .collect::<Vec<_>>();
            if templates.is_empty() {
                println!("No templates.");
            }
            for template in templates {
                println!(
                    "{}  {}  {} blocks  {}",
                    template.id,
                    template.form_id,
                    template.blocks.len(),
                    template.name
                );
            }
        }
        TemplateCommand::Show { template } => {
            let template = load_template(store, &template)?;
            println!("{} ({}) for form {}", template.name, template.id, template.form_id);
            for block in &template.blocks {
                let hidden = if block.visible { "" } else { "  (hidden)" };
                println!(
                    "  {}. {}  {:<8} {}{hidden}",
                    block.order,
                    block.id,
                    block.block_type.as_str(),
                    block.block_type.description()
                );
            }
        }
        TemplateCommand::Delete { template } => {
            if !store.delete_template(&template)? {
                return Err(eyre!("template '{template}' was not found"));
            }
        }
        TemplateCommand::AddBlock {
            template,
            block_type,
            title,
            content,
            src,
        } => {
            let config = block_config(block_type, title, content, src);
            let id = edit_template(store, &template, |template| {
                Ok(template.add_block(block_type, config))
            })?;
            println!("{id}");
        }
        TemplateCommand::RemoveBlock { template, block } => {
            edit_template(store, &template, |template| {
                template.remove_block(&block)?;
                Ok(())
            })?;
        }
        TemplateCommand::ToggleBlock { template, block } => {
            let visible = edit_template(store, &template, |template| {
                Ok(template.toggle_block(&block)?)
            })?;
            println!("{}", if visible { "visible" } else { "hidden" });
        }
        TemplateCommand::MoveBlock {
            template,
            block,
            delta,
        } => {
            let position = edit_template(store, &template, |template| {
                Ok(template.move_block(&block, delta)?)
            })?;
            println!("{position}");
        }
        TemplateCommand::Preview {
            template,
            submission,
        } => {
            let template = load_template(store, &template)?;
            let form = store
                .get_form(&template.form_id)?
                .ok_or_else(|| eyre!("form '{}' was not found", template.form_id))?;
            let submission = match submission {
                Some(id) => store
                    .get_submission(&id)?
                    .ok_or_else(|| eyre!("submission '{id}' was not found"))?,
                None => store
                    .list_submissions(Some(form.id.as_str()))?
                    .into_iter()
                    .max_by_key(|submission| submission.submitted_at)
                    .unwrap_or_else(|| FormSubmission {
                        id: String::new(),
                        form_id: form.id.clone(),
                        client_id: None,
                        client_name: None,
                        answers: AnswerSet::for_form(&form),
                        submitted_at: now_millis(),
                    }),
            };
            print!("{}", compose_preview(&template, &form, &submission));
        }
    }
    Ok(())
}
