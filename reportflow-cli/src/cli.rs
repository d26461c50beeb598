use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use reportflow::{
    domain::{BlockType, FieldType, FormCategory, FormStatus},
    io::DocumentFormat,
};

#[derive(Debug, Parser)]
#[command(
    name = "reportflow",
    version,
    about = "Author intake forms, fill them in the terminal and preview session reports"
)]
pub struct Cli {
    /// Directory holding forms.json, submissions.json and templates.json
    #[arg(
        long,
        global = true,
        env = "REPORTFLOW_STORE",
        default_value = ".reportflow",
        value_name = "DIR"
    )]
    pub store: PathBuf,

    /// Write logs to this file (the fill screens log nowhere else)
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, inspect, share and exchange forms
    Forms {
        #[command(subcommand)]
        action: FormCommand,
    },
    /// Edit the fields of a form
    Fields {
        #[command(subcommand)]
        action: FieldCommand,
    },
    /// Edit the options of a select or checkbox field
    Options {
        #[command(subcommand)]
        action: OptionCommand,
    },
    /// Capture a session for a client (grouped by section)
    Fill(FillArgs),
    /// Fill a form through its public link
    Open(OpenArgs),
    /// Browse recorded submissions
    Submissions {
        #[command(subcommand)]
        action: SubmissionCommand,
    },
    /// Build report templates and preview them
    Templates {
        #[command(subcommand)]
        action: TemplateCommand,
    },
    /// Print the JSON Schema a store collection is checked against
    Schema {
        #[arg(value_enum)]
        collection: CollectionArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollectionArg {
    Forms,
    Submissions,
    Templates,
}

#[derive(Debug, Subcommand)]
pub enum FormCommand {
    /// List stored forms
    List {
        /// Only forms of this category: public or internal
        #[arg(long)]
        category: Option<FormCategory>,
    },
    /// Create an empty form
    New {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// public or internal
        #[arg(long, default_value = "internal")]
        category: FormCategory,
    },
    /// Show a form with its sections and fields
    Show { form: String },
    /// Change the title, description, category or status of a form
    Set {
        form: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<FormCategory>,
        /// draft, active or archived
        #[arg(long)]
        status: Option<FormStatus>,
    },
    /// Delete a form
    Delete { form: String },
    /// Print the public link of a form
    Link {
        form: String,
        /// Prefix for a full URL instead of the bare path
        #[arg(long = "base-url", value_name = "URL")]
        base_url: Option<String>,
    },
    /// Write a form document to stdout or files
    Export {
        form: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Create forms from a document holding one form or an array of forms
    Import {
        path: PathBuf,
        #[arg(long)]
        format: Option<DocumentFormat>,
    },
}

#[derive(Debug, Subcommand)]
pub enum FieldCommand {
    /// Append a field
    Add {
        form: String,
        /// text, longtext, number, date, select, checkbox or section
        #[arg(value_name = "TYPE")]
        field_type: FieldType,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        required: bool,
        /// Section the field belongs to
        #[arg(long, value_name = "SECTION_ID")]
        section: Option<String>,
        /// Helper text shown under the label
        #[arg(long)]
        placeholder: Option<String>,
        /// Replaces the default option list; repeat for several
        #[arg(long = "option", value_name = "TEXT", action = ArgAction::Append)]
        options: Vec<String>,
    },
    /// Remove a field; fields of a removed section become standalone
    Remove { form: String, field: String },
    /// Change a field
    Update {
        form: String,
        field: String,
        #[arg(long = "type", value_name = "TYPE")]
        field_type: Option<FieldType>,
        #[arg(long)]
        label: Option<String>,
        #[arg(long, value_name = "BOOL")]
        required: Option<bool>,
        #[arg(long, value_name = "SECTION_ID", conflicts_with = "no_section")]
        section: Option<String>,
        /// Move the field out of its section
        #[arg(long)]
        no_section: bool,
        #[arg(long, conflicts_with = "clear_placeholder")]
        placeholder: Option<String>,
        #[arg(long)]
        clear_placeholder: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum OptionCommand {
    /// Append an option
    Add {
        form: String,
        field: String,
        text: Option<String>,
    },
    /// Remove the option at INDEX
    Remove {
        form: String,
        field: String,
        index: usize,
    },
    /// Rename the option at INDEX
    Set {
        form: String,
        field: String,
        index: usize,
        text: String,
    },
    /// Move the option at FROM to TO
    Move {
        form: String,
        field: String,
        from: usize,
        to: usize,
    },
}

#[derive(Debug, Args)]
pub struct FillArgs {
    pub form: String,
    #[arg(long = "client", value_name = "NAME")]
    pub client_name: Option<String>,
    #[arg(long = "client-id", value_name = "ID")]
    pub client_id: Option<String>,
    #[command(flatten)]
    pub ui: UiArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Public link, path (/f/<id>) or form id
    pub link: String,
    #[command(flatten)]
    pub ui: UiArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct UiArgs {
    /// Quit without asking when answers are unsaved
    #[arg(long = "no-confirm-exit")]
    pub no_confirm_exit: bool,
    /// Hide the key binding line
    #[arg(long = "no-help")]
    pub no_help: bool,
    /// Render with the other chrome: internal or public
    #[arg(long, value_enum, value_name = "STYLE")]
    pub style: Option<StyleArg>,
    /// Key bindings in the default.keymap.json layout
    #[arg(long, value_name = "PATH")]
    pub keymap: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StyleArg {
    Internal,
    Public,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output destinations ("-" writes to stdout)
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    pub outputs: Vec<String>,
    /// json, yaml or toml; inferred from the first file otherwise
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<DocumentFormat>,
    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    pub no_pretty: bool,
    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    pub force: bool,
}

#[derive(Debug, Subcommand)]
pub enum SubmissionCommand {
    /// List submissions, newest last
    List {
        #[arg(long)]
        form: Option<String>,
    },
    /// Write one submission to stdout or files
    Show {
        id: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// Create a template for a form
    New {
        form: String,
        #[arg(long)]
        name: String,
        /// Start without the header, answers and footer blocks
        #[arg(long)]
        empty: bool,
    },
    /// List templates
    List {
        #[arg(long)]
        form: Option<String>,
    },
    /// Show the blocks of a template
    Show { template: String },
    /// Delete a template
    Delete { template: String },
    /// Append a block
    AddBlock {
        template: String,
        /// header, text, answers, image or footer
        #[arg(value_name = "TYPE")]
        block_type: BlockType,
        /// Header title
        #[arg(long)]
        title: Option<String>,
        /// Text block content
        #[arg(long)]
        content: Option<String>,
        /// Image source
        #[arg(long)]
        src: Option<String>,
    },
    /// Remove a block
    RemoveBlock { template: String, block: String },
    /// Show or hide a block
    ToggleBlock { template: String, block: String },
    /// Move a block up (negative) or down (positive)
    MoveBlock {
        template: String,
        block: String,
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
    /// Render a plain text preview from a submission
    Preview {
        template: String,
        /// Submission to fill in; defaults to the latest one for the form
        #[arg(long)]
        submission: Option<String>,
    },
}
