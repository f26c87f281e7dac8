use clap::Subcommand;

/// Animal field definition commands. All act on the selected project.
#[derive(Clone, Debug, Subcommand)]
pub enum AnimalPropertyCommands {
    /// Add a custom field definition.
    Add {
        #[arg(long)]
        name: String,
        /// text, date, select, textarea
        #[arg(long, default_value = "text")]
        kind: String,
        #[arg(long)]
        required: bool,
        #[arg(long)]
        default: Option<String>,
        /// Allowed value for `select` fields (repeatable).
        #[arg(long)]
        option: Vec<String>,
        #[arg(long)]
        order: Option<i32>,
        /// animal, sample, both
        #[arg(long, default_value = "both")]
        applies_to: String,
    },
    /// List effective field definitions (built-ins and custom).
    List,
    /// Update a definition; built-ins are stored as overrides.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        required: Option<bool>,
        #[arg(long, conflicts_with = "clear_default")]
        default: Option<String>,
        #[arg(long)]
        clear_default: bool,
        #[arg(long)]
        option: Option<Vec<String>>,
        #[arg(long)]
        order: Option<i32>,
        #[arg(long)]
        applies_to: Option<String>,
    },
    /// Delete a definition and its values on every animal.
    Delete { id: String },
    /// Bring every animal's fields in line with the stored definitions.
    Apply,
}
