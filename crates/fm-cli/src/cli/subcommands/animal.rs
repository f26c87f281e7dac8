use clap::Subcommand;

/// Animal and sample commands. All act on the selected project.
#[derive(Clone, Debug, Subcommand)]
pub enum AnimalCommands {
    /// Add an animal or sample.
    Add {
        #[arg(long)]
        name: String,
        /// animal or sample
        #[arg(long, default_value = "animal")]
        kind: String,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        experiment: Vec<String>,
    },
    /// List animals, optionally only those linked to an experiment.
    List {
        #[arg(long)]
        experiment: Option<String>,
    },
    /// Update an animal.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long, conflicts_with = "clear_species")]
        species: Option<String>,
        #[arg(long)]
        clear_species: bool,
    },
    /// Delete an animal.
    Delete { id: String },
    /// Replace the experiments an animal is linked to.
    Link {
        id: String,
        #[arg(long)]
        experiment: Vec<String>,
    },
    /// Set one field value, validated against its definition.
    Set {
        id: String,
        /// Field definition ID or name.
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    /// Choose the fields shown on an animal's summary card.
    Display {
        id: String,
        /// `name`, `species`, or a field definition ID or name, in display order.
        fields: Vec<String>,
        /// Apply to every animal of the same kind in the project.
        #[arg(long)]
        all_of_kind: bool,
    },
}
