use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `Handloom` - Showcase handloom designs, pitch them and match buyer requests.
#[derive(Parser, Debug)]
#[command(name = "handloom")]
#[command(version = "0.1.0")]
#[command(about = "Catalog handloom designs and sell them with Gemini.", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new design to the showcase
    Add {
        /// Design name (e.g. 'Mayuri Saree')
        #[arg(long)]
        name: String,

        /// Inspiration, technique, and what makes the design unique
        #[arg(long)]
        description: String,

        /// Materials used (e.g. 'Silk, Zari Thread')
        #[arg(long)]
        materials: String,

        /// Design image (PNG, JPEG or WEBP)
        #[arg(long)]
        image: PathBuf,
    },

    /// List designs, most recent first
    List,

    /// Show one design with its pitch, if generated
    Show {
        /// Design id as shown by `list`
        id: String,
    },

    /// Show the sales pitch for a design, generating it on first use
    Pitch {
        /// Design id as shown by `list`
        id: String,
    },

    /// Find the design that best matches a buyer's request
    Match {
        /// The buyer's request, e.g. "blue silk wedding saree with peacock motifs"
        #[arg(required = true, num_args = 1..)]
        request: Vec<String>,
    },

    /// Manage the contact email embedded in pitches
    Contact {
        #[command(subcommand)]
        contact_command: ContactCommands,
    },

    /// Show configuration and catalog status
    Status,

    /// Delete all designs and the saved contact email
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Print the saved contact email
    Show,
    /// Save a contact email
    Set {
        /// Email buyers can use to reach you
        email: String,
    },
    /// Remove the saved contact email
    Clear,
}
