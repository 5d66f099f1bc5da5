//! CLI commands

mod add;
mod analyze;
mod clean;
mod completions;
mod init;
mod list;
mod notes;

pub use add::AddCommand;
pub use analyze::AnalyzeCommand;
pub use clean::CleanCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use notes::NotesCommand;
