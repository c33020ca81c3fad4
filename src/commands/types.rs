//! Implementation of the `clipforge types` command.

use super::{GlobalOptions, load_config};
use crate::cli::TypesArgs;
use crate::collaborator::{ProcessCollaborator, PromptType, list_prompt_types};
use crate::error::{ClipforgeError, Result};

/// List prompt types, one `display name<TAB>identifier` per line, or as JSON.
pub fn cmd_types(globals: &GlobalOptions, args: TypesArgs) -> Result<()> {
    let config = load_config(globals)?;
    let collaborator = ProcessCollaborator::from_config(&config.collaborator)?;
    let types = list_prompt_types(&collaborator)?;

    if args.json {
        println!("{}", render_json(&types)?);
    } else {
        print!("{}", render_table(&types));
    }
    Ok(())
}

fn render_table(types: &[PromptType]) -> String {
    types
        .iter()
        .map(|t| format!("{}\t{}\n", t.display_name, t.identifier))
        .collect()
}

fn render_json(types: &[PromptType]) -> Result<String> {
    serde_json::to_string_pretty(types)
        .map_err(|e| ClipforgeError::UserError(format!("failed to encode prompt types: {}", e)))
}
