//! Text editor discovery and selection.
//!
//! Probes a fixed list of common editors with `which`, lets the operator pick
//! one, prints a short keybinding cheat-sheet for the terminal editors, and
//! asks for confirmation before the caller hands files to it.

use crate::errors::OpsError;
use crate::ui::console::Console;
use which::which;

const COMMON_EDITORS: [&str; 9] = [
    "nano", "vim", "nvim", "vi", "micro", "code", "subl", "gedit", "mate",
];

fn editor_guide(editor: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match editor {
        "nano" => Some(&[
            ("Search", "Ctrl+W"),
            ("Save and exit", "Ctrl+O, Enter, then Ctrl+X"),
            ("Exit without saving", "Ctrl+X, then N"),
        ]),
        "vim" | "nvim" | "vi" => Some(&[
            ("Edit", "press i for INSERT mode"),
            ("Search", "/pattern, Enter"),
            ("Save and exit", ":wq, Enter"),
            ("Exit without saving", ":q!, Enter"),
        ]),
        "micro" => Some(&[
            ("Search", "Ctrl+F"),
            ("Save and exit", "Ctrl+S then Ctrl+Q"),
            ("Exit without saving", "Ctrl+Q, discard changes"),
        ]),
        // GUI editors need no terminal cheat-sheet.
        _ => None,
    }
}

/// Editors from the candidate list that are installed on this host.
pub fn available_editors() -> Vec<String> {
    COMMON_EDITORS
        .iter()
        .filter(|name| which(name).is_ok())
        .map(|name| name.to_string())
        .collect()
}

/// Let the operator pick an installed editor. `Ok(None)` when none is
/// installed, the selection is cancelled, or the final confirmation declined.
pub fn choose_editor(console: &mut dyn Console) -> Result<Option<String>, OpsError> {
    let editors = available_editors();
    if editors.is_empty() {
        console.line("❌ No text editor found on this system.");
        return Ok(None);
    }

    let Some(selected) = console.select("Select an editor:", &editors)? else {
        return Ok(None);
    };

    if let Some(guide) = editor_guide(&selected) {
        console.line("\n📘 Editor quick reference:");
        for (action, keys) in guide {
            console.line(&format!("  - {}: {}", action, keys));
        }
    }

    match console.confirm("Open the files with this editor?", true)? {
        Some(true) => Ok(Some(selected)),
        _ => {
            console.line("Editor launch cancelled.");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guides_exist_for_terminal_editors() {
        for editor in ["nano", "vim", "nvim", "vi", "micro"] {
            assert!(editor_guide(editor).is_some(), "missing guide for {}", editor);
        }
        assert!(editor_guide("code").is_none());
    }

    #[test]
    fn test_available_editors_only_lists_installed() {
        for editor in available_editors() {
            assert!(which(&editor).is_ok());
        }
    }
}
