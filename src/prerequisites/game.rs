//! Locating the game installation.
//!
//! The game is expected under the Steam install path. When it is not there
//! the user is asked whether it lives elsewhere, and the answer is checked
//! against the filesystem before it counts.

use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::probe::SystemProbe;

/// Key of the Yes/No "different path" prompt.
pub const ALTERNATE_PATH_PROMPT: &str = "alternate_path";

/// Key of the free-text game directory prompt.
pub const GAME_PATH_PROMPT: &str = "teardown_path";

/// Find the game folder, asking the user if the default location is missing.
///
/// Returns the directory that was accepted, or `None` if the game could not
/// be located. A prompt that errors counts as not found.
pub fn locate_game(
    host_path: Option<&Path>,
    game: &GameConfig,
    probe: &dyn SystemProbe,
    ui: &mut dyn UserInterface,
) -> Option<PathBuf> {
    match host_path {
        Some(base) => {
            let expected = game.resolve(base);
            if probe.is_dir(&expected) {
                tracing::debug!("Game found at {}", expected.display());
                return Some(expected);
            }
            tracing::debug!("Game not at {}", expected.display());
        }
        None => tracing::debug!("No Steam path, skipping default game location"),
    }

    ask_for_game_path(probe, ui)
}

fn ask_for_game_path(probe: &dyn SystemProbe, ui: &mut dyn UserInterface) -> Option<PathBuf> {
    let different = Prompt {
        key: ALTERNATE_PATH_PROMPT.to_string(),
        question: "Is it in a different path?".to_string(),
        prompt_type: PromptType::Select {
            options: vec![PromptOption::plain("Yes"), PromptOption::plain("No")],
        },
        default: None,
    };

    let answer = match ui.prompt(&different) {
        Ok(result) => result.as_string(),
        Err(e) => {
            tracing::debug!("Alternate path prompt failed: {}", e);
            return None;
        }
    };

    if !answer.eq_ignore_ascii_case("yes") {
        return None;
    }

    let path_prompt = Prompt {
        key: GAME_PATH_PROMPT.to_string(),
        question: "Teardown root directory path".to_string(),
        prompt_type: PromptType::Input,
        default: None,
    };

    let entered = match ui.prompt(&path_prompt) {
        Ok(result) => result.as_string(),
        Err(e) => {
            tracing::debug!("Game path prompt failed: {}", e);
            return None;
        }
    };

    let entered = entered.trim();
    if entered.is_empty() {
        return None;
    }

    let path = PathBuf::from(entered);
    if probe.is_dir(&path) {
        Some(path)
    } else {
        ui.warning(&format!("{} is not a directory", path.display()));
        None
    }
}
