//! Configuration schema definitions.
//!
//! Every field has a default, so an absent or empty config file yields the
//! stock teardownM layout.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Root configuration structure for `.teardownm/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    /// Sledge scaffold checkouts.
    pub sledge: SledgeConfig,

    /// Companion client project folder.
    pub companion: CompanionConfig,

    /// Game installation lookup.
    pub game: GameConfig,
}

/// Where sledge comes from and how its copies are laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SledgeConfig {
    /// Git URL cloned into every instance.
    pub repository: String,

    /// Folder name of the instances' parent, directly under the install root.
    pub directory: PathBuf,

    /// Instance folder names, created under `directory` in order.
    pub instances: Vec<String>,

    /// Build script run inside each instance.
    pub build_script: String,
}

impl Default for SledgeConfig {
    fn default() -> Self {
        Self {
            repository: "https://github.com/44lr/sledge.git".to_string(),
            directory: PathBuf::from("sledge"),
            instances: vec!["sledge1".to_string(), "sledge2".to_string()],
            build_script: "Create project.bat".to_string(),
        }
    }
}

/// Companion client project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanionConfig {
    /// Folder name directly under the install root.
    pub directory: PathBuf,

    /// Repository cloned into a freshly created folder. Unset by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("teardownM-client"),
            repository: None,
        }
    }
}

/// Game installation lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Game folder relative to the Steam install path.
    ///
    /// Either separator is accepted.
    pub subpath: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            subpath: r"steamapps\common\Teardown".to_string(),
        }
    }
}

impl GameConfig {
    /// Join the subpath onto `base` using the platform separator.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        self.subpath
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
    }
}

/// True if `path` is one plain folder name, e.g. `sledge` but not `a/b`, `.` or `..`.
pub(crate) fn is_folder_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_layout() {
        let config = SetupConfig::default();
        assert_eq!(config.sledge.repository, "https://github.com/44lr/sledge.git");
        assert_eq!(config.sledge.directory, PathBuf::from("sledge"));
        assert_eq!(config.sledge.instances, vec!["sledge1", "sledge2"]);
        assert_eq!(config.sledge.build_script, "Create project.bat");
        assert_eq!(config.companion.directory, PathBuf::from("teardownM-client"));
        assert!(config.companion.repository.is_none());
    }

    #[test]
    fn game_subpath_resolves_with_platform_separator() {
        let game = GameConfig::default();
        let resolved = game.resolve(Path::new("steam"));
        assert_eq!(
            resolved,
            Path::new("steam")
                .join("steamapps")
                .join("common")
                .join("Teardown")
        );
    }

    #[test]
    fn game_subpath_accepts_forward_slashes() {
        let game = GameConfig {
            subpath: "steamapps/common/Teardown/".to_string(),
        };
        assert!(game.resolve(Path::new("base")).ends_with("Teardown"));
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: SetupConfig =
            serde_yaml::from_str("sledge:\n  instances: [a]\n").unwrap();
        assert_eq!(config.sledge.instances, vec!["a"]);
        assert_eq!(config.sledge.build_script, "Create project.bat");
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<SetupConfig, _> = serde_yaml::from_str("sledgee: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn folder_names() {
        assert!(is_folder_name(Path::new("sledge")));
        assert!(is_folder_name(Path::new("teardownM-client")));
        assert!(!is_folder_name(Path::new("a/b")));
        assert!(!is_folder_name(Path::new(".")));
        assert!(!is_folder_name(Path::new("./sledge")));
        assert!(!is_folder_name(Path::new("..")));
        assert!(!is_folder_name(Path::new("../outside")));
        assert!(!is_folder_name(Path::new("")));
        assert!(!is_folder_name(Path::new("/abs")));
    }
}
