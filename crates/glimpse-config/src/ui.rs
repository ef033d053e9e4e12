use serde::{Deserialize, Serialize};

/// Which presentation surface receives results. Read-only input to
/// presentation routing; persistence lives outside this core.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Popover,
    Window,
}

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default)]
    pub display_mode: DisplayMode,
}
