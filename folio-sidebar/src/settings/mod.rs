mod errors;
mod model;
mod storage;

pub use errors::SettingsError;
pub use model::{SidebarSettings, StaticMenuEntry};
pub use storage::{
    load_initial_settings, load_settings, load_settings_from, save_settings,
    save_settings_to, settings_path,
};
