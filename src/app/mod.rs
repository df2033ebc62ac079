pub mod converters;
pub mod navigation;
mod state;
mod update;

pub use state::*;
pub use update::update;

use std::path::PathBuf;
use std::sync::Arc;

use crate::models::config::ConfigManager;
use crate::models::list::PanelList;
use crate::operations::store::ObjectStore;
use crate::operations::upload::{UploadController, UploadTask};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelType {
    BucketList,
    ObjectBrowser { bucket: String, prefix: String },
    LocalFilesystem { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<std::time::SystemTime>,
}

pub struct Panel {
    pub panel_type: PanelType,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub visible_height: usize,
    pub list: PanelList,
}

impl Panel {
    pub fn new_bucket_list() -> Self {
        Self {
            panel_type: PanelType::BucketList,
            selected_index: 0,
            scroll_offset: 0,
            visible_height: 10,
            list: PanelList::new(),
        }
    }

    pub fn new_local_filesystem() -> Self {
        Self {
            panel_type: PanelType::LocalFilesystem {
                path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            },
            selected_index: 0,
            scroll_offset: 0,
            visible_height: 10,
            list: PanelList::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Browser,
    ConfirmDelete,
    Input,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivePanel {
    Left,
    Right,
}

/// The one dashboard upload currently on screen.
pub struct ActiveUpload {
    pub task: UploadTask,
    pub bucket: String,
    pub key: String,
    pub file_name: String,
    pub last_progress: f64,
}

pub struct App {
    pub config_manager: ConfigManager,
    pub store: Arc<dyn ObjectStore>,
    pub uploads: UploadController,

    pub screen: Screen,
    pub prev_screen: Option<Screen>,
    pub left_panel: Panel,
    pub right_panel: Panel,
    pub active_panel: ActivePanel,
    pub should_quit: bool,
    pub app_title: String,

    // UI Messages
    pub error_message: String,
    pub success_message: String,

    // Dialog state
    pub confirm: ConfirmState,
    pub input: InputState,

    pub active_upload: Option<ActiveUpload>,
}

impl App {
    pub fn new(
        config_manager: ConfigManager,
        store: Arc<dyn ObjectStore>,
        uploads: UploadController,
    ) -> Self {
        let mut app = Self {
            config_manager,
            store,
            uploads,
            screen: Screen::Browser,
            prev_screen: None,
            left_panel: Panel::new_bucket_list(),
            right_panel: Panel::new_local_filesystem(),
            active_panel: ActivePanel::Left,
            should_quit: false,
            app_title: "bucketboard - Object Storage Dashboard".to_string(),
            error_message: String::new(),
            success_message: String::new(),
            confirm: ConfirmState::default(),
            input: InputState::default(),
            active_upload: None,
        };

        // Load local files for the right panel
        if let PanelType::LocalFilesystem { path } = &app.right_panel.panel_type {
            let path = path.clone();
            let has_parent = path.parent().is_some();
            if let Ok(files) = navigation::read_local_directory(&path) {
                app.right_panel
                    .list
                    .set_items(converters::local_files_to_items(files, has_parent));
            }
        }

        app
    }

    pub fn get_active_panel(&mut self) -> &mut Panel {
        match self.active_panel {
            ActivePanel::Left => &mut self.left_panel,
            ActivePanel::Right => &mut self.right_panel,
        }
    }

    pub fn get_inactive_panel(&self) -> &Panel {
        match self.active_panel {
            ActivePanel::Left => &self.right_panel,
            ActivePanel::Right => &self.left_panel,
        }
    }

    pub fn show_error(&mut self, message: &str) {
        self.error_message = message.to_string();
    }

    pub fn show_success(&mut self, message: &str) {
        self.success_message = message.to_string();
    }

    pub fn switch_panel(&mut self) {
        self.active_panel = match self.active_panel {
            ActivePanel::Left => ActivePanel::Right,
            ActivePanel::Right => ActivePanel::Left,
        };
    }

    pub fn go_back(&mut self) {
        if let Some(prev) = self.prev_screen.take() {
            self.screen = prev;
        } else {
            self.screen = Screen::Browser;
        }
    }
}
