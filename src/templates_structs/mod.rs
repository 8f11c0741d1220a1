// Template context structures for Askama templates.

use chrono::{Datelike, Local};

use crate::config::Settings;

/// Common context shared by all pages.
/// Templates access these as `ctx.title`, `ctx.app_name`, etc.
pub struct PageContext {
    pub title: String,
    pub app_name: String,
    pub year: i32,
}

impl PageContext {
    pub fn build(settings: &Settings, title: &str) -> Self {
        Self {
            title: title.to_string(),
            app_name: settings.app_name.clone(),
            year: Local::now().year(),
        }
    }
}

mod home;
mod errors;

pub use self::home::{IndexTemplate, AboutTemplate, ContactTemplate, CreateTemplate, EditTemplate};
pub use self::errors::{ErrorTemplate, DeveloperErrorTemplate, NotFoundTemplate};
