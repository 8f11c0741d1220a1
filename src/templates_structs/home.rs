use std::collections::BTreeMap;

use askama::Template;

use crate::models::Model;
use super::PageContext;

#[derive(Template)]
#[template(path = "home/index.html")]
pub struct IndexTemplate {
    pub ctx: PageContext,
}

#[derive(Template)]
#[template(path = "home/about.html")]
pub struct AboutTemplate {
    pub ctx: PageContext,
    pub message: String,
}

#[derive(Template)]
#[template(path = "home/contact.html")]
pub struct ContactTemplate {
    pub ctx: PageContext,
    pub message: String,
}

/// List entry form. `list` is `None` until something has been posted.
#[derive(Template)]
#[template(path = "home/create.html")]
pub struct CreateTemplate {
    pub ctx: PageContext,
    pub list: Option<Vec<Model>>,
    pub slots: Vec<usize>,
}

/// Keyed entry form. `dictionary` is `None` until something has been posted.
#[derive(Template)]
#[template(path = "home/edit.html")]
pub struct EditTemplate {
    pub ctx: PageContext,
    pub dictionary: Option<BTreeMap<String, Model>>,
    pub keys: Vec<String>,
}
