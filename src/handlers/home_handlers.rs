use std::collections::BTreeMap;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::binding::{self, BinderRegistry, CompositeValueProvider, FormValueProvider};
use crate::config::Settings;
use crate::errors::{AppError, render};
use crate::models::Model;
use crate::templates_structs::{
    AboutTemplate, ContactTemplate, CreateTemplate, EditTemplate, IndexTemplate, PageContext,
};

pub const ABOUT_MESSAGE: &str = "Your application description page.";
pub const CONTACT_MESSAGE: &str = "Your contact page.";

/// Empty rows offered by the Create form (`[0].Value` .. `[2].Value`).
const CREATE_SLOTS: usize = 3;
/// Keys offered by the Edit form (`[x].Value` ..).
const EDIT_KEYS: [&str; 3] = ["x", "y", "z"];

/// Form body first, then query string.
fn request_values(req: &HttpRequest, body: &str) -> Result<CompositeValueProvider, AppError> {
    let form = FormValueProvider::from_urlencoded(body)?;
    let query = FormValueProvider::from_urlencoded(req.query_string())?;
    Ok(CompositeValueProvider::new(vec![Box::new(form), Box::new(query)]))
}

fn create_page(settings: &Settings, list: Option<Vec<Model>>) -> CreateTemplate {
    CreateTemplate {
        ctx: PageContext::build(settings, "Create"),
        list,
        slots: (0..CREATE_SLOTS).collect(),
    }
}

fn edit_page(settings: &Settings, dictionary: Option<BTreeMap<String, Model>>) -> EditTemplate {
    EditTemplate {
        ctx: PageContext::build(settings, "Edit"),
        dictionary,
        keys: EDIT_KEYS.iter().map(|k| k.to_string()).collect(),
    }
}

/// GET / , /Home, /Home/Index
pub async fn index(settings: web::Data<Settings>) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&settings, "Home Page");
    render(IndexTemplate { ctx })
}

pub async fn about(settings: web::Data<Settings>) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&settings, "About");
    render(AboutTemplate { ctx, message: ABOUT_MESSAGE.to_string() })
}

pub async fn contact(settings: web::Data<Settings>) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&settings, "Contact");
    render(ContactTemplate { ctx, message: CONTACT_MESSAGE.to_string() })
}

/// GET /Home/Create — empty list form.
pub async fn create_form(settings: web::Data<Settings>) -> Result<HttpResponse, AppError> {
    render(create_page(&settings, None))
}

/// POST /Home/Create — bind `list` and show what was bound.
pub async fn create(
    req: HttpRequest,
    settings: web::Data<Settings>,
    registry: web::Data<BinderRegistry>,
    body: String,
) -> Result<HttpResponse, AppError> {
    let values = request_values(&req, &body)?;
    let list = binding::bind_field_list(&registry, "list", &values)?;
    log::info!("Create: bound {} field(s)", list.len());
    render(create_page(&settings, Some(list)))
}

/// GET /Home/Edit — empty keyed form.
pub async fn edit_form(settings: web::Data<Settings>) -> Result<HttpResponse, AppError> {
    render(edit_page(&settings, None))
}

/// POST /Home/Edit — bind `dictionary` and show what was bound.
pub async fn edit(
    req: HttpRequest,
    settings: web::Data<Settings>,
    registry: web::Data<BinderRegistry>,
    body: String,
) -> Result<HttpResponse, AppError> {
    let values = request_values(&req, &body)?;
    let dictionary = binding::bind_field_map(&registry, "dictionary", &values)?;
    log::info!("Edit: bound {} field(s)", dictionary.len());
    render(edit_page(&settings, Some(dictionary)))
}
