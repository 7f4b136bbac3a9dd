use askama::Template;

/// Landing page of the full configuration.
#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub count: usize,
}
