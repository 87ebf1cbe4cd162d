//! HTML rendering of the chat page.

use crate::chat::PageView;
use minijinja::{Environment, context};

const INDEX: &str = "index.html";

/// The compiled page templates.
///
/// Templates ending in `.html` are auto-escaped, so user text is safe to
/// interpolate.
pub struct Page {
    env: Environment<'static>,
}

impl Page {
    /// Compile the bundled templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    /// Render the full page for `view`.
    pub fn render(&self, view: &PageView) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(context! { page => view })
    }
}
