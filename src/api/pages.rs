//! HTML pages

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use minijinja::{context, Environment};

use super::error::ApiError;
use super::state::AppState;
use crate::utils::server_time;

const HOME_TEMPLATE: &str = "home.html";
const STREAM_TEMPLATE: &str = "stream.html";

const HOME_TEXT: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Job Stream</title>
  </head>
  <body>
    <h1>Hello from the job stream server!</h1>
    <ul>
      <li>{{ time }}</li>
      <li><a href="./stream">Watch the job</a></li>
    </ul>
  </body>
</html>
"#;

const STREAM_PAGE_TEXT: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Streaming results</title>
  </head>
  <body>
    <h1>Streaming results</h1>
    <h3>Server time: {{ time }}</h3>
    <ul>
    </ul>
  <script>
const list = document.querySelector('ul');
const decoder = new TextDecoder("utf-8");

function addItem(text) {
  const item = document.createElement('li');
  item.textContent = text;
  list.appendChild(item);
}

fetch('./stream-data')
.then(response => {
  const reader = response.body.getReader();
  let pending = "";
  function pump() {
    return reader.read().then(({ done, value }) => {
      if (done) {
        if (pending.length > 0) {
          addItem(pending);
        }
        addItem("Done!");
        return;
      }
      pending += decoder.decode(value, { stream: true });
      const parts = pending.split("\n");
      pending = parts.pop();
      for (const part of parts) {
        if (part.length > 0) {
          addItem(part);
        }
      }
      return pump();
    });
  }
  return pump();
})
.catch(err => console.error(err));
  </script>
  </body>
</html>
"#;

/// Compiled page templates
#[derive(Debug)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(HOME_TEMPLATE, HOME_TEXT)?;
        env.add_template(STREAM_TEMPLATE, STREAM_PAGE_TEXT)?;
        Ok(Self { env })
    }

    pub fn render_home(&self, time: &str) -> Result<String, minijinja::Error> {
        self.render(HOME_TEMPLATE, time)
    }

    pub fn render_stream(&self, time: &str) -> Result<String, minijinja::Error> {
        self.render(STREAM_TEMPLATE, time)
    }

    fn render(&self, name: &str, time: &str) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context! { time => time })
    }
}

/// GET / - landing page with the server time
pub async fn home_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.render_home(&server_time())?))
}

/// GET /stream - page that reads /stream-data and lists each line
pub async fn stream_page_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.render_stream(&server_time())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_render_time() {
        let pages = Pages::new().unwrap();
        let html = pages.render_home("Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
        assert!(html.contains("<li>Mon, 02 Jan 2006 15:04:05 -0700</li>"));

        let html = pages.render_stream("now").unwrap();
        assert!(html.contains("Server time: now"));
        assert!(html.contains("fetch('./stream-data')"));
    }

    #[test]
    fn test_pages_escape_values() {
        let pages = Pages::new().unwrap();
        let html = pages.render_home("<script>").unwrap();
        assert!(html.contains("&lt;script&gt;"));
    }
}
