//! List command implementation.
//!
//! Fetches one page of recipes, optionally filtered, and prints it.

use recipe_api_rs::client::RecipeClient;
use recipe_browser_rs::{Action, Browser, FilterField, Session, TriggerPolicy};
use tracing::debug;

use super::{CommandContext, CommandError, Result, Settings};
use crate::cli::QueryArgs;
use crate::output::{format_recipes_json, format_recipes_table};

/// Options for the list command.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Filters and page as given on the command line.
    pub query: QueryArgs,
}

/// Loads the page described by `query` into a settled session.
///
/// The page count is only known after a first response, so a page other
/// than 1 is reached in two steps: page 1 is fetched, then the requested
/// page is clamped against the real total and fetched. A page that turns
/// out to be past the end is refetched by the session itself.
///
/// # Errors
///
/// Returns [`CommandError::Fetch`] if the final request failed.
pub(crate) async fn load_page(
    settings: &Settings,
    client: RecipeClient,
    query: &QueryArgs,
) -> Result<Session<RecipeClient>> {
    let limit = query.limit.unwrap_or(settings.page_size);
    let mut browser = Browser::new(TriggerPolicy::Immediate, limit);
    let inputs = query.filter_inputs();
    for field in FilterField::ALL {
        browser.dispatch(Action::SetFilter(field, inputs.get(field).to_string()))?;
    }

    let mut session = Session::new(browser, client);
    session.sync();
    session.run_until_idle().await;
    ensure_loaded(&session)?;

    if query.page > 1 {
        debug!(page = query.page, "seeking requested page");
        session.dispatch(Action::SetPage(query.page))?;
        session.run_until_idle().await;
        ensure_loaded(&session)?;
    }

    Ok(session)
}

fn ensure_loaded(session: &Session<RecipeClient>) -> Result<()> {
    match session.browser().view().failure() {
        Some(failure) => Err(CommandError::Fetch(failure.clone())),
        None => Ok(()),
    }
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error if the request fails or the output cannot be written.
pub async fn execute(
    ctx: &CommandContext,
    settings: &Settings,
    client: RecipeClient,
    opts: &ListOptions,
) -> Result<()> {
    let session = load_page(settings, client, &opts.query).await?;

    if ctx.json_output {
        println!("{}", format_recipes_json(session.browser())?);
    } else if !ctx.quiet {
        print!("{}", format_recipes_table(session.browser(), ctx.use_colors));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use recipe_browser_rs::ViewState;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(server: &MockServer) -> Settings {
        Settings {
            api_base: server.uri(),
            page_size: 15,
            trigger: TriggerPolicy::Immediate,
            request_timeout: Duration::from_secs(5),
            max_retries: 0,
        }
    }

    fn page(page: u32, limit: u32, total: u64, titles: &[&str]) -> serde_json::Value {
        let data: Vec<_> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| json!({"id": i + 1, "title": t}))
            .collect();
        json!({"page": page, "limit": limit, "total": total, "data": data})
    }

    #[tokio::test]
    async fn test_load_first_page_with_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/search"))
            .and(query_param("cuisine", "Thai"))
            .and(query_param("calories", "<400"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(1, 20, 2, &["Larb", "Som Tam"])))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings(&server);
        let query = QueryArgs {
            cuisine: Some("Thai".into()),
            calories: Some("<400".into()),
            limit: Some(20),
            page: 1,
            ..QueryArgs::default()
        };
        let session = load_page(&settings, settings.client().unwrap(), &query)
            .await
            .unwrap();

        match session.browser().state() {
            ViewState::Rows(rows) => assert_eq!(rows.len(), 2),
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_later_page_is_clamped_to_total() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(1, 15, 47, &["A"])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/recipes"))
            .and(query_param("page", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(4, 15, 47, &["Z"])))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings(&server);
        let query = QueryArgs {
            page: 10,
            ..QueryArgs::default()
        };
        let session = load_page(&settings, settings.client().unwrap(), &query)
            .await
            .unwrap();

        assert_eq!(session.browser().pagination().page(), 4);
        assert_eq!(session.browser().view().rows()[0].title, "Z");
    }

    #[tokio::test]
    async fn test_load_failure_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let settings = settings(&server);
        let err = load_page(&settings, settings.client().unwrap(), &QueryArgs::default())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "FETCH_ERROR");
        assert!(err.to_string().contains("maintenance"));
    }
}
