//! Web search tool
//!
//! Search goes through a [`SearchBackend`] trait so the tool logic (empty
//! query guard, cascading fallbacks, snippet truncation) is testable without
//! a network. The production backend scrapes the DuckDuckGo HTML endpoint,
//! which needs no API key for a local assistant.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::args::ToolArgs;
use super::context::ToolContext;
use super::registry::RegistryBuilder;
use super::schema::{ParamSpec, ToolSchema};

/// Snippets longer than this get truncated for speech
const MAX_SNIPPET_CHARS: usize = 200;

/// Fallback region when the configured one returns nothing
const FALLBACK_REGION: &str = "us-en";

/// One web search hit
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Result URL
    pub url: String,
    /// Result snippet/description
    pub snippet: String,
}

/// A web search provider
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search. `timelimit` is one of d/w/m/y when present.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        timelimit: Option<&str>,
        region: &str,
    ) -> Result<Vec<SearchResult>>;
}

/// DuckDuckGo HTML endpoint backend
pub struct DuckDuckGoBackend {
    client: reqwest::Client,
}

impl DuckDuckGoBackend {
    /// Create a backend with the given per-request timeout
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("murmur/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Pull title, link, and snippet out of the result page markup
    fn parse_results(html: &str, max_results: usize) -> Vec<SearchResult> {
        // Selectors are static and known-valid
        let result_sel = Selector::parse("div.result").expect("valid selector");
        let title_sel = Selector::parse("a.result__a").expect("valid selector");
        let snippet_sel = Selector::parse("a.result__snippet").expect("valid selector");

        let document = Html::parse_document(html);
        let mut results = Vec::new();

        for element in document.select(&result_sel) {
            if results.len() >= max_results {
                break;
            }
            let Some(anchor) = element.select(&title_sel).next() else {
                continue;
            };
            let title = anchor.text().collect::<String>().trim().to_string();
            let snippet = element
                .select(&snippet_sel)
                .next()
                .map(|s| s.text().collect::<String>().trim().to_string())
                .unwrap_or_default();
            if title.is_empty() || snippet.is_empty() {
                continue;
            }
            let url = anchor
                .value()
                .attr("href")
                .map(decode_redirect)
                .unwrap_or_default();
            results.push(SearchResult { title, url, snippet });
        }
        results
    }
}

/// DuckDuckGo wraps result links in a redirect carrying the real URL in the
/// `uddg` query parameter
fn decode_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    if let Ok(parsed) = url::Url::parse(&absolute) {
        if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
            return target.to_string();
        }
    }
    absolute
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        timelimit: Option<&str>,
        region: &str,
    ) -> Result<Vec<SearchResult>> {
        let mut form: Vec<(&str, &str)> = vec![("q", query), ("kl", region)];
        if let Some(limit) = timelimit {
            form.push(("df", limit));
        }

        let response = self
            .client
            .post("https://html.duckduckgo.com/html/")
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;
        Ok(Self::parse_results(&body, max_results))
    }
}

/// Register the web search tool
pub fn register(builder: &mut RegistryBuilder) {
    builder.register(
        ToolSchema::new(
            "web_search",
            "Search the internet for current information like weather, news, sports scores, \
             or stocks.",
            vec![
                ParamSpec::string("query", "Search query"),
                ParamSpec::string(
                    "timelimit",
                    "Time limit: 'd' (day), 'w' (week), 'm' (month), 'y' (year). Use 'd' or \
                     'w' for recent news.",
                )
                .one_of(&["d", "w", "m", "y"]),
            ],
            &["query"],
        ),
        Box::new(|args, ctx| Box::pin(web_search(args, ctx))),
    );
}

async fn web_search(args: ToolArgs, ctx: Arc<ToolContext>) -> Result<String> {
    let query = args.str("query").unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Ok("No search query provided.".to_string());
    }

    // Out-of-range enum values are ignored rather than rejected; the model
    // sometimes invents values like "recent"
    let timelimit = args
        .str("timelimit")
        .filter(|t| matches!(*t, "d" | "w" | "m" | "y"))
        .map(str::to_string);

    info!(%query, ?timelimit, region = %ctx.search_region, "searching");

    let results = search_with_fallbacks(&ctx, &query, timelimit.as_deref())
        .await
        .map_err(|err| Error::Search(err.to_string()))?;
    if results.is_empty() {
        return Ok(format!("No search results found for: {query}"));
    }

    let mut out = vec![format!("Search results for: {query}\n")];
    for (i, result) in results.iter().enumerate() {
        let snippet = truncate_snippet(&result.snippet);
        out.push(format!("{}. {}\n   {snippet}\n", i + 1, result.title));
    }
    Ok(out.join("\n"))
}

/// Cascading fallback: as asked, then without the time restriction, then in
/// the default region
async fn search_with_fallbacks(
    ctx: &ToolContext,
    query: &str,
    timelimit: Option<&str>,
) -> Result<Vec<SearchResult>> {
    let max = ctx.search_max_results;
    let region = ctx.search_region.as_str();

    let mut results = ctx.search.search(query, max, timelimit, region).await?;

    if results.is_empty() && timelimit.is_some() {
        debug!("no results with timelimit, retrying without");
        results = ctx.search.search(query, max, None, region).await?;
    }
    if results.is_empty() && region != FALLBACK_REGION {
        debug!("no results in region, retrying with '{FALLBACK_REGION}'");
        results = ctx.search.search(query, max, None, FALLBACK_REGION).await?;
    }
    Ok(results)
}

fn truncate_snippet(snippet: &str) -> String {
    if snippet.chars().count() <= MAX_SNIPPET_CHARS {
        return snippet.to_string();
    }
    let head: String = snippet.chars().take(MAX_SNIPPET_CHARS - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_snippets() {
        let long = "x".repeat(300);
        let truncated = truncate_snippet(&long);
        assert_eq!(truncated.chars().count(), MAX_SNIPPET_CHARS);
        assert!(truncated.ends_with("..."));

        let short = "short snippet";
        assert_eq!(truncate_snippet(short), short);
    }

    #[test]
    fn decodes_redirect_links() {
        let href = "//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fpage&rut=abc";
        assert_eq!(decode_redirect(href), "https://example.org/page");
        // Plain links pass through
        assert_eq!(decode_redirect("https://direct.example"), "https://direct.example");
    }

    #[test]
    fn parses_result_markup() {
        let html = r#"
            <html><body>
              <div class="result">
                <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fa.example">First Hit</a>
                <a class="result__snippet">Something relevant about the query.</a>
              </div>
              <div class="result">
                <a class="result__a" href="https://b.example">Second Hit</a>
                <a class="result__snippet">More context here.</a>
              </div>
              <div class="result">
                <a class="result__a" href="https://c.example">No Snippet</a>
              </div>
            </body></html>
        "#;
        let results = DuckDuckGoBackend::parse_results(html, 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "First Hit");
        assert_eq!(results[0].url, "https://a.example");
        assert_eq!(results[1].snippet, "More context here.");
    }

    #[test]
    fn parse_respects_max_results() {
        let mut html = String::from("<html><body>");
        for i in 0..10 {
            html.push_str(&format!(
                r#"<div class="result">
                     <a class="result__a" href="https://{i}.example">Hit {i}</a>
                     <a class="result__snippet">Snippet {i}</a>
                   </div>"#
            ));
        }
        html.push_str("</body></html>");
        let results = DuckDuckGoBackend::parse_results(&html, 3);
        assert_eq!(results.len(), 3);
    }
}
