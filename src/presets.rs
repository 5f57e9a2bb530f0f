//! Ready-made scrape configurations

use crate::browser::InteractionStep;
use crate::error::Result;
use crate::extract::{FieldSpec, ScopeSpec};
use crate::scrape::ScrapeConfig;

/// Province forecast pages, one path segment per city
pub const WEATHER_BASE_URL: &str = "https://theweathernetwork.com/ca/weather/alberta/";

/// News front page with the search box
pub const NEWS_URL: &str = "https://www.cbc.ca/news";

/// Scope names of the weekly forecast, in output order
pub const WEEKDAYS: [&str; 7] = ["sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];

/// Append a path segment to a base URL with exactly one `/` between them
pub fn make_url(base: &str, segment: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let segment = segment.trim().trim_start_matches('/');

    if segment.is_empty() {
        return base.to_string();
    }

    format!("{}/{}", base, segment)
}

/// Seven-day forecast for an Alberta city slug such as `edmonton`
///
/// Each weekday column yields `day`, `forecast`, `temperature` and `pop`
/// (probability of precipitation).
pub fn weather_forecast(city: &str) -> Result<ScrapeConfig> {
    let scopes = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, day)| ScopeSpec::new(*day, &format!("div[class='wxColumn wxColumn-seven dotw_{}']", i)))
        .collect::<Result<Vec<_>>>()?;

    let fields = vec![
        FieldSpec::first("day", "span[class='day']")?,
        FieldSpec::first("forecast", "span[class='wx_description daytime']")?,
        FieldSpec::first("temperature", "span[class='wxperiod_temp daytime']")?,
        FieldSpec::first("pop", "span[class='wxObs daytime']")?,
    ];

    Ok(ScrapeConfig::new(make_url(WEATHER_BASE_URL, &city.to_lowercase()), scopes, fields))
}

/// First article returned by the news site search for `term`
pub fn news_article(term: &str) -> Result<ScrapeConfig> {
    let steps = vec![
        InteractionStep::click_by_id("searchButton"),
        InteractionStep::type_into_by_id("gn-search", term),
        InteractionStep::click_by_class("searchButton"),
        InteractionStep::click_by_class("card-content"),
    ];

    let scopes = vec![ScopeSpec::new("article", "body")?];

    let fields = vec![
        FieldSpec::first("title", "h1[class='detailHeadline']")?,
        FieldSpec::first("subtitle", "h2[class='deck']")?,
        FieldSpec::all("body", "div[class='story'] > span > p")?,
    ];

    Ok(ScrapeConfig::new(NEWS_URL, scopes, fields).with_steps(steps))
}
