//! Route Finder
//!
//! Filters the route table by origin/destination country, with optional
//! port or airport name filters. Pure: no hidden state, same answer every call.

use serde::Serialize;

use crate::catalog::ReferenceData;
use crate::model::{RouteRecord, TransportMode};

/// Search criteria
#[derive(Clone, Debug, Default)]
pub struct RouteQuery {
    pub origin_country: String,
    pub destination_country: String,

    /// Case-insensitive substring of the origin port/airport name
    pub origin_port: Option<String>,

    /// Case-insensitive substring of the destination port/airport name
    pub destination_port: Option<String>,
}

impl RouteQuery {
    pub fn new(origin_country: impl Into<String>, destination_country: impl Into<String>) -> Self {
        Self {
            origin_country: origin_country.into(),
            destination_country: destination_country.into(),
            ..Default::default()
        }
    }

    pub fn origin_port(mut self, port: impl Into<String>) -> Self {
        self.origin_port = Some(port.into());
        self
    }

    pub fn destination_port(mut self, port: impl Into<String>) -> Self {
        self.destination_port = Some(port.into());
        self
    }

    fn matches(&self, route: &RouteRecord) -> bool {
        route.origin.country.eq_ignore_ascii_case(self.origin_country.trim())
            && route
                .destination
                .country
                .eq_ignore_ascii_case(self.destination_country.trim())
            && name_matches(&route.origin.name, self.origin_port.as_deref())
            && name_matches(&route.destination.name, self.destination_port.as_deref())
    }
}

/// Outcome of a search; an empty lane is not an error
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "routes", rename_all = "snake_case")]
pub enum RouteSearch {
    Found(Vec<RouteRecord>),
    NotFound,
}

impl RouteSearch {
    pub fn routes(&self) -> &[RouteRecord] {
        match self {
            RouteSearch::Found(routes) => routes,
            RouteSearch::NotFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, RouteSearch::Found(_))
    }

    /// Transit time of the first matching route
    pub fn first_transit_days(&self) -> Option<u32> {
        self.routes().first().map(|r| r.transit_time_days)
    }
}

/// All routes of `mode` matching `query`, in table order
pub fn find_routes(data: &ReferenceData, mode: TransportMode, query: &RouteQuery) -> RouteSearch {
    let routes: Vec<RouteRecord> = data
        .routes
        .for_mode(mode)
        .iter()
        .filter(|route| query.matches(route))
        .cloned()
        .collect();

    if routes.is_empty() {
        RouteSearch::NotFound
    } else {
        RouteSearch::Found(routes)
    }
}

fn name_matches(name: &str, filter: Option<&str>) -> bool {
    match filter.map(str::trim).filter(|f| !f.is_empty()) {
        Some(filter) => name.to_lowercase().contains(&filter.to_lowercase()),
        None => true,
    }
}
