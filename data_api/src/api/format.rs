//! Response shapes: plain-text listings, pretty-printed record arrays, and the help page.

use crate::api::error::ApiError;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const LOAD_CONFIRMATION: &str = "Data has been loaded from the files.\n";

const HELP_PATH_WIDTH: usize = 67;

enum HelpLine {
    Heading(&'static str),
    Route(&'static str, &'static str, &'static str),
}

const HELP: &[HelpLine] = &[
    HelpLine::Route("/", "GET", "interaction information is outputted"),
    HelpLine::Route("/load_data", "POST", "loads the data from file into memory"),
    HelpLine::Heading("Routes to query positional and velocity data:"),
    HelpLine::Route("/epochs", "GET", "lists all epochs"),
    HelpLine::Route("/epochs/<epoch>", "GET", "lists all information about a specific epoch"),
    HelpLine::Heading("Routes to query ISS sighting data"),
    HelpLine::Route("/countries", "GET", "lists all countries"),
    HelpLine::Route(
        "/countries/<country>",
        "GET",
        "lists all information about a specific country",
    ),
    HelpLine::Route(
        "/countries/<country>/regions",
        "GET",
        "lists all regions found in a given country",
    ),
    HelpLine::Route(
        "/countries/<country>/regions/<region>",
        "GET",
        "lists all information about a specific region",
    ),
    HelpLine::Route(
        "/countries/<country>/regions/<region>/cities",
        "GET",
        "lists all cities found in a given region",
    ),
    HelpLine::Route(
        "/countries/<country>/regions/<region>/cities/<city>",
        "GET",
        "lists all information about a specific city",
    ),
];

pub fn help_text() -> String {
    let mut text = String::from("ISS Tracker\n");
    for line in HELP {
        match line {
            HelpLine::Heading(heading) => {
                text.push_str(heading);
                text.push_str("\n\n");
            }
            HelpLine::Route(path, method, description) => {
                text.push_str(&format!(
                    "{path:<width$}({method}) {description}\n",
                    width = HELP_PATH_WIDTH
                ));
            }
        }
    }
    text
}

/// One epoch per line, each terminated by a newline.
pub fn epoch_listing<'a>(epochs: impl Iterator<Item = &'a str>) -> String {
    epochs.fold(String::new(), |mut listing, epoch| {
        listing.push_str(epoch);
        listing.push('\n');
        listing
    })
}

/// Two-space indented JSON followed by a newline.
pub fn pretty_json<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_route_with_method() {
        let help = help_text();
        assert!(help.starts_with("ISS Tracker\n"));
        assert!(help.contains(
            "/load_data                                                         (POST) loads the data from file into memory\n"
        ));
        assert!(help.contains("Routes to query positional and velocity data:\n\n/epochs "));
        assert!(help.contains("Routes to query ISS sighting data\n\n/countries "));
        assert_eq!(help.matches("(GET)").count(), 9);
    }

    #[test]
    fn epoch_listing_terminates_every_line() {
        assert_eq!(epoch_listing(["a", "b"].into_iter()), "a\nb\n");
        assert_eq!(epoch_listing(std::iter::empty()), "");
    }
}
