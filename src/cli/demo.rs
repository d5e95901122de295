//! Built-in sample script and document

use super::{CliError, run::transform_json};
use crate::parse_script;

pub const SAMPLE_DOCUMENT: &str = r#"{"firstName":"john","lastName":"doe","weight":75,"height":1.75,"favoriteFoods":["pizza","pasta","sushi"],"favoriteColors":["red","blue","green"],"place":"New York/USA","friends":[{"name":"Alice"},{"name":"Bob"}]}"#;

pub const SAMPLE_SCRIPT: &str = "SET _tempName = concatenate(' ', firstName, lastName)
SET fullName = uppercase(_tempName)
SET bmi, isHealthy = bmi(weight, height)
SET favoriteFoods.0 = uppercase(favoriteFoods.0)
SET favoriteColors.# = uppercase(favoriteColors.#)
SET _city, _country = split(place, '/')
SET address.city = uppercase(_city)
SET address.country = uppercase(_country)
SET friends.#.name = uppercase(friends.#.name)";

/// Runs the sample script against the sample document
pub fn execute_demo(pretty: bool) -> Result<String, CliError> {
    let programs = parse_script(SAMPLE_SCRIPT)?;
    transform_json(&programs, SAMPLE_DOCUMENT, pretty)
}
