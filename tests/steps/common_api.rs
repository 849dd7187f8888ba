//! Steps shared by every countries API scenario.
use cucumber::{given, then};

use crate::worlds::ApiWorld;

#[given("the countries API endpoint is available")]
#[given("the API endpoint is available")]
async fn endpoint_available(world: &mut ApiWorld) {
    world
        .check_endpoint_available()
        .await
        .unwrap_or_else(|e| panic!("{e}"));
}

#[then(expr = "the response status code should be {int}")]
#[then(expr = "the countries API response status code should be {int}")]
fn status_code(world: &mut ApiWorld, expected: u16) {
    world.assert_status(expected).unwrap_or_else(|e| panic!("{e}"));
}

#[then("the response should be valid JSON")]
#[then("the countries API response should be valid JSON")]
fn valid_json(world: &mut ApiWorld) {
    world.parse_json().unwrap_or_else(|e| panic!("{e}"));
}
