//! Steps for the country-count validation feature.
use cucumber::{then, when};

use crate::worlds::ApiWorld;

#[when("I retrieve the list of all countries")]
async fn retrieve_all(world: &mut ApiWorld) {
    world.fetch_all().await.unwrap_or_else(|e| panic!("{e}"));
}

#[then("I should verify the number of countries matches the expected count")]
fn verify_counts(world: &mut ApiWorld) {
    world.verify_counts().unwrap_or_else(|e| panic!("{e}"));
}

#[then("I should print the country count results in the test report")]
fn report_counts(world: &mut ApiWorld) {
    world.report_counts().unwrap_or_else(|e| panic!("{e}"));
}
