//! Steps for the sport site search feature.
use cucumber::{given, then, when};

use crate::worlds::UiWorld;

#[given("I am on the search page")]
async fn on_search_page(world: &mut UiWorld) {
    world.open_search_page().await.unwrap_or_else(|e| panic!("{e}"));
}

#[when(expr = "I enter {string} in the search field")]
async fn enter_term(world: &mut UiWorld, term: String) {
    world
        .enter_search_term(&term)
        .await
        .unwrap_or_else(|e| panic!("{e}"));
}

#[when("I submit the search")]
async fn submit(world: &mut UiWorld) {
    world.submit_search().await.unwrap_or_else(|e| panic!("{e}"));
}

#[then(expr = "I should see at least {int} search results")]
async fn minimum_results(world: &mut UiWorld, minimum: usize) {
    world
        .assert_result_count(minimum)
        .await
        .unwrap_or_else(|e| panic!("{e}"));
}

#[then(expr = "all results should be relevant to {string}")]
async fn results_relevant(world: &mut UiWorld, term: String) {
    world
        .assert_results_relevant(&term)
        .await
        .unwrap_or_else(|e| panic!("{e}"));
}
