#![allow(missing_docs)]

use injector::{Container, Injectable, Shared};

#[derive(Clone, Default, Injectable)]
struct Settings {
    #[inject("retries")]
    retries: i32,
    #[inject(auto)]
    name: Option<String>,
    #[inject("auto")]
    timeout: std::time::Duration,
    untouched: bool,
}

#[derive(Clone, Injectable)]
struct Marker;

fn main() {
    let mut container = Container::new();
    container.register_named("retries", 3_i32);
    container.register(String::from("billing"));
    container.register(std::time::Duration::from_secs(1));
    container.register_named("marker", Marker);

    let settings = Shared::new(Settings::default());
    container.register_named("settings", settings.clone());

    assert_eq!(settings.read().retries, 3);
    assert!(!settings.read().untouched);
}
