#![allow(missing_docs, dead_code)]

use injector::Injectable;

#[derive(Clone, Injectable)]
enum Kind {
    A,
}

#[derive(Clone, Injectable)]
struct Tuple(u8);

#[derive(Clone, Injectable)]
struct UnknownKeyword {
    #[inject(logger)]
    logger: String,
}

#[derive(Clone, Injectable)]
struct EmptyName {
    #[inject("")]
    name: String,
}

#[derive(Clone, Injectable)]
struct Duplicate {
    #[inject("a")]
    #[inject("b")]
    logger: String,
}

fn main() {}
