// tests/common/mod.rs
// Shared helpers for the integration suites.

#![allow(dead_code)]

use std::path::PathBuf;

use inp::cards::{Card, CellCard, DataCard, SurfaceCard};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn surface(text: &str) -> SurfaceCard {
    SurfaceCard::parse(text).unwrap_or_else(|e| panic!("{text:?} should parse: {e}"))
}

pub fn cell(text: &str) -> CellCard {
    CellCard::parse(text).unwrap_or_else(|e| panic!("{text:?} should parse: {e}"))
}

pub fn data(text: &str) -> DataCard {
    DataCard::parse(text).unwrap_or_else(|e| panic!("{text:?} should parse: {e}"))
}
