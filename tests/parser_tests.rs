// tests/parser_tests.rs

mod common;

use inp::cards::{Card, CellBody, Data, Geometry, Surface, SurfaceCard};
use inp::grammar::{dispatch, Grammar};
use inp::syntax::preprocess;
use inp::types::{Notation, Primitive, Real, Tuple, Zaid};
use inp::ErrorKind;

use common::{cell, data, surface};

// ---
// Lexical primitives
// ---

#[test]
fn test_real_notation_is_preserved() {
    let shorthand = Real::from_text("1.5+3").unwrap();
    assert_eq!(shorthand.value(), 1500.0);
    assert_eq!(shorthand.notation(), Notation::Shorthand);
    assert_eq!(shorthand.to_text(), "1.5+3");

    let exponent = Real::from_text("1.5e3").unwrap();
    assert_eq!(exponent.value(), 1500.0);
    assert_eq!(exponent.to_text(), "1.5e3");
    assert_eq!(shorthand, exponent);
}

#[test]
fn test_malformed_tokens_are_syntax_errors() {
    assert!(Real::from_text("1.5.3").unwrap_err().is_syntax());
    assert!(Zaid::from_text("abc").unwrap_err().is_syntax());
    assert!(Tuple::<Real>::from_text("").is_err());
}

// ---
// Preprocessor
// ---

#[test]
fn test_comment_positional_fidelity() {
    let line = preprocess("kw a b $ note\n     c d $ note2");
    assert_eq!(line.text, "kw a b c d");
    assert_eq!(line.comment_texts(), vec![" note", " note2"]);
    assert_eq!(line.comments[1].line, 1);
}

// ---
// Dispatch
// ---

#[test]
fn test_px_end_to_end() {
    let surface = Surface::from_text("px 1.5").unwrap();
    let Surface::PlaneX(plane) = &surface else {
        panic!("expected plane normal to x, got {surface:?}");
    };
    assert_eq!(plane.d().value(), 1.5);
    assert_eq!(surface.label(), "plane normal to x");
    assert_eq!(surface.to_text(), "px 1.5");
}

#[test]
fn test_same_keyword_disambiguated_by_arity() {
    for _ in 0..3 {
        assert!(matches!(Surface::from_text("p 0 0 1 4").unwrap(), Surface::Plane(_)));
        assert!(matches!(
            Surface::from_text("p 0 0 0 1 0 0 0 1 0").unwrap(),
            Surface::PlanePoints(_)
        ));
    }
}

#[test]
fn test_longest_keyword_wins() {
    assert!(matches!(Surface::from_text("so 2").unwrap(), Surface::SphereOrigin(_)));
    assert!(matches!(Surface::from_text("s 0 0 0 2").unwrap(), Surface::Sphere(_)));
    assert!(matches!(data("mode n").data(), Data::Mode(_)));
    assert!(matches!(data("m1 1001 1").data(), Data::Material(_)));
}

#[test]
fn test_keywords_ignore_case() {
    assert_eq!(Surface::from_text("C/Z 1 2 3").unwrap().to_text(), "c/z 1 2 3");
    assert_eq!(data("KCODE 500").to_text(), "kcode 500");
}

#[test]
fn test_matching_is_anchored() {
    let error = Surface::from_text("px 1 2").unwrap_err();
    assert!(error.is_syntax());
    assert!(Surface::from_text("xpx 1").is_err());
}

#[test]
fn test_unknown_keyword_lists_candidates() {
    let error = dispatch::parse::<Surface>("c/q 1 2 3").unwrap_err();
    assert!(matches!(error.kind, ErrorKind::NoMatchingGrammar { .. }));
    assert_eq!(error.code(), "inp::syntax::surface::no_matching_grammar");

    let error = dispatch::parse::<Surface>("px").unwrap_err();
    let help = error.diagnostic_info.help.unwrap_or_default();
    assert!(help.contains("px <d: real>"), "help was {help:?}");
}

// ---
// Cards
// ---

#[test]
fn test_surface_card_metadata() {
    let card = surface("+4 -2 sph 0 0 0 10");
    assert_eq!(card.number().value(), 4);
    assert_eq!(card.transform().map(|t| t.value()), Some(-2));
    assert_eq!(card.to_text(), "+4 -2 sph 0 0 0 10");
}

#[test]
fn test_cell_geometry_tree() {
    let card = cell("7 0 (-1 2):#3 #(4 -5) u=2");
    let CellBody::Explicit(body) = card.body() else {
        panic!("expected explicit cell");
    };
    let Geometry::Union(parts) = body.geometry() else {
        panic!("expected union, got {:?}", body.geometry());
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(body.geometry().surfaces().len(), 4);
    assert_eq!(card.to_text(), "7 0 (-1 2):#3 #(4 -5) u=2");
}

#[test]
fn test_continuation_lines_join_before_dispatch() {
    let card = SurfaceCard::parse("3 gq 1 1 1 &\n  0 0 0 0 0 0 -4 $ ellipsoid").unwrap();
    assert!(matches!(card.surface(), Surface::GeneralQuadric(_)));
    assert_eq!(card.trivia().comments.len(), 1);
}

#[test]
fn test_semantics_error_stops_dispatch() {
    let error = SurfaceCard::parse("1 so 0").unwrap_err();
    assert!(error.is_semantics());
    assert_eq!(error.kind.offending(), Some("0"));
}
