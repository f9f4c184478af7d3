// tests/builder_tests.rs
// Building cards from Rust values instead of text.

use inp::builder::list;
use inp::cards::cell_option::{CellImportance, Universe};
use inp::cards::data::{Material, Mode, Nps, Source, Transform};
use inp::cards::material_option::NeutronLibrary;
use inp::cards::source_option::{Energy, Position};
use inp::cards::surface::{Parallelepiped, SphereOrigin};
use inp::cards::{
    component, Card, CellCard, DataCard, ExplicitCell, Geometry, LikeCell, SurfaceCard,
    SurfacePrefix,
};
use inp::types::{Integer, Primitive, Real, Sense, SurfaceRef};
use inp::ErrorKind;

// ---
// Surfaces
// ---

#[test]
fn test_build_reflecting_box() {
    let body = Parallelepiped::builder()
        .xmin(-10)
        .xmax(10)
        .ymin(-10)
        .ymax(10)
        .zmin(-10)
        .zmax(10)
        .build()
        .unwrap();
    let card = SurfaceCard::builder()
        .prefix(Some(SurfacePrefix::Reflecting))
        .number(2)
        .surface(body)
        .build()
        .unwrap();
    assert_eq!(card.to_text(), "*2 rpp -10 10 -10 10 -10 10");
}

#[test]
fn test_builder_accepts_text_and_numbers() {
    let from_text = SphereOrigin::builder().r("1.5+3").build().unwrap();
    let from_float = SphereOrigin::builder().r(1500.0).build().unwrap();
    assert_eq!(from_text, from_float);
    assert_eq!(from_text.r().to_text(), "1.5+3");
    assert_eq!(from_float.r().to_text(), "1500");
}

#[test]
fn test_builder_rejects_invalid_values_as_semantics() {
    let error = SphereOrigin::builder().r("wide").build().unwrap_err();
    assert!(error.is_semantics());
    assert!(matches!(error.kind, ErrorKind::InvalidValue { .. }));

    let error = SphereOrigin::builder().r(-1).build().unwrap_err();
    assert_eq!(error.code(), "inp::semantics::so::out_of_range");

    let error = SphereOrigin::builder().build().unwrap_err();
    assert!(matches!(error.kind, ErrorKind::MissingField { .. }));
}

#[test]
fn test_to_builder_round_trip() {
    let card = SurfaceCard::parse("4 3 so 2").unwrap();
    let rebuilt = card.to_builder().build().unwrap();
    assert_eq!(rebuilt, card);

    let moved = card.to_builder().without_transform().build().unwrap();
    assert_eq!(moved.to_text(), "4 so 2");
    assert!(moved.transform().is_none());
}

// ---
// Cells
// ---

#[test]
fn test_build_explicit_cell() {
    let importance = CellImportance::builder()
        .designator(":n")
        .value(1)
        .build()
        .unwrap();
    let universe = Universe::builder().number(3).build().unwrap();
    let body = ExplicitCell::builder()
        .material(1)
        .density(-2.7)
        .geometry(Geometry::from_text("-1 2").unwrap())
        .options(vec![importance.into(), universe.into()])
        .build()
        .unwrap();
    let card = CellCard::builder().number(5).body(body).build().unwrap();
    assert_eq!(card.to_text(), "5 1 -2.7 -1 2 imp:n=1 u=3");

    let reparsed = CellCard::parse(&card.to_text()).unwrap();
    assert_eq!(reparsed.body(), card.body());
}

#[test]
fn test_void_cell_has_no_density() {
    let body = ExplicitCell::builder()
        .void()
        .geometry(Geometry::from_text("-1").unwrap())
        .build()
        .unwrap();
    assert!(body.is_void());
    assert!(body.density().is_none());

    let error = ExplicitCell::builder()
        .material(2)
        .geometry(Geometry::from_text("-1").unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(error.kind, ErrorKind::ConditionalField { .. }));
}

fn half_space(number: u64) -> Geometry {
    Geometry::Surface(SurfaceRef::new(Sense::Negative, number, None))
}

fn cell_with(geometry: Geometry) -> Result<CellCard, inp::InpError> {
    let body = ExplicitCell::builder().void().geometry(geometry).build()?;
    CellCard::builder().number(1).body(body).build()
}

#[test]
fn test_built_geometry_needs_operands() {
    let error = cell_with(Geometry::Union(Vec::new())).unwrap_err();
    assert!(error.is_semantics());
    assert!(matches!(error.kind, ErrorKind::InvalidValue { .. }));

    let lonely = Geometry::Intersection(vec![half_space(1)]);
    assert!(cell_with(lonely).is_err());
}

#[test]
fn test_built_nested_union_round_trips() {
    let nested = Geometry::Union(vec![
        Geometry::Union(vec![half_space(1), half_space(2)]),
        half_space(3),
    ]);
    let card = cell_with(nested).unwrap();
    assert_eq!(card.to_text(), "1 0 -1:-2:-3");
    assert_eq!(CellCard::parse(&card.to_text()).unwrap().body(), card.body());

    let nested = Geometry::Intersection(vec![
        Geometry::Intersection(vec![half_space(1), half_space(2)]),
        Geometry::Union(vec![half_space(3), half_space(4)]),
    ]);
    let card = cell_with(nested).unwrap();
    assert_eq!(card.to_text(), "1 0 -1 -2 (-3:-4)");
    assert_eq!(CellCard::parse(&card.to_text()).unwrap().body(), card.body());
}

#[test]
fn test_built_nested_complement_round_trips() {
    let inner = Geometry::Intersection(vec![
        Geometry::Complement(Integer::new(2)),
        Geometry::ComplementGroup(Box::new(Geometry::Union(vec![half_space(5), half_space(6)]))),
    ]);
    let card = cell_with(Geometry::ComplementGroup(Box::new(inner))).unwrap();
    assert_eq!(card.to_text(), "1 0 #(#2 #(-5:-6))");
    assert_eq!(CellCard::parse(&card.to_text()).unwrap().body(), card.body());
}

#[test]
fn test_like_cell_needs_changes() {
    let universe = Universe::builder().number(1).build().unwrap();
    let like = LikeCell::new(Integer::new(2), vec![universe.into()]).unwrap();
    let card = CellCard::builder().number(3).body(like).build().unwrap();
    assert_eq!(card.to_text(), "3 like 2 but u=1");

    assert!(LikeCell::new(Integer::new(2), Vec::new()).is_err());
}

// ---
// Data
// ---

#[test]
fn test_build_material_with_library() {
    let library = NeutronLibrary::builder().library("80c").build().unwrap();
    let material = Material::builder()
        .number(1)
        .components(vec![component("1001.80c", 2), component("8016.80c", 1)])
        .options(vec![library.into()])
        .build()
        .unwrap();
    let card = DataCard::builder().data(material).build().unwrap();
    assert_eq!(card.to_text(), "m1 1001.80c 2 8016.80c 1 nlib=80c");
}

#[test]
fn test_build_mode_and_nps() {
    let mode = Mode::builder().particles(list(["n", "p"])).build().unwrap();
    assert_eq!(DataCard::builder().data(mode).build().unwrap().to_text(), "mode n p");

    let nps = Nps::builder().npp(1000).build().unwrap();
    assert!(nps.npsmg().is_none());
    assert_eq!(DataCard::builder().data(nps).build().unwrap().to_text(), "nps 1000");

    let error = Mode::builder().particles(list(["n", "n"])).build().unwrap_err();
    assert!(error.is_semantics());
}

#[test]
fn test_build_source_definition() {
    let position = Position::builder().x(0).y(0).z(0).build().unwrap();
    let energy = Energy::builder().value(14.1).build().unwrap();
    let source = Source::builder()
        .options(vec![position.into(), energy.into()])
        .build()
        .unwrap();
    let card = DataCard::builder().data(source).build().unwrap();
    assert_eq!(card.to_text(), "sdef pos=0 0 0 erg=14.1");
    assert_eq!(DataCard::parse(&card.to_text()).unwrap().data(), card.data());
}

#[test]
fn test_star_only_on_transforms() {
    let values: Vec<f64> = vec![0.0, 0.0, 1.0];
    let transform = Transform::builder().number(1).values(list(values)).build().unwrap();
    let starred = DataCard::builder().starred(true).data(transform).build().unwrap();
    assert_eq!(starred.to_text(), "*tr1 0 0 1");

    let nps = Nps::builder().npp(10).build().unwrap();
    let error = DataCard::builder().starred(true).data(nps).build().unwrap_err();
    assert!(matches!(error.kind, ErrorKind::InvalidValue { .. }));
}

#[test]
fn test_real_from_value_renders_plainly() {
    assert_eq!(Real::new(1.0).to_text(), "1");
    assert_eq!(Real::new(0.25).to_text(), "0.25");
}
