//! Keyworded options that follow a cell's geometry.

use crate::errors::InpError;
use crate::grammar::keyword_grammar;
use crate::types::{Designator, Integer, Real};
use crate::validation::{Validator, MAX_NUMBER, MAX_TRANSFORM};

keyword_grammar! {
    pub enum CellOption : "cell option", assign = true {
        Importance("imp" + designator: Designator, "particle importance") => CellImportance / CellImportanceBuilder {
            value: Real,
        } check check_importance;
        Volume("vol", "cell volume") => Volume / VolumeBuilder { value: Real } check check_volume;
        PhotonWeight("pwt", "photon production weight") => PhotonWeight / PhotonWeightBuilder { value: Real };
        Universe("u", "universe membership") => Universe / UniverseBuilder { number: Integer }
            check check_universe;
        Fill("fill", "filling universe") => Fill / FillBuilder { universe: Integer } check check_fill;
        Lattice("lat", "lattice type") => Lattice / LatticeBuilder { kind: Integer } check check_lattice;
        Transform("trcl", "cell transformation") => CellTransform / CellTransformBuilder { number: Integer }
            check check_transform;
        Temperature("tmp", "temperature in MeV") => Temperature / TemperatureBuilder { value: Real }
            check check_temperature;
    }
}

fn check_importance(node: &CellImportance) -> Result<(), InpError> {
    Validator::new(CellImportance::KEYWORD).non_negative("value", node.value())
}

fn check_volume(node: &Volume) -> Result<(), InpError> {
    Validator::new(Volume::KEYWORD).non_negative("value", node.value())
}

fn check_universe(node: &Universe) -> Result<(), InpError> {
    Validator::new(Universe::KEYWORD).int_range("number", node.number(), 0..=MAX_NUMBER)
}

fn check_fill(node: &Fill) -> Result<(), InpError> {
    Validator::new(Fill::KEYWORD).int_range("universe", node.universe(), 0..=MAX_NUMBER)
}

fn check_lattice(node: &Lattice) -> Result<(), InpError> {
    Validator::new(Lattice::KEYWORD).one_of("kind", node.kind(), &[1, 2])
}

fn check_transform(node: &CellTransform) -> Result<(), InpError> {
    Validator::new(CellTransform::KEYWORD).int_range("number", node.number(), 1..=MAX_TRANSFORM)
}

fn check_temperature(node: &Temperature) -> Result<(), InpError> {
    Validator::new(Temperature::KEYWORD).positive("value", node.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::grammar::Grammar;
    use crate::types::Particle;

    #[test]
    fn importance_with_designator() {
        let option = CellOption::from_text("imp:n,p 1").unwrap();
        let CellOption::Importance(importance) = &option else {
            panic!("expected importance, got {option:?}");
        };
        assert_eq!(
            importance.designator().particles(),
            &[Particle::Neutron, Particle::Photon]
        );
        assert_eq!(option.to_text(), "imp:n,p=1");
    }

    #[test]
    fn assignment_forms_agree() {
        let spaced = CellOption::from_text("u = 3").unwrap();
        let tight = CellOption::from_text("u=3").unwrap();
        let blank = CellOption::from_text("U 3").unwrap();
        assert_eq!(spaced, tight);
        assert_eq!(tight, blank);
        assert_eq!(blank.to_text(), "u=3");
    }

    #[test]
    fn values_are_validated() {
        assert!(matches!(
            CellOption::from_text("lat=3").unwrap_err().kind,
            ErrorKind::NotInSet { .. }
        ));
        assert!(CellOption::from_text("imp:n=-1").unwrap_err().is_semantics());
        assert!(CellOption::from_text("trcl=1000").unwrap_err().is_semantics());
        assert!(CellOption::from_text("tmp=0").unwrap_err().is_semantics());
    }

    #[test]
    fn unknown_keyword_is_a_syntax_error() {
        let error = CellOption::from_text("bogus=1").unwrap_err();
        assert_eq!(error.code(), "inp::syntax::cell_option::no_matching_grammar");
    }
}
