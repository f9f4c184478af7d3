//! `sdef` source variables.

use crate::errors::InpError;
use crate::grammar::keyword_grammar;
use crate::types::{Integer, Particle, Real};
use crate::validation::{Validator, MAX_NUMBER};

keyword_grammar! {
    pub enum SourceOption : "source option", assign = true {
        Position("pos", "source position") => Position / PositionBuilder { x: Real, y: Real, z: Real };
        Direction("vec", "reference direction") => ReferenceVector / ReferenceVectorBuilder {
            u: Real, v: Real, w: Real,
        } check check_vector;
        Energy("erg", "particle energy in MeV") => Energy / EnergyBuilder { value: Real } check check_energy;
        Cell("cel", "starting cell") => StartCell / StartCellBuilder { number: Integer } check check_cell;
        Surface("sur", "starting surface") => StartSurface / StartSurfaceBuilder { number: Integer }
            check check_surface;
        Particle("par", "source particle") => SourceParticle / SourceParticleBuilder { particle: Particle };
        Cosine("dir", "cosine to the reference vector") => Cosine / CosineBuilder { mu: Real } check check_cosine;
        Radius("rad", "radial sampling distance") => Radius / RadiusBuilder { value: Real } check check_radius;
        Weight("wgt", "starting weight") => Weight / WeightBuilder { value: Real } check check_weight;
        Time("tme", "emission time in shakes") => Time / TimeBuilder { value: Real };
    }
}

fn check_vector(node: &ReferenceVector) -> Result<(), InpError> {
    let length = [node.u(), node.v(), node.w()]
        .iter()
        .map(|c| c.value() * c.value())
        .sum::<f64>();
    if length == 0.0 {
        return Err(Validator::new(ReferenceVector::KEYWORD).invalid("u", node.u(), "vector has zero length"));
    }
    Ok(())
}

fn check_energy(node: &Energy) -> Result<(), InpError> {
    Validator::new(Energy::KEYWORD).positive("value", node.value())
}

fn check_cell(node: &StartCell) -> Result<(), InpError> {
    Validator::new(StartCell::KEYWORD).int_range("number", node.number(), 1..=MAX_NUMBER)
}

fn check_surface(node: &StartSurface) -> Result<(), InpError> {
    Validator::new(StartSurface::KEYWORD).int_range("number", node.number(), 0..=MAX_NUMBER)
}

fn check_cosine(node: &Cosine) -> Result<(), InpError> {
    Validator::new(Cosine::KEYWORD).real_range("mu", node.mu(), -1.0..=1.0)
}

fn check_radius(node: &Radius) -> Result<(), InpError> {
    Validator::new(Radius::KEYWORD).non_negative("value", node.value())
}

fn check_weight(node: &Weight) -> Result<(), InpError> {
    Validator::new(Weight::KEYWORD).positive("value", node.value())
}
