//! Data cards: everything after the second blank line of a deck.

use serde::Serialize;

use crate::builder::raw::RawValue;
use crate::cards::{Card, MaterialOption, SourceOption};
use crate::errors::{ErrorKind, InpError};
use crate::grammar::{dispatch, keyword_grammar, Field, Grammar};
use crate::syntax::{Cursor, Sep, Trivia, Writer};
use crate::types::{Designator, Integer, Particle, Primitive, Real, Tuple, Zaid};
use crate::validation::{Validator, MAX_NUMBER, MAX_TRANSFORM};

/// One `zaid fraction` pair of a material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialComponent {
    zaid: Zaid,
    fraction: Real,
}

impl MaterialComponent {
    pub fn new(zaid: Zaid, fraction: Real) -> Self {
        Self { zaid, fraction }
    }

    pub fn zaid(&self) -> &Zaid {
        &self.zaid
    }

    /// Atom fraction if positive, weight fraction if negative.
    pub fn fraction(&self) -> &Real {
        &self.fraction
    }
}

/// Builder input for one material component.
pub type ComponentRaw = (RawValue<Zaid>, RawValue<Real>);

/// `component("1001.80c", 2)`
pub fn component(zaid: impl Into<RawValue<Zaid>>, fraction: impl Into<RawValue<Real>>) -> ComponentRaw {
    (zaid.into(), fraction.into())
}

impl Field for MaterialComponent {
    type Raw = ComponentRaw;

    fn describe() -> String {
        "zaid fraction".to_string()
    }

    fn pattern(sep: Sep) -> Result<String, InpError> {
        Ok(format!(
            r"{}(?:{})\s+(?:{})",
            sep.pattern(),
            <Zaid as Primitive>::pattern(),
            <Real as Primitive>::pattern()
        ))
    }

    fn parse(cursor: &mut Cursor<'_>, sep: Sep) -> Result<Self, InpError> {
        let zaid = <Zaid as Field>::parse(cursor, sep)?;
        let fraction = <Real as Field>::parse(cursor, Sep::Space)?;
        Ok(Self { zaid, fraction })
    }

    fn render(&self, out: &mut Writer, sep: Sep) {
        self.zaid.render(out, sep);
        self.fraction.render(out, Sep::Space);
    }

    fn normalize(raw: Self::Raw, keyword: &str, field: &str) -> Result<Self, InpError> {
        let (zaid, fraction) = raw;
        Ok(Self {
            zaid: <Zaid as Field>::normalize(zaid, keyword, field)?,
            fraction: <Real as Field>::normalize(fraction, keyword, field)?,
        })
    }

    fn unbuild(&self) -> Option<Self::Raw> {
        Some((RawValue::Typed(self.zaid.clone()), RawValue::Typed(self.fraction.clone())))
    }
}

keyword_grammar! {
    pub enum Data : "data card", assign = false {
        Mode("mode", "transported particles") => Mode / ModeBuilder { particles: Tuple<Particle> }
            check check_mode;
        Nps("nps", "history cutoff") => Nps / NpsBuilder { npp: Integer, npsmg: Option<Integer> }
            check check_nps;
        Ctme("ctme", "computer time cutoff") => Ctme / CtmeBuilder { minutes: Real } check check_ctme;
        Material("m" + number: Integer, "material") => Material / MaterialBuilder {
            components: Tuple<MaterialComponent>,
            options: Vec<MaterialOption>,
        } check check_material;
        Importance("imp" + designator: Designator, "cell importances") => Importances / ImportancesBuilder {
            values: Tuple<Real>,
        } check check_importances;
        Transform("tr" + number: Integer, "coordinate transformation") => Transform / TransformBuilder {
            values: Tuple<Real>,
        } check check_transform;
        Source("sdef", "general source") => Source / SourceBuilder { options: Vec<SourceOption> };
        Kcode("kcode", "criticality source") => Kcode / KcodeBuilder {
            nsrck: Option<Integer>,
            rkk: Option<Real>,
            ikz: Option<Integer>,
            kct: Option<Integer>,
        } check check_kcode;
        Ksrc("ksrc", "initial fission source points") => Ksrc / KsrcBuilder { points: Tuple<Real> }
            check check_ksrc;
    }
}

fn check_mode(node: &Mode) -> Result<(), InpError> {
    let particles = node.particles().items();
    for (i, particle) in particles.iter().enumerate() {
        if particles[..i].contains(particle) {
            return Err(Validator::new(Mode::KEYWORD).invalid("particles", particle, "listed more than once"));
        }
    }
    Ok(())
}

fn check_nps(node: &Nps) -> Result<(), InpError> {
    let check = Validator::new(Nps::KEYWORD);
    check.at_least("npp", node.npp(), 1)?;
    if let Some(npsmg) = node.npsmg() {
        check.at_least("npsmg", npsmg, 1)?;
    }
    Ok(())
}

fn check_ctme(node: &Ctme) -> Result<(), InpError> {
    Validator::new(Ctme::KEYWORD).positive("minutes", node.minutes())
}

fn check_material(node: &Material) -> Result<(), InpError> {
    let check = Validator::new(Material::KEYWORD);
    check.int_range("number", node.number(), 1..=MAX_NUMBER)?;
    let mut sign = None;
    for component in node.components() {
        let fraction = component.fraction();
        if fraction.value() == 0.0 {
            return Err(check.invalid("components", fraction, "fraction must be nonzero"));
        }
        let positive = fraction.value() > 0.0;
        if *sign.get_or_insert(positive) != positive {
            return Err(check.invalid(
                "components",
                fraction,
                "atom (positive) and weight (negative) fractions cannot be mixed",
            ));
        }
    }
    Ok(())
}

fn check_importances(node: &Importances) -> Result<(), InpError> {
    let check = Validator::new(Importances::KEYWORD);
    for value in node.values() {
        check.non_negative("values", value)?;
    }
    Ok(())
}

fn check_transform(node: &Transform) -> Result<(), InpError> {
    let check = Validator::new(Transform::KEYWORD);
    check.int_range("number", node.number(), 1..=MAX_TRANSFORM)?;
    check.count("values", node.values().len(), &[3, 12, 13])?;
    if let Some(m) = node.values().items().get(12) {
        if m.value() != 1.0 && m.value() != -1.0 {
            return Err(check.invalid("values", m, "the 13th value must be 1 or -1"));
        }
    }
    Ok(())
}

fn check_kcode(node: &Kcode) -> Result<(), InpError> {
    let check = Validator::new(Kcode::KEYWORD);
    if let Some(nsrck) = node.nsrck() {
        check.at_least("nsrck", nsrck, 1)?;
    }
    if let Some(rkk) = node.rkk() {
        check.positive("rkk", rkk)?;
    }
    if let Some(ikz) = node.ikz() {
        check.at_least("ikz", ikz, 0)?;
    }
    if let (Some(ikz), Some(kct)) = (node.ikz(), node.kct()) {
        if kct.value() <= ikz.value() {
            return Err(check.invalid("kct", kct, "must exceed the number of skipped cycles"));
        }
    }
    Ok(())
}

fn check_ksrc(node: &Ksrc) -> Result<(), InpError> {
    let count = node.points().len();
    if count % 3 != 0 {
        return Err(Validator::new(Ksrc::KEYWORD).invalid("points", count, "expected x y z triplets"));
    }
    Ok(())
}

/// A data card with its optional `*` prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataCard {
    starred: bool,
    data: Data,
    trivia: Trivia,
}

impl DataCard {
    pub const KIND: &'static str = "data card";

    pub fn new(starred: bool, data: Data, trivia: Trivia) -> Result<Self, InpError> {
        if starred && !matches!(data, Data::Transform(_)) {
            return Err(InpError::new(ErrorKind::InvalidValue {
                keyword: data.keyword().into(),
                field: "prefix".into(),
                value: "*".into(),
                reason: "only tr cards accept '*'".into(),
            }));
        }
        Ok(Self {
            starred,
            data,
            trivia,
        })
    }

    /// For `*tr`, rotation entries are angles in degrees rather than cosines.
    pub fn is_starred(&self) -> bool {
        self.starred
    }

    pub fn data(&self) -> &Data {
        &self.data
    }
}

impl Card for DataCard {
    fn decode(cursor: &mut Cursor<'_>, trivia: Trivia) -> Result<Self, InpError> {
        let starred = cursor.eat_char('*');
        let data = dispatch::parse::<Data>(cursor.take_rest())?;
        Self::new(starred, data, trivia)
    }

    fn render(&self, out: &mut Writer) {
        let prefix = if self.starred { "*" } else { "" };
        out.word(&format!("{prefix}{}", self.data.to_text()));
    }

    fn trivia(&self) -> &Trivia {
        &self.trivia
    }
}
