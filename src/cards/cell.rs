//! Cell cards.
//!
//! The body of a cell card, everything after the cell number, is a two-producer
//! family written out by hand: the explicit form `m [d] geometry [options]`,
//! where the density is present exactly when the material is not void, and the
//! `like n but options` form. Neither fits the declarative macro because the
//! explicit form's shape depends on a field value.

use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::builder::raw::{resolve, RawValue};
use crate::cards::{CellOption, Geometry};
use crate::cards::Card;
use crate::errors::{ErrorReporting, InpError};
use crate::grammar::{dispatch, Field, FieldSpec, Grammar, Producer, Registry};
use crate::syntax::{Cursor, Sep, Trivia, Writer};
use crate::types::{Integer, Primitive, Real};
use crate::validation::{Validator, MAX_NUMBER};

/// `m [d] geometry [options]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplicitCell {
    material: Integer,
    density: Option<Real>,
    geometry: Geometry,
    options: Vec<CellOption>,
}

/// `like n but options`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikeCell {
    base: Integer,
    options: Vec<CellOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellBody {
    Explicit(ExplicitCell),
    Like(LikeCell),
}

impl ExplicitCell {
    pub const KEYWORD: &'static str = "cell";

    pub fn material(&self) -> &Integer {
        &self.material
    }

    /// Positive values are atom densities, negative values mass densities.
    pub fn density(&self) -> Option<&Real> {
        self.density.as_ref()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn options(&self) -> &[CellOption] {
        &self.options
    }

    pub fn is_void(&self) -> bool {
        self.material.value() == 0
    }

    pub fn builder() -> ExplicitCellBuilder {
        ExplicitCellBuilder::default()
    }

    pub fn to_builder(&self) -> ExplicitCellBuilder {
        ExplicitCellBuilder {
            material: self.material.unbuild(),
            density: self.density.unbuild(),
            geometry: self.geometry.unbuild(),
            options: self.options.unbuild(),
        }
    }

    fn check(&self) -> Result<(), InpError> {
        let check = Validator::new(Self::KEYWORD);
        check.int_range("material", &self.material, 0..=MAX_NUMBER)?;
        let present = self.density.is_some();
        check.required_when("density", present, !self.is_void(), "when the material is not 0")?;
        check.forbidden_when("density", present, self.is_void(), "in a void cell")?;
        if let Some(density) = &self.density {
            if density.value() == 0.0 {
                return Err(check.invalid("density", density, "must be nonzero"));
            }
        }
        Ok(())
    }

    fn grammar_body() -> Result<String, InpError> {
        Ok(format!(
            "{}{}{}{}",
            <Integer as Field>::pattern(Sep::Adjacent)?,
            <Option<Real>>::pattern(Sep::Space)?,
            <Geometry as Field>::pattern(Sep::Space)?,
            <Vec<CellOption>>::pattern(Sep::Space)?,
        ))
    }

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, InpError> {
        let material = Integer::parse(cursor, Sep::Adjacent)?;
        let density = if material.value() == 0 {
            None
        } else {
            Some(Real::parse(cursor, Sep::Space)?)
        };
        let geometry = Geometry::parse(cursor, Sep::Space)?;
        let options = <Vec<CellOption>>::parse(cursor, Sep::Space)?;
        let cell = Self {
            material,
            density,
            geometry,
            options,
        };
        cell.check()?;
        Ok(cell)
    }

    fn render(&self, out: &mut Writer) {
        self.material.render(out, Sep::Space);
        self.density.render(out, Sep::Space);
        self.geometry.render(out, Sep::Space);
        self.options.render(out, Sep::Space);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExplicitCellBuilder {
    material: Option<RawValue<Integer>>,
    density: Option<RawValue<Real>>,
    geometry: Option<Geometry>,
    options: Option<Vec<CellOption>>,
}

impl ExplicitCellBuilder {
    pub fn material(mut self, value: impl Into<RawValue<Integer>>) -> Self {
        self.material = Some(value.into());
        self
    }

    pub fn density(mut self, value: impl Into<RawValue<Real>>) -> Self {
        self.density = Some(value.into());
        self
    }

    pub fn void(mut self) -> Self {
        self.material = Some(RawValue::Int(0));
        self.density = None;
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn options(mut self, options: Vec<CellOption>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn build(self) -> Result<ExplicitCell, InpError> {
        let keyword = ExplicitCell::KEYWORD;
        let cell = ExplicitCell {
            material: resolve(self.material, keyword, "material")?,
            density: resolve(self.density, keyword, "density")?,
            geometry: resolve(self.geometry, keyword, "geometry")?,
            options: resolve(self.options, keyword, "options")?,
        };
        cell.check()?;
        Ok(cell)
    }
}

impl LikeCell {
    pub const KEYWORD: &'static str = "like";

    pub fn new(base: Integer, options: Vec<CellOption>) -> Result<Self, InpError> {
        let cell = Self { base, options };
        cell.check()?;
        Ok(cell)
    }

    pub fn base(&self) -> &Integer {
        &self.base
    }

    pub fn options(&self) -> &[CellOption] {
        &self.options
    }

    fn check(&self) -> Result<(), InpError> {
        let check = Validator::new(Self::KEYWORD);
        check.int_range("base", &self.base, 1..=MAX_NUMBER)?;
        if self.options.is_empty() {
            return Err(check.invalid("options", "", "at least one option must follow 'but'"));
        }
        Ok(())
    }

    fn grammar_body() -> Result<String, InpError> {
        Ok(format!(
            r"like{}\s+but{}",
            <Integer as Field>::pattern(Sep::Space)?,
            <Vec<CellOption>>::pattern(Sep::Space)?,
        ))
    }

    fn decode(cursor: &mut Cursor<'_>) -> Result<Self, InpError> {
        if !cursor.keyword(Self::KEYWORD) {
            return Err(cursor.unexpected_token("'like'", cursor.peek_word(), cursor.word_span()));
        }
        let base = Integer::parse(cursor, Sep::Space)?;
        cursor.separator(Sep::Space)?;
        if !cursor.keyword("but") {
            return Err(cursor.unexpected_token("'but'", cursor.peek_word(), cursor.word_span()));
        }
        let options = <Vec<CellOption>>::parse(cursor, Sep::Space)?;
        Self::new(base, options)
    }

    fn render(&self, out: &mut Writer) {
        out.word(Self::KEYWORD);
        self.base.render(out, Sep::Space);
        out.word("but");
        self.options.render(out, Sep::Space);
    }
}

impl Grammar for CellBody {
    const FAMILY: &'static str = "cell";
    const ASSIGN: bool = false;

    fn registry() -> Result<&'static Registry<Self>, InpError> {
        static REGISTRY: OnceCell<Registry<CellBody>> = OnceCell::new();
        REGISTRY.get_or_try_init(|| {
            Registry::build(
                Self::FAMILY,
                vec![
                    Producer::new(
                        Self::FAMILY,
                        LikeCell::KEYWORD,
                        "cell like another",
                        vec![
                            FieldSpec::new("base", Integer::describe()),
                            FieldSpec::new("options", <Vec<CellOption>>::describe()),
                        ],
                        LikeCell::grammar_body()?,
                        |cursor| LikeCell::decode(cursor).map(CellBody::Like),
                    )?,
                    Producer::new(
                        Self::FAMILY,
                        "",
                        "explicit cell",
                        vec![
                            FieldSpec::new("material", Integer::describe()),
                            FieldSpec::new("density", <Option<Real>>::describe()),
                            FieldSpec::new("geometry", Geometry::describe()),
                            FieldSpec::new("options", <Vec<CellOption>>::describe()),
                        ],
                        ExplicitCell::grammar_body()?,
                        |cursor| ExplicitCell::decode(cursor).map(CellBody::Explicit),
                    )?,
                ],
            )
        })
    }

    fn keyword(&self) -> &'static str {
        match self {
            CellBody::Explicit(_) => "",
            CellBody::Like(_) => LikeCell::KEYWORD,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CellBody::Explicit(_) => "explicit cell",
            CellBody::Like(_) => "cell like another",
        }
    }

    fn render(&self, out: &mut Writer) {
        match self {
            CellBody::Explicit(cell) => cell.render(out),
            CellBody::Like(cell) => cell.render(out),
        }
    }
}

impl From<ExplicitCell> for CellBody {
    fn from(cell: ExplicitCell) -> Self {
        CellBody::Explicit(cell)
    }
}

impl From<LikeCell> for CellBody {
    fn from(cell: LikeCell) -> Self {
        CellBody::Like(cell)
    }
}

/// `j <body>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellCard {
    number: Integer,
    body: CellBody,
    trivia: Trivia,
}

impl CellCard {
    pub const KIND: &'static str = "cell card";

    pub fn new(number: Integer, body: CellBody, trivia: Trivia) -> Result<Self, InpError> {
        Validator::new(Self::KIND).int_range("number", &number, 1..=MAX_NUMBER)?;
        Ok(Self {
            number,
            body,
            trivia,
        })
    }

    pub fn number(&self) -> &Integer {
        &self.number
    }

    pub fn body(&self) -> &CellBody {
        &self.body
    }
}

impl Card for CellCard {
    fn decode(cursor: &mut Cursor<'_>, trivia: Trivia) -> Result<Self, InpError> {
        let number = cursor.expect::<Integer>("cell number")?;
        cursor.separator(Sep::Space)?;
        let body = dispatch::parse::<CellBody>(cursor.take_rest())?;
        Self::new(number, body, trivia)
    }

    fn render(&self, out: &mut Writer) {
        out.word(&self.number.to_text());
        self.body.render(out);
    }

    fn trivia(&self) -> &Trivia {
        &self.trivia
    }
}
