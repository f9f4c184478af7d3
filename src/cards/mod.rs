//! # Cards
//!
//! The concrete grammar families and the three top-level card kinds built on
//! them. A card is a family member plus positional metadata (card number,
//! transform, prefix character) and the comments and line layout it was read
//! with.
//!
//! ## Module Structure
//!
//! - **`surface`**: the `surface` family and [`SurfaceCard`]
//! - **`cell`**, **`geometry`**, **`cell_option`**: [`CellCard`] and its parts
//! - **`data`**, **`material_option`**, **`source_option`**: [`DataCard`] and its parts

use log::debug;
use serde::Serialize;

use crate::config::FormatConfig;
use crate::deck::Section;
use crate::errors::InpError;
use crate::grammar::{FamilyListing, Grammar};
use crate::syntax::{layout, preprocess, Cursor, Trivia, Writer};

pub mod cell;
pub mod cell_option;
pub mod data;
pub mod geometry;
pub mod material_option;
pub mod source_option;
pub mod surface;

pub use cell::{CellBody, CellCard, ExplicitCell, LikeCell};
pub use cell_option::CellOption;
pub use data::{component, Data, DataCard, MaterialComponent};
pub use geometry::Geometry;
pub use material_option::MaterialOption;
pub use source_option::SourceOption;
pub use surface::{Surface, SurfaceCard, SurfacePrefix};

/// A top-level card: positional metadata around one grammar family member.
pub trait Card: Sized + Serialize {
    /// Reads the card from a preprocessed logical line.
    fn decode(cursor: &mut Cursor<'_>, trivia: Trivia) -> Result<Self, InpError>;

    fn render(&self, out: &mut Writer);

    fn trivia(&self) -> &Trivia;

    /// Parses a raw card block, continuation lines and `$` comments included.
    fn parse(raw: &str) -> Result<Self, InpError> {
        let (text, trivia) = preprocess(raw).into_parts();
        let mut cursor = Cursor::new(text.trim());
        Self::decode(&mut cursor, trivia)
            .and_then(|card| {
                cursor.finish()?;
                Ok(card)
            })
            .map_err(|error| {
                debug!("card rejected: {error}");
                error.with_source_if_absent(&text)
            })
    }

    /// Canonical single-line text, without comments.
    fn to_text(&self) -> String {
        let mut out = Writer::new();
        self.render(&mut out);
        out.finish()
    }

    /// Physical lines with comments re-attached and long lines wrapped.
    fn to_mcnp(&self, config: &FormatConfig) -> String {
        layout(&self.to_text(), self.trivia(), config)
    }
}

/// Any card of a deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyCard {
    Cell(CellCard),
    Surface(SurfaceCard),
    Data(DataCard),
}

impl AnyCard {
    /// Parses a raw block as a card of the deck section it came from.
    pub fn parse(section: Section, raw: &str) -> Result<Self, InpError> {
        match section {
            Section::Cells => CellCard::parse(raw).map(AnyCard::Cell),
            Section::Surfaces => SurfaceCard::parse(raw).map(AnyCard::Surface),
            Section::Data => DataCard::parse(raw).map(AnyCard::Data),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            AnyCard::Cell(card) => card.to_text(),
            AnyCard::Surface(card) => card.to_text(),
            AnyCard::Data(card) => card.to_text(),
        }
    }

    pub fn to_mcnp(&self, config: &FormatConfig) -> String {
        match self {
            AnyCard::Cell(card) => card.to_mcnp(config),
            AnyCard::Surface(card) => card.to_mcnp(config),
            AnyCard::Data(card) => card.to_mcnp(config),
        }
    }
}

/// Builds every family's registry.
///
/// Registries are otherwise built on first use; call this before handing cards to
/// worker threads so that a broken grammar is reported once, up front.
pub fn init() -> Result<(), InpError> {
    catalog().map(|_| ())
}

/// Producer listings of every family, in dependency order.
pub fn catalog() -> Result<Vec<FamilyListing>, InpError> {
    Ok(vec![
        FamilyListing::of::<Surface>()?,
        FamilyListing::of::<CellOption>()?,
        FamilyListing::of::<CellBody>()?,
        FamilyListing::of::<MaterialOption>()?,
        FamilyListing::of::<SourceOption>()?,
        FamilyListing::of::<Data>()?,
    ])
}

/// Listing of the family named `name` (`"surface"`, `"cell option"`, ...).
/// Underscores may stand in for blanks.
pub fn family(name: &str) -> Result<Option<FamilyListing>, InpError> {
    let wanted = name.trim().replace('_', " ");
    Ok(catalog()?
        .into_iter()
        .find(|listing| listing.family.eq_ignore_ascii_case(&wanted)))
}

/// Family names, for help text.
pub fn family_names() -> [&'static str; 6] {
    [
        Surface::FAMILY,
        CellOption::FAMILY,
        CellBody::FAMILY,
        MaterialOption::FAMILY,
        SourceOption::FAMILY,
        Data::FAMILY,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_builds() {
        init().unwrap();
        let names: Vec<_> = catalog().unwrap().iter().map(|l| l.family).collect();
        assert_eq!(names, family_names());
    }

    #[test]
    fn family_lookup_accepts_underscores() {
        let listing = family("cell_option").unwrap().unwrap();
        assert!(listing.producers.iter().any(|p| p.keyword == "imp"));
        assert!(family("nonsense").unwrap().is_none());
    }

    #[test]
    fn comments_survive_formatting() {
        let raw = "1 so 5.0 $ outer\n     $ spare";
        let card = SurfaceCard::parse(raw).unwrap();
        let formatted = card.to_mcnp(&FormatConfig::default());
        assert_eq!(formatted, "1 so 5.0 $ outer\n     $ spare");
    }

    #[test]
    fn section_selects_card_kind() {
        let card = AnyCard::parse(Section::Data, "NPS 100").unwrap();
        assert!(matches!(card, AnyCard::Data(_)));
        assert_eq!(card.to_text(), "nps 100");
        assert!(AnyCard::parse(Section::Surfaces, "nps 100").is_err());
    }

    #[test]
    fn errors_carry_card_text() {
        let error = SurfaceCard::parse("1 px").unwrap_err();
        assert!(error.is_syntax());
        assert!(error.source_info.source.is_some());
    }
}
