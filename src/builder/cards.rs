//! Builders for whole cards.

use crate::builder::raw::{resolve, RawValue};
use crate::cards::{Card, CellBody, CellCard, Data, DataCard, Surface, SurfaceCard, SurfacePrefix};
use crate::errors::{ErrorKind, InpError};
use crate::grammar::Field;
use crate::syntax::Trivia;
use crate::types::Integer;

#[derive(Debug, Clone, Default)]
pub struct SurfaceCardBuilder {
    prefix: Option<SurfacePrefix>,
    number: Option<RawValue<Integer>>,
    transform: Option<RawValue<Integer>>,
    surface: Option<Surface>,
    trivia: Trivia,
}

impl SurfaceCardBuilder {
    pub fn prefix(mut self, prefix: Option<SurfacePrefix>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn number(mut self, value: impl Into<RawValue<Integer>>) -> Self {
        self.number = Some(value.into());
        self
    }

    pub fn transform(mut self, value: impl Into<RawValue<Integer>>) -> Self {
        self.transform = Some(value.into());
        self
    }

    pub fn without_transform(mut self) -> Self {
        self.transform = None;
        self
    }

    pub fn surface(mut self, surface: impl Into<Surface>) -> Self {
        self.surface = Some(surface.into());
        self
    }

    pub fn build(self) -> Result<SurfaceCard, InpError> {
        let kind = SurfaceCard::KIND;
        SurfaceCard::new(
            self.prefix,
            resolve(self.number, kind, "number")?,
            resolve(self.transform, kind, "transform")?,
            self.surface.ok_or_else(|| missing(kind, "surface"))?,
            self.trivia,
        )
    }
}

impl SurfaceCard {
    pub fn builder() -> SurfaceCardBuilder {
        SurfaceCardBuilder::default()
    }

    pub fn to_builder(&self) -> SurfaceCardBuilder {
        SurfaceCardBuilder {
            prefix: self.prefix(),
            number: self.number().unbuild(),
            transform: self.transform().and_then(Field::unbuild),
            surface: Some(self.surface().clone()),
            trivia: self.trivia().clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CellCardBuilder {
    number: Option<RawValue<Integer>>,
    body: Option<CellBody>,
    trivia: Trivia,
}

impl CellCardBuilder {
    pub fn number(mut self, value: impl Into<RawValue<Integer>>) -> Self {
        self.number = Some(value.into());
        self
    }

    pub fn body(mut self, body: impl Into<CellBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> Result<CellCard, InpError> {
        let kind = CellCard::KIND;
        CellCard::new(
            resolve(self.number, kind, "number")?,
            self.body.ok_or_else(|| missing(kind, "body"))?,
            self.trivia,
        )
    }
}

impl CellCard {
    pub fn builder() -> CellCardBuilder {
        CellCardBuilder::default()
    }

    pub fn to_builder(&self) -> CellCardBuilder {
        CellCardBuilder {
            number: self.number().unbuild(),
            body: Some(self.body().clone()),
            trivia: self.trivia().clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataCardBuilder {
    starred: bool,
    data: Option<Data>,
    trivia: Trivia,
}

impl DataCardBuilder {
    /// `*tr`: rotation entries in degrees.
    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    pub fn data(mut self, data: impl Into<Data>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn build(self) -> Result<DataCard, InpError> {
        let data = self.data.ok_or_else(|| missing(DataCard::KIND, "data"))?;
        DataCard::new(self.starred, data, self.trivia)
    }
}

impl DataCard {
    pub fn builder() -> DataCardBuilder {
        DataCardBuilder::default()
    }

    pub fn to_builder(&self) -> DataCardBuilder {
        DataCardBuilder {
            starred: self.is_starred(),
            data: Some(self.data().clone()),
            trivia: self.trivia().clone(),
        }
    }
}

fn missing(kind: &str, field: &str) -> InpError {
    InpError::new(ErrorKind::MissingField {
        keyword: kind.into(),
        field: field.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::surface::PlaneX;

    #[test]
    fn surface_card_from_parts() {
        let plane = PlaneX::builder().d(2.5).build().unwrap();
        let card = SurfaceCard::builder()
            .prefix(Some(SurfacePrefix::Reflecting))
            .number(7)
            .surface(plane)
            .build()
            .unwrap();
        assert_eq!(card.to_text(), "*7 px 2.5");
    }

    #[test]
    fn missing_number_is_a_semantics_error() {
        let plane = PlaneX::builder().d(1).build().unwrap();
        let error = SurfaceCard::builder().surface(plane).build().unwrap_err();
        assert!(error.is_semantics());
        assert!(matches!(error.kind, ErrorKind::MissingField { .. }));
        assert!(CellCard::builder().number(1).build().is_err());
    }

    #[test]
    fn rebuilding_keeps_comments() {
        let card = SurfaceCard::parse("5 px 1.0 $ mirror").unwrap();
        let moved = card.to_builder().number(6).build().unwrap();
        assert_eq!(moved.to_text(), "6 px 1.0");
        assert_eq!(moved.trivia().comments, card.trivia().comments);
    }

    #[test]
    fn transform_rule_applies_to_builders() {
        let plane = PlaneX::builder().d(1).build().unwrap();
        let error = SurfaceCard::builder()
            .number(1000)
            .transform(2)
            .surface(plane)
            .build()
            .unwrap_err();
        assert_eq!(error.code(), "inp::semantics::surface_card::out_of_range");
    }
}
