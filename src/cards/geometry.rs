//! Cell geometry expressions.
//!
//! ```text
//! union        := intersection (':' intersection)*
//! intersection := factor (factor)*          juxtaposition, blanks optional before '(' and '#'
//! factor       := surface-ref | '#' integer | '#' '(' union ')' | '(' union ')'
//! ```

use serde::Serialize;

use crate::builder::raw::invalid_value;
use crate::errors::{ErrorReporting, InpError};
use crate::grammar::Field;
use crate::syntax::{Cursor, Sep, Writer};
use crate::types::{Integer, Primitive, SurfaceRef};

/// Boolean combination of half-spaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Geometry {
    /// `a:b:...`, at least two operands.
    Union(Vec<Geometry>),
    /// `a b ...`, at least two operands.
    Intersection(Vec<Geometry>),
    Surface(SurfaceRef),
    /// `#n`: everything outside cell `n`.
    Complement(Integer),
    /// `#( ... )`
    ComplementGroup(Box<Geometry>),
    /// `( ... )`
    Group(Box<Geometry>),
}

const TOKEN: &str = r"[-+]?\d+(?:\.\d+)?|#|\(|\)";

impl Geometry {
    /// Every surface reference, left to right.
    pub fn surfaces(&self) -> Vec<&SurfaceRef> {
        let mut found = Vec::new();
        self.collect_surfaces(&mut found);
        found
    }

    fn collect_surfaces<'g>(&'g self, found: &mut Vec<&'g SurfaceRef>) {
        match self {
            Geometry::Union(items) | Geometry::Intersection(items) => {
                for item in items {
                    item.collect_surfaces(found);
                }
            }
            Geometry::Surface(surface) => found.push(surface),
            Geometry::Complement(_) => {}
            Geometry::ComplementGroup(inner) | Geometry::Group(inner) => inner.collect_surfaces(found),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Geometry::Union(items) => {
                let parts: Vec<String> = items.iter().map(Geometry::to_text).collect();
                parts.join(":")
            }
            Geometry::Intersection(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Geometry::Union(_) => format!("({})", item.to_text()),
                        _ => item.to_text(),
                    })
                    .collect();
                parts.join(" ")
            }
            Geometry::Surface(surface) => surface.to_text(),
            Geometry::Complement(cell) => format!("#{}", cell.to_text()),
            Geometry::ComplementGroup(inner) => format!("#({})", inner.to_text()),
            Geometry::Group(inner) => format!("({})", inner.to_text()),
        }
    }

    fn check_built(&self, keyword: &str, field: &str) -> Result<(), InpError> {
        match self {
            Geometry::Union(items) | Geometry::Intersection(items) => {
                if items.len() < 2 {
                    let kind = match self {
                        Geometry::Union(_) => "union",
                        _ => "intersection",
                    };
                    return Err(invalid_value(
                        keyword,
                        field,
                        &self.to_text(),
                        &format!("a {kind} needs at least two operands"),
                    ));
                }
                items.iter().try_for_each(|item| item.check_built(keyword, field))
            }
            Geometry::Complement(cell) if cell.value() < 1 => Err(invalid_value(
                keyword,
                field,
                &self.to_text(),
                "complemented cell number must be positive",
            )),
            Geometry::ComplementGroup(inner) | Geometry::Group(inner) => {
                inner.check_built(keyword, field)
            }
            Geometry::Surface(_) | Geometry::Complement(_) => Ok(()),
        }
    }

    pub fn from_text(text: &str) -> Result<Self, InpError> {
        let mut cursor = Cursor::new(text.trim());
        let geometry = parse_union(&mut cursor)?;
        cursor.finish()?;
        Ok(geometry)
    }
}

fn parse_union(cursor: &mut Cursor<'_>) -> Result<Geometry, InpError> {
    let mut items = vec![parse_intersection(cursor)?];
    loop {
        let checkpoint = cursor.checkpoint();
        cursor.skip_ws();
        if !cursor.eat_char(':') {
            cursor.restore(checkpoint);
            break;
        }
        cursor.skip_ws();
        items.push(parse_intersection(cursor)?);
    }
    Ok(collapse(items, Geometry::Union))
}

fn parse_intersection(cursor: &mut Cursor<'_>) -> Result<Geometry, InpError> {
    let mut items = vec![parse_factor(cursor)?];
    loop {
        let checkpoint = cursor.checkpoint();
        let spaced = cursor.skip_ws();
        let next = cursor.peek_char();
        let starts_factor = match next {
            Some('(' | '#') => true,
            Some(c) if spaced && (c.is_ascii_digit() || c == '-' || c == '+') => true,
            _ => false,
        };
        if !starts_factor {
            cursor.restore(checkpoint);
            break;
        }
        items.push(parse_factor(cursor)?);
    }
    Ok(collapse(items, Geometry::Intersection))
}

fn parse_factor(cursor: &mut Cursor<'_>) -> Result<Geometry, InpError> {
    if cursor.eat_char('#') {
        if cursor.peek_char() == Some('(') {
            return Ok(Geometry::ComplementGroup(Box::new(parse_group(cursor)?)));
        }
        return Ok(Geometry::Complement(cursor.expect::<Integer>("cell number")?));
    }
    if cursor.peek_char() == Some('(') {
        return Ok(Geometry::Group(Box::new(parse_group(cursor)?)));
    }
    cursor.expect::<SurfaceRef>("surface reference").map(Geometry::Surface)
}

fn parse_group(cursor: &mut Cursor<'_>) -> Result<Geometry, InpError> {
    cursor.eat_char('(');
    cursor.skip_ws();
    let inner = parse_union(cursor)?;
    cursor.skip_ws();
    if !cursor.eat_char(')') {
        let found = cursor.peek_word();
        return Err(if found.is_empty() {
            cursor.missing_element("')'", cursor.word_span())
        } else {
            cursor.unexpected_token("')'", found, cursor.word_span())
        });
    }
    Ok(inner)
}

fn collapse(mut items: Vec<Geometry>, combine: fn(Vec<Geometry>) -> Geometry) -> Geometry {
    if items.len() == 1 {
        items.remove(0)
    } else {
        combine(items)
    }
}

impl Field for Geometry {
    type Raw = Geometry;

    fn describe() -> String {
        "geometry".to_string()
    }

    fn pattern(sep: Sep) -> Result<String, InpError> {
        Ok(format!(
            r"{}(?:{TOKEN})(?:\s*(?::|{TOKEN}))*",
            sep.pattern()
        ))
    }

    fn parse(cursor: &mut Cursor<'_>, sep: Sep) -> Result<Self, InpError> {
        cursor.separator(sep)?;
        parse_union(cursor)
    }

    fn render(&self, out: &mut Writer, sep: Sep) {
        out.push(sep, &self.to_text());
    }

    /// Built geometry is checked, then settled into the shape the parser gives
    /// its rendering, so that `a:(b:c)` built by hand reads back as `a:b:c`.
    fn normalize(raw: Self::Raw, keyword: &str, field: &str) -> Result<Self, InpError> {
        raw.check_built(keyword, field)?;
        let text = raw.to_text();
        Geometry::from_text(&text)
            .map_err(|_| invalid_value(keyword, field, &text, "not a valid geometry"))
    }

    fn unbuild(&self) -> Option<Self::Raw> {
        Some(self.clone())
    }
}
