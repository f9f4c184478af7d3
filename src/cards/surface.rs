//! Surface grammars and the surface card.

use serde::Serialize;

use crate::cards::Card;
use crate::errors::InpError;
use crate::grammar::{dispatch, keyword_grammar, Grammar};
use crate::syntax::{Cursor, Sep, Trivia, Writer};
use crate::types::{Integer, Primitive, Real};
use crate::validation::{Validator, MAX_NUMBER, MAX_TRANSFORM};

keyword_grammar! {
    /// Every surface kind, selected by mnemonic and, for `p`, by argument count.
    pub enum Surface : "surface", assign = false {
        Plane("p", "general plane") => Plane / PlaneBuilder { a: Real, b: Real, c: Real, d: Real };
        PlanePoints("p", "plane through three points") => PlanePoints / PlanePointsBuilder {
            x1: Real, y1: Real, z1: Real,
            x2: Real, y2: Real, z2: Real,
            x3: Real, y3: Real, z3: Real,
        } check check_plane_points;
        PlaneX("px", "plane normal to x") => PlaneX / PlaneXBuilder { d: Real };
        PlaneY("py", "plane normal to y") => PlaneY / PlaneYBuilder { d: Real };
        PlaneZ("pz", "plane normal to z") => PlaneZ / PlaneZBuilder { d: Real };
        SphereOrigin("so", "sphere centred at origin") => SphereOrigin / SphereOriginBuilder { r: Real }
            check check_sphere_origin;
        Sphere("s", "general sphere") => Sphere / SphereBuilder { x: Real, y: Real, z: Real, r: Real }
            check check_sphere;
        SphereX("sx", "sphere centred on x axis") => SphereX / SphereXBuilder { x: Real, r: Real }
            check check_sphere_x;
        SphereY("sy", "sphere centred on y axis") => SphereY / SphereYBuilder { y: Real, r: Real }
            check check_sphere_y;
        SphereZ("sz", "sphere centred on z axis") => SphereZ / SphereZBuilder { z: Real, r: Real }
            check check_sphere_z;
        CylinderParX("c/x", "cylinder parallel to x axis") => CylinderParX / CylinderParXBuilder {
            y: Real, z: Real, r: Real,
        } check check_cylinder_par_x;
        CylinderParY("c/y", "cylinder parallel to y axis") => CylinderParY / CylinderParYBuilder {
            x: Real, z: Real, r: Real,
        } check check_cylinder_par_y;
        CylinderParZ("c/z", "cylinder parallel to z axis") => CylinderParZ / CylinderParZBuilder {
            x: Real, y: Real, r: Real,
        } check check_cylinder_par_z;
        CylinderX("cx", "cylinder on x axis") => CylinderX / CylinderXBuilder { r: Real }
            check check_cylinder_x;
        CylinderY("cy", "cylinder on y axis") => CylinderY / CylinderYBuilder { r: Real }
            check check_cylinder_y;
        CylinderZ("cz", "cylinder on z axis") => CylinderZ / CylinderZBuilder { r: Real }
            check check_cylinder_z;
        ConeParX("k/x", "cone parallel to x axis") => ConeParX / ConeParXBuilder {
            x: Real, y: Real, z: Real, t_squared: Real, sheet: Option<Integer>,
        } check check_cone_par_x;
        ConeParY("k/y", "cone parallel to y axis") => ConeParY / ConeParYBuilder {
            x: Real, y: Real, z: Real, t_squared: Real, sheet: Option<Integer>,
        } check check_cone_par_y;
        ConeParZ("k/z", "cone parallel to z axis") => ConeParZ / ConeParZBuilder {
            x: Real, y: Real, z: Real, t_squared: Real, sheet: Option<Integer>,
        } check check_cone_par_z;
        ConeX("kx", "cone on x axis") => ConeX / ConeXBuilder { x: Real, t_squared: Real, sheet: Option<Integer> }
            check check_cone_x;
        ConeY("ky", "cone on y axis") => ConeY / ConeYBuilder { y: Real, t_squared: Real, sheet: Option<Integer> }
            check check_cone_y;
        ConeZ("kz", "cone on z axis") => ConeZ / ConeZBuilder { z: Real, t_squared: Real, sheet: Option<Integer> }
            check check_cone_z;
        Quadric("sq", "axis-aligned quadric") => Quadric / QuadricBuilder {
            a: Real, b: Real, c: Real, d: Real, e: Real, f: Real, g: Real,
            x: Real, y: Real, z: Real,
        };
        GeneralQuadric("gq", "general quadric") => GeneralQuadric / GeneralQuadricBuilder {
            a: Real, b: Real, c: Real, d: Real, e: Real, f: Real, g: Real,
            h: Real, j: Real, k: Real,
        };
        TorusX("tx", "torus parallel to x axis") => TorusX / TorusXBuilder {
            x: Real, y: Real, z: Real, a: Real, b: Real, c: Real,
        } check check_torus_x;
        TorusY("ty", "torus parallel to y axis") => TorusY / TorusYBuilder {
            x: Real, y: Real, z: Real, a: Real, b: Real, c: Real,
        } check check_torus_y;
        TorusZ("tz", "torus parallel to z axis") => TorusZ / TorusZBuilder {
            x: Real, y: Real, z: Real, a: Real, b: Real, c: Real,
        } check check_torus_z;
        ArbitraryBox("box", "arbitrarily oriented box") => BoxBody / BoxBodyBuilder {
            vx: Real, vy: Real, vz: Real,
            a1x: Real, a1y: Real, a1z: Real,
            a2x: Real, a2y: Real, a2z: Real,
            a3x: Real, a3y: Real, a3z: Real,
        };
        Parallelepiped("rpp", "rectangular parallelepiped") => Parallelepiped / ParallelepipedBuilder {
            xmin: Real, xmax: Real, ymin: Real, ymax: Real, zmin: Real, zmax: Real,
        } check check_parallelepiped;
        SphereBody("sph", "sphere macrobody") => SphereBody / SphereBodyBuilder {
            vx: Real, vy: Real, vz: Real, r: Real,
        } check check_sphere_body;
        RightCircularCylinder("rcc", "right circular cylinder") => RightCircularCylinder / RightCircularCylinderBuilder {
            vx: Real, vy: Real, vz: Real, hx: Real, hy: Real, hz: Real, r: Real,
        } check check_rcc;
    }
}

fn check_plane_points(node: &PlanePoints) -> Result<(), InpError> {
    let point = |x: &Real, y: &Real, z: &Real| [x.value(), y.value(), z.value()];
    let p1 = point(node.x1(), node.y1(), node.z1());
    let p2 = point(node.x2(), node.y2(), node.z2());
    let p3 = point(node.x3(), node.y3(), node.z3());
    let u = [p2[0] - p1[0], p2[1] - p1[1], p2[2] - p1[2]];
    let v = [p3[0] - p1[0], p3[1] - p1[1], p3[2] - p1[2]];
    let normal = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    if normal.iter().all(|c| c.abs() < f64::EPSILON) {
        let shown = format!("({:?}) ({:?}) ({:?})", p1, p2, p3);
        return Err(Validator::new(PlanePoints::KEYWORD).invalid(
            "points",
            shown,
            "the three points are collinear",
        ));
    }
    Ok(())
}

fn check_sphere_origin(node: &SphereOrigin) -> Result<(), InpError> {
    Validator::new(SphereOrigin::KEYWORD).positive("r", node.r())
}

fn check_sphere(node: &Sphere) -> Result<(), InpError> {
    Validator::new(Sphere::KEYWORD).positive("r", node.r())
}

fn check_sphere_x(node: &SphereX) -> Result<(), InpError> {
    Validator::new(SphereX::KEYWORD).positive("r", node.r())
}

fn check_sphere_y(node: &SphereY) -> Result<(), InpError> {
    Validator::new(SphereY::KEYWORD).positive("r", node.r())
}

fn check_sphere_z(node: &SphereZ) -> Result<(), InpError> {
    Validator::new(SphereZ::KEYWORD).positive("r", node.r())
}

fn check_cylinder_par_x(node: &CylinderParX) -> Result<(), InpError> {
    Validator::new(CylinderParX::KEYWORD).positive("r", node.r())
}

fn check_cylinder_par_y(node: &CylinderParY) -> Result<(), InpError> {
    Validator::new(CylinderParY::KEYWORD).positive("r", node.r())
}

fn check_cylinder_par_z(node: &CylinderParZ) -> Result<(), InpError> {
    Validator::new(CylinderParZ::KEYWORD).positive("r", node.r())
}

fn check_cylinder_x(node: &CylinderX) -> Result<(), InpError> {
    Validator::new(CylinderX::KEYWORD).positive("r", node.r())
}

fn check_cylinder_y(node: &CylinderY) -> Result<(), InpError> {
    Validator::new(CylinderY::KEYWORD).positive("r", node.r())
}

fn check_cylinder_z(node: &CylinderZ) -> Result<(), InpError> {
    Validator::new(CylinderZ::KEYWORD).positive("r", node.r())
}

/// Cone checks shared by all six cone kinds.
fn check_cone(keyword: &str, t_squared: &Real, sheet: &Option<Integer>) -> Result<(), InpError> {
    let check = Validator::new(keyword);
    check.positive("t_squared", t_squared)?;
    if let Some(sheet) = sheet {
        check.one_of("sheet", sheet, &[-1, 1])?;
    }
    Ok(())
}

fn check_cone_par_x(node: &ConeParX) -> Result<(), InpError> {
    check_cone(ConeParX::KEYWORD, node.t_squared(), node.sheet())
}

fn check_cone_par_y(node: &ConeParY) -> Result<(), InpError> {
    check_cone(ConeParY::KEYWORD, node.t_squared(), node.sheet())
}

fn check_cone_par_z(node: &ConeParZ) -> Result<(), InpError> {
    check_cone(ConeParZ::KEYWORD, node.t_squared(), node.sheet())
}

fn check_cone_x(node: &ConeX) -> Result<(), InpError> {
    check_cone(ConeX::KEYWORD, node.t_squared(), node.sheet())
}

fn check_cone_y(node: &ConeY) -> Result<(), InpError> {
    check_cone(ConeY::KEYWORD, node.t_squared(), node.sheet())
}

fn check_cone_z(node: &ConeZ) -> Result<(), InpError> {
    check_cone(ConeZ::KEYWORD, node.t_squared(), node.sheet())
}

fn check_torus(keyword: &str, b: &Real, c: &Real) -> Result<(), InpError> {
    let check = Validator::new(keyword);
    check.positive("b", b)?;
    check.positive("c", c)
}

fn check_torus_x(node: &TorusX) -> Result<(), InpError> {
    check_torus(TorusX::KEYWORD, node.b(), node.c())
}

fn check_torus_y(node: &TorusY) -> Result<(), InpError> {
    check_torus(TorusY::KEYWORD, node.b(), node.c())
}

fn check_torus_z(node: &TorusZ) -> Result<(), InpError> {
    check_torus(TorusZ::KEYWORD, node.b(), node.c())
}

fn check_parallelepiped(node: &Parallelepiped) -> Result<(), InpError> {
    let check = Validator::new(Parallelepiped::KEYWORD);
    for (axis, min, max) in [
        ("x", node.xmin(), node.xmax()),
        ("y", node.ymin(), node.ymax()),
        ("z", node.zmin(), node.zmax()),
    ] {
        if min.value() >= max.value() {
            return Err(check.invalid(
                &format!("{axis}max"),
                max,
                &format!("must exceed {axis}min = {min}"),
            ));
        }
    }
    Ok(())
}

fn check_sphere_body(node: &SphereBody) -> Result<(), InpError> {
    Validator::new(SphereBody::KEYWORD).positive("r", node.r())
}

fn check_rcc(node: &RightCircularCylinder) -> Result<(), InpError> {
    let check = Validator::new(RightCircularCylinder::KEYWORD);
    let height = [node.hx(), node.hy(), node.hz()];
    if height.iter().all(|h| h.value() == 0.0) {
        return Err(check.invalid("h", "0 0 0", "height vector must be nonzero"));
    }
    check.positive("r", node.r())
}

/// Boundary condition marker written before a surface number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SurfacePrefix {
    /// `*`: specularly reflecting.
    Reflecting,
    /// `+`: white boundary.
    WhiteBoundary,
}

impl SurfacePrefix {
    pub const fn symbol(&self) -> char {
        match self {
            SurfacePrefix::Reflecting => '*',
            SurfacePrefix::WhiteBoundary => '+',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '*' => Some(SurfacePrefix::Reflecting),
            '+' => Some(SurfacePrefix::WhiteBoundary),
            _ => None,
        }
    }
}

/// `[*|+]j [n] <surface>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceCard {
    prefix: Option<SurfacePrefix>,
    number: Integer,
    transform: Option<Integer>,
    surface: Surface,
    trivia: Trivia,
}

impl SurfaceCard {
    pub const KIND: &'static str = "surface card";

    pub fn new(
        prefix: Option<SurfacePrefix>,
        number: Integer,
        transform: Option<Integer>,
        surface: Surface,
        trivia: Trivia,
    ) -> Result<Self, InpError> {
        let check = Validator::new(Self::KIND);
        match &transform {
            Some(transform) => {
                check.int_range("number", &number, 1..=MAX_TRANSFORM)?;
                check.nonzero("transform", transform)?;
                check.int_range("transform", transform, -MAX_NUMBER..=MAX_TRANSFORM)?;
            }
            None => check.int_range("number", &number, 1..=MAX_NUMBER)?,
        }
        Ok(Self {
            prefix,
            number,
            transform,
            surface,
            trivia,
        })
    }

    pub fn prefix(&self) -> Option<SurfacePrefix> {
        self.prefix
    }

    pub fn number(&self) -> &Integer {
        &self.number
    }

    pub fn transform(&self) -> Option<&Integer> {
        self.transform.as_ref()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

impl Card for SurfaceCard {
    fn decode(cursor: &mut Cursor<'_>, trivia: Trivia) -> Result<Self, InpError> {
        let prefix = cursor.peek_char().and_then(SurfacePrefix::from_symbol);
        if let Some(prefix) = prefix {
            cursor.eat_char(prefix.symbol());
        }
        let number = cursor.expect::<Integer>("surface number")?;
        cursor.separator(Sep::Space)?;
        let checkpoint = cursor.checkpoint();
        let transform = match cursor.take::<Integer>()? {
            Some(transform) if cursor.skip_ws() => Some(transform),
            _ => {
                cursor.restore(checkpoint);
                None
            }
        };
        let surface = dispatch::parse::<Surface>(cursor.take_rest())?;
        Self::new(prefix, number, transform, surface, trivia)
    }

    fn render(&self, out: &mut Writer) {
        let prefix = self.prefix.map(|p| p.symbol().to_string()).unwrap_or_default();
        out.word(&format!("{prefix}{}", self.number.to_text()));
        if let Some(transform) = &self.transform {
            out.word(&transform.to_text());
        }
        out.word(&self.surface.to_text());
    }

    fn trivia(&self) -> &Trivia {
        &self.trivia
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::grammar::Grammar;

    #[test]
    fn px_end_to_end() {
        let surface = Surface::from_text("px 1.5").unwrap();
        match &surface {
            Surface::PlaneX(plane) => assert_eq!(plane.d().value(), 1.5),
            other => panic!("expected px, got {other:?}"),
        }
        assert_eq!(surface.to_text(), "px 1.5");
    }

    #[test]
    fn plane_arity_selects_producer() {
        let four = Surface::from_text("p 1 0 0 5").unwrap();
        assert_eq!(four.label(), "general plane");
        let nine = Surface::from_text("p 0 0 0 1 0 0 0 1 0").unwrap();
        assert_eq!(nine.label(), "plane through three points");
        assert!(Surface::from_text("p 1 2 3").unwrap_err().is_syntax());
    }

    #[test]
    fn collinear_points_are_rejected() {
        let error = Surface::from_text("p 0 0 0 1 1 1 2 2 2").unwrap_err();
        assert!(error.is_semantics());
    }

    #[test]
    fn radii_must_be_positive() {
        let error = Surface::from_text("so -2").unwrap_err();
        assert_eq!(error.code(), "inp::semantics::so::out_of_range");
        assert!(Surface::from_text("c/z 0 0 0").unwrap_err().is_semantics());
    }

    #[test]
    fn cone_sheet_is_plus_or_minus_one() {
        assert!(Surface::from_text("kz 5 0.25 -1").is_ok());
        assert!(Surface::from_text("kz 5 0.25").is_ok());
        let error = Surface::from_text("kz 5 0.25 2").unwrap_err();
        assert!(matches!(error.kind, ErrorKind::NotInSet { .. }));
    }

    #[test]
    fn rpp_bounds_are_ordered() {
        assert!(Surface::from_text("rpp -1 1 -1 1 -1 1").is_ok());
        assert!(Surface::from_text("rpp 1 -1 -1 1 -1 1").unwrap_err().is_semantics());
    }

    #[test]
    fn builder_matches_parser() {
        let built = Surface::from(
            SphereBody::builder()
                .vx(0)
                .vy(0)
                .vz(0)
                .r(2.5)
                .build()
                .unwrap(),
        );
        assert_eq!(built.to_text(), "sph 0 0 0 2.5");
        assert_eq!(Surface::from_text(&built.to_text()).unwrap(), built);
    }

    #[test]
    fn card_with_prefix_and_transform() {
        let card = SurfaceCard::parse("*12 3 cz 4.5 $ outer wall").unwrap();
        assert_eq!(card.prefix(), Some(SurfacePrefix::Reflecting));
        assert_eq!(card.number().value(), 12);
        assert_eq!(card.transform().map(Integer::value), Some(3));
        assert_eq!(card.to_text(), "*12 3 cz 4.5");
    }

    #[test]
    fn transform_restricts_surface_number() {
        let error = SurfaceCard::parse("1000 3 px 1").unwrap_err();
        assert_eq!(error.kind.field(), Some("number"));
        assert!(SurfaceCard::parse("1000 px 1").is_ok());
        assert!(SurfaceCard::parse("5 0 px 1").unwrap_err().is_semantics());
        assert!(SurfaceCard::parse("5 1000 px 1").unwrap_err().is_semantics());
        assert!(SurfaceCard::parse("5 -1000 px 1").is_ok());
    }
}
