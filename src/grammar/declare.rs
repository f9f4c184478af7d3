//! Declarative grammar families.
//!
//! ```text
//! keyword_grammar! {
//!     pub enum Surface : "surface", assign = false {
//!         PlaneX("px", "plane normal to x") => PlaneX / PlaneXBuilder { d: Real };
//!         SphereOrigin("so", "sphere at origin") => SphereOrigin / SphereOriginBuilder { r: Real }
//!             check check_radius;
//!         Material("m" + number: Integer, "material") => Material / MaterialBuilder { ... };
//!     }
//! }
//! ```
//!
//! Each line declares one producer: the enum variant, its keyword (optionally
//! followed by a field written directly against it, such as the `1` of `m1`), a
//! label, the node and builder type names, the ordered fields and an optional
//! validation hook `fn(&Node) -> Result<(), InpError>`.
//!
//! The expansion provides:
//!
//! - the family enum with a `Grammar` impl and a static registry
//! - one node struct per producer, immutable, with a read accessor per field
//! - one builder per node; text decoding goes through the same builder, so parsed
//!   and hand-built nodes are validated identically

macro_rules! keyword_grammar {
    (
        $(#[$meta:meta])*
        pub enum $family:ident : $family_name:literal, assign = $assign:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($keyword:literal $(+ $suffix:ident : $suffix_ty:ty)?, $label:literal)
                    => $node:ident / $builder:ident {
                        $($field:ident : $fty:ty),* $(,)?
                    } $(check $check:path)?;
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize)]
        pub enum $family {
            $(
                $(#[$vmeta])*
                $variant($node),
            )+
        }

        $(
            #[doc = concat!("`", $keyword, "`: ", $label, ".")]
            #[derive(Debug, Clone, PartialEq, serde::Serialize)]
            pub struct $node {
                $( $suffix: $suffix_ty, )?
                $( $field: $fty, )*
            }

            #[doc = concat!("Loose constructor for [`", stringify!($node), "`].")]
            #[derive(Debug, Clone, Default)]
            pub struct $builder {
                $( $suffix: Option<<$suffix_ty as $crate::grammar::Field>::Raw>, )?
                $( $field: Option<<$fty as $crate::grammar::Field>::Raw>, )*
            }

            impl $node {
                pub const KEYWORD: &'static str = $keyword;

                $(
                    pub fn $suffix(&self) -> &$suffix_ty {
                        &self.$suffix
                    }
                )?

                $(
                    pub fn $field(&self) -> &$fty {
                        &self.$field
                    }
                )*

                pub fn builder() -> $builder {
                    $builder::default()
                }

                /// Builder pre-filled with this node's values.
                pub fn to_builder(&self) -> $builder {
                    $builder {
                        $( $suffix: $crate::grammar::Field::unbuild(&self.$suffix), )?
                        $( $field: $crate::grammar::Field::unbuild(&self.$field), )*
                    }
                }

                fn field_specs() -> Vec<$crate::grammar::FieldSpec> {
                    vec![
                        $(
                            $crate::grammar::FieldSpec::new(
                                stringify!($suffix),
                                <$suffix_ty as $crate::grammar::Field>::describe(),
                            ),
                        )?
                        $(
                            $crate::grammar::FieldSpec::new(
                                stringify!($field),
                                <$fty as $crate::grammar::Field>::describe(),
                            ),
                        )*
                    ]
                }

                #[allow(unused_mut, unused_variables)]
                fn grammar_body() -> Result<String, $crate::errors::InpError> {
                    let mut seps = $crate::grammar::SepSequence::new(
                        $keyword,
                        <$family as $crate::grammar::Grammar>::ASSIGN,
                    );
                    let mut body = ::regex::escape($keyword);
                    $(
                        body.push_str(&<$suffix_ty as $crate::grammar::Field>::pattern(
                            $crate::syntax::Sep::Adjacent,
                        )?);
                    )?
                    $(
                        body.push_str(&<$fty as $crate::grammar::Field>::pattern(seps.advance())?);
                    )*
                    Ok(body)
                }

                #[allow(unused_mut, unused_variables)]
                fn decode(cursor: &mut $crate::syntax::Cursor<'_>) -> Result<Self, $crate::errors::InpError> {
                    if !cursor.keyword($keyword) {
                        return Err($crate::errors::ErrorReporting::unexpected_token(
                            &*cursor,
                            concat!("'", $keyword, "'"),
                            cursor.peek_word(),
                            cursor.word_span(),
                        ));
                    }
                    let mut seps = $crate::grammar::SepSequence::new(
                        $keyword,
                        <$family as $crate::grammar::Grammar>::ASSIGN,
                    );
                    let parsed = $builder {
                        $(
                            $suffix: $crate::grammar::Field::unbuild(
                                &<$suffix_ty as $crate::grammar::Field>::parse(
                                    cursor,
                                    $crate::syntax::Sep::Adjacent,
                                )?,
                            ),
                        )?
                        $(
                            $field: $crate::grammar::Field::unbuild(
                                &<$fty as $crate::grammar::Field>::parse(cursor, seps.advance())?,
                            ),
                        )*
                    };
                    parsed.build()
                }

                #[allow(unused_mut, unused_variables)]
                fn render(&self, out: &mut $crate::syntax::Writer) {
                    out.word($keyword);
                    let mut seps = $crate::grammar::SepSequence::new(
                        $keyword,
                        <$family as $crate::grammar::Grammar>::ASSIGN,
                    );
                    $(
                        $crate::grammar::Field::render(
                            &self.$suffix,
                            out,
                            $crate::syntax::Sep::Adjacent,
                        );
                    )?
                    $(
                        $crate::grammar::Field::render(&self.$field, out, seps.advance());
                    )*
                }
            }

            impl $builder {
                $(
                    pub fn $suffix(
                        mut self,
                        value: impl Into<<$suffix_ty as $crate::grammar::Field>::Raw>,
                    ) -> Self {
                        self.$suffix = Some(value.into());
                        self
                    }
                )?

                $(
                    pub fn $field(
                        mut self,
                        value: impl Into<<$fty as $crate::grammar::Field>::Raw>,
                    ) -> Self {
                        self.$field = Some(value.into());
                        self
                    }
                )*

                /// Clears a field by name; unknown names are ignored.
                pub fn unset(mut self, field: &str) -> Self {
                    match field {
                        $( stringify!($suffix) => self.$suffix = None, )?
                        $( stringify!($field) => self.$field = None, )*
                        _ => {}
                    }
                    self
                }

                /// Normalizes every field and runs the node's validation.
                pub fn build(self) -> Result<$node, $crate::errors::InpError> {
                    let node = $node {
                        $(
                            $suffix: $crate::builder::raw::resolve::<$suffix_ty>(
                                self.$suffix,
                                $keyword,
                                stringify!($suffix),
                            )?,
                        )?
                        $(
                            $field: $crate::builder::raw::resolve::<$fty>(
                                self.$field,
                                $keyword,
                                stringify!($field),
                            )?,
                        )*
                    };
                    $( $check(&node)?; )?
                    Ok(node)
                }
            }

            impl From<$node> for $family {
                fn from(node: $node) -> Self {
                    $family::$variant(node)
                }
            }
        )+

        impl $crate::grammar::Grammar for $family {
            const FAMILY: &'static str = $family_name;
            const ASSIGN: bool = $assign;

            fn registry() -> Result<
                &'static $crate::grammar::Registry<Self>,
                $crate::errors::InpError,
            > {
                static REGISTRY: ::once_cell::sync::OnceCell<$crate::grammar::Registry<$family>> =
                    ::once_cell::sync::OnceCell::new();
                REGISTRY.get_or_try_init(|| {
                    $crate::grammar::Registry::build(
                        $family_name,
                        vec![
                            $(
                                $crate::grammar::Producer::<$family>::new(
                                    $family_name,
                                    $keyword,
                                    $label,
                                    $node::field_specs(),
                                    $node::grammar_body()?,
                                    |cursor| $node::decode(cursor).map($family::$variant),
                                )?,
                            )+
                        ],
                    )
                })
            }

            fn keyword(&self) -> &'static str {
                match self {
                    $( $family::$variant(_) => $keyword, )+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $( $family::$variant(_) => $label, )+
                }
            }

            fn render(&self, out: &mut $crate::syntax::Writer) {
                match self {
                    $( $family::$variant(node) => node.render(out), )+
                }
            }
        }
    };
}
pub(crate) use keyword_grammar;

#[cfg(test)]
mod tests {
    use crate::errors::{ErrorKind, InpError};
    use crate::grammar::{dispatch, Grammar};
    use crate::types::{Integer, Real};
    use crate::validation::Validator;

    fn check_positive(node: &Scale) -> Result<(), InpError> {
        Validator::new(Scale::KEYWORD).positive("factor", node.factor())
    }

    keyword_grammar! {
        pub enum Probe : "probe", assign = true {
            Scale("scale", "scale factor") => Scale / ScaleBuilder { factor: Real } check check_positive;
            Pair("pair", "two integers") => Pair / PairBuilder { left: Integer, right: Option<Integer> };
            Tagged("tag" + id: Integer, "tagged value") => Tagged / TaggedBuilder { value: Real };
        }
    }

    keyword_grammar! {
        pub enum Clash : "clash", assign = false {
            First("x", "first") => First / FirstBuilder { a: Real };
            Second("x", "second") => Second / SecondBuilder { b: Real };
        }
    }

    #[test]
    fn decodes_assignments_and_suffixes() {
        let scale = dispatch::parse::<Probe>("SCALE = 2.5").unwrap();
        assert_eq!(scale.to_text(), "scale=2.5");

        let tagged = dispatch::parse::<Probe>("tag7 1.5").unwrap();
        match &tagged {
            Probe::Tagged(node) => assert_eq!(node.id().value(), 7),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(tagged.to_text(), "tag7=1.5");
    }

    #[test]
    fn optional_trailing_field() {
        let short = dispatch::parse::<Probe>("pair=1").unwrap();
        let long = dispatch::parse::<Probe>("pair=1 2").unwrap();
        assert_ne!(short, long);
        assert_eq!(long.to_text(), "pair=1 2");
    }

    #[test]
    fn parsed_values_are_validated() {
        let error = dispatch::parse::<Probe>("scale=-1").unwrap_err();
        assert!(error.is_semantics());
        assert_eq!(error.code(), "inp::semantics::scale::out_of_range");
    }

    #[test]
    fn builder_requires_fields() {
        let error = Pair::builder().right(2).build().unwrap_err();
        assert_eq!(
            error.kind,
            ErrorKind::MissingField {
                keyword: "pair".into(),
                field: "left".into()
            }
        );
        let built = Pair::builder().left(1).build().unwrap();
        assert!(built.right().is_none());
    }

    #[test]
    fn unbuild_modify_build() {
        let Probe::Pair(pair) = dispatch::parse::<Probe>("pair=1 2").unwrap() else {
            panic!("expected pair");
        };
        let changed = pair.to_builder().unset("right").left(5).build().unwrap();
        assert_eq!(Probe::from(changed).to_text(), "pair=5");
    }

    #[test]
    fn identical_productions_fail_to_register() {
        let error = Clash::registry().err().unwrap();
        assert!(matches!(error.kind, ErrorKind::AmbiguousGrammar { .. }));
        assert!(dispatch::parse::<Clash>("x 1").is_err());
    }
}
