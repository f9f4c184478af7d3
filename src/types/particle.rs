use serde::Serialize;
use std::fmt;

use crate::errors::{ErrorKind, InpError};
use crate::types::{lexeme_regexes, Primitive};

macro_rules! particles {
    ($($variant:ident => $symbol:literal, $name:literal;)*) => {
        /// MCNP6 particle, written as a one-character symbol.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Particle {
            $($variant,)*
        }

        impl Particle {
            pub const ALL: &'static [Particle] = &[$(Particle::$variant,)*];

            pub const fn symbol(&self) -> char {
                match self {
                    $(Particle::$variant => $symbol,)*
                }
            }

            pub const fn name(&self) -> &'static str {
                match self {
                    $(Particle::$variant => $name,)*
                }
            }

            pub fn from_symbol(symbol: char) -> Option<Self> {
                match symbol.to_ascii_lowercase() {
                    $($symbol => Some(Particle::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

particles! {
    Neutron => 'n', "neutron";
    AntiNeutron => 'q', "anti-neutron";
    Photon => 'p', "photon";
    Electron => 'e', "electron";
    Positron => 'f', "positron";
    MuonMinus => '|', "negative muon";
    MuonPlus => '!', "positive muon";
    ElectronNeutrino => 'u', "electron neutrino";
    AntiElectronNeutrino => '<', "anti electron neutrino";
    MuonNeutrino => 'v', "muon neutrino";
    AntiMuonNeutrino => '>', "anti muon neutrino";
    Proton => 'h', "proton";
    AntiProton => 'g', "anti-proton";
    Lambda => 'l', "lambda baryon";
    AntiLambda => 'b', "anti lambda baryon";
    SigmaPlus => '+', "positive sigma baryon";
    AntiSigmaPlus => '_', "anti positive sigma baryon";
    SigmaMinus => '-', "negative sigma baryon";
    AntiSigmaMinus => '~', "anti negative sigma baryon";
    Cascade => 'x', "cascade";
    AntiCascade => 'c', "anti cascade";
    CascadeMinus => 'y', "negative cascade";
    AntiCascadeMinus => 'w', "positive cascade";
    OmegaMinus => 'o', "omega baryon";
    AntiOmega => '@', "anti omega";
    PionPlus => '/', "positive pion";
    PionMinus => '*', "negative pion";
    PionZero => 'z', "neutral pion";
    KaonPlus => 'k', "positive kaon";
    KaonMinus => '?', "negative kaon";
    KaonShort => '%', "kaon short";
    KaonLong => '^', "kaon long";
    Deuteron => 'd', "deuteron";
    Triton => 't', "triton";
    Helion => 's', "helion";
    Alpha => 'a', "alpha";
    HeavyIon => '#', "heavy ion";
}

fn invalid(literal_type: &str, text: &str) -> InpError {
    InpError::new(ErrorKind::InvalidLiteral {
        literal_type: literal_type.into(),
        value: text.into(),
    })
    .with_source_if_absent(text)
}

impl Primitive for Particle {
    const NAME: &'static str = "particle";

    fn pattern() -> &'static str {
        r"[nqpef|!u<v>hglb+_\-~xcywo@/*zk?%^dtsa#]"
    }

    fn from_text(text: &str) -> Result<Self, InpError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Self::from_symbol(symbol).ok_or_else(|| invalid(Self::NAME, text)),
            _ => Err(invalid(Self::NAME, text)),
        }
    }

    fn to_text(&self) -> String {
        self.symbol().to_string()
    }

    lexeme_regexes!(Particle);
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Particle list attached to a keyword, as in `imp:n,p`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Designator(Vec<Particle>);

impl Designator {
    pub fn new(particles: Vec<Particle>) -> Result<Self, InpError> {
        if particles.is_empty() {
            return Err(InpError::new(ErrorKind::InvalidValue {
                keyword: "designator".into(),
                field: "particles".into(),
                value: String::new(),
                reason: "at least one particle is required".into(),
            }));
        }
        Ok(Self(particles))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.0
    }
}

impl Primitive for Designator {
    const NAME: &'static str = "designator";

    fn pattern() -> &'static str {
        r":[nqpef|!u<v>hglb+_\-~xcywo@/*zk?%^dtsa#](?:,[nqpef|!u<v>hglb+_\-~xcywo@/*zk?%^dtsa#])*"
    }

    fn from_text(text: &str) -> Result<Self, InpError> {
        if !Self::anchored().is_match(text) {
            return Err(invalid(Self::NAME, text));
        }
        let particles = text[1..]
            .split(',')
            .map(|symbol| Particle::from_text(symbol).map_err(|_| invalid(Self::NAME, text)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(particles))
    }

    fn to_text(&self) -> String {
        let symbols: Vec<String> = self.0.iter().map(Particle::to_text).collect();
        format!(":{}", symbols.join(","))
    }

    lexeme_regexes!(Designator);
}

impl From<Particle> for Designator {
    fn from(particle: Particle) -> Self {
        Self(vec![particle])
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
