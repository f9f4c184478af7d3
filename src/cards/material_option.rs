//! Options that follow the component list of an `m` card.

use crate::errors::InpError;
use crate::grammar::keyword_grammar;
use crate::types::{Integer, Text};
use crate::validation::Validator;

keyword_grammar! {
    pub enum MaterialOption : "material option", assign = true {
        NeutronLibrary("nlib", "default neutron table") => NeutronLibrary / NeutronLibraryBuilder { library: Text };
        PhotonLibrary("plib", "default photon table") => PhotonLibrary / PhotonLibraryBuilder { library: Text };
        Gas("gas", "gas density-effect flag") => Gas / GasBuilder { flag: Integer } check check_gas;
        EnergyStep("estep", "electron sub-steps per energy step") => EnergyStep / EnergyStepBuilder {
            steps: Integer,
        } check check_estep;
    }
}

fn check_gas(node: &Gas) -> Result<(), InpError> {
    Validator::new(Gas::KEYWORD).one_of("flag", node.flag(), &[0, 1])
}

fn check_estep(node: &EnergyStep) -> Result<(), InpError> {
    Validator::new(EnergyStep::KEYWORD).at_least("steps", node.steps(), 1)
}
