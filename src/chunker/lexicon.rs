//! Static physics lexicons for metadata enrichment.
//!
//! Process-wide immutable tables, shared by reference into the enricher.
//! Detection is plain substring matching; entries are chosen to be
//! distinctive enough that this stays useful on real physics text.

/// Particle names, matched case-insensitively.
pub const PARTICLES: &[&str] = &[
    "higgs",
    "electron",
    "muon",
    "tau",
    "neutrino",
    "photon",
    "gluon",
    "quark",
    "lepton",
    "boson",
    "fermion",
    "hadron",
    "pion",
    "kaon",
    "proton",
    "neutron",
];

/// Detector and facility names. Only the first eight entries feed
/// `detector_mentions`; the rest serve tag and classification checks.
pub const DETECTORS: &[&str] = &[
    "ATLAS",
    "CMS",
    "LHCb",
    "ALICE",
    "LHC",
    "CERN",
    "calorimeter",
    "tracker",
    "solenoid",
    "spectrometer",
];

/// Physics concepts, matched case-insensitively.
pub const CONCEPTS: &[&str] = &[
    "standard model",
    "symmetry breaking",
    "cross section",
    "branching ratio",
    "luminosity",
    "decay channel",
    "gauge invariance",
    "quantum field",
    "lagrangian",
    "renormalization",
    "perturbation",
    "coupling constant",
    "parton distribution",
    "beam energy",
    "invariant mass",
    "scattering amplitude",
];

/// Symbolic variable names. Checked case-insensitively and, to catch
/// Greek letters and mixed-case symbols, case-sensitively as well.
pub const VARIABLES: &[&str] = &[
    "pT",
    "GeV",
    "TeV",
    "MeV",
    "η",
    "φ",
    "ψ",
    "σ",
    "λ",
    "α_s",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_particles_present() {
        for particle in ["higgs", "muon", "electron", "photon", "quark", "gluon"] {
            assert!(PARTICLES.contains(&particle), "missing particle {particle}");
        }
    }

    #[test]
    fn test_major_experiments_lead_detector_lexicon() {
        for detector in ["ATLAS", "CMS", "LHC", "CERN"] {
            assert!(
                DETECTORS.iter().take(8).any(|d| *d == detector),
                "{detector} must be within the first eight detector entries"
            );
        }
    }
}
