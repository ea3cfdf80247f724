mod batch_toeplitz;
mod cosets;
mod h_poly;
mod prover;
mod toeplitz;
mod verifier;

#[cfg(test)]
mod naive;

pub use cosets::recover_evaluations_in_domain_order;
pub use prover::{MultiOpenProver, ProverInput};
pub use verifier::{CommitmentIndex, CosetIndex, MultiOpenVerifier};
