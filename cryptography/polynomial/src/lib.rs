pub mod domain;
mod fft;
pub mod poly_coeff;

mod coset_fft;

pub use coset_fft::CosetFFT;
pub use fft::{reverse_bit_order, reverse_bits};
