pub use jk::{JkBuilder, JkEngine};
pub use one_electron::{one_electron_integrals, OneElectronIntegrals};
pub use two_electron::eri_tensor;

pub mod boys;
pub mod hermite;
mod jk;
mod one_electron;
mod two_electron;
