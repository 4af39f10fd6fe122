use phf::{phf_map, Map};

pub const BOHR_TO_ANGS: f64 = 0.52917720859;

/// Masses of the most abundant isotopes in atomic mass units,
/// used to place the molecule in its center-of-mass frame.
pub static ATOMIC_MASSES: Map<u8, f64> = phf_map! {
    1u8 => 1.00782503207,
    2u8 => 4.00260325415,
    3u8 => 7.016004548,
    4u8 => 9.012182201,
    5u8 => 11.009305406,
    6u8 => 12.0000000,
    7u8 => 14.0030740048,
    8u8 => 15.99491461957,
    9u8 => 18.998403224,
    10u8 => 19.99244017542,
    11u8 => 22.98976928087,
    12u8 => 23.985041699,
    13u8 => 26.981538627,
    14u8 => 27.97692653246,
    15u8 => 30.97376163,
    16u8 => 31.972070999,
    17u8 => 34.968852682,
    18u8 => 39.96238312251,
};
