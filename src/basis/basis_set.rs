use crate::defaults;
use crate::initialization::Element;
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::collections::HashMap;

/// Basis-set exchange (BSE) JSON data shipped with the program.
pub const STO_3G_JSON: &str = include_str!("../../data/sto-3g.json");
pub const AUG_CC_PVDZ_JSON: &str = include_str!("../../data/aug-cc-pvdz.json");

#[derive(Serialize, Deserialize, Debug)]
struct InputData {
    name: String,
    elements: HashMap<usize, InputElement>,
}

#[derive(Serialize, Deserialize, Debug)]
struct InputElement {
    electron_shells: Vec<InputShell>,
}

#[derive(Serialize, Deserialize, Debug)]
struct InputShell {
    angular_momentum: Vec<usize>,
    exponents: Vec<String>,
    coefficients: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct BasisSet {
    name: String,
    basis_functions: HashMap<Element, Vec<BasisFunction>>,
}

impl From<InputData> for BasisSet {
    fn from(data: InputData) -> Self {
        // The HashMap is initialized.
        let mut bfs: HashMap<Element, Vec<BasisFunction>> = HashMap::new();
        for (element, shells) in data.elements.iter() {
            // The corresponding Element is created.
            let el: Element = Element::from(*element as u8);
            // The BasisFunctions are created.
            let mut functions: Vec<BasisFunction> = Vec::new();
            // Iteration over all shells of the element.
            for shell in shells.electron_shells.iter() {
                // The exponents are shared by all contractions of the shell.
                let exponents: Vec<f64> = shell
                    .exponents
                    .iter()
                    .map(|x| x.parse::<f64>().unwrap())
                    .collect();
                if shell.angular_momentum.len() == shell.coefficients.len() {
                    // One contraction per angular momentum, e.g. the combined
                    // sp shells of the Pople basis sets.
                    for (l, c) in shell.angular_momentum.iter().zip(shell.coefficients.iter()) {
                        let coefficients: Vec<f64> =
                            c.iter().map(|x| x.parse::<f64>().unwrap()).collect();
                        functions.push(BasisFunction {
                            l: AngularMomentum::from(*l),
                            exponents: exponents.clone(),
                            coefficients,
                        });
                    }
                } else if shell.angular_momentum.len() == 1 {
                    // A general contraction. Every coefficient row defines its
                    // own basis function over the shared set of primitives.
                    let l: AngularMomentum = AngularMomentum::from(shell.angular_momentum[0]);
                    for c in shell.coefficients.iter() {
                        let coefficients: Vec<f64> =
                            c.iter().map(|x| x.parse::<f64>().unwrap()).collect();
                        functions.push(BasisFunction {
                            l,
                            exponents: exponents.clone(),
                            coefficients,
                        });
                    }
                } else {
                    panic!(
                        "The number of angular momenta does not match the number \
                         of contractions for element {}",
                        element
                    );
                }
            }

            bfs.insert(el, functions);
        }
        Self {
            name: data.name,
            basis_functions: bfs,
        }
    }
}

impl Default for BasisSet {
    /// Returns the default basis set, STO-3G.
    fn default() -> Self {
        Self::from_name(defaults::BASIS_SET)
    }
}

impl BasisSet {
    /// Load one of the embedded basis sets by its name (case insensitive).
    pub fn from_name(name: &str) -> Self {
        let data: &str = match name.to_lowercase().as_str() {
            "sto-3g" => STO_3G_JSON,
            "aug-cc-pvdz" => AUG_CC_PVDZ_JSON,
            n => panic!("The basis set {} is not available", n),
        };
        let data: InputData = from_str(data).expect("JSON file was not well-formatted");
        Self::from(data)
    }

    /// The contracted basis functions for the given element.
    pub fn basis_functions(&self, element: Element) -> &[BasisFunction] {
        match self.basis_functions.get(&element) {
            Some(functions) => functions,
            None => panic!(
                "The basis set {} does not contain the element {}",
                self.name, element
            ),
        }
    }
}

/// One contracted Gaussian basis function, a fixed linear combination of
/// primitives that share the angular momentum.
#[derive(Debug, Clone)]
pub struct BasisFunction {
    pub l: AngularMomentum,
    pub exponents: Vec<f64>,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AngularMomentum {
    S = 0,
    P = 1,
    D = 2,
    F = 3,
    G = 4,
}

impl From<usize> for AngularMomentum {
    fn from(value: usize) -> Self {
        match value {
            0 => Self::S,
            1 => Self::P,
            2 => Self::D,
            3 => Self::F,
            4 => Self::G,
            a => {
                panic!("Angular momentum:{} is not implemented", a)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sto_3g_oxygen_shells() {
        let basis: BasisSet = BasisSet::from_name("sto-3g");
        let functions: &[BasisFunction] = basis.basis_functions(Element::O);
        // 1s, 2s and 2p contractions
        assert_eq!(functions.len(), 3);
        assert_eq!(functions[0].l, AngularMomentum::S);
        assert_eq!(functions[1].l, AngularMomentum::S);
        assert_eq!(functions[2].l, AngularMomentum::P);
        // the combined sp shell shares its exponents
        assert_eq!(functions[1].exponents, functions[2].exponents);
        assert_eq!(functions[0].exponents.len(), 3);
    }

    #[test]
    #[should_panic(expected = "does not contain the element")]
    fn missing_element_panics_with_the_set_name() {
        let basis: BasisSet = BasisSet::from_name("sto-3g");
        basis.basis_functions(Element::Cl);
    }

    #[test]
    fn aug_cc_pvdz_oxygen_shells() {
        let basis: BasisSet = BasisSet::from_name("aug-cc-pvdz");
        let functions: &[BasisFunction] = basis.basis_functions(Element::O);
        // 4s, 3p and 2d contractions, the first two share the general
        // contraction primitives
        assert_eq!(functions.len(), 9);
        assert_eq!(functions[0].exponents, functions[1].exponents);
        let count_d: usize = functions
            .iter()
            .filter(|f| f.l == AngularMomentum::D)
            .count();
        assert_eq!(count_d, 2);
    }
}
