use crate::defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_jobtype() -> String {
    String::from(JOBTYPE)
}
fn default_verbose() -> i8 {
    0
}
fn default_charge() -> i8 {
    CHARGE
}
fn default_multiplicity() -> u8 {
    MULTIPLICITY
}
fn default_basis_set() -> String {
    String::from(BASIS_SET)
}
fn default_scf_max_cycles() -> usize {
    SCF_MAX_CYCLES
}
fn default_scf_energy_conv() -> f64 {
    SCF_ENERGY_CONV
}
fn default_scf_density_conv() -> f64 {
    SCF_DENSITY_CONV
}
fn default_scf_use_diis() -> bool {
    SCF_USE_DIIS
}
fn default_cphf_mode() -> String {
    String::from(CPHF_MODE)
}
fn default_cphf_max_cycles() -> usize {
    CPHF_MAX_CYCLES
}
fn default_cphf_conv() -> f64 {
    CPHF_CONV
}
fn default_cphf_use_diis() -> bool {
    CPHF_USE_DIIS
}
fn default_memory_budget_gb() -> f64 {
    MEMORY_BUDGET_GB
}
fn default_number_of_cores() -> usize {
    1
}
fn default_mol_config() -> MoleculeConfig {
    let mol_config: MoleculeConfig = toml::from_str("").unwrap();
    mol_config
}
fn default_scf_config() -> ScfConfig {
    let scf_config: ScfConfig = toml::from_str("").unwrap();
    scf_config
}
fn default_cphf_config() -> CphfConfig {
    let cphf_config: CphfConfig = toml::from_str("").unwrap();
    cphf_config
}
fn default_parallelization_config() -> ParallelizationConfig {
    let parallelization_config: ParallelizationConfig = toml::from_str("").unwrap();
    parallelization_config
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Configuration {
    #[serde(default = "default_jobtype")]
    pub jobtype: String,
    #[serde(default = "default_verbose")]
    pub verbose: i8,
    #[serde(default = "default_mol_config")]
    pub mol: MoleculeConfig,
    #[serde(default = "default_scf_config")]
    pub scf: ScfConfig,
    #[serde(default = "default_cphf_config")]
    pub cphf: CphfConfig,
    #[serde(default = "default_parallelization_config")]
    pub parallelization: ParallelizationConfig,
}

impl Configuration {
    pub fn new() -> Self {
        // read the configuration file, if it does not exist in the directory
        // the program initializes the default settings and writes a configuration
        // file to the directory
        let config_file_path: &Path = Path::new(CONFIG_FILE_NAME);
        let mut config_string: String = if config_file_path.exists() {
            fs::read_to_string(config_file_path).expect("Unable to read config file")
        } else {
            String::from("")
        };
        // load the configuration settings
        let config: Self = toml::from_str(&config_string).unwrap();
        // save the configuration file if it does not exist already
        if config_file_path.exists() == false {
            config_string = toml::to_string(&config).unwrap();
            fs::write(config_file_path, config_string).expect("Unable to write config file");
        }
        config
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let config: Self = toml::from_str("").unwrap();
        config
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MoleculeConfig {
    #[serde(default = "default_charge")]
    pub charge: i8,
    #[serde(default = "default_multiplicity")]
    pub multiplicity: u8,
    #[serde(default = "default_basis_set")]
    pub basis_set: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ScfConfig {
    #[serde(default = "default_scf_max_cycles")]
    pub scf_max_cycles: usize,
    #[serde(default = "default_scf_energy_conv")]
    pub scf_energy_conv: f64,
    #[serde(default = "default_scf_density_conv")]
    pub scf_density_conv: f64,
    #[serde(default = "default_scf_use_diis")]
    pub scf_use_diis: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CphfConfig {
    #[serde(default = "default_cphf_mode")]
    pub cphf_mode: String,
    #[serde(default = "default_cphf_max_cycles")]
    pub cphf_max_cycles: usize,
    #[serde(default = "default_cphf_conv")]
    pub cphf_conv: f64,
    #[serde(default = "default_cphf_use_diis")]
    pub cphf_use_diis: bool,
    #[serde(default = "default_memory_budget_gb")]
    pub memory_budget_gb: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ParallelizationConfig {
    #[serde(default = "default_number_of_cores")]
    pub number_of_cores: usize,
}
