use crate::cli::GenomesArgs;
use crate::utils::{BuiltinGenomes, ChromosomeRegistry, Result};
use std::io::Write;

pub fn genomes(_args: GenomesArgs) -> Result<()> {
    let registry = BuiltinGenomes;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for genome in registry.genomes() {
        let chromosomes = registry.chromosomes(&genome)?;
        writeln!(out, "{}\t{}", genome, chromosomes.len()).map_err(|e| e.to_string())?;
    }
    Ok(())
}
