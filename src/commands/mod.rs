pub mod genomes;
pub mod tracks;
