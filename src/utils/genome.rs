use crate::utils::Result;
use std::{cmp::Ordering, fmt, sync::Arc};

const HG19: [(&str, u64); 24] = [
    ("chr1", 249250621),
    ("chr2", 243199373),
    ("chr3", 198022430),
    ("chr4", 191154276),
    ("chr5", 180915260),
    ("chr6", 171115067),
    ("chr7", 159138663),
    ("chr8", 146364022),
    ("chr9", 141213431),
    ("chr10", 135534747),
    ("chr11", 135006516),
    ("chr12", 133851895),
    ("chr13", 115169878),
    ("chr14", 107349540),
    ("chr15", 102531392),
    ("chr16", 90354753),
    ("chr17", 81195210),
    ("chr18", 78077248),
    ("chr19", 59128983),
    ("chr20", 63025520),
    ("chr21", 48129895),
    ("chr22", 51304566),
    ("chrX", 155270560),
    ("chrY", 59373566),
];

const HG38: [(&str, u64); 24] = [
    ("chr1", 248956422),
    ("chr2", 242193529),
    ("chr3", 198295559),
    ("chr4", 190214555),
    ("chr5", 181538259),
    ("chr6", 170805979),
    ("chr7", 159345973),
    ("chr8", 145138636),
    ("chr9", 138394717),
    ("chr10", 133797422),
    ("chr11", 135086622),
    ("chr12", 133275309),
    ("chr13", 114364328),
    ("chr14", 107043718),
    ("chr15", 101991189),
    ("chr16", 90338345),
    ("chr17", 83257441),
    ("chr18", 80373285),
    ("chr19", 58617616),
    ("chr20", 64444167),
    ("chr21", 46709983),
    ("chr22", 50818468),
    ("chrX", 156040895),
    ("chrY", 57227415),
];

/// Canonical chromosome label, ordered in karyotype order
/// (chr1..chr22, chrX, chrY, chrM, then anything else by name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    name: Arc<str>,
}

impl Chromosome {
    pub fn new(label: &str) -> Result<Self> {
        let label = label.trim();
        let rest = match label.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &label[3..],
            _ => label,
        };
        if rest.is_empty() {
            return Err(format!("Invalid chromosome label: '{}'", label));
        }

        let rest = match rest.to_ascii_uppercase().as_str() {
            "X" => "X".to_string(),
            "Y" => "Y".to_string(),
            "M" | "MT" => "M".to_string(),
            _ => match rest.parse::<u32>() {
                Ok(number) => number.to_string(),
                Err(_) => rest.to_string(),
            },
        };

        Ok(Self {
            name: format!("chr{}", rest).into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn rank(&self) -> (u8, u32, &str) {
        let rest = &self.name[3..];
        match rest {
            "X" => (1, 0, ""),
            "Y" => (1, 1, ""),
            "M" => (1, 2, ""),
            _ => match rest.parse::<u32>() {
                Ok(number) => (0, number, ""),
                Err(_) => (2, 0, rest),
            },
        }
    }
}

impl Ord for Chromosome {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Chromosome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}

/// Resolves chromosome labels against a named genome assembly.
pub trait ChromosomeRegistry {
    /// Available genome names in sorted order.
    fn genomes(&self) -> Vec<String>;

    /// Primary chromosomes of the genome in karyotype order.
    fn chromosomes(&self, genome: &str) -> Result<Vec<Chromosome>>;

    fn chromosome(&self, genome: &str, label: &str) -> Result<Chromosome>;

    fn size(&self, genome: &str, chr: &Chromosome) -> Option<u64>;
}

/// Human assemblies compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinGenomes;

impl BuiltinGenomes {
    fn sizes(&self, genome: &str) -> Result<&'static [(&'static str, u64)]> {
        match genome {
            "hg19" => Ok(&HG19),
            "hg38" => Ok(&HG38),
            _ => Err(format!(
                "Unknown genome: {}. Available genomes: {}",
                genome,
                self.genomes().join(", ")
            )),
        }
    }
}

impl ChromosomeRegistry for BuiltinGenomes {
    fn genomes(&self) -> Vec<String> {
        vec!["hg19".to_string(), "hg38".to_string()]
    }

    fn chromosomes(&self, genome: &str) -> Result<Vec<Chromosome>> {
        self.sizes(genome)?
            .iter()
            .map(|(name, _)| Chromosome::new(name))
            .collect()
    }

    fn chromosome(&self, genome: &str, label: &str) -> Result<Chromosome> {
        self.sizes(genome)?;
        Chromosome::new(label)
    }

    fn size(&self, genome: &str, chr: &Chromosome) -> Option<u64> {
        self.sizes(genome)
            .ok()?
            .iter()
            .find(|(name, _)| *name == chr.name())
            .map(|(_, size)| *size)
    }
}
