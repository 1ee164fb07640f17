// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed schema for the iCLIP pipeline configuration.
//!
//! The INI format is untyped, so a raw [`ConfigDocument`] pushes type
//! coercion to every call site. This module replaces that with a single
//! upfront validation pass: a fixed table of known `(section, key)` entries
//! with expected types and defaults, checked once, producing a fully typed
//! [`PipelineConfig`]. Missing required keys are reported per section with
//! every absent key listed.
//!
//! Required-vs-optional status follows how the pipeline actually consumes
//! each option; options the pipeline only reads under a specific mapper are
//! only required under that mapper.

use crate::domain::{ConfigDocument, ConfigKey, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Expected type of a configuration option, used by the validation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Arbitrary string, kept verbatim (adapter sequences, memory budgets)
    Str,
    /// Unsigned integer (thread counts, read lengths)
    UInt,
    /// Signed integer (cluster priority)
    Int,
    /// Boolean (`true`/`yes`/`1`/`on` and their negations)
    Bool,
    /// Filesystem path; existence is not checked
    Path,
    /// Comma-separated list of strings
    List,
}

/// One entry of the configuration schema.
#[derive(Clone, Copy, Debug)]
pub struct KeySpec {
    /// Section the option lives in
    pub section: &'static str,
    /// Option key within the section
    pub key: &'static str,
    /// Expected type, checked during validation
    pub kind: ValueKind,
    /// Whether the option must be present (mapper-conditional requirements
    /// are handled separately in [`PipelineConfig::from_document`])
    pub required: bool,
}

const fn spec(section: &'static str, key: &'static str, kind: ValueKind, required: bool) -> KeySpec {
    KeySpec {
        section,
        key,
        kind,
        required,
    }
}

/// The full table of known configuration options.
pub static SCHEMA: Lazy<Vec<KeySpec>> = Lazy::new(|| {
    use ValueKind::*;
    vec![
        spec("general", "genome", Str, true),
        spec("general", "genome_dir", Path, false),
        spec("general", "mapper", Str, true),
        spec("general", "strip_sequence", Bool, false),
        spec("annotations", "dir", Path, true),
        spec("annotations", "database", Path, true),
        spec("annotations", "gtf", Path, true),
        spec("annotations", "contigs", Path, true),
        spec("bowtie", "executable", Str, false),
        spec("bowtie", "index_dir", Path, false),
        spec("bowtie", "options", Str, false),
        spec("bowtie", "threads", UInt, false),
        spec("bowtie", "memory", Str, false),
        spec("star", "executable", Str, false),
        spec("star", "genome", Str, false),
        spec("star", "threads", UInt, false),
        spec("star", "memory", Str, false),
        spec("reads", "bc_pattern", Str, true),
        spec("reads", "5prime_adapt", Str, true),
        spec("reads", "3prime_adapt", Str, true),
        spec("reads", "reaper_options", Str, false),
        spec("reads", "min_length", UInt, false),
        spec("cluster", "queue", Str, false),
        spec("cluster", "parallel_environment", Str, false),
        spec("cluster", "pe_queue", Str, false),
        spec("cluster", "memory_resource", List, false),
        spec("cluster", "priority", Int, false),
    ]
});

/// Checks every schema entry against `document`.
///
/// Missing required keys are collected per section and reported all at once;
/// present keys with uncoercible values fail with a `TypeConversion` error.
/// Keys in the document that the schema does not know are left alone (the
/// pipeline tolerates site-specific extras) but logged at debug level.
pub fn validate(document: &ConfigDocument) -> Result<()> {
    let mut sections: Vec<&str> = SCHEMA.iter().map(|s| s.section).collect();
    sections.dedup();

    for section in sections {
        let required: Vec<&str> = SCHEMA
            .iter()
            .filter(|s| s.section == section && s.required)
            .map(|s| s.key)
            .collect();
        if !required.is_empty() {
            document.require(section, &required)?;
        }
    }

    for entry in SCHEMA.iter() {
        let key = ConfigKey::new(entry.section, entry.key);
        let Ok(value) = document.get(&key) else {
            continue;
        };
        let addr = key.to_string();
        match entry.kind {
            ValueKind::Str | ValueKind::Path | ValueKind::List => {}
            ValueKind::UInt => {
                value.as_u32(&addr)?;
            }
            ValueKind::Int => {
                value.as_i32(&addr)?;
            }
            ValueKind::Bool => {
                value.as_bool(&addr)?;
            }
        }
    }

    for (name, section) in document.sections() {
        for (key, _) in section.iter() {
            let known = SCHEMA
                .iter()
                .any(|s| s.section == name && s.key == key);
            if !known {
                tracing::debug!(section = name, key, "option not in schema");
            }
        }
    }

    Ok(())
}

/// Read mapper selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mapper {
    /// Reference-guided short read aligner
    Bowtie,
    /// Splice-aware aligner
    Star,
}

/// Error returned when a mapper name is not recognized.
#[derive(Debug, Error)]
#[error("unknown mapper '{0}', expected 'bowtie' or 'star'")]
pub struct UnknownMapper(String);

impl FromStr for Mapper {
    type Err = UnknownMapper;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bowtie" => Ok(Mapper::Bowtie),
            "star" => Ok(Mapper::Star),
            other => Err(UnknownMapper(other.to_string())),
        }
    }
}

impl fmt::Display for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapper::Bowtie => write!(f, "bowtie"),
            Mapper::Star => write!(f, "star"),
        }
    }
}

/// `[general]` section: genome identity and mapper selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Genome assembly name, e.g. "hg19"
    pub genome: String,
    /// Directory holding the reference genome FASTA files
    pub genome_dir: PathBuf,
    /// Which aligner the mapping stage runs
    pub mapper: Mapper,
    /// Whether to strip sequence from BAM output to save space
    pub strip_sequence: bool,
}

/// `[annotations]` section: gene annotation inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationsConfig {
    /// Directory of the annotations pipeline output
    pub dir: PathBuf,
    /// Annotations database file
    pub database: PathBuf,
    /// GTF file with the gene annotation
    pub gtf: PathBuf,
    /// Contigs/chromosome-sizes file
    pub contigs: PathBuf,
}

/// `[bowtie]` section: reference-guided aligner invocation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BowtieConfig {
    /// Executable name or path
    pub executable: String,
    /// Directory holding the bowtie index; required when the mapper is bowtie
    pub index_dir: Option<PathBuf>,
    /// Extra command-line options passed verbatim
    pub options: String,
    /// Threads per mapping job
    pub threads: u32,
    /// Per-job memory budget string, passed to the scheduler verbatim
    pub memory: String,
}

/// `[star]` section: splice-aware aligner invocation parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    /// Executable name or path
    pub executable: String,
    /// STAR genome name; falls back to the general genome when unset
    pub genome: String,
    /// Threads per mapping job
    pub threads: u32,
    /// Per-job memory budget string, passed to the scheduler verbatim
    pub memory: String,
}

/// `[reads]` section: barcode, adapter, and trimming parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReadsConfig {
    /// UMI/barcode pattern, e.g. "NNNXXXXNN"
    pub bc_pattern: String,
    /// 5' adapter sequence
    pub adapt_5prime: String,
    /// 3' adapter sequence
    pub adapt_3prime: String,
    /// Extra options passed verbatim to the demultiplexer
    pub reaper_options: String,
    /// Minimum read length kept after trimming
    pub min_length: u32,
}

/// `[cluster]` section: batch scheduler submission parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Queue for single-core jobs
    pub queue: String,
    /// Parallel environment for multicore jobs
    pub parallel_environment: String,
    /// Queue for multicore jobs; falls back to `queue` when unset
    pub pe_queue: String,
    /// Scheduler resources used when requesting memory
    pub memory_resource: Vec<String>,
    /// Job priority
    pub priority: i32,
}

/// The fully typed pipeline configuration.
///
/// Produced by one validation pass over a raw [`ConfigDocument`]; after
/// construction no further type coercion happens anywhere in the pipeline.
///
/// # Examples
///
/// ```
/// use clipcfg::adapters::IniParser;
/// use clipcfg::ports::ConfigParser;
/// use clipcfg::schema::{Mapper, PipelineConfig};
///
/// let ini = "\
/// [general]
/// genome=hg19
/// mapper=star
///
/// [annotations]
/// dir=/shared/annotations
/// database=/shared/annotations/csvdb
/// gtf=/shared/annotations/geneset.gtf.gz
/// contigs=/shared/annotations/contigs.tsv
///
/// [star]
/// threads=12
/// memory=1.9G
///
/// [reads]
/// bc_pattern=NNNXXXXNN
/// 5prime_adapt=AGGGAGGACGATGCGG
/// 3prime_adapt=AGATCGGAAGAGC
/// ";
/// let doc = IniParser::new().parse(ini).unwrap();
/// let config = PipelineConfig::from_document(&doc).unwrap();
/// assert_eq!(config.general.mapper, Mapper::Star);
/// assert_eq!(config.star.threads, 12);
/// assert_eq!(config.star.memory, "1.9G");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Genome and mapper selection
    pub general: GeneralConfig,
    /// Gene annotation inputs
    pub annotations: AnnotationsConfig,
    /// Bowtie invocation parameters
    pub bowtie: BowtieConfig,
    /// STAR invocation parameters
    pub star: StarConfig,
    /// Read preparation parameters
    pub reads: ReadsConfig,
    /// Cluster submission parameters
    pub cluster: ClusterConfig,
}

impl PipelineConfig {
    /// Builds the typed configuration from a parsed document.
    ///
    /// Runs [`validate`] first, so missing required keys and uncoercible
    /// values surface before any field is read. The bowtie index directory is
    /// additionally required when the selected mapper is bowtie; the pipeline
    /// cannot run without it but STAR-only sites need not set it.
    pub fn from_document(document: &ConfigDocument) -> Result<Self> {
        validate(document)?;

        let get = |section: &str, key: &str| -> Result<String> {
            document
                .get(&ConfigKey::new(section, key))
                .map(|v| v.as_string())
        };
        let get_or = |section: &str, key: &str, default: &str| -> String {
            document
                .get_or(&ConfigKey::new(section, key), default)
                .as_string()
        };

        let genome = get("general", "genome")?;
        let mapper: Mapper = document
            .get(&ConfigKey::new("general", "mapper"))?
            .parse("general.mapper")?;

        let general = GeneralConfig {
            genome: genome.clone(),
            genome_dir: PathBuf::from(get_or("general", "genome_dir", ".")),
            mapper,
            strip_sequence: match document.get(&ConfigKey::new("general", "strip_sequence")) {
                Ok(v) => v.as_bool("general.strip_sequence")?,
                Err(_) => false,
            },
        };

        let annotations = AnnotationsConfig {
            dir: document.get(&ConfigKey::new("annotations", "dir"))?.as_path(),
            database: document
                .get(&ConfigKey::new("annotations", "database"))?
                .as_path(),
            gtf: document.get(&ConfigKey::new("annotations", "gtf"))?.as_path(),
            contigs: document
                .get(&ConfigKey::new("annotations", "contigs"))?
                .as_path(),
        };

        if mapper == Mapper::Bowtie {
            document.require("bowtie", &["index_dir"])?;
        }
        let bowtie = BowtieConfig {
            executable: get_or("bowtie", "executable", "bowtie"),
            index_dir: document
                .get(&ConfigKey::new("bowtie", "index_dir"))
                .ok()
                .map(|v| v.as_path()),
            options: get_or("bowtie", "options", ""),
            threads: document
                .get_or(&ConfigKey::new("bowtie", "threads"), "2")
                .as_u32("bowtie.threads")?,
            memory: get_or("bowtie", "memory", "1.9G"),
        };

        let star = StarConfig {
            executable: get_or("star", "executable", "STAR"),
            // An empty star genome means "use the general genome".
            genome: match document.get(&ConfigKey::new("star", "genome")) {
                Ok(v) if !v.is_empty() => v.as_string(),
                _ => genome,
            },
            threads: document
                .get_or(&ConfigKey::new("star", "threads"), "12")
                .as_u32("star.threads")?,
            memory: get_or("star", "memory", "1.9G"),
        };

        let reads = ReadsConfig {
            bc_pattern: get("reads", "bc_pattern")?,
            adapt_5prime: get("reads", "5prime_adapt")?,
            adapt_3prime: get("reads", "3prime_adapt")?,
            reaper_options: get_or("reads", "reaper_options", ""),
            min_length: document
                .get_or(&ConfigKey::new("reads", "min_length"), "15")
                .as_u32("reads.min_length")?,
        };

        let queue = get_or("cluster", "queue", "all.q");
        let cluster = ClusterConfig {
            pe_queue: {
                let pe_queue = get_or("cluster", "pe_queue", "");
                if pe_queue.is_empty() {
                    queue.clone()
                } else {
                    pe_queue
                }
            },
            queue,
            parallel_environment: get_or("cluster", "parallel_environment", "dedicated"),
            memory_resource: document
                .get_or(&ConfigKey::new("cluster", "memory_resource"), "mem_free")
                .as_list(),
            priority: document
                .get_or(&ConfigKey::new("cluster", "priority"), "0")
                .as_i32("cluster.priority")?,
        };

        Ok(PipelineConfig {
            general,
            annotations,
            bowtie,
            star,
            reads,
            cluster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::IniParser;
    use crate::domain::ConfigError;
    use crate::ports::ConfigParser;

    fn minimal_ini() -> String {
        "\
[general]
genome=hg19
mapper=star

[annotations]
dir=/shared/annotations
database=/shared/annotations/csvdb
gtf=/shared/annotations/geneset.gtf.gz
contigs=/shared/annotations/contigs.tsv

[reads]
bc_pattern=NNNXXXXNN
5prime_adapt=AGGGAGGACGATGCGG
3prime_adapt=AGATCGGAAGAGC
"
        .to_string()
    }

    fn parse(ini: &str) -> ConfigDocument {
        IniParser::new().parse(ini).unwrap()
    }

    #[test]
    fn test_minimal_config_validates() {
        let doc = parse(&minimal_ini());
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_defaults_applied() {
        let doc = parse(&minimal_ini());
        let config = PipelineConfig::from_document(&doc).unwrap();

        assert_eq!(config.general.genome_dir, PathBuf::from("."));
        assert!(!config.general.strip_sequence);
        assert_eq!(config.bowtie.executable, "bowtie");
        assert_eq!(config.bowtie.threads, 2);
        assert_eq!(config.star.executable, "STAR");
        assert_eq!(config.star.threads, 12);
        assert_eq!(config.star.memory, "1.9G");
        assert_eq!(config.reads.min_length, 15);
        assert_eq!(config.cluster.queue, "all.q");
        assert_eq!(config.cluster.memory_resource, vec!["mem_free"]);
        assert_eq!(config.cluster.priority, 0);
    }

    #[test]
    fn test_star_genome_falls_back_to_general() {
        let doc = parse(&minimal_ini());
        let config = PipelineConfig::from_document(&doc).unwrap();
        assert_eq!(config.star.genome, "hg19");

        let mut ini = minimal_ini();
        ini.push_str("\n[star]\ngenome=hg19_junc\n");
        let config = PipelineConfig::from_document(&parse(&ini)).unwrap();
        assert_eq!(config.star.genome, "hg19_junc");
    }

    #[test]
    fn test_empty_star_genome_falls_back() {
        let mut ini = minimal_ini();
        ini.push_str("\n[star]\ngenome=\n");
        let config = PipelineConfig::from_document(&parse(&ini)).unwrap();
        assert_eq!(config.star.genome, "hg19");
    }

    #[test]
    fn test_missing_required_keys_reported_together() {
        let ini = "\
[general]
genome=hg19
mapper=star

[annotations]
dir=/shared/annotations
database=/shared/annotations/csvdb
gtf=/shared/annotations/geneset.gtf.gz
contigs=/shared/annotations/contigs.tsv

[reads]
bc_pattern=NNNXXXXNN
";
        let err = PipelineConfig::from_document(&parse(ini)).unwrap_err();
        match err {
            ConfigError::MissingKeys { section, keys } => {
                assert_eq!(section, "reads");
                assert_eq!(
                    keys,
                    vec!["5prime_adapt".to_string(), "3prime_adapt".to_string()]
                );
            }
            other => panic!("expected MissingKeys, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_mapper_rejected() {
        let ini = minimal_ini().replace("mapper=star", "mapper=bwa");
        let err = PipelineConfig::from_document(&parse(&ini)).unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversion { .. }));
    }

    #[test]
    fn test_bowtie_mapper_requires_index_dir() {
        let ini = minimal_ini().replace("mapper=star", "mapper=bowtie");
        let err = PipelineConfig::from_document(&parse(&ini)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingKeys { ref section, .. } if section == "bowtie"
        ));

        let mut ini = ini;
        ini.push_str("\n[bowtie]\nindex_dir=/shared/bowtie\n");
        let config = PipelineConfig::from_document(&parse(&ini)).unwrap();
        assert_eq!(config.general.mapper, Mapper::Bowtie);
        assert_eq!(config.bowtie.index_dir, Some(PathBuf::from("/shared/bowtie")));
    }

    #[test]
    fn test_star_index_dir_not_required() {
        let doc = parse(&minimal_ini());
        let config = PipelineConfig::from_document(&doc).unwrap();
        assert_eq!(config.bowtie.index_dir, None);
    }

    #[test]
    fn test_non_numeric_threads_rejected_upfront() {
        let mut ini = minimal_ini();
        ini.push_str("\n[star]\nthreads=many\n");
        let err = PipelineConfig::from_document(&parse(&ini)).unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversion { .. }));
    }

    #[test]
    fn test_strip_sequence_parsed_as_bool() {
        let mut doc = parse(&minimal_ini());
        doc.insert("general", "strip_sequence", "1");
        let config = PipelineConfig::from_document(&doc).unwrap();
        assert!(config.general.strip_sequence);
    }

    #[test]
    fn test_pe_queue_falls_back_to_queue() {
        let mut ini = minimal_ini();
        ini.push_str("\n[cluster]\nqueue=iclip.q\n");
        let config = PipelineConfig::from_document(&parse(&ini)).unwrap();
        assert_eq!(config.cluster.queue, "iclip.q");
        assert_eq!(config.cluster.pe_queue, "iclip.q");

        let mut ini = minimal_ini();
        ini.push_str("\n[cluster]\nqueue=iclip.q\npe_queue=mpi.q\n");
        let config = PipelineConfig::from_document(&parse(&ini)).unwrap();
        assert_eq!(config.cluster.pe_queue, "mpi.q");
    }

    #[test]
    fn test_memory_resource_list() {
        let mut ini = minimal_ini();
        ini.push_str("\n[cluster]\nmemory_resource=mem_free,h_vmem\n");
        let config = PipelineConfig::from_document(&parse(&ini)).unwrap();
        assert_eq!(config.cluster.memory_resource, vec!["mem_free", "h_vmem"]);
    }

    #[test]
    fn test_unknown_keys_tolerated() {
        let mut ini = minimal_ini();
        ini.push_str("\n[site]\ncustom_option=anything\n");
        assert!(PipelineConfig::from_document(&parse(&ini)).is_ok());
    }

    #[test]
    fn test_validate_checks_types_of_optional_keys() {
        let mut ini = minimal_ini();
        ini.push_str("\n[cluster]\npriority=soon\n");
        let err = validate(&parse(&ini)).unwrap_err();
        assert!(matches!(err, ConfigError::TypeConversion { .. }));
    }

    #[test]
    fn test_mapper_display_roundtrip() {
        for mapper in [Mapper::Bowtie, Mapper::Star] {
            assert_eq!(mapper.to_string().parse::<Mapper>().unwrap(), mapper);
        }
    }

    #[test]
    fn test_schema_sections_and_keys_are_unique() {
        for (i, a) in SCHEMA.iter().enumerate() {
            for b in SCHEMA.iter().skip(i + 1) {
                assert!(
                    !(a.section == b.section && a.key == b.key),
                    "duplicate schema entry {}.{}",
                    a.section,
                    a.key
                );
            }
        }
    }
}
