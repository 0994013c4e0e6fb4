use serde::{Deserialize, Serialize};

/// Built-in defaults for every command. CLI flags override individual values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_archive")]
    pub archive: ArchiveDefaults,

    #[serde(default = "default_template")]
    pub template: TemplateDefaults,

    #[serde(default = "default_sniff")]
    pub sniff: SniffDefaults,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            archive: default_archive(),
            template: default_template(),
            sniff: default_sniff(),
        }
    }
}

/// Layout of the content-addressed archive tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveDefaults {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Number of leading digest characters turned into directory levels
    #[serde(default = "default_digest_prefix_len")]
    pub digest_prefix_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefaults {
    #[serde(default = "default_trim_blocks")]
    pub trim_blocks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SniffDefaults {
    /// Bytes read from the head of a file when guessing its type
    #[serde(default = "default_sniff_limit")]
    pub limit: usize,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_archive() -> ArchiveDefaults {
    ArchiveDefaults {
        chunk_size: default_chunk_size(),
        digest_prefix_len: default_digest_prefix_len(),
    }
}

fn default_chunk_size() -> usize {
    4
}

fn default_digest_prefix_len() -> usize {
    8
}

fn default_template() -> TemplateDefaults {
    TemplateDefaults {
        trim_blocks: default_trim_blocks(),
    }
}

fn default_trim_blocks() -> bool {
    true
}

fn default_sniff() -> SniffDefaults {
    SniffDefaults {
        limit: default_sniff_limit(),
    }
}

fn default_sniff_limit() -> usize {
    8192
}
