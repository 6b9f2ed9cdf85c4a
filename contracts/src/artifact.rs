use ethers::abi::Abi;
use ethers::types::Bytes;
use lottery_shared::{ARTIFACT_EXTENSION, BUILD_INFO_DIR, DEBUG_ARTIFACT_SUFFIX};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid artifact {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no interface descriptor for contract {0}")]
    NotFound(String),

    #[error("contract name {name} is ambiguous, use one of: {}", .candidates.join(", "))]
    Ambiguous { name: String, candidates: Vec<String> },
}

/// Interface descriptor of a single contract.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: Option<String>,
    pub abi: Arc<Abi>,
    /// Creation bytecode; `None` for interfaces, abstract contracts, unlinked
    /// bytecode and ABI-only descriptors.
    pub bytecode: Option<Bytes>,
}

// Hardhat artifact layout (`artifacts/contracts/<File>.sol/<Name>.json`)
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    #[serde(default)]
    source_name: Option<String>,
    abi: Abi,
    #[serde(default)]
    bytecode: Option<String>,
}

impl Artifact {
    /// Build an ABI-only descriptor.
    pub fn interface(contract_name: impl Into<String>, abi: Abi) -> Self {
        Self {
            contract_name: contract_name.into(),
            source_name: None,
            abi: Arc::new(abi),
            bytecode: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawArtifact = serde_json::from_str(json)?;
        let bytecode = raw
            .bytecode
            .as_deref()
            .and_then(|code| parse_bytecode(&raw.contract_name, code));

        Ok(Self {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            abi: Arc::new(raw.abi),
            bytecode,
        })
    }

    pub fn with_bytecode(mut self, bytecode: Bytes) -> Self {
        self.bytecode = Some(bytecode);
        self
    }

    /// `contracts/Lottery.sol:Lottery` style name, when the source is known.
    pub fn qualified_name(&self) -> Option<String> {
        self.source_name
            .as_ref()
            .map(|source| format!("{}:{}", source, self.contract_name))
    }

    pub fn is_deployable(&self) -> bool {
        self.bytecode.as_ref().map_or(false, |code| !code.is_empty())
    }
}

fn parse_bytecode(contract_name: &str, code: &str) -> Option<Bytes> {
    let code = code.trim();
    let stripped = code.strip_prefix("0x").unwrap_or(code);
    if stripped.is_empty() {
        return None;
    }
    // Library placeholders look like `__$<hash>$__`
    if stripped.contains("__") {
        warn!(
            "Artifact {} has unlinked library references, deployment disabled",
            contract_name
        );
        return None;
    }

    match ethers::utils::hex::decode(stripped) {
        Ok(bytes) => Some(Bytes::from(bytes)),
        Err(e) => {
            warn!("Artifact {} has malformed bytecode: {}", contract_name, e);
            None
        }
    }
}

/// Registry of interface descriptors, keyed by contract name and by
/// fully qualified name.
#[derive(Debug, Clone, Default)]
pub struct ArtifactStore {
    by_name: HashMap<String, Artifact>,
    by_qualified: HashMap<String, Artifact>,
    ambiguous: HashSet<String>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with the ABI-only descriptors of the known contracts.
    pub fn with_builtin_interfaces() -> Result<Self, ArtifactError> {
        let mut store = Self::new();
        for artifact in crate::interfaces::builtin_interfaces()? {
            store.insert(artifact);
        }
        Ok(store)
    }

    /// Add a descriptor. Compiled artifacts replace ABI-only descriptors of the
    /// same name; two compiled artifacts with one name from different sources
    /// make the short name ambiguous.
    pub fn insert(&mut self, artifact: Artifact) {
        let name = artifact.contract_name.clone();

        if let Some(qualified) = artifact.qualified_name() {
            self.by_qualified.insert(qualified, artifact.clone());
        }

        match self.by_name.get(&name) {
            Some(existing)
                if existing.source_name.is_some()
                    && artifact.source_name.is_some()
                    && existing.source_name != artifact.source_name =>
            {
                warn!("Contract name {} is defined in more than one source", name);
                self.ambiguous.insert(name);
            }
            _ => {
                self.by_name.insert(name, artifact);
            }
        }
    }

    /// Recursively load every artifact under `dir`, skipping debug files and
    /// build info. Returns the number of artifacts loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, ArtifactError> {
        let dir = dir.as_ref();
        let mut loaded = 0;

        let entries = fs::read_dir(dir).map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| ArtifactError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            if path.is_dir() {
                if path.file_name().map_or(false, |n| n == BUILD_INFO_DIR) {
                    continue;
                }
                loaded += self.load_dir(&path)?;
                continue;
            }

            if !is_artifact_file(&path) {
                continue;
            }

            let json = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
                path: path.clone(),
                source,
            })?;

            match Artifact::from_json(&json) {
                Ok(artifact) => {
                    debug!("Loaded artifact {} from {}", artifact.contract_name, path.display());
                    self.insert(artifact);
                    loaded += 1;
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        Ok(loaded)
    }

    /// Look up a descriptor by `Name` or `path/To.sol:Name`.
    pub fn resolve(&self, name: &str) -> Result<&Artifact, ArtifactError> {
        if name.contains(':') {
            return self
                .by_qualified
                .get(name)
                .ok_or_else(|| ArtifactError::NotFound(name.to_string()));
        }

        if self.ambiguous.contains(name) {
            let suffix = format!(":{}", name);
            let mut candidates: Vec<String> = self
                .by_qualified
                .keys()
                .filter(|k| k.ends_with(&suffix))
                .cloned()
                .collect();
            candidates.sort();
            return Err(ArtifactError::Ambiguous {
                name: name.to_string(),
                candidates,
            });
        }

        self.by_name
            .get(name)
            .ok_or_else(|| ArtifactError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn is_artifact_file(path: &Path) -> bool {
    let is_json = path
        .extension()
        .map_or(false, |ext| ext == ARTIFACT_EXTENSION);
    let is_debug = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.ends_with(DEBUG_ARTIFACT_SUFFIX));
    is_json && !is_debug
}
