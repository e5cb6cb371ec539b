use serde::{Deserialize, Serialize};

/// Per-mapping counters from `/proc/<pid>/smaps`, in kilobytes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingUsage {
    pub size: u64,
    pub rss: u64,
    pub pss: u64,
    pub shared_clean: u64,
    pub shared_dirty: u64,
    pub private_clean: u64,
    pub private_dirty: u64,
    pub swap: u64,
}

impl MappingUsage {
    pub fn add(&mut self, other: &MappingUsage) {
        self.size += other.size;
        self.rss += other.rss;
        self.pss += other.pss;
        self.shared_clean += other.shared_clean;
        self.shared_dirty += other.shared_dirty;
        self.private_clean += other.private_clean;
        self.private_dirty += other.private_dirty;
        self.swap += other.swap;
    }
}

/// Usage of all mappings backed by one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappedFile {
    pub path: String,
    pub usage: MappingUsage,
}

/// Aggregated memory usage of a process.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryReport {
    pub pid: u32,
    pub anonymous: MappingUsage,
    /// Sorted by descending PSS.
    pub mapped: Vec<MappedFile>,
}

impl MemoryReport {
    pub fn mapped_total(&self) -> MappingUsage {
        let mut total = MappingUsage::default();
        for file in &self.mapped {
            total.add(&file.usage);
        }
        total
    }
}
