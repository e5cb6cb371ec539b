//! Memory report for `about:memory`.
//!
//! Reads `/proc/<pid>/smaps`, folds every mapping into anonymous or
//! file-backed usage and renders the totals as HTML tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::services::output_encoding::encode_for_html_entity;
use crate::types::errors::MemoryError;
use crate::types::memory::{MappedFile, MappingUsage, MemoryReport};

/// Column headings, in rendering order.
const COLUMNS: &[&str] = &[
    "Size",
    "RSS",
    "PSS",
    "Shared Clean",
    "Shared Dirty",
    "Private Clean",
    "Private Dirty",
    "Swap",
];

/// Produces the memory section of `about:memory`. May block.
pub trait MemoryReporter: Send + Sync {
    fn to_html(&self) -> Result<String, MemoryError>;
}

/// Reporter backed by the Linux `smaps` interface.
#[derive(Debug, Clone, Default)]
pub struct SmapsReporter {
    pid: Option<u32>,
}

impl SmapsReporter {
    /// Reports on the running process.
    pub fn for_current_process() -> Self {
        Self { pid: None }
    }

    pub fn for_pid(pid: u32) -> Self {
        Self { pid: Some(pid) }
    }

    fn smaps_path(&self) -> PathBuf {
        match self.pid {
            Some(pid) => PathBuf::from(format!("/proc/{}/smaps", pid)),
            None => PathBuf::from("/proc/self/smaps"),
        }
    }

    pub fn collect(&self) -> Result<MemoryReport, MemoryError> {
        let path = self.smaps_path();
        let text = fs::read_to_string(&path)
            .map_err(|e| MemoryError::IoError(format!("{}: {}", path.display(), e)))?;
        parse_smaps(self.pid.unwrap_or_else(std::process::id), &text)
    }
}

impl MemoryReporter for SmapsReporter {
    fn to_html(&self) -> Result<String, MemoryError> {
        Ok(render_report(&self.collect()?))
    }
}

/// Pseudo-paths like `[heap]`, `[stack]` or `[anon:foo]` count as anonymous.
fn is_anonymous(path: &str) -> bool {
    path.is_empty() || path.starts_with('[')
}

/// Recognizes `start-end perms offset dev inode [path]` header lines and
/// returns the path part.
fn mapping_path(line: &str) -> Option<String> {
    let mut fields = line.split_whitespace();
    let range = fields.next()?;
    let (start, end) = range.split_once('-')?;
    if u64::from_str_radix(start, 16).is_err() || u64::from_str_radix(end, 16).is_err() {
        return None;
    }
    let perms = fields.next()?;
    if perms.len() != 4 {
        return None;
    }
    // offset, device, inode
    for _ in 0..3 {
        fields.next()?;
    }
    Some(fields.collect::<Vec<_>>().join(" "))
}

fn field_slot<'a>(usage: &'a mut MappingUsage, key: &str) -> Option<&'a mut u64> {
    match key {
        "Size" => Some(&mut usage.size),
        "Rss" => Some(&mut usage.rss),
        "Pss" => Some(&mut usage.pss),
        "Shared_Clean" => Some(&mut usage.shared_clean),
        "Shared_Dirty" => Some(&mut usage.shared_dirty),
        "Private_Clean" => Some(&mut usage.private_clean),
        "Private_Dirty" => Some(&mut usage.private_dirty),
        "Swap" => Some(&mut usage.swap),
        _ => None,
    }
}

/// Parses the contents of an smaps file.
pub fn parse_smaps(pid: u32, text: &str) -> Result<MemoryReport, MemoryError> {
    let mut anonymous = MappingUsage::default();
    let mut files: BTreeMap<String, MappingUsage> = BTreeMap::new();
    let mut current: Option<(String, MappingUsage)> = None;

    let mut flush = |mapping: Option<(String, MappingUsage)>| {
        if let Some((path, usage)) = mapping {
            if is_anonymous(&path) {
                anonymous.add(&usage);
            } else {
                files.entry(path).or_default().add(&usage);
            }
        }
    };

    for (number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(path) = mapping_path(line) {
            flush(current.take());
            current = Some((path, MappingUsage::default()));
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(MemoryError::ParseError(format!("line {}: {}", number + 1, line)));
        };
        let Some((_, usage)) = current.as_mut() else {
            return Err(MemoryError::ParseError(format!(
                "line {}: field before first mapping",
                number + 1
            )));
        };
        if let Some(slot) = field_slot(usage, key.trim()) {
            let amount = value.trim().trim_end_matches("kB").trim();
            *slot = amount.parse().map_err(|_| {
                MemoryError::ParseError(format!("line {}: bad value {:?}", number + 1, amount))
            })?;
        }
    }
    flush(current.take());

    let mut mapped: Vec<MappedFile> = files
        .into_iter()
        .map(|(path, usage)| MappedFile { path, usage })
        .collect();
    mapped.sort_by(|a, b| b.usage.pss.cmp(&a.usage.pss).then_with(|| a.path.cmp(&b.path)));

    Ok(MemoryReport {
        pid,
        anonymous,
        mapped,
    })
}

fn usage_cells(out: &mut String, usage: &MappingUsage) {
    for value in [
        usage.size,
        usage.rss,
        usage.pss,
        usage.shared_clean,
        usage.shared_dirty,
        usage.private_clean,
        usage.private_dirty,
        usage.swap,
    ] {
        out.push_str(&format!("<td>{} kB</td>", value));
    }
}

fn table_head(out: &mut String, title: &str) {
    out.push_str("<table class=\"memory-table\"><thead><tr>");
    out.push_str(&format!("<th class=\"mapping\">{}</th>", title));
    for column in COLUMNS {
        out.push_str(&format!("<th>{}</th>", column));
    }
    out.push_str("</tr></thead><tbody>");
}

/// Renders a report as the body fragment of `about:memory`.
pub fn render_report(report: &MemoryReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h2>Process {}</h2>", report.pid));

    table_head(&mut out, "Anonymous memory");
    out.push_str("<tr class=\"total\"><td>Total</td>");
    usage_cells(&mut out, &report.anonymous);
    out.push_str("</tr></tbody></table>");

    table_head(&mut out, "Mapped memory");
    for file in &report.mapped {
        out.push_str(&format!(
            "<tr><td class=\"path\">{}</td>",
            encode_for_html_entity(&file.path)
        ));
        usage_cells(&mut out, &file.usage);
        out.push_str("</tr>");
    }
    out.push_str("<tr class=\"total\"><td>Total</td>");
    usage_cells(&mut out, &report.mapped_total());
    out.push_str("</tr></tbody></table>");

    out
}
