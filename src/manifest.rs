//! The ordered list of PDFs the thumbnail generator renders.
//!
//! The portfolio's PDFs are listed explicitly rather than discovered: the
//! site only shows a curated subset of what lives under `Projects/`. The
//! built-in list can be replaced by a manifest file with one relative path
//! per line; blank lines and lines starting with `#` are ignored.

use crate::error::ThumbsError;
use std::path::Path;
use tracing::debug;

/// Built-in PDF list, relative to the project root.
pub const DEFAULT_PDFS: &[&str] = &[
    // Baumit
    "Baumit/Group FD/BFY-FD-A1B119-0.pdf",
    "Baumit/Group FD/BFY-FD-A1B34-0.pdf",
    "Baumit/Group FD/BFY-FD-A1V30-0.pdf",
    "Baumit/Group GA/BFY-GA-A1-01-0-Model.pdf",
    "Baumit/Group GA/BFY-GA-A1-03-0-Model.pdf",
    "Baumit/Group GA/BFY-GA-A1-17-0-Model.pdf",
    "Baumit/Group GA/BFY-GA-A2-01-0.pdf",
    "Baumit/Group GA/BFY-GA-A2-02-0.pdf",
    "Baumit/Group GA/BFY-GA-A2-06-0.pdf",
    "Baumit/Group GA/BFY-GA-A3-01-0.pdf",
    "Baumit/Group GA/BFY-GA-A3-04-0.pdf",
    "Baumit/Group GA/BFY-GA-A3-12-0.pdf",
    // CimCoop
    "CimCoop/Group FD/OFC-WD-FD-BA10-B.pdf",
    "CimCoop/Group FD/OFC-WD-FD-HA24-B.pdf",
    "CimCoop/Group FD/OFC-WD-FD-KA13-B.pdf",
    "CimCoop/Group FD/OFC-WD-FD-TA1-B.pdf",
    "CimCoop/Group FD/OFC-WD-FD-TA2-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-01-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-02-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-03-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-04-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-05-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-06-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-07-B.pdf",
    "CimCoop/Group GA/OFC-WD-GA-08-B.pdf",
    // MFG General
    "MFG - General/MFG - Generic 4 Bay GA - Detailed Layout GA.pdf",
    // MFG Projects
    "MFG - Projects/MFG - Glyne Gap/Glyne Gap Service Station - Foundation GA.pdf",
    "MFG - Projects/MFG - Glyne Gap/Glyne Gap Service Station - Layout GA.pdf",
    "MFG - Projects/MFG - Stretford/MFG - Stretford - Foundation - GA-01 - Rev 2.pdf",
    "MFG - Projects/MFG - Stretford/MFG - Stretford - Layout GA-01 - Rev 2.pdf",
    "MFG - Projects/MFG - Wellington/MFG Wellington - Layout GA.pdf",
    "MFG - Projects/MFG - Crow Orchard/MFG Crow Orchard - GA.pdf",
    // Schools
    "Oxford LT/Bishop David Brown/704149-3-Bishop David Brown-Layout GA-Sections .pdf",
    "Oxford LT/Castle View/725014-01-R01-Castle View Academy-Foundation Layout GA.pdf",
    "Oxford LT/Castle View/725014-01-R01-Castle View Academy-Layout GA.pdf",
    "Oxford XL/Lavington/724041-03-R1-Lavington School-Layout - GA2.pdf",
    "Uxbridge/704509--Claremont Primary School - Dining Hall-3D - View - GA.pdf",
    // Portfolio and CV
    "Portfolio/Old-Company-Portfolio.pdf",
    "Modern Professional CV Resume.pdf",
];

/// The built-in list as owned strings.
pub fn default_sources() -> Vec<String> {
    DEFAULT_PDFS.iter().map(|s| s.to_string()).collect()
}

/// Parse manifest text into an ordered source list.
///
/// Lines are trimmed at the end only, so a file name with leading spaces
/// keeps them.
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches(['\r', '\n']))
        .filter(|line| {
            let t = line.trim();
            !t.is_empty() && !t.starts_with('#')
        })
        .map(str::to_string)
        .collect()
}

/// Read a manifest file.
pub fn load_manifest(path: &Path) -> Result<Vec<String>, ThumbsError> {
    let text = std::fs::read_to_string(path).map_err(|e| ThumbsError::ManifestRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let sources = parse_manifest(&text);
    debug!("Loaded {} sources from {}", sources.len(), path.display());
    Ok(sources)
}
