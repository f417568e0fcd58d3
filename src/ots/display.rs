//! Human-readable rendering of proofs

use std::fmt::Write;

use crate::ots::attestation::Attestation;
use crate::ots::detached::DetachedTimestampFile;
use crate::ots::op::Op;
use crate::ots::timestamp::Timestamp;

const ANSI_BOLD: &str = "\u{1b}[1m";
const ANSI_ENDC: &str = "\u{1b}[0m";

fn indention(level: usize) -> String {
    "    ".repeat(level)
}

/// ` == <result>` with the op argument highlighted, in verbose mode only
fn str_result(verbose: bool, op: &Op, result: &[u8]) -> String {
    if !verbose {
        return String::new();
    }

    let result_hex = hex::encode(result);
    let Some(arg) = op.arg() else {
        return format!(" == {}", result_hex);
    };

    let arg_hex = hex::encode(arg);
    let bold = format!("{}{}{}", ANSI_BOLD, arg_hex, ANSI_ENDC);
    match result_hex.find(&arg_hex) {
        Some(0) => format!(" == {}{}", bold, &result_hex[arg_hex.len()..]),
        Some(i) => format!(" == {}{}", &result_hex[..i], bold),
        None => format!(" == {}", result_hex),
    }
}

impl Timestamp {
    /// Indented tree of ops and attestations
    ///
    /// A node with a single op continues at the same indent; forks are drawn
    /// with ` -> ` and indent their subtrees one level.
    #[must_use]
    pub fn str_tree(&self, indent: usize, verbose: bool) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, indent, verbose);
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize, verbose: bool) {
        let pad = indention(indent);

        for attestation in self.attestations() {
            let _ = writeln!(out, "{}verify {}", pad, attestation);
            if let Attestation::Bitcoin { .. } = attestation {
                let mut root = self.digest().to_vec();
                root.reverse();
                let _ = writeln!(out, "{}# Bitcoin block merkle root {}", pad, hex::encode(root));
            }
        }

        let fork = self.ops().len() > 1;
        for (op, child) in self.ops() {
            let result = str_result(verbose, op, child.digest());
            if fork {
                let _ = writeln!(out, "{} -> {}{}", pad, op, result);
                child.write_tree(out, indent + 1, verbose);
            } else {
                let _ = writeln!(out, "{}{}{}", pad, op, result);
                child.write_tree(out, indent, verbose);
            }
        }
    }
}

/// Describe a detached proof: file hash line followed by the tree
#[must_use]
pub fn info(file: &DetachedTimestampFile, verbose: bool) -> String {
    format!(
        "File {} hash: {}\nTimestamp:\n{}",
        file.file_hash_op().name(),
        hex::encode(file.file_digest()),
        file.timestamp().str_tree(0, verbose)
    )
}

/// Describe a bare timestamp
#[must_use]
pub fn info_timestamp(timestamp: &Timestamp) -> String {
    format!(
        "Hash: {}\nTimestamp:\n{}",
        hex::encode(timestamp.digest()),
        timestamp.str_tree(0, false)
    )
}
