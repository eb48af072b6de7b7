use std::path::Path;
use std::process::Command;

use log::debug;

use super::raw::RawPacket;
use crate::{CapscopeError, Result};

/// Fields extracted per packet; the normalizer depends on exactly this set.
pub const CAPTURE_FIELDS: [&str; 18] = [
    "frame.time_epoch",
    "frame.protocols",
    "frame.len",
    "ip.src",
    "ip.src_host",
    "ip.dst",
    "ip.dst_host",
    "ip.len",
    "tcp.srcport",
    "tcp.dstport",
    "tcp.stream",
    "tcp.len",
    "tcp.seq",
    "tcp.nxtseq",
    "udp.srcport",
    "udp.dstport",
    "udp.stream",
    "udp.length",
];

pub const DISPLAY_FILTER: &str = "ip && (tcp || udp)";

pub trait CaptureSource {
    fn capture(&self, capture_path: &Path) -> Result<Vec<RawPacket>>;
}

pub struct TsharkCaptureSource {
    binary: String,
}

impl TsharkCaptureSource {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }
}

impl CaptureSource for TsharkCaptureSource {
    fn capture(&self, capture_path: &Path) -> Result<Vec<RawPacket>> {
        let capture_path = capture_path.canonicalize()?;

        let mut command = Command::new(&self.binary);
        command.arg("-r").arg(&capture_path).arg("-T").arg("json");
        for field in CAPTURE_FIELDS {
            command.arg("-e").arg(field);
        }
        command.arg("-N").arg("mnNtdv");
        command.arg(DISPLAY_FILTER);
        debug!("running {:?}", command);

        let output = command.output().map_err(|e| {
            CapscopeError::ToolInvocation(format!("failed to run {}: {}", self.binary, e))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CapscopeError::ToolInvocation(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        let packets: Vec<RawPacket> = serde_json::from_slice(&output.stdout)?;
        Ok(packets)
    }
}
