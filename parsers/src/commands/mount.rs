//! `mount` table: `DEVICE on MOUNTPOINT type FSTYPE (OPTIONS)`.

use serde::{Deserialize, Serialize};
use term_json_core::{Result, ensure_input, split_lines};
use tracing::trace;

use crate::record::ParseOutput;
use crate::registry::{Category, CommandParser};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub filesystem_type: String,
    pub options: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MountParser;

impl MountParser {
    pub fn parse_entries(&self, input: &str) -> Result<Vec<MountEntry>> {
        let input = ensure_input(input)?;

        let entries = split_lines(input)
            .into_iter()
            .filter_map(|line| {
                let entry = parse_line(line);
                if entry.is_none() {
                    trace!(line, "Skipping non-mount line");
                }
                entry
            })
            .collect();

        Ok(entries)
    }
}

fn parse_line(line: &str) -> Option<MountEntry> {
    let (device, rest) = line.split_once(" on ")?;
    let (mount_point, rest) = rest.split_once(" type ")?;
    let (filesystem_type, options) = match rest.split_once(" (") {
        Some((fs, options)) => (fs, options.strip_suffix(')').unwrap_or(options)),
        None => (rest, ""),
    };

    Some(MountEntry {
        device: device.to_string(),
        mount_point: mount_point.to_string(),
        filesystem_type: filesystem_type.to_string(),
        options: options.to_string(),
    })
}

impl CommandParser for MountParser {
    fn name(&self) -> &'static str {
        "mount"
    }

    fn category(&self) -> Category {
        Category::Files
    }

    fn parse(&self, input: &str) -> Result<ParseOutput> {
        self.parse_entries(input).map(ParseOutput::many)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mounts() {
        let input = "\
/dev/sda1 on / type ext4 (rw,relatime,errors=remount-ro)
/dev/sda2 on /boot type ext2 (rw,relatime)
tmpfs on /tmp type tmpfs (rw,nosuid,nodev,noexec,relatime,size=4096000k)
/dev/nvme0n1p1 on /home type xfs (rw,relatime,attr2,inode64,logbufs=8,logbsize=32k,noquota)
proc on /proc type proc (rw,nosuid,nodev,noexec,relatime)";
        let entries = MountParser.parse_entries(input).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(
            entries[0],
            MountEntry {
                device: "/dev/sda1".to_string(),
                mount_point: "/".to_string(),
                filesystem_type: "ext4".to_string(),
                options: "rw,relatime,errors=remount-ro".to_string(),
            }
        );
        assert_eq!(entries[2].device, "tmpfs");
        assert_eq!(entries[3].filesystem_type, "xfs");
    }

    #[test]
    fn test_missing_options() {
        let entries = MountParser
            .parse_entries("/dev/sda1 on / type ext4\n/dev/sdb1 on /home type xfs")
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].filesystem_type, "xfs");
        assert!(entries[1].options.is_empty());
    }

    #[test]
    fn test_unrelated_lines_are_skipped() {
        let entries = MountParser
            .parse_entries("mount: only root can do that\n/dev/sda1 on / type ext4 (rw)")
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].options, "rw");
    }
}
