//! One module per supported command.
//!
//! Every module follows the same layout: the record type(s) the command
//! produces, a unit-struct parser with an inherent `parse_entries` (list
//! output) or `parse_entry` (single record), and its [`CommandParser`]
//! impl.
//!
//! [`CommandParser`]: crate::registry::CommandParser

pub mod arp;
pub mod date;
pub mod df;
pub mod dig;
pub mod du;
pub mod env;
pub mod find;
pub mod free;
pub mod hosts;
pub mod id;
pub mod ls;
pub mod lsblk;
pub mod mount;
pub mod netstat;
pub mod passwd;
pub mod ping;
pub mod ps;
pub mod stat;
pub mod systemctl;
pub mod uname;
pub mod uptime;
pub mod vmstat;
pub mod w;
pub mod wc;
pub mod who;

pub use arp::{ArpEntry, ArpParser};
pub use date::{DateEntry, DateParser};
pub use df::{DfEntry, DfParser};
pub use dig::{DigEntry, DigParser, DigQuery, DigRecord, DigStats};
pub use du::{DuEntry, DuParser};
pub use env::{EnvEntry, EnvParser};
pub use find::{FindEntry, FindParser};
pub use free::{FreeEntry, FreeOutput, FreeParser};
pub use hosts::{HostsEntry, HostsParser};
pub use id::{IdEntry, IdGroup, IdParser};
pub use ls::{LsEntry, LsParser};
pub use lsblk::{LsblkEntry, LsblkParser};
pub use mount::{MountEntry, MountParser};
pub use netstat::{NetstatEntry, NetstatParser};
pub use passwd::{PasswdEntry, PasswdParser};
pub use ping::{PingEntry, PingPacket, PingParser, PingStats};
pub use ps::{PsEntry, PsParser};
pub use stat::{StatEntry, StatParser};
pub use systemctl::{SystemctlEntry, SystemctlFormat, SystemctlParser};
pub use uname::{UnameEntry, UnameParser};
pub use uptime::{UptimeEntry, UptimeParser};
pub use vmstat::{
    VmstatCpu, VmstatEntry, VmstatIo, VmstatMemory, VmstatParser, VmstatProcesses, VmstatSwap,
    VmstatSystem,
};
pub use w::{WEntry, WHeader, WOutput, WParser};
pub use wc::{WcEntry, WcParser};
pub use who::{WhoEntry, WhoParser};
