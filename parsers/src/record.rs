//! Type-erased parse results.
//!
//! Each command has its own record type. [`Record`] wraps all of them so
//! the dispatcher can return one type, and [`ParseOutput`] says whether the
//! command produced a single record or a list. Both serialize untagged, so
//! the JSON is exactly the inner record (an object) or a list of them (an
//! array).

use serde::Serialize;

use crate::commands::{
    ArpEntry, DateEntry, DfEntry, DigEntry, DuEntry, EnvEntry, FindEntry, FreeOutput, HostsEntry,
    IdEntry, LsEntry, LsblkEntry, MountEntry, NetstatEntry, PasswdEntry, PingEntry, PsEntry,
    StatEntry, SystemctlEntry, UnameEntry, UptimeEntry, VmstatEntry, WOutput, WcEntry, WhoEntry,
};

/// One parsed record of any supported command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Arp(ArpEntry),
    Date(DateEntry),
    Df(DfEntry),
    Dig(DigEntry),
    Du(DuEntry),
    Env(EnvEntry),
    Find(FindEntry),
    Free(FreeOutput),
    Hosts(HostsEntry),
    Id(IdEntry),
    Ls(LsEntry),
    Lsblk(LsblkEntry),
    Mount(MountEntry),
    Netstat(NetstatEntry),
    Passwd(PasswdEntry),
    Ping(PingEntry),
    Ps(PsEntry),
    Stat(StatEntry),
    Systemctl(SystemctlEntry),
    Uname(UnameEntry),
    Uptime(UptimeEntry),
    Vmstat(VmstatEntry),
    W(WOutput),
    Wc(WcEntry),
    Who(WhoEntry),
}

macro_rules! impl_record_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(value: $ty) -> Self {
                    Record::$variant(value)
                }
            }
        )*
    };
}

impl_record_from! {
    Arp => ArpEntry,
    Date => DateEntry,
    Df => DfEntry,
    Dig => DigEntry,
    Du => DuEntry,
    Env => EnvEntry,
    Find => FindEntry,
    Free => FreeOutput,
    Hosts => HostsEntry,
    Id => IdEntry,
    Ls => LsEntry,
    Lsblk => LsblkEntry,
    Mount => MountEntry,
    Netstat => NetstatEntry,
    Passwd => PasswdEntry,
    Ping => PingEntry,
    Ps => PsEntry,
    Stat => StatEntry,
    Systemctl => SystemctlEntry,
    Uname => UnameEntry,
    Uptime => UptimeEntry,
    Vmstat => VmstatEntry,
    W => WOutput,
    Wc => WcEntry,
    Who => WhoEntry,
}

/// Result of one parse call: a single record or an ordered list.
///
/// # Examples
///
/// ```
/// use term_json_parsers::{ParseOutput, Record, parse};
///
/// match parse("uptime", " 10:05:15 up 45 min,  3 users,  load average: 1.05, 0.95, 0.85").unwrap() {
///     ParseOutput::Single(Record::Uptime(entry)) => assert_eq!(entry.users, 3),
///     other => panic!("unexpected output: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseOutput {
    Single(Record),
    Many(Vec<Record>),
}

impl ParseOutput {
    pub fn single(record: impl Into<Record>) -> Self {
        Self::Single(record.into())
    }

    pub fn many<T: Into<Record>>(records: impl IntoIterator<Item = T>) -> Self {
        Self::Many(records.into_iter().map(Into::into).collect())
    }

    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// Number of records (1 for [`ParseOutput::Single`]).
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_single(&self) -> Option<&Record> {
        match self {
            Self::Single(record) => Some(record),
            Self::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Record]> {
        match self {
            Self::Single(_) => None,
            Self::Many(records) => Some(records),
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Single(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}
