//! Dispatcher-level behavior over realistic command output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use term_json_parsers::commands::{
    DfParser, DigParser, LsParser, NetstatParser, PsParser, StatParser, SystemctlParser,
};
use term_json_parsers::{ParseError, ParseOutput, Record, lookup, parse, parsers};

const DF: &str = "\
Filesystem     1K-blocks    Used Available Use% Mounted on
/dev/sda1       20511312  123456  19365472   1% /
tmpfs             816032    1484    814548   1% /run
/dev/sdb1      102687672 5242880  92185220   6% /mnt/backup disk";

const SYSTEMCTL_LIST: &str = "\
UNIT                   LOAD   ACTIVE SUB     DESCRIPTION
cron.service           loaded active running Regular background program processing daemon
ssh.service            loaded active running OpenBSD Secure Shell server

LOAD   = Reflects whether the unit definition was properly loaded.
ACTIVE = The high-level unit activation state, i.e. generalization of SUB.
SUB    = The low-level unit activation state, values depend on unit type.

2 loaded units listed.";

const SYSTEMCTL_STATUS: &str = "\
● ssh.service - OpenBSD Secure Shell server
     Loaded: loaded (/lib/systemd/system/ssh.service; enabled; vendor preset: enabled)
     Active: active (running) since Tue 2024-03-05 08:12:44 UTC; 1 week 2 days ago
   Main PID: 811 (sshd)
      Tasks: 1 (limit: 9364)
     Memory: 6.8M
        CPU: 1.204s";

const DIG: &str = "\
; <<>> DiG 9.18.18 <<>> example.com
;; ->>HEADER<<- opcode: QUERY, status: NOERROR, id: 17231
;; flags: qr rd ra; QUERY: 1, ANSWER: 2, AUTHORITY: 2, ADDITIONAL: 0

;; QUESTION SECTION:
;example.com.\t\t\tIN\tA

;; ANSWER SECTION:
example.com.\t\t86400\tIN\tA\t93.184.216.34
example.com.\t\t86400\tIN\tA\t93.184.216.35

;; AUTHORITY SECTION:
example.com.\t\t172800\tIN\tNS\ta.iana-servers.net.
example.com.\t\t172800\tIN\tNS\tb.iana-servers.net.

;; Query time: 45 msec
;; SERVER: 8.8.8.8#53(8.8.8.8)
;; WHEN: Wed Jan 15 14:30:25 UTC 2025
;; MSG SIZE  rcvd: 123";

const LS: &str = "\
total 16
drwxr-xr-x  2 user group 4096 Jan 15 10:30 docs
-rw-r--r--  1 user group  220 Mar  3  2023 .bashrc
lrwxrwxrwx  1 root root     7 Jan 15 10:31 bin -> usr/bin";

fn records(output: ParseOutput) -> Vec<Record> {
    output.into_records()
}

fn assert_round_trip<T>(value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let text = serde_json::to_string(value).unwrap();
    let back: T = serde_json::from_str(&text).unwrap();
    assert_eq!(&back, value, "round trip through {text}");
}

#[test]
fn test_every_parser_rejects_blank_input() {
    for parser in parsers() {
        for blank in ["", "   ", "\n\t\n"] {
            assert_eq!(
                parse(parser.name(), blank),
                Err(ParseError::EmptyInput),
                "{} with {blank:?}",
                parser.name()
            );
        }
    }
}

#[test]
fn test_every_name_dispatches_to_itself() {
    for parser in parsers() {
        let found = lookup(parser.name()).unwrap();
        assert_eq!(found.name(), parser.name());
        assert_eq!(found.category(), parser.category());
    }
    assert!(lookup("kubectl").is_none());
}

#[test]
fn test_unknown_parser() {
    let err = parse("dff", DF).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnknownParser {
            name: "dff".to_string(),
            suggestion: Some("df"),
        }
    );
    assert!(err.to_string().contains("did you mean 'df'"));
}

#[test]
fn test_df_sizes_in_bytes() {
    let value = serde_json::to_value(parse("df", DF).unwrap()).unwrap();
    assert_eq!(value[0]["size_bytes"], json!(20511312_i64 * 1024));
    assert_eq!(value[0]["use_percent"], json!(1));
    assert_eq!(value[1]["mount_point"], json!("/run"));
    assert_eq!(value[2]["mount_point"], json!("/mnt/backup disk"));
}

#[test]
fn test_systemctl_shape_follows_format() {
    let list = parse("systemctl", SYSTEMCTL_LIST).unwrap();
    assert!(matches!(list, ParseOutput::Many(ref units) if units.len() == 2));

    let status = parse("systemctl", SYSTEMCTL_STATUS).unwrap();
    let value = serde_json::to_value(&status).unwrap();
    assert!(value.is_object());
    assert_eq!(value["unit"], json!("ssh.service"));
    assert_eq!(value["active"], json!("active"));
    assert_eq!(value["sub"], json!("running"));
    assert_eq!(value["main"], json!("811 (sshd)"));
    assert_eq!(value["process_id"], json!("811"));
}

#[test]
fn test_dig_section_counts() {
    let value = serde_json::to_value(parse("dig", DIG).unwrap()).unwrap();
    assert_eq!(value["answer"].as_array().unwrap().len(), 2);
    assert_eq!(value["authority"].as_array().unwrap().len(), 2);
    assert_eq!(value["additional"].as_array().unwrap().len(), 0);
    assert_eq!(
        value["query"],
        json!({ "name": "example.com", "type": "A", "class": "IN" })
    );
    assert_eq!(value["stats"]["status"], json!("NOERROR"));
    assert_eq!(value["stats"]["query_time_ms"], json!(45));
}

#[test]
fn test_env_value_keeps_later_equals() {
    let value = serde_json::to_value(parse("env", "MY_VAR=value=with=equals").unwrap()).unwrap();
    assert_eq!(value[0]["name"], json!("MY_VAR"));
    assert_eq!(value[0]["value"], json!("value=with=equals"));
}

#[test]
fn test_date_forms_resolve_to_same_instant() {
    let unix: Vec<_> = ["1736951425", "2025-01-15T14:30:25Z", "Wed Jan 15 14:30:25 UTC 2025"]
        .into_iter()
        .map(|input| serde_json::to_value(parse("date", input).unwrap()).unwrap()["unix"].clone())
        .collect();
    assert!(unix.iter().all(|value| *value == json!(1736951425)));
}

#[test]
fn test_header_only_input_is_an_empty_list() {
    let headers = [
        ("df", "Filesystem 1K-blocks Used Available Use% Mounted on"),
        ("ps", "  PID TTY          TIME CMD"),
        ("lsblk", "NAME MAJ:MIN RM SIZE RO TYPE MOUNTPOINT"),
        ("netstat", "Active Internet connections (servers and established)"),
        ("systemctl", "UNIT LOAD ACTIVE SUB DESCRIPTION"),
        (
            "vmstat",
            "procs -----------memory---------- ---swap-- -----io---- -system-- ------cpu-----",
        ),
    ];
    for (name, header) in headers {
        let output = parse(name, header).unwrap();
        assert_eq!(output, ParseOutput::Many(Vec::new()), "{name}");
        assert_eq!(serde_json::to_string(&output).unwrap(), "[]");
    }
}

#[test]
fn test_free_needs_two_lines() {
    let err = parse("free", "              total        used        free").unwrap_err();
    assert!(matches!(
        err,
        ParseError::InsufficientData {
            command: "free",
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn test_single_and_many_serialize_as_object_and_array() {
    let uname = "Linux host 6.1.0 #1 SMP Thu Jan 1 00:00:00 UTC 2024 x86_64 GNU/Linux";
    let single = serde_json::to_value(parse("uname", uname).unwrap()).unwrap();
    assert!(single.is_object());

    let many = serde_json::to_value(parse("df", DF).unwrap()).unwrap();
    assert_eq!(many.as_array().map(Vec::len), Some(3));
}

#[test]
fn test_records_round_trip_through_json() {
    for entry in DfParser.parse_entries(DF).unwrap() {
        assert_round_trip(&entry);
    }
    for entry in LsParser.parse_entries(LS).unwrap() {
        assert_round_trip(&entry);
    }
    assert_round_trip(&DigParser.parse_entry(DIG).unwrap());
    assert_round_trip(&SystemctlParser.parse_status(SYSTEMCTL_STATUS).unwrap());

    let ps = "USER PID %CPU %MEM VSZ RSS TTY STAT START TIME COMMAND\nroot 1 0.0 0.1 225316 9876 ? Ss Jan01 0:01 /sbin/init";
    for entry in PsParser.parse_entries(ps).unwrap() {
        assert_round_trip(&entry);
    }

    let netstat = "Proto Recv-Q Send-Q Local Address Foreign Address State\ntcp 0 0 0.0.0.0:22 0.0.0.0:* LISTEN";
    for entry in NetstatParser.parse_entries(netstat).unwrap() {
        assert_round_trip(&entry);
    }

    let stat = "File: 'a'\nModify: 2023-01-15 14:25:10.500000000 +0100";
    for entry in StatParser.parse_entries(stat).unwrap() {
        assert_round_trip(&entry);
    }
}

#[test]
fn test_unset_timestamps_serialize_as_zero_time() {
    let value = serde_json::to_value(parse("who", "erin pts/4 sometime").unwrap()).unwrap();
    assert_eq!(value[0]["login_time"], json!("0001-01-01T00:00:00Z"));

    let listing = records(parse("ls", LS).unwrap());
    assert_eq!(listing.len(), 3);
}

#[test]
fn test_yaml_output() {
    let output = parse("env", "HOME=/root").unwrap();
    let text = term_json_parsers::format_output(
        &output,
        term_json_parsers::OutputFormat::Yaml,
        term_json_parsers::OutputStyle::Pretty,
    )
    .unwrap();
    assert!(text.contains("name: HOME"));
    assert!(text.contains("value: /root"));
}
