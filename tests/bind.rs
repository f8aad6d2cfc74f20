use std::io::{self, Read, Write};

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use dragon_bind::{
    bind, Bind, EnvSource, Error, FieldKind, FileSource, Loader, MapSource, Settable,
    StreamSource, Target,
};
use tempfile::NamedTempFile;

#[derive(Debug, Default)]
struct Dummy;

impl Settable for Dummy {
    fn target(&mut self) -> Target<'_> {
        Target::Opaque
    }
}

#[derive(Debug, Default, Bind)]
struct Fields {
    pub string: String,
    pub uint: u64,
    pub int: i64,
    pub float: f64,
    pub bool: bool,
    pub duration: TimeDelta,
    #[bind(format = "%Y-%m-%dT%H:%M:%S%:z")]
    pub date: DateTime<FixedOffset>,
    pub date_unix: DateTime<Utc>,
    pub structure: Dummy,
    non_settable: i32,
}

const STREAM: &str = "
string=123.4
uint=123
int=-123
float=123.4
bool=true
duration=1h2m3s
date=2006-01-02T15:04:05+07:00
date_unix=Mon Jan 2 15:04:05 MST 2006
structure=Dummy
non_settable=123
novalue=
onlykey
";

fn verify(f: &Fields) {
    assert_eq!(f.non_settable, 0);
    assert_eq!(f.string, "123.4");
    assert_eq!(f.uint, 123);
    assert_eq!(f.int, -123);
    assert_eq!(f.float, 123.4);
    assert!(f.bool);
    assert_eq!(
        f.duration,
        TimeDelta::hours(1) + TimeDelta::minutes(2) + TimeDelta::seconds(3)
    );
    let date = FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
        .unwrap();
    assert_eq!(f.date, date);
    assert_eq!(f.date_unix, Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap());
}

fn set_env(prefix: &str, pairs: &[(&str, &str)]) {
    for (key, value) in pairs {
        std::env::set_var(format!("{prefix}{key}").to_uppercase(), value);
    }
}

/// Hands out its data, then fails the next read.
struct TimeoutReader<'a> {
    data: &'a [u8],
}

impl Read for TimeoutReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "timeout"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn test_no_sources_keeps_values() {
    let mut f = Fields {
        string: "123.4".into(),
        uint: 123,
        int: -123,
        float: 123.4,
        bool: true,
        duration: TimeDelta::seconds(3723),
        date: FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2006, 1, 2, 15, 4, 5)
            .unwrap(),
        date_unix: Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap(),
        ..Fields::default()
    };

    bind(&mut f, &[]).unwrap();
    verify(&f);
}

#[test]
fn test_bind_from_env() {
    let prefix = "full_env_";
    set_env(
        prefix,
        &[
            ("string", "123.4"),
            ("uint", "123"),
            ("int", "-123"),
            ("float", "123.4"),
            ("bool", "true"),
            ("duration", "1h2m3s"),
            ("date", "2006-01-02T15:04:05+07:00"),
            ("date_unix", "Mon Jan 2 15:04:05 MST 2006"),
            ("structure", "Dummy"),
            ("non_settable", "123"),
        ],
    );

    let mut f = Fields::default();
    bind(&mut f, &[&EnvSource::new(prefix)]).unwrap();
    verify(&f);
}

#[test]
fn test_env_scenario_with_prefix() {
    std::env::set_var("APP_SCENARIO_BOOL", "true");
    std::env::set_var("APP_SCENARIO_INT", "-123");
    std::env::set_var("APP_SCENARIO_DURATION", "1h2m3s");

    let mut f = Fields::default();
    bind(&mut f, &[&EnvSource::new("app_scenario_")]).unwrap();

    assert!(f.bool);
    assert_eq!(f.int, -123);
    assert_eq!(f.duration.num_nanoseconds(), Some(3_723_000_000_000));
}

fn assert_env_field_error(field: &str, kind: FieldKind) {
    let prefix = format!("bad_{field}_");
    set_env(&prefix, &[(field, "Err")]);

    let mut f = Fields::default();
    let err = bind(&mut f, &[&EnvSource::new(prefix)]).unwrap_err();

    let Error::Field(err) = err else {
        panic!("expected field error, got {err:?}");
    };
    assert_eq!(err.record(), "Fields");
    assert_eq!(err.field(), field);
    assert_eq!(err.kind(), kind);
    assert_eq!(err.value(), "Err");
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_env_uint_error() {
    assert_env_field_error("uint", FieldKind::U64);
}

#[test]
fn test_env_int_error() {
    assert_env_field_error("int", FieldKind::I64);
}

#[test]
fn test_env_float_error() {
    assert_env_field_error("float", FieldKind::F64);
}

#[test]
fn test_env_bool_error() {
    assert_env_field_error("bool", FieldKind::Bool);
}

#[test]
fn test_env_duration_error() {
    assert_env_field_error("duration", FieldKind::Span);
}

#[test]
fn test_env_date_error() {
    assert_env_field_error("date", FieldKind::Timestamp);
}

#[test]
fn test_default_literal() {
    #[derive(Default, Bind)]
    struct Owl {
        #[bind(default = "owls are not what do you think about them")]
        pub string: String,
    }

    let mut owl = Owl::default();
    bind(&mut owl, &[&EnvSource::new("owl_default_unset_")]).unwrap();
    assert_eq!(owl.string, "owls are not what do you think about them");
}

#[test]
fn test_bind_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(STREAM.as_bytes()).unwrap();

    let mut f = Fields::default();
    bind(&mut f, &[&FileSource::open(file.path())]).unwrap();
    verify(&f);
}

#[test]
fn test_bind_from_missing_file() {
    let mut f = Fields::default();
    bind(&mut f, &[&FileSource::open(":$:")]).unwrap();
    assert_eq!(f.uint, 0);
    assert_eq!(f.string, "");
}

#[test]
fn test_bind_from_reader() {
    let mut f = Fields::default();
    bind(&mut f, &[&StreamSource::from_reader(STREAM.as_bytes())]).unwrap();
    verify(&f);
}

#[test]
fn test_bind_from_failing_reader() {
    let source = StreamSource::from_reader(TimeoutReader {
        data: STREAM.as_bytes(),
    });

    let mut f = Fields::default();
    let err = bind(&mut f, &[&source]).unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert_eq!(f.uint, 0);
}

#[test]
fn test_env_before_reader() {
    std::env::set_var("ENV_FIRST_STRING", "123.4");
    std::env::set_var("ENV_FIRST_INT", "7");

    let mut f = Fields::default();
    Loader::new()
        .with_env("env_first_")
        .with_reader("int=-123\nuint=5".as_bytes())
        .load(&mut f)
        .unwrap();

    assert_eq!(f.string, "123.4");
    assert_eq!(f.int, 7);
    assert_eq!(f.uint, 5);
}

#[test]
fn test_reader_before_env() {
    std::env::set_var("READER_FIRST_STRING", "123.4");
    std::env::set_var("READER_FIRST_INT", "7");

    let mut f = Fields::default();
    Loader::new()
        .with_reader("int=-123".as_bytes())
        .with_env("reader_first_")
        .load(&mut f)
        .unwrap();

    assert_eq!(f.string, "123.4");
    assert_eq!(f.int, -123);
}

#[test]
fn test_empty_value_is_found() {
    #[derive(Default, Bind)]
    struct Probe {
        #[bind(default = "fallback")]
        pub novalue: String,
        #[bind(default = "fallback")]
        pub onlykey: String,
    }

    let mut probe = Probe::default();
    bind(&mut probe, &[&StreamSource::from_text(STREAM)]).unwrap();

    assert_eq!(probe.novalue, "");
    assert_eq!(probe.onlykey, "fallback");
}

#[test]
fn test_rename_and_skip() {
    #[derive(Default, Bind)]
    struct Tuned {
        #[bind(rename = "MaxConns")]
        pub max_connections: u32,
        #[bind(skip)]
        pub internal: u32,
    }

    let source: MapSource = [("maxconns", "64"), ("internal", "9")].into_iter().collect();
    let mut tuned = Tuned::default();
    bind(&mut tuned, &[&source]).unwrap();

    assert_eq!(tuned.max_connections, 64);
    assert_eq!(tuned.internal, 0);
}

#[test]
fn test_binding_twice_gives_same_values() {
    let source = StreamSource::from_text(STREAM);

    let mut f = Fields::default();
    bind(&mut f, &[&source]).unwrap();
    let first = (f.string.clone(), f.uint, f.duration, f.date);
    bind(&mut f, &[&source]).unwrap();

    assert_eq!(first, (f.string.clone(), f.uint, f.duration, f.date));
}

#[test]
fn test_std_duration_field() {
    #[derive(Default, Bind)]
    struct Timeouts {
        #[bind(default = "1.5s")]
        pub read: std::time::Duration,
        pub write: std::time::Duration,
    }

    let source: MapSource = [("write", "-1s")].into_iter().collect();
    let mut t = Timeouts::default();
    let err = bind(&mut t, &[&source]).unwrap_err();

    assert_eq!(t.read, std::time::Duration::from_millis(1500));
    assert!(matches!(err, Error::Field(ref e) if e.field() == "write"));
}

#[test]
fn test_raw_identifier_uses_plain_name() {
    #[derive(Default, Bind)]
    struct Kind {
        pub r#type: String,
    }

    std::env::set_var("RAW_IDENT_TYPE", "from-env");

    let mut from_map = Kind::default();
    let source: MapSource = [("type", "x")].into_iter().collect();
    bind(&mut from_map, &[&source]).unwrap();
    assert_eq!(from_map.r#type, "x");

    let mut from_env = Kind::default();
    bind(&mut from_env, &[&EnvSource::new("raw_ident_")]).unwrap();
    assert_eq!(from_env.r#type, "from-env");
}

#[test]
fn test_shared_rename_binds_every_field() {
    #[derive(Default, Bind)]
    struct Ports {
        #[bind(rename = "port")]
        pub listen: u16,
        #[bind(rename = "port")]
        pub advertise: u16,
    }

    let source: MapSource = [("port", "8080")].into_iter().collect();
    let mut ports = Ports::default();
    bind(&mut ports, &[&source]).unwrap();

    assert_eq!(ports.listen, 8080);
    assert_eq!(ports.advertise, 8080);
}

#[test]
fn test_latin1_comment_does_not_abort_stream() {
    #[derive(Default, Bind)]
    struct Named {
        pub name: String,
    }

    let source = StreamSource::from_reader(&b"# caf\xe9 latin-1 comment\nname=hulk\n"[..]);
    let mut named = Named::default();
    bind(&mut named, &[&source]).unwrap();

    assert_eq!(named.name, "hulk");
}
