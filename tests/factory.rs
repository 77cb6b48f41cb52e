use pretty_assertions::assert_eq;
use std::fs::{create_dir_all, File};
use std::io::Write;
use trivialnet::network::{MovesLeftFormat, OutputFormat};
use trivialnet::{BackendError, InputFormat, NetworkCapabilities, NetworkFactory, OptionsDict, WeightsFile};

#[test]
fn trivial_is_registered_globally() {
    let f = NetworkFactory::global();
    assert!(f.backends_list().contains(&"trivial"));
    let reg = f.registrations().iter().find(|r| r.name == "trivial").unwrap();
    assert_eq!(reg.priority, 4);
    assert_eq!(f.default_backend(), Some("trivial"));
}

#[test]
fn default_capabilities() {
    let net = NetworkFactory::global().create("trivial", None, &OptionsDict::new()).unwrap();
    assert_eq!(
        *net.capabilities(),
        NetworkCapabilities {
            input_format: InputFormat::Classical112,
            output_format: OutputFormat::Classical,
            moves_left: MovesLeftFormat::None,
        }
    );
    assert!(!net.capabilities().has_wdl());
    assert!(!net.capabilities().has_mlh());
}

#[test]
fn input_mode_selects_advertised_format() {
    let opts = OptionsDict::parse("input_mode=2").unwrap();
    let net = NetworkFactory::global().create_default(None, &opts).unwrap();
    assert_eq!(net.capabilities().input_format, InputFormat::Classical112WithCastlingPlane);
    assert!(net.capabilities().check_input_format(InputFormat::Classical112).is_err());

    let mut opts = OptionsDict::new();
    opts.set("input_mode", 42);
    let net = NetworkFactory::global().create("trivial", None, &opts).unwrap();
    assert_eq!(net.capabilities().input_format, InputFormat::Other(42));
    assert_eq!(net.capabilities().input_format.code(), 42);

    let opts = OptionsDict::parse("input_mode=classical").unwrap();
    let err = NetworkFactory::global().create("trivial", None, &opts).err().unwrap();
    assert!(matches!(err, BackendError::InvalidOption { .. }));
}

#[test]
fn unknown_backend_is_an_error() {
    let err = NetworkFactory::global().create("cudnn", None, &OptionsDict::new()).err().unwrap();
    assert_eq!(err.to_string(), "unknown backend: cudnn");
}

#[test]
fn weights_are_accepted_and_ignored() {
    create_dir_all("target").unwrap();
    let path = "target/trivial_weights.bin";
    let mut f = File::create(path).unwrap();
    f.write_all(b"not really a network").unwrap();
    drop(f);
    let weights = WeightsFile::load(path).unwrap();
    assert_eq!(weights.data.len(), 20);

    let with = NetworkFactory::global().create("trivial", Some(&weights), &OptionsDict::new()).unwrap();
    let without = NetworkFactory::global().create("trivial", None, &OptionsDict::new()).unwrap();
    assert_eq!(with.capabilities(), without.capabilities());
}

#[test]
fn missing_weights_file_reports_path() {
    let err = WeightsFile::load("target/does_not_exist.pb.gz").unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.pb.gz"));
}
