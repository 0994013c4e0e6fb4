use std::fs;

use clap::{Arg, Command};
use scriptkit::args::PlatformParser;
use scriptkit::chunk::chunk_string;
use scriptkit::extension_fix::{fix_extension, FixAction};
use scriptkit::extensions::parse_extensions;
use scriptkit::mime_sniff::ContentSniffer;
use scriptkit::platform::{detect_platform, Platform};
use scriptkit::template::{render_files, RenderOptions};
use scriptkit::ErrorCode;
use tempfile::tempdir;

#[test]
fn shell_script_gets_shellscript_extension() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("deploy");
    fs::write(&script, "#!/bin/bash\necho deploying\n").unwrap();

    let report = fix_extension(&script, &ContentSniffer::default()).unwrap();

    assert_eq!(report.action, FixAction::Renamed);
    assert!(dir.path().join("deploy.x-shellscript").exists());
    assert!(!script.exists());
}

#[test]
fn binary_content_is_left_in_place() {
    let dir = tempdir().unwrap();
    let blob = dir.path().join("blob");
    fs::write(&blob, b"\x89PNG\r\n\x1a\nrest").unwrap();

    let err = fix_extension(&blob, &ContentSniffer::default()).unwrap_err();

    assert_eq!(err.code, ErrorCode::FileUnsupportedType);
    assert!(blob.exists());
}

#[test]
fn renders_template_from_yaml_file() {
    let dir = tempdir().unwrap();
    let template = dir.path().join("hosts.j2");
    let vars = dir.path().join("vars.yml");
    fs::write(
        &template,
        "{% for h in hosts %}\n{{ h.name }} {{ h.ip }}\n{% endfor %}\n",
    )
    .unwrap();
    fs::write(
        &vars,
        "hosts:\n  - name: alpha\n    ip: 10.0.0.1\n  - name: beta\n    ip: 10.0.0.2\n",
    )
    .unwrap();

    let rendered = render_files(&template, &vars, &RenderOptions::default()).unwrap();

    assert_eq!(rendered.output, "alpha 10.0.0.1\nbeta 10.0.0.2\n");
}

#[test]
fn helper_tables_hold_through_public_api() {
    assert_eq!(chunk_string("abcdefgh", 4).unwrap(), vec!["abcd", "efgh"]);
    assert_eq!(
        chunk_string("abcde", 4).unwrap_err().code,
        ErrorCode::ValidationLengthMismatch
    );
    assert_eq!(parse_extensions("p,g").unwrap(), vec![".p", ".g"]);
    assert_eq!(
        parse_extensions("1").unwrap_err().code,
        ErrorCode::ValidationInvalidArgument
    );
}

#[test]
fn platform_parser_binds_both_spellings() {
    let command = || Command::new("hasher").arg(Arg::new("file").short('f').long("file"));

    let windows = PlatformParser::detect(command(), &|| "win32".to_string());
    assert_eq!(windows.platform(), Platform::Windows);
    for spelling in ["/f", "/file"] {
        let matches = windows
            .try_get_matches_from(["hasher", spelling, "foo"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("file").unwrap(), "foo");
    }
    assert!(windows.try_get_matches_from(["hasher", "-f", "foo"]).is_err());

    let darwin = PlatformParser::new(command(), detect_platform(&|| "darwin".to_string()));
    for spelling in ["-f", "--file"] {
        let matches = darwin
            .try_get_matches_from(["hasher", spelling, "foo"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("file").unwrap(), "foo");
    }
}
