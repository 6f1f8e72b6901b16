use std::fs;
use std::path::PathBuf;

use debug_strip::{strip_file, StripConfig, StripError, StripOptions, Trigger};

// Helper to create a test source file
fn create_test_source(content: &str, name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("debug-strip-it-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).expect("Failed to create test dir");
    let path = dir.join(format!("test_{}.dart", name));
    fs::write(&path, content).expect("Failed to write test file");
    path
}

// Helper to cleanup test files
fn cleanup_test_source(path: &PathBuf) {
    let _ = fs::remove_file(path);
}

fn default_trigger() -> Trigger {
    StripConfig::default()
        .trigger()
        .expect("default trigger is valid")
}

#[cfg(test)]
mod strip_file_tests {
    use super::*;

    const SERVICE: &str = r#"import 'package:flutter/foundation.dart';

class LegiscanService {
  Future<List<Bill>> fetchBills(String state) async {
    if (kDebugMode) {
      print('Fetching bills for $state');
    }
    final response = await _client.get(_url(state));
    if (response.statusCode != 200) {
      if (kDebugMode) {
        print('Request failed: ${response.statusCode}');
        print('Body: ${response.body}');
      }
      throw LegiscanException(response.statusCode);
    } else if (kDebugMode) {
      print('Request ok');
    }
    if (kDebugMode) {
      _metrics.record(state);
    }
    print('cache mode: $kDebugMode');
    return _parse(response.body);
  }
}
"#;

    const SERVICE_STRIPPED: &str = r#"import 'package:flutter/foundation.dart';

class LegiscanService {
  Future<List<Bill>> fetchBills(String state) async {
    final response = await _client.get(_url(state));
    if (response.statusCode != 200) {
      throw LegiscanException(response.statusCode);
    }
    if (kDebugMode) {
      _metrics.record(state);
    }
    return _parse(response.body);
  }
}
"#;

    #[test]
    fn test_strips_service_file_in_place() {
        let path = create_test_source(SERVICE, "service");

        let report = strip_file(&path, &default_trigger(), StripOptions::default())
            .expect("strip should succeed");

        let contents = fs::read_to_string(&path).expect("Could not read test file");
        assert_eq!(contents, SERVICE_STRIPPED);
        assert_eq!(report.blocks_removed(), 3, "three debug blocks");
        assert_eq!(report.stray_removed, 1, "one stray print");
        assert_eq!(report.kept, 1, "metrics block has no print");
        assert!(report.changed && report.written);

        cleanup_test_source(&path);
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let path = create_test_source(SERVICE, "idempotent");
        let trigger = default_trigger();

        strip_file(&path, &trigger, StripOptions::default()).expect("first run");
        let once = fs::read_to_string(&path).expect("Could not read test file");

        let report = strip_file(&path, &trigger, StripOptions::default()).expect("second run");
        let twice = fs::read_to_string(&path).expect("Could not read test file");

        assert_eq!(once, twice);
        assert_eq!(report.removed_total(), 0);
        assert!(!report.written, "unchanged file must not be rewritten");

        cleanup_test_source(&path);
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let path = create_test_source(SERVICE, "dry_run");

        let report = strip_file(&path, &default_trigger(), StripOptions { dry_run: true })
            .expect("dry run should succeed");

        let contents = fs::read_to_string(&path).expect("Could not read test file");
        assert_eq!(contents, SERVICE);
        assert!(report.changed);
        assert!(!report.written);
        assert!(report.to_string().starts_with("Would remove 3 debug blocks"));

        cleanup_test_source(&path);
    }

    #[test]
    fn test_missing_file_is_a_file_access_error() {
        let path = std::env::temp_dir().join("debug-strip-does-not-exist/nope.dart");

        let err = strip_file(&path, &default_trigger(), StripOptions::default())
            .expect_err("missing file must fail");

        assert!(matches!(err, StripError::Read { .. }));
        assert!(err.is_file_access());
        assert!(!path.exists(), "nothing may be created");
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let path = create_test_source(SERVICE, "mode");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).expect("chmod");

        let report = strip_file(&path, &default_trigger(), StripOptions::default()).expect("strip");
        assert!(report.written);

        let mode = fs::metadata(&path).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o640);

        cleanup_test_source(&path);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let path = create_test_source(SERVICE, "tmp_cleanup");

        strip_file(&path, &default_trigger(), StripOptions::default()).expect("strip");

        let dir = path.parent().expect("has parent");
        let leftovers: Vec<_> = fs::read_dir(dir)
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".debug-strip.tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files: {:?}", leftovers);

        cleanup_test_source(&path);
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_profile_with_custom_calls() {
        let profile = create_test_source(
            r#"{ "trigger": "kDebugMode", "calls": ["print", "debugPrint"] }"#,
            "profile",
        );
        let source = create_test_source(
            "void f() {\n  if (kDebugMode) {\n    debugPrint('x');\n  }\n  g();\n}\n",
            "profile_target",
        );

        let config = StripConfig::load(&profile).expect("profile should parse");
        let trigger = config.trigger().expect("valid trigger");
        strip_file(&source, &trigger, StripOptions::default()).expect("strip");

        let contents = fs::read_to_string(&source).expect("Could not read test file");
        assert_eq!(contents, "void f() {\n  g();\n}\n");

        cleanup_test_source(&profile);
        cleanup_test_source(&source);
    }

    #[test]
    fn test_default_call_does_not_match_debug_print() {
        let src = "if (kDebugMode) {\n  debugPrint('x');\n}\n";
        let source = create_test_source(src, "debug_print_default");

        let report =
            strip_file(&source, &default_trigger(), StripOptions::default()).expect("strip");

        assert_eq!(fs::read_to_string(&source).expect("read"), src);
        assert_eq!(report.kept, 1);

        cleanup_test_source(&source);
    }

    #[test]
    fn test_invalid_profile_reports_config_error() {
        let profile = create_test_source(r#"{ "calls": "print" }"#, "bad_profile");

        let err = StripConfig::load(&profile).expect_err("calls must be a list");
        assert!(matches!(err, StripError::Config { .. }));

        cleanup_test_source(&profile);
    }

    #[test]
    fn test_missing_profile_is_a_read_error() {
        let path = std::env::temp_dir().join("debug-strip-no-such-profile/debug-strip.json");

        let err = StripConfig::load(&path).expect_err("missing profile must fail");
        assert!(matches!(err, StripError::Read { .. }));
    }

    #[test]
    fn test_invalid_trigger_name() {
        let config = StripConfig::default().with_overrides(Some("k-debug".to_string()), Vec::new());
        assert!(matches!(
            config.trigger(),
            Err(StripError::InvalidTrigger(_))
        ));
    }

    #[test]
    fn test_discover_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join(format!("debug-strip-empty-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create dir");

        let config = StripConfig::discover(&dir).expect("defaults");
        assert_eq!(config, StripConfig::default());

        let _ = fs::remove_dir(&dir);
    }
}
