//! End-to-end extraction tests — spec in, value out.
//!
//! These exercise the public surface the way a host does:
//!
//! - Mode properties: each mode against inputs built from known parts
//! - Field sets: independent evaluation, disabled and invalid fields
//! - Rule sets: compile, store, reload and apply through `FileStorage`
//!
//! No fixtures needed; every input is constructed in the test.

use intake_core::rule_set::rule_file_stem;
use intake_core::*;

// ============================================================================
// Helpers
// ============================================================================

fn value(mode: ExtractionMode, input: &str) -> String {
    evaluate_spec(&ExtractionSpec::new(mode), input).1.value
}

fn manifest_engine() -> ExtractionEngine {
    ExtractionEngine::new(vec![
        FieldSpec::new(
            "Product Name",
            ExtractionSpec::new(ExtractionMode::Split {
                delimiter: " - ".to_string(),
                index: 2,
            }),
        ),
        FieldSpec::new(
            "Vendor Name",
            ExtractionSpec::new(ExtractionMode::Suffix {
                anchor: " - ".to_string(),
            }),
        ),
        FieldSpec::new(
            "Category",
            ExtractionSpec::new(ExtractionMode::Regex {
                before: "[".to_string(),
                after: "]".to_string(),
            }),
        ),
    ])
}

// ============================================================================
// Mode properties
// ============================================================================

mod mode_properties {
    use super::*;

    const LITERAL_PAIRS: [(&str, &str); 6] = [
        ("SKU:", ";"),
        ("[", "]"),
        ("$", "^"),
        ("(", ")"),
        ("a.b", "c*d"),
        ("{", "}+"),
    ];

    const VALUES: [&str; 3] = ["12345", "Blue Dream 3.5g", ""];

    #[test]
    fn regex_mode_returns_text_between_literals() {
        for (before, after) in LITERAL_PAIRS {
            for x in VALUES {
                let input = format!("noise {before}{x}{after} tail");
                let mode = ExtractionMode::Regex {
                    before: before.to_string(),
                    after: after.to_string(),
                };
                assert_eq!(value(mode, &input), x, "before={before:?} after={after:?}");
            }
        }
    }

    #[test]
    fn split_mode_indexes_joined_parts() {
        let parts = ["Acme Farms", "Blue Dream", "3.5g", "Flower", "Indoor"];
        for delimiter in [" - ", "|", "*", " / ", "\t"] {
            let input = parts.join(delimiter);
            for index in 1..=50u32 {
                let expected = parts.get(index as usize - 1).copied().unwrap_or("");
                let mode = ExtractionMode::Split {
                    delimiter: delimiter.to_string(),
                    index,
                };
                assert_eq!(
                    value(mode, &input),
                    expected,
                    "delimiter={delimiter:?} index={index}"
                );
            }
        }
    }

    #[test]
    fn prefix_and_suffix_round_trip() {
        for anchor in ["Vendor: ", " - ", "?", "(x)"] {
            let rest = "Acme Co 10pk";
            let prefix = ExtractionMode::Prefix {
                anchor: anchor.to_string(),
            };
            assert_eq!(value(prefix, &format!("{anchor}{rest}")), rest);

            let suffix = ExtractionMode::Suffix {
                anchor: anchor.to_string(),
            };
            assert_eq!(value(suffix, &format!("{rest}{anchor}")), rest);
        }
    }

    #[test]
    fn disabled_field_is_always_empty() {
        for kind in ModeKind::ALL {
            let spec = ExtractionSpec::disabled(kind.default_mode());
            for input in ["", "A - B - C", "Vendor: Acme"] {
                let (pattern, result) = evaluate_spec(&spec, input);
                assert!(pattern.is_none());
                assert_eq!(result, ExtractionResult::empty());
            }
        }
    }

    #[test]
    fn invalid_full_regex_reports_pattern_for_any_input() {
        for pattern in ["(abc", "abc)", "[a-", "(?P<x>"] {
            for input in ["", "abc", "(abc"] {
                let result = evaluate(&CompiledPattern::new(pattern), input);
                assert_eq!(result.value, "");
                assert_eq!(result.diagnostic.as_deref(), Some(pattern));
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let spec = ExtractionSpec::new(ExtractionMode::Regex {
            before: "SKU:".to_string(),
            after: ";".to_string(),
        });
        let pattern = compile(&spec).unwrap();
        let first = evaluate(&pattern, "Name SKU:12345; more");
        let second = evaluate(&pattern, "Name SKU:12345; more");
        assert_eq!(first, second);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn split_second_field() {
        let mode = ExtractionMode::Split {
            delimiter: " - ".to_string(),
            index: 2,
        };
        assert_eq!(value(mode, "A - B - C"), "B");
    }

    #[test]
    fn regex_sku() {
        let mode = ExtractionMode::Regex {
            before: "SKU:".to_string(),
            after: ";".to_string(),
        };
        assert_eq!(value(mode, "Name SKU:12345; more"), "12345");
    }

    #[test]
    fn prefix_vendor() {
        let mode = ExtractionMode::Prefix {
            anchor: "Vendor: ".to_string(),
        };
        assert_eq!(value(mode, "Vendor: Acme Co"), "Acme Co");
    }
}

// ============================================================================
// Rule sets
// ============================================================================

mod rule_sets {
    use super::*;

    const LINE: &str = "Acme Farms - Blue Dream 3.5g - [Flower]";

    #[test]
    fn saved_rule_set_matches_live_engine() {
        let engine = manifest_engine();
        let rule_set = engine.to_rule_set("Acme Farms", Some("Flower")).unwrap();

        let live: Vec<_> = engine
            .evaluate_all(LINE)
            .into_iter()
            .map(|r| (r.key, r.result.value))
            .collect();
        let saved: Vec<_> = rule_set
            .apply(LINE)
            .into_iter()
            .map(|r| (r.key, r.result.value))
            .collect();

        assert_eq!(live, saved);
        assert_eq!(
            saved,
            [
                ("product_name".to_string(), "Blue Dream 3.5g".to_string()),
                ("vendor_name".to_string(), "Acme Farms".to_string()),
                ("category".to_string(), "Flower".to_string()),
            ]
        );
    }

    #[test]
    fn stored_rule_set_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        let rule_set = manifest_engine().to_rule_set("Acme Farms", Some("Flower")).unwrap();
        storage.store_rule_set(&rule_set).unwrap();

        let loaded = storage
            .get_rule_set("Acme Farms", Some("Flower"))
            .unwrap()
            .expect("rule set should be stored");
        assert_eq!(loaded.id, rule_set.id);
        assert_eq!(loaded.vendor, "Acme Farms");
        assert_eq!(loaded.subcategory.as_deref(), Some("Flower"));
        assert_eq!(loaded.fingerprint, rule_set.fingerprint);
        assert_eq!(loaded.values(LINE), rule_set.values(LINE));
        assert_eq!(loaded.file_stem(), rule_file_stem("Acme Farms", Some("Flower")));
    }

    #[test]
    fn config_fields_drive_the_engine() {
        let yaml = r#"
fields:
  - name: Product Name
    enabled: true
    mode: Split
    index: 2
  - name: Vendor Name
    enabled: true
    mode: Full Regex
    pattern: '^(\w+)'
  - name: Category
    enabled: false
    mode: Prefix
    anchor: "["
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        let results = ExtractionEngine::from_config(&config).evaluate_all(LINE);

        assert_eq!(results[0].result.value, "Blue Dream 3.5g");
        assert_eq!(results[1].result.value, "Acme");
        assert_eq!(results[2].result.value, "");
        assert!(results[2].pattern.is_none());
    }
}
